//! Named resource lookup in a resource directory.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;

use crate::error::{MaskError, ResourceListError};
use crate::mask::{VectorDocument, alpha_of};

// ============================================================================
// ResourceKind
// ============================================================================

/// How a named resource is rasterized, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Raster,
    Vector,
}

impl ResourceKind {
    /// Classifies a path by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" | "svgz" => Some(Self::Vector),
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tif" | "tiff" | "ico" => {
                Some(Self::Raster)
            }
            _ => None,
        }
    }
}

/// A resource located on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedResource {
    pub path: PathBuf,
    pub kind: ResourceKind,
    /// Scale encoded in the file name (`icon@2x.png` is 2.0), 1.0 otherwise.
    pub scale: f32,
}

// ============================================================================
// Bundle
// ============================================================================

/// A directory of named resources.
///
/// A name with an extension is looked up as-is. A bare name is tried as
/// `name@Nx.png` for the active integer scale `N`, then `name.png`, then
/// `name.svg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locates `name`, accepting only resources of the given kinds.
    pub fn resolve(
        &self,
        name: &str,
        kinds: &[ResourceKind],
        scale: f32,
    ) -> Result<ResolvedResource, MaskError> {
        if Path::new(name).extension().is_some() {
            let path = self.root.join(name);
            if !path.is_file() {
                return Err(MaskError::ResourceNotFound(name.to_string()));
            }
            return match ResourceKind::from_path(&path) {
                Some(kind) if kinds.contains(&kind) => Ok(ResolvedResource {
                    scale: scale_from_file_name(&path),
                    path,
                    kind,
                }),
                _ => Err(MaskError::UnsupportedResource(name.to_string())),
            };
        }

        for (file_name, kind) in candidates(name, kinds, scale) {
            let path = self.root.join(&file_name);
            if path.is_file() {
                return Ok(ResolvedResource {
                    scale: scale_from_file_name(&path),
                    path,
                    kind,
                });
            }
        }

        Err(MaskError::ResourceNotFound(name.to_string()))
    }

    /// Decodes a raster resource into a coverage bitmap and its scale.
    ///
    /// Images with an alpha channel contribute their alpha; images without
    /// one contribute their luminance.
    pub fn load_raster(&self, resource: &ResolvedResource) -> Result<(GrayImage, f32), MaskError> {
        let bytes = read(&resource.path)?;
        let decoded = image::load_from_memory(&bytes)?;
        let alpha = if decoded.color().has_alpha() {
            alpha_of(&decoded.to_rgba8())
        } else {
            decoded.to_luma8()
        };
        Ok((alpha, resource.scale))
    }

    /// Parses a vector resource.
    pub fn load_vector(&self, resource: &ResolvedResource) -> Result<VectorDocument, MaskError> {
        let bytes = read(&resource.path)?;
        VectorDocument::from_data(&bytes)
    }

    /// Locates a resource name list (`name` or `name.json`).
    pub fn resolve_list(&self, name: &str) -> Result<PathBuf, ResourceListError> {
        let direct = self.root.join(name);
        if direct.is_file() {
            return Ok(direct);
        }
        let json = self.root.join(format!("{name}.json"));
        if json.is_file() {
            return Ok(json);
        }
        Err(ResourceListError::NotFound(name.to_string()))
    }
}

fn read(path: &Path) -> Result<Vec<u8>, MaskError> {
    fs::read(path).map_err(|source| MaskError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn candidates(name: &str, kinds: &[ResourceKind], scale: f32) -> Vec<(String, ResourceKind)> {
    let mut out = Vec::new();
    if kinds.contains(&ResourceKind::Raster) {
        let factor = scale.ceil() as u32;
        if factor > 1 {
            out.push((format!("{name}@{factor}x.png"), ResourceKind::Raster));
        }
        out.push((format!("{name}.png"), ResourceKind::Raster));
    }
    if kinds.contains(&ResourceKind::Vector) {
        out.push((format!("{name}.svg"), ResourceKind::Vector));
    }
    out
}

/// Parses the `@Nx` suffix of a file stem.
fn scale_from_file_name(path: &Path) -> f32 {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit_once('@'))
        .and_then(|(_, suffix)| suffix.strip_suffix('x'))
        .and_then(|factor| factor.parse::<f32>().ok())
        .filter(|factor| *factor > 0.0)
        .unwrap_or(1.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) const CIRCLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"><circle cx="8" cy="8" r="6" fill="#000000"/></svg>"##;

    /// A fresh directory under the system temp dir, removed on drop.
    pub(crate) struct TempBundle {
        pub(crate) dir: PathBuf,
    }

    impl TempBundle {
        pub(crate) fn new() -> Self {
            static COUNTER: AtomicUsize = AtomicUsize::new(0);
            let dir = std::env::temp_dir().join(format!(
                "mask-icon-test-{}-{}",
                std::process::id(),
                COUNTER.fetch_add(1, Ordering::SeqCst)
            ));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        pub(crate) fn bundle(&self) -> Bundle {
            Bundle::new(&self.dir)
        }

        pub(crate) fn write(&self, name: &str, bytes: &[u8]) {
            fs::write(self.dir.join(name), bytes).unwrap();
        }

        pub(crate) fn write_png(&self, name: &str, image: &RgbaImage) {
            image.save(self.dir.join(name)).unwrap();
        }
    }

    impl Drop for TempBundle {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn kind_from_extension() {
        assert_eq!(ResourceKind::from_path(Path::new("a.SVG")), Some(ResourceKind::Vector));
        assert_eq!(ResourceKind::from_path(Path::new("a.png")), Some(ResourceKind::Raster));
        assert_eq!(ResourceKind::from_path(Path::new("a.pdf")), None);
        assert_eq!(ResourceKind::from_path(Path::new("a")), None);
    }

    #[test]
    fn scale_suffix() {
        assert_eq!(scale_from_file_name(Path::new("icon@2x.png")), 2.0);
        assert_eq!(scale_from_file_name(Path::new("icon.png")), 1.0);
        assert_eq!(scale_from_file_name(Path::new("me@home.png")), 1.0);
    }

    #[test]
    fn resolves_by_extension() {
        let tmp = TempBundle::new();
        tmp.write("Icon1.svg", CIRCLE_SVG.as_bytes());
        let bundle = tmp.bundle();

        let all = [ResourceKind::Raster, ResourceKind::Vector];
        let resolved = bundle.resolve("Icon1.svg", &all, 1.0).unwrap();
        assert_eq!(resolved.kind, ResourceKind::Vector);

        let bare = bundle.resolve("Icon1", &all, 1.0).unwrap();
        assert_eq!(bare.path, resolved.path);

        assert!(matches!(
            bundle.resolve("Icon1.svg", &[ResourceKind::Raster], 1.0),
            Err(MaskError::UnsupportedResource(_))
        ));
        assert!(matches!(
            bundle.resolve("Missing", &all, 1.0),
            Err(MaskError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn pdf_resources_are_unsupported() {
        let tmp = TempBundle::new();
        tmp.write("Icon.pdf", b"%PDF-1.4");
        let all = [ResourceKind::Raster, ResourceKind::Vector];
        assert!(matches!(
            tmp.bundle().resolve("Icon.pdf", &all, 1.0),
            Err(MaskError::UnsupportedResource(_))
        ));
    }

    #[test]
    fn prefers_scaled_raster_variant() {
        let tmp = TempBundle::new();
        tmp.write_png("Star.png", &RgbaImage::new(4, 4));
        tmp.write_png("Star@2x.png", &RgbaImage::new(8, 8));
        let bundle = tmp.bundle();

        let at2 = bundle.resolve("Star", &[ResourceKind::Raster], 2.0).unwrap();
        assert_eq!(at2.scale, 2.0);
        let at1 = bundle.resolve("Star", &[ResourceKind::Raster], 1.0).unwrap();
        assert_eq!(at1.scale, 1.0);
    }

    #[test]
    fn raster_alpha_is_extracted() {
        let tmp = TempBundle::new();
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
        tmp.write_png("Dot.png", &img);

        let bundle = tmp.bundle();
        let resolved = bundle.resolve("Dot.png", &[ResourceKind::Raster], 1.0).unwrap();
        let (alpha, scale) = bundle.load_raster(&resolved).unwrap();
        assert_eq!(scale, 1.0);
        assert_eq!(alpha.get_pixel(0, 0)[0], 255);
        assert_eq!(alpha.get_pixel(1, 0)[0], 0);
    }

    #[test]
    fn list_resolution() {
        let tmp = TempBundle::new();
        tmp.write("Icons.json", br#"["Icon1"]"#);
        let bundle = tmp.bundle();
        assert!(bundle.resolve_list("Icons").is_ok());
        assert!(bundle.resolve_list("Icons.json").is_ok());
        assert!(matches!(
            bundle.resolve_list("Other"),
            Err(ResourceListError::NotFound(_))
        ));
    }
}
