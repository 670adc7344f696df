//! Vector mask sources rendered with resvg/usvg.

use std::fmt;
use std::sync::Arc;

use image::GrayImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::MaskError;
use crate::icon::{Size, SizePx};

// ============================================================================
// VectorDocument
// ============================================================================

/// A parsed vector document.
///
/// Documents are addressed by page; an SVG document always has a single page
/// at index 0.
///
/// # Example
///
/// ```
/// use mask_icon::VectorDocument;
///
/// let doc = VectorDocument::from_svg(
///     r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><rect width="24" height="24"/></svg>"#,
/// ).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
#[derive(Clone)]
pub struct VectorDocument {
    tree: Arc<Tree>,
}

impl VectorDocument {
    /// Parses SVG markup.
    pub fn from_svg(svg: &str) -> Result<Self, MaskError> {
        let tree = Tree::from_str(svg, &Options::default())?;
        Ok(Self {
            tree: Arc::new(tree),
        })
    }

    /// Parses SVG (or gzip-compressed SVGZ) bytes.
    pub fn from_data(data: &[u8]) -> Result<Self, MaskError> {
        let tree = Tree::from_data(data, &Options::default())?;
        Ok(Self {
            tree: Arc::new(tree),
        })
    }

    /// Number of addressable pages.
    pub fn page_count(&self) -> usize {
        1
    }

    /// The document's intrinsic size in points.
    pub fn natural_size(&self) -> Size {
        let size = self.tree.size();
        Size::new(size.width(), size.height())
    }

    /// Rasterizes `page` into a coverage bitmap of `target` pixels.
    ///
    /// The page is scaled to fit while preserving aspect ratio and centered.
    pub(crate) fn render_alpha(&self, page: usize, target: SizePx) -> Result<GrayImage, MaskError> {
        if page >= self.page_count() {
            return Err(MaskError::NoSuchPage(page));
        }

        let mut pixmap = Pixmap::new(target.width, target.height).ok_or(MaskError::EmptySize)?;

        let natural = self.natural_size();
        let scale = (target.width as f32 / natural.width).min(target.height as f32 / natural.height);
        let tx = (target.width as f32 - natural.width * scale) / 2.0;
        let ty = (target.height as f32 - natural.height * scale) / 2.0;
        let transform = Transform::from_row(scale, 0.0, 0.0, scale, tx, ty);

        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        // Alpha is not affected by premultiplication.
        let alpha: Vec<u8> = pixmap.pixels().iter().map(|p| p.alpha()).collect();
        GrayImage::from_raw(target.width, target.height, alpha).ok_or(MaskError::EmptySize)
    }
}

impl fmt::Debug for VectorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorDocument")
            .field("natural_size", &self.natural_size())
            .finish()
    }
}
