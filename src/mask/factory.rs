//! Mask creation from bitmaps, vector documents and bundle resources.

use image::GrayImage;
use image::imageops::{self, FilterType};

use super::vector::VectorDocument;
use super::{Mask, MaskKey, alpha_of};
use crate::bundle::{Bundle, ResourceKind};
use crate::error::MaskError;
use crate::icon::{IconImage, Size};

// ============================================================================
// MaskSource
// ============================================================================

/// Where a mask comes from.
#[derive(Debug, Clone)]
pub enum MaskSource {
    /// An in-memory bitmap; its alpha channel becomes the mask.
    Image(IconImage),

    /// A page of an in-memory vector document.
    Vector { document: VectorDocument, page: usize },

    /// A raster image in the bundle.
    ImageNamed(String),

    /// A vector document in the bundle (first page).
    VectorNamed(String),

    /// A bundle resource whose kind is decided by its extension.
    ResourceNamed(String),
}

impl MaskSource {
    /// Creates a source rendering the first page of `document`.
    pub fn vector(document: VectorDocument) -> Self {
        Self::Vector { document, page: 0 }
    }

    /// Creates a source for a bundle resource resolved by extension.
    pub fn resource(name: impl Into<String>) -> Self {
        Self::ResourceNamed(name.into())
    }

    /// The name used in cache keys. In-memory sources have none and are not cached.
    pub fn cache_name(&self) -> Option<&str> {
        match self {
            Self::ImageNamed(name) | Self::VectorNamed(name) | Self::ResourceNamed(name) => {
                Some(name)
            }
            Self::Image(_) | Self::Vector { .. } => None,
        }
    }

    /// Resource kinds a named source may resolve to, in preference order.
    fn resource_kinds(&self) -> &'static [ResourceKind] {
        match self {
            Self::ImageNamed(_) => &[ResourceKind::Raster],
            Self::VectorNamed(_) => &[ResourceKind::Vector],
            _ => &[ResourceKind::Raster, ResourceKind::Vector],
        }
    }
}

impl From<IconImage> for MaskSource {
    fn from(image: IconImage) -> Self {
        Self::Image(image)
    }
}

impl From<VectorDocument> for MaskSource {
    fn from(document: VectorDocument) -> Self {
        Self::vector(document)
    }
}

// ============================================================================
// MaskFactory
// ============================================================================

/// Rasterizes mask sources at the active display scale.
#[derive(Debug, Clone)]
pub struct MaskFactory {
    scale: f32,
    bundle: Bundle,
}

impl MaskFactory {
    pub fn new(scale: f32, bundle: Bundle) -> Self {
        Self { scale, bundle }
    }

    /// The display scale masks are rasterized at.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Cache key for `source` at `size`, if the source is cacheable.
    pub fn key_for(&self, source: &MaskSource, size: Size) -> Option<MaskKey> {
        let name = source.cache_name()?;
        let key = MaskKey::new(name, size, self.scale);
        Some(match source.resource_kinds() {
            [kind] => key.with_kind(*kind),
            _ => key,
        })
    }

    /// Produces a mask for `source`.
    ///
    /// A zero `size` means the source's natural size. The mask has
    /// `size * scale` pixels.
    pub fn create_mask(&self, source: &MaskSource, size: Size) -> Result<Mask, MaskError> {
        match source {
            MaskSource::Image(image) => {
                self.mask_from_alpha(alpha_of(&image.data), image.logical_size(), size)
            }
            MaskSource::Vector { document, page } => self.mask_from_vector(document, *page, size),
            MaskSource::ImageNamed(name)
            | MaskSource::VectorNamed(name)
            | MaskSource::ResourceNamed(name) => {
                self.mask_from_resource(name, source.resource_kinds(), size)
            }
        }
    }

    fn mask_from_resource(
        &self,
        name: &str,
        kinds: &[ResourceKind],
        size: Size,
    ) -> Result<Mask, MaskError> {
        let resource = self.bundle.resolve(name, kinds, self.scale)?;
        match resource.kind {
            ResourceKind::Raster => {
                let (alpha, source_scale) = self.bundle.load_raster(&resource)?;
                let natural = Size::new(
                    alpha.width() as f32 / source_scale,
                    alpha.height() as f32 / source_scale,
                );
                self.mask_from_alpha(alpha, natural, size)
            }
            ResourceKind::Vector => {
                let document = self.bundle.load_vector(&resource)?;
                self.mask_from_vector(&document, 0, size)
            }
        }
    }

    fn mask_from_alpha(&self, alpha: GrayImage, natural: Size, size: Size) -> Result<Mask, MaskError> {
        let target = if size.is_zero() { natural } else { size }.to_pixels(self.scale);
        if target.is_empty() || alpha.width() == 0 || alpha.height() == 0 {
            return Err(MaskError::EmptySize);
        }

        let alpha = if alpha.dimensions() == (target.width, target.height) {
            alpha
        } else {
            imageops::resize(&alpha, target.width, target.height, FilterType::CatmullRom)
        };
        Ok(Mask::new(alpha, self.scale))
    }

    fn mask_from_vector(
        &self,
        document: &VectorDocument,
        page: usize,
        size: Size,
    ) -> Result<Mask, MaskError> {
        let size = if size.is_zero() { document.natural_size() } else { size };
        let target = size.to_pixels(self.scale);
        if target.is_empty() {
            return Err(MaskError::EmptySize);
        }
        let alpha = document.render_alpha(page, target)?;
        Ok(Mask::new(alpha, self.scale))
    }
}
