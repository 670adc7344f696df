//! Alpha masks and their identity keys.
//!
//! A [`Mask`] is an 8-bit coverage bitmap at device resolution. Masks are
//! immutable once created and are shared through `Arc` between views and the
//! [`MaskCache`](crate::MaskCache).

pub mod factory;
pub mod vector;

pub use factory::{MaskFactory, MaskSource};
pub use vector::VectorDocument;

use std::fmt;

use image::{GrayImage, Luma, RgbaImage};

use crate::bundle::ResourceKind;
use crate::icon::{RectPx, Size, SizePx};

// ============================================================================
// Mask
// ============================================================================

/// A single-channel coverage bitmap used as a stencil for compositing.
///
/// A value of 255 means "fully inside the icon", 0 means "outside".
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    alpha: GrayImage,
    scale: f32,
}

impl Mask {
    /// Wraps an existing coverage bitmap rasterized at `scale`.
    pub fn new(alpha: GrayImage, scale: f32) -> Self {
        Self { alpha, scale }
    }

    /// Builds a mask by evaluating `coverage` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        scale: f32,
        mut coverage: impl FnMut(u32, u32) -> u8,
    ) -> Self {
        let alpha = GrayImage::from_fn(width, height, |x, y| Luma([coverage(x, y)]));
        Self::new(alpha, scale)
    }

    /// The coverage bitmap.
    pub fn alpha(&self) -> &GrayImage {
        &self.alpha
    }

    /// The display scale the mask was rasterized at.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Pixel dimensions.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.alpha.width(), self.alpha.height())
    }

    /// Size in points.
    pub fn size(&self) -> Size {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        Size::new(
            self.alpha.width() as f32 / scale,
            self.alpha.height() as f32 / scale,
        )
    }

    /// Returns true if the mask has no pixels.
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Size of the backing buffer in bytes. Used as the cache cost.
    pub fn cost(&self) -> usize {
        self.alpha.as_raw().len()
    }

    /// Coverage at a pixel. Out-of-bounds pixels have no coverage.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x < self.alpha.width() && y < self.alpha.height() {
            self.alpha.get_pixel(x, y)[0]
        } else {
            0
        }
    }

    /// Pixel bounds of the covered region, or `None` if nothing is covered.
    pub fn bounding_box(&self) -> Option<RectPx> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;

        for (x, y, pixel) in self.alpha.enumerate_pixels() {
            if pixel[0] > 0 {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        if min_x == u32::MAX {
            return None;
        }
        Some(RectPx::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }
}

/// Extracts the alpha channel of an RGBA image.
pub(crate) fn alpha_of(rgba: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([rgba.get_pixel(x, y)[3]])
    })
}

// ============================================================================
// MaskKey
// ============================================================================

/// Identity of a rasterized mask: source name, resource kind, requested
/// size and scale.
///
/// Uses the bit patterns of the float components so the key is hashable.
/// [`Size::ZERO`] stands for "natural size" and is kept distinct from any
/// explicit size. The kind is `None` when the source may resolve to either
/// kind, so `Icon1` as an image, as a vector and as a plain resource are
/// three different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaskKey {
    name: String,
    kind: Option<ResourceKind>,
    width_bits: u32,
    height_bits: u32,
    scale_bits: u32,
}

impl MaskKey {
    /// Creates a key for resource `name`, of either kind, rasterized at
    /// `size` points and `scale`.
    pub fn new(name: impl Into<String>, size: Size, scale: f32) -> Self {
        let size = if size.is_zero() { Size::ZERO } else { size };
        Self {
            name: name.into(),
            kind: None,
            width_bits: size.width.to_bits(),
            height_bits: size.height.to_bits(),
            scale_bits: scale.to_bits(),
        }
    }

    /// Restricts the key to resources of one kind.
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The resource name component, used for pinning decisions.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        self.kind
    }

    pub fn size(&self) -> Size {
        Size::new(
            f32::from_bits(self.width_bits),
            f32::from_bits(self.height_bits),
        )
    }

    pub fn scale(&self) -> f32 {
        f32::from_bits(self.scale_bits)
    }
}

impl fmt::Display for MaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(ResourceKind::Raster) => f.write_str("image:")?,
            Some(ResourceKind::Vector) => f.write_str("vector:")?,
            None => {}
        }
        let size = self.size();
        write!(
            f,
            "{}@{}x{}@{}x",
            self.name,
            size.width,
            size.height,
            self.scale()
        )
    }
}
