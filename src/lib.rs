//! mask-icon: styled icons drawn through alpha masks
//!
//! An icon is a [`Mask`] (an 8-bit coverage bitmap made from a raster image,
//! an SVG document or a named bundle resource) filled with a [`StyleState`]:
//! a flat color or gradient, an optional pattern and overlay, drop and inner
//! shadows, inner and outer glows, and an optional custom drawing step.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use mask_icon::{Color, IconContext, IconImage, IconView, Offset, Size, StyleTrait};
//!
//! let context = IconContext::default();
//!
//! // Any image with an alpha channel can serve as a mask.
//! let square = RgbaImage::from_fn(32, 32, |x, y| {
//!     let inside = (8..24).contains(&x) && (8..24).contains(&y);
//!     Rgba([0, 0, 0, if inside { 255 } else { 0 }])
//! });
//! let mut view = IconView::with_source(&context, IconImage::new_full_content(square, 1.0), Size::ZERO);
//!
//! let style = StyleTrait::new()
//!     .with_gradient_colors(vec![Color::new(0, 0, 255, 255), Color::new(0, 255, 0, 255)])
//!     .with_shadow(Color::new(0, 0, 0, 128), Offset::new(0.0, 2.0));
//! view.mix_in_trait(&style).unwrap();
//!
//! let image = view.draw().unwrap();
//! assert_eq!(image.dimensions().width, 32);
//! ```
//!
//! # Shared Resources
//!
//! Masks for named resources are cached in a [`MaskCache`] owned by the
//! [`IconContext`]. Names listed in a registered [`ResourceList`] are pinned
//! in the cache, and a list can be pre-rendered on a background thread:
//!
//! ```no_run
//! use std::sync::Arc;
//! use mask_icon::{IconContext, RenderConfig, ResourceList};
//!
//! let context = IconContext::new(&RenderConfig::from_file("icons.json").unwrap());
//! let list = Arc::new(ResourceList::from_plist_named(context.factory().bundle(), "Toolbar").unwrap());
//! context.registry().register_list(Arc::clone(&list));
//!
//! if let Some(handle) = list.render_in_background(&context) {
//!     let report = handle.wait().unwrap();
//!     println!("rendered {} masks", report.rendered);
//! }
//! ```

mod bundle;
mod cache;
mod config;
mod context;
mod error;
mod icon;
mod mask;
mod registry;
mod render;
mod style;
mod view;

pub use bundle::{Bundle, ResolvedResource, ResourceKind};
pub use cache::{DEFAULT_CACHE_BUDGET, MaskCache};
pub use config::RenderConfig;
pub use context::IconContext;
pub use error::{ConfigError, HookError, MaskError, RenderError, ResourceListError, StyleError};
pub use icon::{IconImage, RectPx, Size, SizePx};
pub use mask::{Mask, MaskFactory, MaskKey, MaskSource, VectorDocument};
pub use registry::{PrewarmHandle, PrewarmReport, RenderQueue, ResourceList, ResourceRegistry};
pub use render::CompositeRenderer;
pub use style::{
    BlendMode, Color, DrawingHook, Gradient, GradientSource, GradientType, Offset, Pattern,
    StyleState, StyleTrait,
};
pub use view::IconView;

/// The drawing surface types passed to [`DrawingHook`]s.
pub use resvg::tiny_skia;
