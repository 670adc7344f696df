//! A styled, masked icon.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::IconContext;
use crate::error::{MaskError, RenderError, StyleError};
use crate::icon::{IconImage, Size};
use crate::mask::{Mask, MaskSource};
use crate::render::CompositeRenderer;
use crate::style::{StyleState, StyleTrait};

/// Key for rendered output.
///
/// The scale is stored as its bit pattern so the key can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RenderKey {
    highlighted: bool,
    width: u32,
    height: u32,
    scale_bits: u32,
}

impl RenderKey {
    fn new(mask: &Mask, highlighted: bool) -> Self {
        let (width, height) = mask.alpha().dimensions();
        Self {
            highlighted,
            width,
            height,
            scale_bits: mask.scale().to_bits(),
        }
    }
}

/// Rendered images for the current mask and style.
#[derive(Debug, Default)]
struct OutputCache {
    version: u64,
    images: HashMap<RenderKey, IconImage>,
}

impl OutputCache {
    fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.images.clear();
    }
}

/// An icon drawn by filling a mask with a style.
///
/// The view owns its style and holds a shared reference to its mask. Masks
/// for named sources come from the context's cache. Views are meant to be
/// owned and mutated by one thread.
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use mask_icon::{Color, IconContext, IconImage, IconView, Size};
///
/// let context = IconContext::default();
/// let disc = RgbaImage::from_fn(16, 16, |x, y| {
///     let (dx, dy) = (x as i32 - 8, y as i32 - 8);
///     Rgba([0, 0, 0, if dx * dx + dy * dy < 36 { 255 } else { 0 }])
/// });
///
/// let mut view = IconView::with_source(&context, IconImage::new_full_content(disc, 1.0), Size::ZERO);
/// view.style_mut().set_color(Color::new(255, 0, 0, 255));
///
/// let image = view.draw().unwrap();
/// assert_eq!(image.data.get_pixel(8, 8).0, [255, 0, 0, 255]);
/// assert_eq!(image.data.get_pixel(0, 0).0[3], 0);
/// ```
#[derive(Debug)]
pub struct IconView {
    context: IconContext,
    renderer: CompositeRenderer,
    source: Option<MaskSource>,
    size: Size,
    mask: Option<Arc<Mask>>,
    style: StyleState,
    highlighted: bool,
    needs_display: bool,
    output: OutputCache,
}

impl IconView {
    /// Creates a view with no mask. It draws nothing until configured.
    pub fn new(context: &IconContext) -> Self {
        Self {
            context: context.clone(),
            renderer: CompositeRenderer::new(),
            source: None,
            size: Size::ZERO,
            mask: None,
            style: StyleState::default(),
            highlighted: false,
            needs_display: true,
            output: OutputCache::default(),
        }
    }

    /// Creates a view and configures it with `source`.
    ///
    /// A source that cannot be turned into a mask leaves the view empty.
    pub fn with_source(context: &IconContext, source: impl Into<MaskSource>, size: Size) -> Self {
        let mut view = Self::new(context);
        // Failure is logged by `configure` and leaves the view empty.
        let _ = view.configure(source, size);
        view
    }

    /// Replaces the mask with one built from `source` at `size` points.
    ///
    /// `Size::ZERO` uses the source's natural size. On failure the view is
    /// left with no mask and draws nothing.
    pub fn configure(&mut self, source: impl Into<MaskSource>, size: Size) -> Result<(), MaskError> {
        let source = source.into();
        let result = self.context.mask_for(&source, size);

        self.source = Some(source);
        self.size = size;
        self.style.invalidate_gradient();
        self.invalidate();

        match result {
            Ok(mask) => {
                self.mask = Some(mask);
                Ok(())
            }
            Err(err) => {
                log::warn!("icon view has no mask: {err}");
                self.mask = None;
                Err(err)
            }
        }
    }

    /// The configured source, if any.
    pub fn source(&self) -> Option<&MaskSource> {
        self.source.as_ref()
    }

    pub fn mask(&self) -> Option<&Arc<Mask>> {
        self.mask.as_ref()
    }

    /// Size in points: the configured size, or the mask's natural size.
    pub fn size(&self) -> Size {
        match &self.mask {
            Some(mask) if self.size.is_zero() => mask.size(),
            _ => self.size,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.highlighted != highlighted {
            self.highlighted = highlighted;
            self.needs_display = true;
        }
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Mutable access to the style. Invalidates rendered output.
    pub fn style_mut(&mut self) -> &mut StyleState {
        self.invalidate();
        &mut self.style
    }

    /// Snapshot of the current style.
    pub fn style_trait(&self) -> StyleTrait {
        self.style.to_trait()
    }

    /// Replaces the style with defaults plus `style`.
    pub fn set_style_trait(&mut self, style: &StyleTrait) -> Result<(), StyleError> {
        let state = StyleState::from_trait(style).inspect_err(|err| {
            log::warn!("rejected style: {err}");
        })?;
        self.style = state;
        self.invalidate();
        Ok(())
    }

    /// Applies the fields set in `style` on top of the current style.
    pub fn mix_in_trait(&mut self, style: &StyleTrait) -> Result<(), StyleError> {
        self.style.mix_in_trait(style).inspect_err(|err| {
            log::warn!("rejected style: {err}");
        })?;
        self.invalidate();
        Ok(())
    }

    /// Returns true if the view changed since it was last drawn.
    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Counter bumped whenever the mask, style or state changes.
    pub fn version(&self) -> u64 {
        self.output.version
    }

    /// Marks the view as changed and drops rendered output.
    pub fn invalidate(&mut self) {
        self.output.invalidate();
        self.needs_display = true;
    }

    /// Renders the view in its current highlight state.
    pub fn draw(&mut self) -> Result<IconImage, RenderError> {
        let image = self.render(self.highlighted)?;
        self.needs_display = false;
        Ok(image)
    }

    /// Renders the unhighlighted appearance.
    pub fn render_image(&mut self) -> Result<IconImage, RenderError> {
        self.render(false)
    }

    /// Renders the highlighted appearance.
    pub fn render_highlighted_image(&mut self) -> Result<IconImage, RenderError> {
        self.render(true)
    }

    fn render(&mut self, highlighted: bool) -> Result<IconImage, RenderError> {
        let Some(mask) = self.mask.clone() else {
            return Ok(IconImage::empty(self.context.scale()));
        };
        // Hooks may draw differently every time.
        if self.style.drawing_hook().is_some() {
            return self.renderer.render(Some(&mask), &self.style, highlighted);
        }

        let key = RenderKey::new(&mask, highlighted);
        if let Some(image) = self.output.images.get(&key) {
            return Ok(image.clone());
        }
        let image = self.renderer.render(Some(&mask), &self.style, highlighted)?;
        self.output.images.insert(key, image.clone());
        Ok(image)
    }
}
