//! The individual compositing passes.
//!
//! Passes run in a fixed order. Each draws into the shared canvas and may
//! read the icon mask from the context.

use image::GrayImage;
use resvg::tiny_skia::{
    BlendMode as SkBlendMode, FilterQuality, Paint, Pattern as SkPattern, PixmapPaint, Point,
    SpreadMode, Transform,
};

use super::alpha;
use super::pixels::{rgba_image_to_pixmap, tint};
use super::RenderContext;
use crate::error::RenderError;
use crate::icon::IconImage;
use crate::style::{to_skia_color, BlendMode, Color, DrawingHook, Gradient, Offset, Pattern};

/// One step of the compositing pipeline.
pub(crate) trait Pass {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError>;
}

// ============================================================================
// Body
// ============================================================================

/// Flat color or vertical gradient clipped to the mask. The gradient spans
/// the covered area, not the canvas.
pub(crate) struct FillPass<'a> {
    pub gradient: Option<&'a Gradient>,
    pub color: Color,
}

impl Pass for FillPass<'_> {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let shape = ctx.shape;
        let mid = shape.left() + shape.width() / 2.0;
        let shader = self.gradient.and_then(|gradient| {
            gradient.shader(Point::from_xy(mid, shape.top()), Point::from_xy(mid, shape.bottom()))
        });

        let mut paint = Paint::default();
        match shader {
            Some(shader) => paint.shader = shader,
            None => paint.set_color(to_skia_color(self.color)),
        }
        ctx.pixmap
            .fill_rect(ctx.bounds, &paint, Transform::identity(), Some(&ctx.clip));
        Ok(())
    }
}

/// Pattern color or tiled image, clipped to the mask.
pub(crate) struct PatternPass<'a> {
    pub pattern: &'a Pattern,
    pub blend_mode: BlendMode,
}

impl Pass for PatternPass<'_> {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let blend_mode = self.blend_mode.to_skia();
        match self.pattern {
            Pattern::Color(color) => {
                let mut paint = Paint {
                    blend_mode,
                    ..Paint::default()
                };
                paint.set_color(to_skia_color(*color));
                ctx.pixmap
                    .fill_rect(ctx.bounds, &paint, Transform::identity(), Some(&ctx.clip));
            }
            Pattern::Image(image) => {
                let Some(tile) = rgba_image_to_pixmap(&image.data) else {
                    return Ok(());
                };
                let s = ctx.scale / image.scale;
                let paint = Paint {
                    shader: SkPattern::new(
                        tile.as_ref(),
                        SpreadMode::Repeat,
                        FilterQuality::Bicubic,
                        1.0,
                        Transform::from_scale(s, s),
                    ),
                    blend_mode,
                    ..Paint::default()
                };
                ctx.pixmap
                    .fill_rect(ctx.bounds, &paint, Transform::identity(), Some(&ctx.clip));
            }
        }
        Ok(())
    }
}

/// An image stretched over the full canvas.
pub(crate) struct OverlayPass<'a> {
    pub overlay: &'a IconImage,
    pub blend_mode: BlendMode,
}

impl Pass for OverlayPass<'_> {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let Some(overlay) = rgba_image_to_pixmap(&self.overlay.data) else {
            return Ok(());
        };
        let sx = ctx.bounds.width() / overlay.width() as f32;
        let sy = ctx.bounds.height() / overlay.height() as f32;
        let paint = PixmapPaint {
            blend_mode: self.blend_mode.to_skia(),
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        ctx.pixmap
            .draw_pixmap(0, 0, overlay.as_ref(), &paint, Transform::from_scale(sx, sy), None);
        Ok(())
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Halo outside the mask, drawn beneath the body.
pub(crate) struct OuterGlowPass {
    pub color: Color,
    pub radius: f32,
}

impl Pass for OuterGlowPass {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let radius = self.radius * ctx.scale;
        let spread = alpha::dilate(ctx.mask, (radius / 2.0).ceil() as u32);
        let halo = alpha::blur(&spread, radius / 2.0);
        let outside = alpha::multiply(&halo, &alpha::invert(ctx.mask));
        ctx.draw_beneath(&outside, self.color);
        Ok(())
    }
}

/// Drop shadow, drawn beneath the body.
pub(crate) struct ShadowPass {
    pub color: Color,
    pub offset: Offset,
    pub blur: f32,
    pub clips: bool,
}

impl Pass for ShadowPass {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let (dx, dy) = self.offset.to_pixels(ctx.scale);
        let mut shadow = alpha::offset(ctx.mask, dx, dy, 0);
        shadow = alpha::blur(&shadow, self.blur * ctx.scale / 2.0);
        if self.clips {
            shadow = alpha::multiply(&shadow, &alpha::invert(ctx.mask));
        }
        ctx.draw_beneath(&shadow, self.color);
        Ok(())
    }
}

/// Shadow cast inward from the offset direction.
pub(crate) struct InnerShadowPass {
    pub color: Color,
    pub offset: Offset,
}

impl Pass for InnerShadowPass {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let (dx, dy) = self.offset.to_pixels(ctx.scale);
        let outside = alpha::offset(&alpha::invert(ctx.mask), dx, dy, 255);
        let shadow = alpha::multiply(&outside, ctx.mask);
        ctx.draw_above(&shadow, self.color);
        Ok(())
    }
}

/// Glow along the inside edge of the mask.
pub(crate) struct InnerGlowPass {
    pub color: Color,
    pub radius: f32,
}

impl Pass for InnerGlowPass {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let radius = self.radius * ctx.scale;
        let core = alpha::erode(ctx.mask, radius.ceil() as u32);
        let rim = alpha::blur(&alpha::subtract(ctx.mask, &core), radius / 2.0);
        let glow = alpha::multiply(&rim, ctx.mask);
        ctx.draw_above(&glow, self.color);
        Ok(())
    }
}

/// Caller-supplied drawing, run last.
pub(crate) struct HookPass<'a> {
    pub hook: &'a DrawingHook,
}

impl Pass for HookPass<'_> {
    fn draw(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        self.hook.call(&mut ctx.pixmap).map_err(RenderError::Hook)
    }
}

impl RenderContext<'_> {
    fn draw_beneath(&mut self, coverage: &GrayImage, color: Color) {
        self.draw_tinted(coverage, color, SkBlendMode::DestinationOver);
    }

    fn draw_above(&mut self, coverage: &GrayImage, color: Color) {
        self.draw_tinted(coverage, color, SkBlendMode::SourceOver);
    }

    fn draw_tinted(
        &mut self,
        coverage: &GrayImage,
        color: Color,
        blend_mode: SkBlendMode,
    ) {
        let Some(layer) = tint(coverage, color) else {
            return;
        };
        let paint = PixmapPaint {
            blend_mode,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);
    }
}
