//! Compositing a mask and a style into an icon image.
//!
//! The canvas is the mask's pixel size. Passes run in this order, each one
//! skipped when its style fields are unset:
//!
//! 1. fill: flat color, or the gradient from the top to the bottom of the
//!    covered area, clipped to the mask
//! 2. pattern, clipped to the mask
//! 3. overlay, stretched over the canvas
//! 4. outer glow, beneath the body
//! 5. drop shadow, beneath the body
//! 6. inner shadow
//! 7. inner glow
//! 8. drawing hook
//!
//! Lengths in the style are in points and are multiplied by the mask scale.
//! Glow radii and shadow blur stop growing once they span the whole canvas.

mod alpha;
mod passes;
mod pixels;

use image::GrayImage;
use resvg::tiny_skia::{self, Pixmap, Rect};

use self::passes::{
    FillPass, HookPass, InnerGlowPass, InnerShadowPass, OuterGlowPass, OverlayPass, Pass,
    PatternPass, ShadowPass,
};
use crate::error::RenderError;
use crate::icon::IconImage;
use crate::mask::Mask;
use crate::style::StyleState;

/// State shared by the passes of one render.
pub(crate) struct RenderContext<'a> {
    pub pixmap: Pixmap,
    pub mask: &'a GrayImage,
    pub clip: tiny_skia::Mask,
    pub bounds: Rect,
    /// Bounding box of the covered pixels; `bounds` when nothing is covered.
    pub shape: Rect,
    pub scale: f32,
}

/// Draws styled icons from masks.
///
/// Rendering is pure: the same mask, style and highlight state always
/// produce the same pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeRenderer;

impl CompositeRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders `style` through `mask`.
    ///
    /// A missing or empty mask renders as an empty image. Only a failing
    /// drawing hook produces an error.
    pub fn render(
        &self,
        mask: Option<&Mask>,
        style: &StyleState,
        highlighted: bool,
    ) -> Result<IconImage, RenderError> {
        let Some(mask) = mask.filter(|mask| !mask.is_empty()) else {
            return Ok(IconImage::empty(mask.map_or(1.0, Mask::scale)));
        };
        let Some(mut ctx) = Self::context(mask) else {
            return Ok(IconImage::empty(mask.scale()));
        };

        for pass in Self::passes(style, highlighted) {
            pass.draw(&mut ctx)?;
        }

        let data = pixels::pixmap_to_rgba_image(&ctx.pixmap);
        Ok(IconImage::new_full_content(data, mask.scale()))
    }

    fn context(mask: &Mask) -> Option<RenderContext<'_>> {
        let (width, height) = mask.alpha().dimensions();
        let bounds = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)?;
        let shape = mask
            .bounding_box()
            .and_then(|b| Rect::from_xywh(b.x as f32, b.y as f32, b.width as f32, b.height as f32))
            .unwrap_or(bounds);
        Some(RenderContext {
            pixmap: Pixmap::new(width, height)?,
            mask: mask.alpha(),
            clip: pixels::clip_mask(mask.alpha())?,
            bounds,
            shape,
            scale: mask.scale(),
        })
    }

    fn passes(style: &StyleState, highlighted: bool) -> Vec<Box<dyn Pass + '_>> {
        let mut passes: Vec<Box<dyn Pass + '_>> = vec![Box::new(FillPass {
            gradient: style.gradient(),
            color: style.fill_color(highlighted),
        })];

        if let Some(pattern) = style.pattern() {
            passes.push(Box::new(PatternPass {
                pattern,
                blend_mode: style.pattern_blend_mode(),
            }));
        }
        if let Some(overlay) = style.overlay() {
            passes.push(Box::new(OverlayPass {
                overlay,
                blend_mode: style.overlay_blend_mode(),
            }));
        }
        if let Some(color) = style
            .outer_glow_color()
            .filter(|_| style.outer_glow_radius() > 0.0)
        {
            passes.push(Box::new(OuterGlowPass {
                color,
                radius: style.outer_glow_radius(),
            }));
        }
        if let Some(color) = style.shadow_color() {
            passes.push(Box::new(ShadowPass {
                color,
                offset: style.shadow_offset(),
                blur: style.shadow_blur(),
                clips: style.clips_shadow(),
            }));
        }
        if let Some(color) = style.inner_shadow_color() {
            passes.push(Box::new(InnerShadowPass {
                color,
                offset: style.inner_shadow_offset(),
            }));
        }
        if let Some(color) = style
            .inner_glow_color()
            .filter(|_| style.inner_glow_radius() > 0.0)
        {
            passes.push(Box::new(InnerGlowPass {
                color,
                radius: style.inner_glow_radius(),
            }));
        }
        if let Some(hook) = style.drawing_hook() {
            passes.push(Box::new(HookPass { hook }));
        }
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BlendMode, Color, DrawingHook, Offset, Pattern};
    use image::{Rgba, RgbaImage};

    const RED: Color = Color::new(255, 0, 0, 255);
    const BLUE: Color = Color::new(0, 0, 255, 255);
    const GREEN: Color = Color::new(0, 255, 0, 255);
    const YELLOW: Color = Color::new(255, 255, 0, 255);

    fn circle(size: u32) -> Mask {
        let r = size as f32 / 2.0;
        Mask::from_fn(size, size, 1.0, |x, y| {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            if dx * dx + dy * dy <= r * r { 255 } else { 0 }
        })
    }

    /// A 40x40 mask with a solid square at 12..28.
    fn square() -> Mask {
        Mask::from_fn(40, 40, 1.0, |x, y| {
            if (12..28).contains(&x) && (12..28).contains(&y) { 255 } else { 0 }
        })
    }

    fn px(image: &IconImage, x: u32, y: u32) -> [u8; 4] {
        image.data.get_pixel(x, y).0
    }

    #[test]
    fn flat_fill_inside_transparent_outside() {
        let mut style = StyleState::new();
        style.set_color(RED);
        let out = CompositeRenderer.render(Some(&circle(64)), &style, false).unwrap();
        assert_eq!(out.dimensions().width, 64);
        assert_eq!(px(&out, 32, 32), [255, 0, 0, 255]);
        assert_eq!(px(&out, 0, 0), [0, 0, 0, 0]);
        assert_eq!(px(&out, 63, 63), [0, 0, 0, 0]);
    }

    #[test]
    fn gradient_spans_covered_area() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(vec![BLUE, GREEN]));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let top = px(&out, 20, 12);
        let bottom = px(&out, 20, 27);
        assert!(top[2] > 230 && top[1] < 25, "first row should be blue, got {top:?}");
        assert!(bottom[1] > 230 && bottom[2] < 25, "last row should be green, got {bottom:?}");
    }

    #[test]
    #[allow(deprecated)]
    fn legacy_start_end_gradient_fills() {
        let mut style = StyleState::new();
        style.set_gradient_start_color(Some(BLUE));
        style.set_gradient_end_color(Some(GREEN));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let top = px(&out, 20, 12);
        let bottom = px(&out, 20, 27);
        assert!(top[2] > 230, "start color at the top, got {top:?}");
        assert!(bottom[1] > 230, "end color at the bottom, got {bottom:?}");
        assert_eq!(px(&out, 5, 5)[3], 0);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(vec![BLUE, GREEN]));
        let out = CompositeRenderer.render(Some(&circle(64)), &style, false).unwrap();

        let top = px(&out, 32, 2);
        let bottom = px(&out, 32, 61);
        assert!(top[2] > top[1], "top should be blue, got {top:?}");
        assert!(bottom[1] > bottom[2], "bottom should be green, got {bottom:?}");
        assert_eq!(px(&out, 0, 0)[3], 0);
    }

    #[test]
    fn highlighted_uses_highlighted_color() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_highlighted_color(Some(BLUE));
        let mask = square();
        let normal = CompositeRenderer.render(Some(&mask), &style, false).unwrap();
        let highlighted = CompositeRenderer.render(Some(&mask), &style, true).unwrap();
        assert_eq!(px(&normal, 20, 20), [255, 0, 0, 255]);
        assert_eq!(px(&highlighted, 20, 20), [0, 0, 255, 255]);
    }

    #[test]
    fn outer_glow_surrounds_body() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_outer_glow_color(Some(YELLOW));
        style.set_outer_glow_radius(4.0);
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let halo = px(&out, 10, 20);
        assert!(halo[3] > 0, "glow should be visible outside the edge");
        assert!(halo[0] > 240 && halo[1] > 240 && halo[2] < 16, "glow should be yellow, got {halo:?}");
        assert_eq!(px(&out, 20, 20), [255, 0, 0, 255]);
        assert_eq!(px(&out, 0, 0)[3], 0);
    }

    #[test]
    fn drop_shadow_is_offset_beneath() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_shadow_color(Some(BLUE));
        style.set_shadow_offset(Offset::new(3.0, 3.0));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        assert_eq!(px(&out, 29, 29), [0, 0, 255, 255]);
        assert_eq!(px(&out, 20, 20), [255, 0, 0, 255]);
        assert_eq!(px(&out, 10, 10)[3], 0);
    }

    #[test]
    fn clipping_weakens_shadow_under_partial_coverage() {
        // Half-covered square: the shadow shows through unless it is clipped.
        let mask = Mask::from_fn(20, 20, 1.0, |x, y| {
            if (4..12).contains(&x) && (4..12).contains(&y) { 128 } else { 0 }
        });
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_shadow_color(Some(BLUE));
        style.set_shadow_offset(Offset::ZERO);

        style.set_clips_shadow(false);
        let unclipped = CompositeRenderer.render(Some(&mask), &style, false).unwrap();
        style.set_clips_shadow(true);
        let clipped = CompositeRenderer.render(Some(&mask), &style, false).unwrap();

        let open = px(&unclipped, 8, 8);
        let shut = px(&clipped, 8, 8);
        assert!(open[3] > shut[3], "clipping should weaken the shadow: {open:?} vs {shut:?}");
        assert!(open[2] > shut[2]);
        assert!(shut[3] > 128);
        assert_eq!(px(&clipped, 2, 2)[3], 0);
    }

    #[test]
    fn subpixel_shadow_offset_blends_edge() {
        let mut style = StyleState::new();
        style.set_shadow_color(Some(BLUE));
        style.set_color(Color::new(0, 0, 0, 0));
        style.set_shadow_offset(Offset::new(0.5, 0.0));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let leading = px(&out, 28, 20);
        assert!(leading[3] > 100 && leading[3] < 156, "half-covered edge, got {leading:?}");
        assert_eq!(px(&out, 20, 20)[3], 255);
    }

    #[test]
    fn huge_radii_are_capped() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_outer_glow_color(Some(YELLOW));
        style.set_outer_glow_radius(1e9);
        style.set_inner_glow_color(Some(BLUE));
        style.set_inner_glow_radius(f32::INFINITY);
        style.set_shadow_color(Some(GREEN));
        style.set_shadow_blur(1e9);
        let mask = Mask::from_fn(16, 16, 1.0, |x, y| {
            if (4..12).contains(&x) && (4..12).contains(&y) { 255 } else { 0 }
        });
        let out = CompositeRenderer.render(Some(&mask), &style, false).unwrap();

        assert_eq!(out.dimensions().width, 16);
        assert!(px(&out, 0, 0)[3] > 0, "glow should reach the corner");
        assert_eq!(px(&out, 8, 8)[3], 255);
    }

    #[test]
    fn inner_shadow_darkens_leading_edge() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_inner_shadow_color(Some(BLUE));
        style.set_inner_shadow_offset(Offset::new(0.0, 2.0));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        assert_eq!(px(&out, 20, 12), [0, 0, 255, 255]);
        assert_eq!(px(&out, 20, 20), [255, 0, 0, 255]);
        assert_eq!(px(&out, 20, 10)[3], 0);
    }

    #[test]
    fn inner_glow_stays_inside() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_inner_glow_color(Some(YELLOW));
        style.set_inner_glow_radius(3.0);
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let edge = px(&out, 12, 20);
        assert!(edge[1] > 0, "edge should pick up the glow, got {edge:?}");
        assert_eq!(px(&out, 20, 20), [255, 0, 0, 255]);
        assert_eq!(px(&out, 11, 20)[3], 0);
    }

    #[test]
    fn color_pattern_replaces_fill() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_pattern(Some(Pattern::Color(GREEN)));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();
        assert_eq!(px(&out, 20, 20), [0, 255, 0, 255]);
        assert_eq!(px(&out, 5, 5)[3], 0);
    }

    #[test]
    fn pattern_blend_mode_applies() {
        let mut style = StyleState::new();
        style.set_color(YELLOW);
        style.set_pattern(Some(Pattern::Color(Color::new(0, 255, 255, 255))));
        style.set_pattern_blend_mode(BlendMode::Multiply);
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let inside = px(&out, 20, 20);
        assert!(inside[0] < 3 && inside[1] > 252 && inside[2] < 3, "yellow x cyan is green, got {inside:?}");
        assert_eq!(px(&out, 5, 5)[3], 0);
    }

    #[test]
    fn image_pattern_tiles_at_mask_scale() {
        // Vertical stripes, one point each: green at even columns, blue at odd.
        let tile = RgbaImage::from_fn(2, 2, |x, _| {
            if x == 0 { Rgba([0, 255, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });
        let mask = Mask::from_fn(40, 40, 2.0, |_, _| 255);
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_pattern(Some(Pattern::Image(IconImage::new_full_content(tile, 1.0))));
        let out = CompositeRenderer.render(Some(&mask), &style, false).unwrap();

        // At 2x each stripe covers two device pixels and the tile repeats every four.
        for x in [20, 21, 24, 25] {
            let p = px(&out, x, 20);
            assert!(p[1] > p[2], "column {x} should be green, got {p:?}");
        }
        for x in [22, 23, 26, 27] {
            let p = px(&out, x, 20);
            assert!(p[2] > p[1], "column {x} should be blue, got {p:?}");
        }
        assert!(out.data.pixels().all(|p| p[0] < 8), "pattern should hide the fill");
    }

    #[test]
    fn overlay_blend_mode_applies() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_overlay(Some(IconImage::new_full_content(
            RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 255])),
            1.0,
        )));
        style.set_overlay_blend_mode(BlendMode::SourceAtop);
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();

        let inside = px(&out, 20, 20);
        assert!(inside[1] > 250 && inside[0] < 5 && inside[3] == 255, "got {inside:?}");
        assert_eq!(px(&out, 2, 2)[3], 0);
    }

    #[test]
    fn overlay_covers_canvas() {
        let mut style = StyleState::new();
        style.set_overlay(Some(IconImage::new_full_content(
            RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 255])),
            1.0,
        )));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();
        let corner = px(&out, 2, 2);
        assert!(corner[1] > 250 && corner[3] > 250, "overlay should be green, got {corner:?}");
        assert!(corner[0] < 5 && corner[2] < 5);
    }

    #[test]
    fn missing_or_empty_mask_renders_empty() {
        let style = StyleState::new();
        assert!(CompositeRenderer.render(None, &style, false).unwrap().is_empty());
        let empty = Mask::new(GrayImage::new(0, 0), 2.0);
        let out = CompositeRenderer.render(Some(&empty), &style, false).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.scale, 2.0);
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(vec![BLUE, GREEN]));
        style.set_outer_glow_color(Some(YELLOW));
        style.set_outer_glow_radius(3.0);
        style.set_inner_shadow_color(Some(RED));
        style.set_inner_shadow_offset(Offset::new(1.0, 1.0));
        let mask = circle(48);
        let first = CompositeRenderer.render(Some(&mask), &style, false).unwrap();
        let second = CompositeRenderer.render(Some(&mask), &style, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hook_runs_last_and_errors_propagate() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_drawing_hook(Some(DrawingHook::new(|pixmap| {
            pixmap.fill(tiny_skia::Color::from_rgba8(0, 0, 255, 255));
            Ok(())
        })));
        let out = CompositeRenderer.render(Some(&square()), &style, false).unwrap();
        assert_eq!(px(&out, 0, 0), [0, 0, 255, 255]);

        style.set_drawing_hook(Some(DrawingHook::new(|_| Err("boom".into()))));
        let err = CompositeRenderer.render(Some(&square()), &style, false).unwrap_err();
        assert!(matches!(err, RenderError::Hook(_)));
    }
}
