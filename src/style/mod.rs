//! Visual style attributes of a masked icon.
//!
//! [`StyleState`] holds every style field plus derived gradient state.
//! [`StyleTrait`] is a sparse, mergeable snapshot of the same fields.

pub mod style_trait;

pub use style_trait::StyleTrait;

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use resvg::tiny_skia::{self, GradientStop, LinearGradient, Pixmap, Point, Shader, SpreadMode};
use serde::{Deserialize, Serialize};

use crate::error::{HookError, StyleError};
use crate::icon::IconImage;

/// An 8-bit sRGB color with alpha.
pub type Color = palette::Srgba<u8>;

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

// ============================================================================
// Value types
// ============================================================================

/// Compositing operator for patterns and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    Clear,
    Copy,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Xor,
    PlusLighter,
}

impl BlendMode {
    pub(crate) fn to_skia(self) -> tiny_skia::BlendMode {
        use tiny_skia::BlendMode as Sk;
        match self {
            Self::Normal => Sk::SourceOver,
            Self::Multiply => Sk::Multiply,
            Self::Screen => Sk::Screen,
            Self::Overlay => Sk::Overlay,
            Self::Darken => Sk::Darken,
            Self::Lighten => Sk::Lighten,
            Self::ColorDodge => Sk::ColorDodge,
            Self::ColorBurn => Sk::ColorBurn,
            Self::SoftLight => Sk::SoftLight,
            Self::HardLight => Sk::HardLight,
            Self::Difference => Sk::Difference,
            Self::Exclusion => Sk::Exclusion,
            Self::Hue => Sk::Hue,
            Self::Saturation => Sk::Saturation,
            Self::Color => Sk::Color,
            Self::Luminosity => Sk::Luminosity,
            Self::Clear => Sk::Clear,
            Self::Copy => Sk::Source,
            Self::SourceIn => Sk::SourceIn,
            Self::SourceOut => Sk::SourceOut,
            Self::SourceAtop => Sk::SourceAtop,
            Self::DestinationOver => Sk::DestinationOver,
            Self::DestinationIn => Sk::DestinationIn,
            Self::DestinationOut => Sk::DestinationOut,
            Self::DestinationAtop => Sk::DestinationAtop,
            Self::Xor => Sk::Xor,
            Self::PlusLighter => Sk::Plus,
        }
    }
}

/// Gradient geometry. Only linear gradients are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientType {
    #[default]
    Linear,
}

/// A displacement in points. Positive `dy` points down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Converts to device pixels. Fractions are kept; the renderer resamples
    /// shadows at sub-pixel offsets.
    pub fn to_pixels(&self, scale: f32) -> (f32, f32) {
        (self.dx * scale, self.dy * scale)
    }
}

/// Fill composited over the icon body.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A flat color.
    Color(Color),
    /// A bitmap tiled from the top-left corner.
    Image(IconImage),
}

type HookFn = dyn Fn(&mut Pixmap) -> Result<(), HookError> + Send + Sync;

/// A caller-supplied drawing step run after every other compositing pass.
///
/// Hooks compare equal only to clones of themselves.
#[derive(Clone)]
pub struct DrawingHook(Arc<HookFn>);

impl DrawingHook {
    pub fn new(
        hook: impl Fn(&mut Pixmap) -> Result<(), HookError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(hook))
    }

    pub fn call(&self, pixmap: &mut Pixmap) -> Result<(), HookError> {
        (self.0)(pixmap)
    }
}

impl PartialEq for DrawingHook {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DrawingHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawingHook(..)")
    }
}

// ============================================================================
// Gradient
// ============================================================================

/// A composed gradient: colors with resolved stop locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    kind: GradientType,
    stops: Vec<(Color, f32)>,
}

impl Gradient {
    /// Pairs colors with locations, spreading them uniformly when `locations` is `None`.
    ///
    /// Returns `None` for an empty color list or mismatched lengths.
    pub fn new(kind: GradientType, colors: &[Color], locations: Option<&[f32]>) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        let stops = match locations {
            Some(locations) if locations.len() == colors.len() => {
                colors.iter().copied().zip(locations.iter().copied()).collect()
            }
            Some(_) => return None,
            None => {
                let last = (colors.len() - 1).max(1) as f32;
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| (*color, i as f32 / last))
                    .collect()
            }
        };
        Some(Self { kind, stops })
    }

    pub fn kind(&self) -> GradientType {
        self.kind
    }

    pub fn stops(&self) -> &[(Color, f32)] {
        &self.stops
    }

    /// A shader running from `start` to `end`, padded beyond both ends.
    pub(crate) fn shader(&self, start: Point, end: Point) -> Option<Shader<'static>> {
        let stops = self
            .stops
            .iter()
            .map(|(color, location)| GradientStop::new(*location, to_skia_color(*color)))
            .collect();
        match self.kind {
            GradientType::Linear => LinearGradient::new(
                start,
                end,
                stops,
                SpreadMode::Pad,
                tiny_skia::Transform::identity(),
            ),
        }
    }
}

/// Checks `locations` against the gradient colors they will pair with.
pub(crate) fn validate_locations(
    colors: Option<&[Color]>,
    locations: &[f32],
) -> Result<(), StyleError> {
    let Some(colors) = colors else {
        return Err(StyleError::LocationsWithoutColors);
    };
    if colors.len() != locations.len() {
        return Err(StyleError::LocationCountMismatch {
            colors: colors.len(),
            locations: locations.len(),
        });
    }
    if let Some(bad) = locations.iter().find(|l| !(0.0..=1.0).contains(*l)) {
        return Err(StyleError::LocationOutOfRange(*bad));
    }
    if locations.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(StyleError::LocationsNotIncreasing);
    }
    Ok(())
}

/// Which gradient API currently drives the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientSource {
    /// No gradient; the fill color is used.
    None,
    /// Both legacy start and end colors are set.
    StartEnd,
    /// An explicit color list is set.
    ColorList,
}

// ============================================================================
// StyleState
// ============================================================================

/// The complete style of a masked icon.
///
/// Setting the color-list gradient clears the legacy start/end colors and
/// vice versa. The composed [`Gradient`] is built on first use and rebuilt
/// after any gradient field changes.
#[derive(Debug, Clone)]
pub struct StyleState {
    color: Color,
    highlighted_color: Option<Color>,
    pattern: Option<Pattern>,
    pattern_blend_mode: BlendMode,
    overlay: Option<IconImage>,
    overlay_blend_mode: BlendMode,
    drawing_hook: Option<DrawingHook>,

    gradient_start_color: Option<Color>,
    gradient_end_color: Option<Color>,
    gradient_colors: Option<Vec<Color>>,
    gradient_locations: Option<Vec<f32>>,
    gradient_type: GradientType,

    shadow_color: Option<Color>,
    shadow_offset: Offset,
    shadow_blur: f32,
    clips_shadow: bool,
    inner_shadow_color: Option<Color>,
    inner_shadow_offset: Offset,

    outer_glow_color: Option<Color>,
    outer_glow_radius: f32,
    inner_glow_color: Option<Color>,
    inner_glow_radius: f32,

    gradient: OnceCell<Option<Gradient>>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            color: Color::new(0, 0, 0, 255),
            highlighted_color: None,
            pattern: None,
            pattern_blend_mode: BlendMode::Normal,
            overlay: None,
            overlay_blend_mode: BlendMode::Normal,
            drawing_hook: None,
            gradient_start_color: None,
            gradient_end_color: None,
            gradient_colors: None,
            gradient_locations: None,
            gradient_type: GradientType::Linear,
            shadow_color: None,
            shadow_offset: Offset::ZERO,
            shadow_blur: 0.0,
            clips_shadow: false,
            inner_shadow_color: None,
            inner_shadow_offset: Offset::ZERO,
            outer_glow_color: None,
            outer_glow_radius: 0.0,
            inner_glow_color: None,
            inner_glow_radius: 0.0,
            gradient: OnceCell::new(),
        }
    }
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Fill ----

    /// Fill color when unhighlighted.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Fill color when highlighted. Falls back to [`color`](Self::color) when unset.
    pub fn highlighted_color(&self) -> Option<Color> {
        self.highlighted_color
    }

    pub fn set_highlighted_color(&mut self, color: Option<Color>) {
        self.highlighted_color = color;
    }

    /// The flat fill used for the given state.
    pub fn fill_color(&self, highlighted: bool) -> Color {
        if highlighted {
            self.highlighted_color.unwrap_or(self.color)
        } else {
            self.color
        }
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn set_pattern(&mut self, pattern: Option<Pattern>) {
        self.pattern = pattern;
    }

    pub fn pattern_blend_mode(&self) -> BlendMode {
        self.pattern_blend_mode
    }

    pub fn set_pattern_blend_mode(&mut self, mode: BlendMode) {
        self.pattern_blend_mode = mode;
    }

    pub fn overlay(&self) -> Option<&IconImage> {
        self.overlay.as_ref()
    }

    pub fn set_overlay(&mut self, overlay: Option<IconImage>) {
        self.overlay = overlay;
    }

    pub fn overlay_blend_mode(&self) -> BlendMode {
        self.overlay_blend_mode
    }

    pub fn set_overlay_blend_mode(&mut self, mode: BlendMode) {
        self.overlay_blend_mode = mode;
    }

    pub fn drawing_hook(&self) -> Option<&DrawingHook> {
        self.drawing_hook.as_ref()
    }

    pub fn set_drawing_hook(&mut self, hook: Option<DrawingHook>) {
        self.drawing_hook = hook;
    }

    // ---- Gradient ----

    /// Legacy gradient start color.
    #[deprecated(note = "use `gradient_colors` instead")]
    pub fn gradient_start_color(&self) -> Option<Color> {
        self.gradient_start_color
    }

    /// Sets the legacy start color. A `Some` value clears the color list.
    #[deprecated(note = "use `set_gradient_colors` instead")]
    pub fn set_gradient_start_color(&mut self, color: Option<Color>) {
        self.gradient_start_color = color;
        if color.is_some() {
            self.gradient_colors = None;
            self.gradient_locations = None;
        }
        self.invalidate_gradient();
    }

    /// Legacy gradient end color.
    #[deprecated(note = "use `gradient_colors` instead")]
    pub fn gradient_end_color(&self) -> Option<Color> {
        self.gradient_end_color
    }

    /// Sets the legacy end color. A `Some` value clears the color list.
    #[deprecated(note = "use `set_gradient_colors` instead")]
    pub fn set_gradient_end_color(&mut self, color: Option<Color>) {
        self.gradient_end_color = color;
        if color.is_some() {
            self.gradient_colors = None;
            self.gradient_locations = None;
        }
        self.invalidate_gradient();
    }

    pub fn gradient_colors(&self) -> Option<&[Color]> {
        self.gradient_colors.as_deref()
    }

    /// Sets the gradient color list and clears the legacy start/end colors.
    ///
    /// Locations that no longer match the color count are dropped.
    pub fn set_gradient_colors(&mut self, colors: Option<Vec<Color>>) {
        if colors.is_some() {
            self.gradient_start_color = None;
            self.gradient_end_color = None;
        }
        let keep_locations = match (&colors, &self.gradient_locations) {
            (Some(colors), Some(locations)) => colors.len() == locations.len(),
            _ => false,
        };
        if !keep_locations && self.gradient_locations.is_some() {
            log::debug!("dropping gradient locations that no longer match the colors");
            self.gradient_locations = None;
        }
        self.gradient_colors = colors;
        self.invalidate_gradient();
    }

    pub fn gradient_locations(&self) -> Option<&[f32]> {
        self.gradient_locations.as_deref()
    }

    /// Sets stop locations for the current gradient colors.
    ///
    /// Locations must lie in 0..=1, strictly increase and match the color
    /// count. Invalid input is rejected and leaves the style unchanged.
    pub fn set_gradient_locations(&mut self, locations: Option<Vec<f32>>) -> Result<(), StyleError> {
        if let Some(locations) = &locations {
            validate_locations(self.gradient_colors.as_deref(), locations)?;
        }
        self.gradient_locations = locations;
        self.invalidate_gradient();
        Ok(())
    }

    /// Sets colors and locations together.
    pub fn set_gradient(
        &mut self,
        colors: Vec<Color>,
        locations: Option<Vec<f32>>,
    ) -> Result<(), StyleError> {
        if let Some(locations) = &locations {
            validate_locations(Some(&colors), locations)?;
        }
        self.gradient_start_color = None;
        self.gradient_end_color = None;
        self.gradient_colors = Some(colors);
        self.gradient_locations = locations;
        self.invalidate_gradient();
        Ok(())
    }

    /// Removes every gradient field.
    pub fn clear_gradient(&mut self) {
        self.gradient_start_color = None;
        self.gradient_end_color = None;
        self.gradient_colors = None;
        self.gradient_locations = None;
        self.invalidate_gradient();
    }

    pub fn gradient_type(&self) -> GradientType {
        self.gradient_type
    }

    pub fn set_gradient_type(&mut self, kind: GradientType) {
        self.gradient_type = kind;
        self.invalidate_gradient();
    }

    /// Which gradient API is active.
    pub fn gradient_source(&self) -> GradientSource {
        if self.gradient_colors.as_ref().is_some_and(|c| !c.is_empty()) {
            GradientSource::ColorList
        } else if self.gradient_start_color.is_some() && self.gradient_end_color.is_some() {
            GradientSource::StartEnd
        } else {
            GradientSource::None
        }
    }

    /// The composed gradient, built on first use.
    pub fn gradient(&self) -> Option<&Gradient> {
        self.gradient.get_or_init(|| self.compose_gradient()).as_ref()
    }

    /// Drops the composed gradient so the next draw rebuilds it.
    pub fn invalidate_gradient(&mut self) {
        self.gradient = OnceCell::new();
    }

    fn compose_gradient(&self) -> Option<Gradient> {
        match self.gradient_source() {
            GradientSource::None => None,
            GradientSource::StartEnd => {
                let start = self.gradient_start_color?;
                let end = self.gradient_end_color?;
                Gradient::new(self.gradient_type, &[start, end], None)
            }
            GradientSource::ColorList => Gradient::new(
                self.gradient_type,
                self.gradient_colors.as_deref()?,
                self.gradient_locations.as_deref(),
            ),
        }
    }

    // ---- Shadows ----

    pub fn shadow_color(&self) -> Option<Color> {
        self.shadow_color
    }

    pub fn set_shadow_color(&mut self, color: Option<Color>) {
        self.shadow_color = color;
    }

    pub fn shadow_offset(&self) -> Offset {
        self.shadow_offset
    }

    pub fn set_shadow_offset(&mut self, offset: Offset) {
        self.shadow_offset = offset;
    }

    /// Drop shadow blur radius in points.
    pub fn shadow_blur(&self) -> f32 {
        self.shadow_blur
    }

    pub fn set_shadow_blur(&mut self, blur: f32) {
        self.shadow_blur = blur.max(0.0);
    }

    /// Whether the drop shadow is kept out from under translucent icon pixels.
    pub fn clips_shadow(&self) -> bool {
        self.clips_shadow
    }

    pub fn set_clips_shadow(&mut self, clips: bool) {
        self.clips_shadow = clips;
    }

    pub fn inner_shadow_color(&self) -> Option<Color> {
        self.inner_shadow_color
    }

    pub fn set_inner_shadow_color(&mut self, color: Option<Color>) {
        self.inner_shadow_color = color;
    }

    pub fn inner_shadow_offset(&self) -> Offset {
        self.inner_shadow_offset
    }

    pub fn set_inner_shadow_offset(&mut self, offset: Offset) {
        self.inner_shadow_offset = offset;
    }

    // ---- Glows ----

    pub fn outer_glow_color(&self) -> Option<Color> {
        self.outer_glow_color
    }

    pub fn set_outer_glow_color(&mut self, color: Option<Color>) {
        self.outer_glow_color = color;
    }

    /// Outer glow extent in points.
    pub fn outer_glow_radius(&self) -> f32 {
        self.outer_glow_radius
    }

    pub fn set_outer_glow_radius(&mut self, radius: f32) {
        self.outer_glow_radius = radius.max(0.0);
    }

    pub fn inner_glow_color(&self) -> Option<Color> {
        self.inner_glow_color
    }

    pub fn set_inner_glow_color(&mut self, color: Option<Color>) {
        self.inner_glow_color = color;
    }

    /// Inner glow extent in points.
    pub fn inner_glow_radius(&self) -> f32 {
        self.inner_glow_radius
    }

    pub fn set_inner_glow_radius(&mut self, radius: f32) {
        self.inner_glow_radius = radius.max(0.0);
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0, 255);
    const GREEN: Color = Color::new(0, 255, 0, 255);
    const BLUE: Color = Color::new(0, 0, 255, 255);

    #[test]
    fn defaults() {
        let style = StyleState::new();
        assert_eq!(style.color(), Color::new(0, 0, 0, 255));
        assert_eq!(style.fill_color(true), style.color());
        assert_eq!(style.gradient_source(), GradientSource::None);
        assert!(style.gradient().is_none());
        assert_eq!(style.pattern_blend_mode(), BlendMode::Normal);
    }

    #[test]
    fn highlighted_color_overrides_fill() {
        let mut style = StyleState::new();
        style.set_color(RED);
        style.set_highlighted_color(Some(BLUE));
        assert_eq!(style.fill_color(false), RED);
        assert_eq!(style.fill_color(true), BLUE);
    }

    #[test]
    fn color_list_clears_legacy_gradient() {
        let mut style = StyleState::new();
        style.set_gradient_start_color(Some(RED));
        style.set_gradient_end_color(Some(BLUE));
        assert_eq!(style.gradient_source(), GradientSource::StartEnd);

        style.set_gradient_colors(Some(vec![GREEN, BLUE]));
        assert_eq!(style.gradient_start_color(), None);
        assert_eq!(style.gradient_end_color(), None);
        assert_eq!(style.gradient_source(), GradientSource::ColorList);
    }

    #[test]
    fn legacy_gradient_clears_color_list() {
        let mut style = StyleState::new();
        style.set_gradient(vec![GREEN, BLUE], Some(vec![0.0, 1.0])).unwrap();
        style.set_gradient_start_color(Some(RED));
        assert_eq!(style.gradient_colors(), None);
        assert_eq!(style.gradient_locations(), None);
        // Only one legacy color: no gradient yet.
        assert!(style.gradient().is_none());

        style.set_gradient_end_color(Some(BLUE));
        let stops = style.gradient().unwrap().stops().to_vec();
        assert_eq!(stops, vec![(RED, 0.0), (BLUE, 1.0)]);
    }

    #[test]
    fn uniform_locations_when_omitted() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(vec![RED, GREEN, BLUE]));
        let locations: Vec<f32> = style.gradient().unwrap().stops().iter().map(|s| s.1).collect();
        assert_eq!(locations, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn mismatched_locations_are_rejected() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(vec![RED, BLUE]));
        assert_eq!(
            style.set_gradient_locations(Some(vec![0.0, 0.5, 1.0])),
            Err(StyleError::LocationCountMismatch { colors: 2, locations: 3 })
        );
        assert_eq!(style.gradient_locations(), None);
        assert!(style.gradient().is_some());
    }

    #[test]
    fn invalid_locations_are_rejected() {
        let mut style = StyleState::new();
        assert_eq!(
            style.set_gradient_locations(Some(vec![0.0])),
            Err(StyleError::LocationsWithoutColors)
        );

        style.set_gradient_colors(Some(vec![RED, BLUE]));
        assert_eq!(
            style.set_gradient_locations(Some(vec![0.6, 0.4])),
            Err(StyleError::LocationsNotIncreasing)
        );
        assert_eq!(
            style.set_gradient_locations(Some(vec![0.0, 1.5])),
            Err(StyleError::LocationOutOfRange(1.5))
        );
        assert!(style.set_gradient_locations(Some(vec![0.2, 0.8])).is_ok());
        assert_eq!(style.gradient().unwrap().stops()[1], (BLUE, 0.8));
    }

    #[test]
    fn changing_color_count_drops_stale_locations() {
        let mut style = StyleState::new();
        style.set_gradient(vec![RED, BLUE], Some(vec![0.1, 0.9])).unwrap();
        style.set_gradient_colors(Some(vec![RED, GREEN, BLUE]));
        assert_eq!(style.gradient_locations(), None);

        style.set_gradient(vec![RED, BLUE], Some(vec![0.1, 0.9])).unwrap();
        style.set_gradient_colors(Some(vec![GREEN, BLUE]));
        assert_eq!(style.gradient_locations(), Some(&[0.1, 0.9][..]));
    }

    #[test]
    fn composed_gradient_is_rebuilt_after_change() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(vec![RED, BLUE]));
        assert_eq!(style.gradient().unwrap().stops()[0].0, RED);
        style.set_gradient_colors(Some(vec![GREEN, BLUE]));
        assert_eq!(style.gradient().unwrap().stops()[0].0, GREEN);
    }

    #[test]
    fn empty_color_list_is_no_gradient() {
        let mut style = StyleState::new();
        style.set_gradient_colors(Some(Vec::new()));
        assert_eq!(style.gradient_source(), GradientSource::None);
        assert!(style.gradient().is_none());
    }

    #[test]
    fn radii_are_not_negative() {
        let mut style = StyleState::new();
        style.set_outer_glow_radius(-3.0);
        style.set_inner_glow_radius(-1.0);
        style.set_shadow_blur(-2.0);
        assert_eq!(style.outer_glow_radius(), 0.0);
        assert_eq!(style.inner_glow_radius(), 0.0);
        assert_eq!(style.shadow_blur(), 0.0);
    }

    #[test]
    fn offset_to_pixels() {
        assert_eq!(Offset::new(1.0, -2.0).to_pixels(2.0), (2.0, -4.0));
        assert_eq!(Offset::new(0.25, 0.5).to_pixels(1.0), (0.25, 0.5));
        assert_eq!(Offset::new(0.5, 0.0).to_pixels(3.0), (1.5, 0.0));
    }

    #[test]
    fn hooks_compare_by_identity() {
        let hook = DrawingHook::new(|_| Ok(()));
        let other = DrawingHook::new(|_| Ok(()));
        assert_eq!(hook, hook.clone());
        assert_ne!(hook, other);
    }

    #[test]
    fn blend_mode_names() {
        let json = serde_json::to_string(&BlendMode::ColorDodge).unwrap();
        assert_eq!(json, "\"color-dodge\"");
        assert_eq!(BlendMode::Copy.to_skia(), tiny_skia::BlendMode::Source);
    }
}
