//! Sparse, mergeable style snapshots.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "color": { "red": 255, "green": 0, "blue": 0, "alpha": 255 },
//!   "gradientColors": [
//!     { "red": 0, "green": 0, "blue": 255, "alpha": 255 },
//!     { "red": 0, "green": 255, "blue": 0, "alpha": 255 }
//!   ],
//!   "outerGlowRadius": 4.0
//! }
//! ```
//!
//! Unset fields are omitted. Patterns, overlays and drawing hooks are not
//! serialized.

use serde::{Deserialize, Serialize};

use super::{
    validate_locations, BlendMode, Color, DrawingHook, GradientType, Offset, Pattern, StyleState,
};
use crate::error::StyleError;
use crate::icon::IconImage;

/// A style snapshot where every field is optional.
///
/// Traits are applied to a [`StyleState`] with
/// [`StyleState::mix_in_trait`] and merged with each other with
/// [`mix_in`](Self::mix_in). In both cases set fields overwrite and unset
/// fields leave the target alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleTrait {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_color: Option<Color>,
    #[serde(skip)]
    pub pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_blend_mode: Option<BlendMode>,
    #[serde(skip)]
    pub overlay: Option<IconImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_blend_mode: Option<BlendMode>,
    #[serde(skip)]
    pub drawing_hook: Option<DrawingHook>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_start_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_end_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_colors: Option<Vec<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_locations: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_type: Option<GradientType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_offset: Option<Offset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips_shadow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_shadow_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_shadow_offset: Option<Offset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_glow_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_glow_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_glow_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_glow_radius: Option<f32>,
}

/// Copies every set field of `$from` onto `$to`.
macro_rules! overwrite_set_fields {
    ($to:expr, $from:expr; $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = &$from.$field {
                $to.$field = Some(value.clone());
            }
        )*
    };
}

impl StyleTrait {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites fields of `self` with every field set in `other`.
    pub fn mix_in(&mut self, other: &StyleTrait) {
        overwrite_set_fields!(self, other;
            color,
            highlighted_color,
            pattern,
            pattern_blend_mode,
            overlay,
            overlay_blend_mode,
            drawing_hook,
            gradient_start_color,
            gradient_end_color,
            gradient_colors,
            gradient_locations,
            gradient_type,
            shadow_color,
            shadow_offset,
            shadow_blur,
            clips_shadow,
            inner_shadow_color,
            inner_shadow_offset,
            outer_glow_color,
            outer_glow_radius,
            inner_glow_color,
            inner_glow_radius,
        );
    }

    /// Mixes in each trait in order; later traits win.
    pub fn mix_in_all<'a>(&mut self, others: impl IntoIterator<Item = &'a StyleTrait>) {
        for other in others {
            self.mix_in(other);
        }
    }

    /// Returns a copy of `self` with `other` mixed in.
    pub fn mixed_with(&self, other: &StyleTrait) -> StyleTrait {
        let mut merged = self.clone();
        merged.mix_in(other);
        merged
    }

    /// Returns a copy of `self` with every trait in `others` mixed in.
    pub fn mixed_with_all<'a>(&self, others: impl IntoIterator<Item = &'a StyleTrait>) -> StyleTrait {
        let mut merged = self.clone();
        merged.mix_in_all(others);
        merged
    }

    // ---- Builders ----

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_highlighted_color(mut self, color: Color) -> Self {
        self.highlighted_color = Some(color);
        self
    }

    pub fn with_gradient_colors(mut self, colors: Vec<Color>) -> Self {
        self.gradient_colors = Some(colors);
        self
    }

    pub fn with_shadow(mut self, color: Color, offset: Offset) -> Self {
        self.shadow_color = Some(color);
        self.shadow_offset = Some(offset);
        self
    }

    pub fn with_inner_shadow(mut self, color: Color, offset: Offset) -> Self {
        self.inner_shadow_color = Some(color);
        self.inner_shadow_offset = Some(offset);
        self
    }

    pub fn with_outer_glow(mut self, color: Color, radius: f32) -> Self {
        self.outer_glow_color = Some(color);
        self.outer_glow_radius = Some(radius);
        self
    }

    pub fn with_inner_glow(mut self, color: Color, radius: f32) -> Self {
        self.inner_glow_color = Some(color);
        self.inner_glow_radius = Some(radius);
        self
    }

    // ---- JSON ----

    /// Serializes the set fields to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the set fields to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a trait from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl StyleState {
    /// Snapshots every field, leaving unset optional fields unset.
    pub fn to_trait(&self) -> StyleTrait {
        StyleTrait {
            color: Some(self.color),
            highlighted_color: self.highlighted_color,
            pattern: self.pattern.clone(),
            pattern_blend_mode: Some(self.pattern_blend_mode),
            overlay: self.overlay.clone(),
            overlay_blend_mode: Some(self.overlay_blend_mode),
            drawing_hook: self.drawing_hook.clone(),
            gradient_start_color: self.gradient_start_color,
            gradient_end_color: self.gradient_end_color,
            gradient_colors: self.gradient_colors.clone(),
            gradient_locations: self.gradient_locations.clone(),
            gradient_type: Some(self.gradient_type),
            shadow_color: self.shadow_color,
            shadow_offset: Some(self.shadow_offset),
            shadow_blur: Some(self.shadow_blur),
            clips_shadow: Some(self.clips_shadow),
            inner_shadow_color: self.inner_shadow_color,
            inner_shadow_offset: Some(self.inner_shadow_offset),
            outer_glow_color: self.outer_glow_color,
            outer_glow_radius: Some(self.outer_glow_radius),
            inner_glow_color: self.inner_glow_color,
            inner_glow_radius: Some(self.inner_glow_radius),
        }
    }

    /// Builds a state from defaults with `style` applied.
    pub fn from_trait(style: &StyleTrait) -> Result<Self, StyleError> {
        let mut state = Self::default();
        state.mix_in_trait(style)?;
        Ok(state)
    }

    /// Applies every field set in `style`.
    ///
    /// Legacy gradient colors are applied before the color list, and the
    /// color list before locations. Invalid locations reject the whole trait
    /// and leave `self` unchanged.
    pub fn mix_in_trait(&mut self, style: &StyleTrait) -> Result<(), StyleError> {
        if let Some(locations) = &style.gradient_locations {
            let legacy_set =
                style.gradient_start_color.is_some() || style.gradient_end_color.is_some();
            let colors = match &style.gradient_colors {
                Some(colors) => Some(colors.as_slice()),
                None if legacy_set => None,
                None => self.gradient_colors.as_deref(),
            };
            validate_locations(colors, locations)?;
        }

        if let Some(color) = style.color {
            self.color = color;
        }
        if style.highlighted_color.is_some() {
            self.highlighted_color = style.highlighted_color;
        }
        if style.pattern.is_some() {
            self.pattern = style.pattern.clone();
        }
        if let Some(mode) = style.pattern_blend_mode {
            self.pattern_blend_mode = mode;
        }
        if style.overlay.is_some() {
            self.overlay = style.overlay.clone();
        }
        if let Some(mode) = style.overlay_blend_mode {
            self.overlay_blend_mode = mode;
        }
        if style.drawing_hook.is_some() {
            self.drawing_hook = style.drawing_hook.clone();
        }

        if let Some(start) = style.gradient_start_color {
            self.gradient_start_color = Some(start);
            self.gradient_colors = None;
            self.gradient_locations = None;
        }
        if let Some(end) = style.gradient_end_color {
            self.gradient_end_color = Some(end);
            self.gradient_colors = None;
            self.gradient_locations = None;
        }
        if let Some(colors) = &style.gradient_colors {
            self.set_gradient_colors(Some(colors.clone()));
        }
        if let Some(locations) = &style.gradient_locations {
            self.gradient_locations = Some(locations.clone());
        }
        if let Some(kind) = style.gradient_type {
            self.gradient_type = kind;
        }
        self.invalidate_gradient();

        if style.shadow_color.is_some() {
            self.shadow_color = style.shadow_color;
        }
        if let Some(offset) = style.shadow_offset {
            self.shadow_offset = offset;
        }
        if let Some(blur) = style.shadow_blur {
            self.set_shadow_blur(blur);
        }
        if let Some(clips) = style.clips_shadow {
            self.clips_shadow = clips;
        }
        if style.inner_shadow_color.is_some() {
            self.inner_shadow_color = style.inner_shadow_color;
        }
        if let Some(offset) = style.inner_shadow_offset {
            self.inner_shadow_offset = offset;
        }
        if style.outer_glow_color.is_some() {
            self.outer_glow_color = style.outer_glow_color;
        }
        if let Some(radius) = style.outer_glow_radius {
            self.set_outer_glow_radius(radius);
        }
        if style.inner_glow_color.is_some() {
            self.inner_glow_color = style.inner_glow_color;
        }
        if let Some(radius) = style.inner_glow_radius {
            self.set_inner_glow_radius(radius);
        }
        Ok(())
    }
}
