//! Error types for mask creation, styling, rendering and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by a custom drawing hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to produce a mask from a source.
///
/// Views treat every variant the same way: the icon is left without a mask
/// and renders fully transparent.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("resource `{0}` not found in bundle")]
    ResourceNotFound(String),

    #[error("resource `{0}` has an unsupported type")]
    UnsupportedResource(String),

    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),

    #[error("failed to parse vector document")]
    Vector(#[from] resvg::usvg::Error),

    #[error("vector document has no page {0}")]
    NoSuchPage(usize),

    #[error("mask would have zero pixels")]
    EmptySize,
}

/// Rejected style input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("gradient locations set without gradient colors")]
    LocationsWithoutColors,

    #[error("{locations} gradient locations for {colors} gradient colors")]
    LocationCountMismatch { colors: usize, locations: usize },

    #[error("gradient location {0} is outside 0..=1")]
    LocationOutOfRange(f32),

    #[error("gradient locations must strictly increase")]
    LocationsNotIncreasing,
}

/// Failure while rendering an icon.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("custom drawing hook failed")]
    Hook(#[source] HookError),
}

/// Failure to load a [`RenderConfig`](crate::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config")]
    Json(#[from] serde_json::Error),
}

/// Failure to load a resource name list.
#[derive(Debug, Error)]
pub enum ResourceListError {
    #[error("resource list `{0}` not found in bundle")]
    NotFound(String),

    #[error("failed to read resource list `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("resource list is not a flat array of names")]
    Json(#[from] serde_json::Error),
}
