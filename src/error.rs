use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while capturing the canvas into a bitmap
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Capture region has no area ({width}x{height})")]
    EmptyRegion { width: f32, height: f32 },

    #[error("Canvas has not been laid out yet")]
    CanvasNotMeasured,

    #[error("Capturing is not available in the {0} variant")]
    NotAvailable(&'static str),
}

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur while loading image assets
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
