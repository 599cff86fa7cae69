//! Error types for the water strip.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaterStripError {
    #[error("water strip width must be at least 1 column, got {width}")]
    InvalidWidth { width: usize },

    #[error("column spacing must be a positive finite number, got {spacing}")]
    InvalidColumnSpacing { spacing: f32 },

    #[error("column index {index} is out of range for a strip of width {width}")]
    OutOfRange { index: i64, width: usize },

    #[error("failed to read water strip config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse water strip config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, WaterStripError>;
