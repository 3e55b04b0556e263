//! Error types for Ut Video encoding

use thiserror::Error;

/// Result type for Ut Video operations
pub type Result<T> = std::result::Result<T, UtVideoError>;

/// Errors that can occur during Ut Video encoding
#[derive(Error, Debug)]
pub enum UtVideoError {
    /// Pixel format is not one of the four Ut Video layouts
    #[error("Unsupported pixel format: {0}")]
    InvalidPixelFormat(String),

    /// Frame dimensions violate the chroma subsampling rules
    #[error("Invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// Prediction method is out of range or maps to an unsupported mode
    #[error("Prediction method {0} is not supported in Ut Video")]
    UnsupportedPrediction(u8),

    /// Scratch buffer allocation failed
    #[error("Out of memory allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    /// A write ran past the end of the output buffer
    #[error("Buffer overflow: need {needed} bytes, have {available}")]
    BufferOverflow { needed: usize, available: usize },

    /// A seek moved the byte cursor outside the buffer
    #[error("Invalid position {position} in buffer of {size} bytes")]
    InvalidPosition { position: i64, size: usize },

    /// Picture plane data is smaller than the configured dimensions require
    #[error("Plane {plane} too small: {len} bytes, need {needed}")]
    PlaneTooSmall {
        plane: usize,
        len: usize,
        needed: usize,
    },

    /// Picture does not match the encoder configuration
    #[error("Picture mismatch: {0}")]
    PictureMismatch(String),
}
