//! Unified error type for qrcrop.

use thiserror::Error;

/// Errors that can occur while rendering and exporting a QR code.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The QR region could not be converted to pixels.
    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    /// The trimmed buffer could not be encoded as PNG.
    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A size that is zero, negative or not a number.
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Raw pixel data whose length does not match its dimensions.
    #[error("Pixel buffer of {width}x{height} needs {expected} bytes, got {len}")]
    BufferSize {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Required byte length.
        expected: usize,
        /// Actual byte length.
        len: usize,
    },
}
