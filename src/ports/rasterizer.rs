//! Rasterizer port: turns a QR region into pixels.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::params::ErrorCorrection;
use crate::pixel::PixelBuffer;

/// Visual styling of a rendered QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrStyle {
    /// Error-correction level.
    pub level: ErrorCorrection,
    /// RGBA colour of dark modules.
    pub foreground: [u8; 4],
    /// RGBA colour of light modules and the quiet zone.
    pub background: [u8; 4],
    /// Surround the symbol with a four-module quiet zone.
    pub include_margin: bool,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            level: ErrorCorrection::Low,
            foreground: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
            include_margin: false,
        }
    }
}

/// A QR code to be drawn on a square canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRegion {
    /// Text to encode.
    pub text: String,
    /// Canvas edge length in pixels.
    pub size: u32,
    /// Colours and error correction.
    pub style: QrStyle,
}

/// Boxed future type returned by [`Rasterizer::rasterize`].
pub type RasterFuture<'a> =
    Pin<Box<dyn Future<Output = Result<PixelBuffer, ExportError>> + Send + 'a>>;

/// Produces a `size × size` RGBA buffer for a QR region.
pub trait Rasterizer: Send + Sync {
    /// Rasterize the region at its natural resolution.
    fn rasterize(&self, region: &QrRegion) -> RasterFuture<'_>;
}
