//! QR rasterizer backed by the `qrcode` crate.

use qrcode::{Color, EcLevel, QrCode};

use crate::error::ExportError;
use crate::params::ErrorCorrection;
use crate::pixel::PixelBuffer;
use crate::ports::rasterizer::{QrRegion, QrStyle, RasterFuture, Rasterizer};

/// Width of the quiet zone, in modules, when a margin is requested.
pub const QUIET_ZONE: usize = 4;

/// Draws QR symbols onto a square RGBA canvas.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrRasterizer;

impl QrRasterizer {
    /// Create a new rasterizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for QrRasterizer {
    fn rasterize(&self, region: &QrRegion) -> RasterFuture<'_> {
        let region = region.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || render(&region.text, region.size, region.style))
                .await
                .map_err(|e| ExportError::Rasterization(format!("render task failed: {e}")))?
        })
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

/// Paint `text` as a QR code filling a `size × size` canvas.
///
/// Each canvas pixel maps to the cell under it by nearest-neighbour
/// scaling, so the whole canvas is covered with no gaps.
///
/// # Errors
///
/// Returns [`ExportError::Rasterization`] if the size is zero or the text
/// does not fit in any QR version.
pub fn render(text: &str, size: u32, style: QrStyle) -> Result<PixelBuffer, ExportError> {
    if size == 0 {
        return Err(ExportError::Rasterization("canvas size must be greater than zero".into()));
    }
    let code = QrCode::with_error_correction_level(text.as_bytes(), ec_level(style.level))
        .map_err(|e| ExportError::Rasterization(format!("QR encode error: {e}")))?;

    let modules = code.width();
    let colors = code.to_colors();
    let quiet = if style.include_margin { QUIET_ZONE } else { 0 };
    let cells = modules + 2 * quiet;
    let span = size as usize;

    if span < cells {
        tracing::warn!(size, cells, "canvas is smaller than the symbol; modules will be dropped");
    }
    tracing::debug!(modules, cells, size, "rendering QR symbol");

    let module_at = |p: u32| -> Option<usize> {
        let cell = p as usize * cells / span;
        (quiet..quiet + modules).contains(&cell).then(|| cell - quiet)
    };

    let mut buf = PixelBuffer::filled(size, size, style.background);
    for py in 0..size {
        let Some(my) = module_at(py) else { continue };
        for px in 0..size {
            let Some(mx) = module_at(px) else { continue };
            if colors[my * modules + mx] == Color::Dark {
                buf.put_pixel(px, py, style.foreground);
            }
        }
    }
    Ok(buf)
}
