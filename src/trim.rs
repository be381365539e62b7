//! Bounding-box detection and cropping of transparent padding.

use serde::Serialize;

use crate::error::ExportError;
use crate::pixel::{PixelBuffer, CHANNELS};

/// Half-open rectangle `[top, bottom) × [left, right)` in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    /// First row with content.
    pub top: u32,
    /// One past the last row with content.
    pub bottom: u32,
    /// First column with content.
    pub left: u32,
    /// One past the last column with content.
    pub right: u32,
}

impl BoundingBox {
    /// The box covering an entire `width × height` buffer.
    #[must_use]
    pub fn full(width: u32, height: u32) -> Self {
        Self { top: 0, bottom: height, left: 0, right: width }
    }

    /// Width of the box in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height of the box in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Find the tightest box around every pixel with non-zero alpha.
///
/// Rows are scanned first (top-down for `top`, bottom-up for `bottom`), then
/// columns within the `[top, bottom)` band (left-to-right for `left`,
/// right-to-left for `right`). A bound that is never found keeps its
/// sentinel, so a fully transparent buffer yields [`BoundingBox::full`].
#[must_use]
pub fn bounding_box(buf: &PixelBuffer) -> BoundingBox {
    let (width, height) = (buf.width(), buf.height());
    let row_has_content = |y: u32| (0..width).any(|x| buf.alpha(x, y) > 0);

    let top = (0..height).find(|&y| row_has_content(y)).unwrap_or(0);
    let bottom = (0..height).rev().find(|&y| row_has_content(y)).map_or(height, |y| y + 1);

    let col_has_content = |x: u32| (top..bottom).any(|y| buf.alpha(x, y) > 0);

    let left = (0..width).find(|&x| col_has_content(x)).unwrap_or(0);
    let right = (0..width).rev().find(|&x| col_has_content(x)).map_or(width, |x| x + 1);

    BoundingBox { top, bottom, left, right }
}

/// Copy the pixels inside `bbox` into a new buffer, channel for channel.
///
/// # Errors
///
/// Returns [`ExportError::InvalidArgument`] if the box is inverted or
/// extends past the buffer.
pub fn crop(buf: &PixelBuffer, bbox: BoundingBox) -> Result<PixelBuffer, ExportError> {
    if bbox.left > bbox.right
        || bbox.top > bbox.bottom
        || bbox.right > buf.width()
        || bbox.bottom > buf.height()
    {
        return Err(ExportError::InvalidArgument(format!(
            "crop box {bbox:?} does not fit a {}x{} buffer",
            buf.width(),
            buf.height()
        )));
    }

    let (width, height) = (bbox.width(), bbox.height());
    let span = bbox.left as usize * CHANNELS..bbox.right as usize * CHANNELS;
    let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for y in bbox.top..bbox.bottom {
        data.extend_from_slice(&buf.row(y)[span.clone()]);
    }
    PixelBuffer::from_raw(width, height, data)
}

/// Remove fully transparent rows and columns from the edges of `buf`.
///
/// A buffer with no visible pixel at all is returned unchanged.
#[must_use]
pub fn trim(buf: PixelBuffer) -> PixelBuffer {
    trim_with_box(buf).0
}

/// Like [`trim`], also returning the box that was kept.
#[must_use]
pub fn trim_with_box(buf: PixelBuffer) -> (PixelBuffer, BoundingBox) {
    let bbox = bounding_box(&buf);
    if bbox == BoundingBox::full(buf.width(), buf.height()) {
        return (buf, bbox);
    }
    // bounding_box never produces a box outside the buffer
    match crop(&buf, bbox) {
        Ok(trimmed) => (trimmed, bbox),
        Err(e) => {
            tracing::error!(?bbox, "crop failed, keeping full buffer: {e}");
            let full = BoundingBox::full(buf.width(), buf.height());
            (buf, full)
        }
    }
}
