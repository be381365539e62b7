//! File naming and PNG encoding of exported buffers.

use std::io::Cursor;

use base64::Engine;
use image::{DynamicImage, ImageFormat};

use crate::error::ExportError;
use crate::pixel::PixelBuffer;

/// Name of the exported file for a given render size.
#[must_use]
pub fn export_filename(size: u32) -> String {
    format!("qr-code-{size}.png")
}

/// Encode a pixel buffer as a PNG byte stream.
///
/// # Errors
///
/// Returns [`ExportError::Encoding`] if the encoder rejects the buffer.
pub fn encode_png(buf: PixelBuffer) -> Result<Vec<u8>, ExportError> {
    let img = DynamicImage::ImageRgba8(buf.into_image()?);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ExportError::Encoding(format!("Failed to encode PNG: {e}")))?;
    Ok(out.into_inner())
}

/// Decode PNG bytes into an RGBA pixel buffer.
///
/// # Errors
///
/// Returns [`ExportError::Encoding`] if the bytes are not a valid PNG.
pub fn decode_png(data: &[u8]) -> Result<PixelBuffer, ExportError> {
    let img = image::load_from_memory_with_format(data, ImageFormat::Png)
        .map_err(|e| ExportError::Encoding(format!("Failed to decode PNG: {e}")))?;
    Ok(PixelBuffer::from(img.into_rgba8()))
}

/// Wrap PNG bytes in a `data:` URL.
#[must_use]
pub fn png_data_url(data: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:image/png;base64,{encoded}")
}
