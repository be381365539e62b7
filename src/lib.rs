//! qrcrop - render text as a QR code and export it as a cropped PNG.
//!
//! The pipeline is rasterize → trim → encode → deliver:
//!
//! - [`ports::Rasterizer`] draws a [`ports::QrRegion`] into a [`pixel::PixelBuffer`]
//! - [`trim::trim`] removes fully transparent edges
//! - [`output::encode_png`] produces the file bytes
//! - [`ports::FileSink`] receives `qr-code-<size>.png`
//!
//! [`export::Exporter`] drives the stages in order.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod output;
pub mod params;
pub mod pixel;
pub mod ports;
pub mod trim;
