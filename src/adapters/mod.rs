//! Adapter implementations for port traits.
//!
//! - `qr` — QR symbol rasterizer
//! - `directory` — saves exported files to disk
//! - `data_url` — prints exported files as `data:` URLs

pub mod data_url;
pub mod directory;
pub mod qr;
