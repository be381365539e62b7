//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the export pipeline and an
//! external collaborator. Implementations live in `src/adapters/`.

pub mod file_sink;
pub mod rasterizer;

pub use file_sink::{Delivery, FileSink};
pub use rasterizer::{QrRegion, QrStyle, Rasterizer};
