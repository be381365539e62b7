//! Service context that bundles the port trait objects for one run.

use std::path::PathBuf;

use crate::adapters::data_url::DataUrlSink;
use crate::adapters::directory::DirectorySink;
use crate::adapters::qr::QrRasterizer;
use crate::export::Exporter;
use crate::ports::{FileSink, Rasterizer};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Rasterizer port.
    pub rasterizer: Box<dyn Rasterizer>,
    /// File sink port.
    pub sink: Box<dyn FileSink>,
}

impl ServiceContext {
    /// Rasterize with `qrcode` and save into `out_dir`.
    #[must_use]
    pub fn to_directory(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            rasterizer: Box::new(QrRasterizer::new()),
            sink: Box::new(DirectorySink::new(out_dir)),
        }
    }

    /// Rasterize with `qrcode` and print a data URL to stdout.
    #[must_use]
    pub fn to_stdout() -> Self {
        Self { rasterizer: Box::new(QrRasterizer::new()), sink: Box::new(DataUrlSink) }
    }

    /// Assemble an exporter from this context.
    #[must_use]
    pub fn into_exporter(self, crop: bool) -> Exporter {
        Exporter::new(self.rasterizer, self.sink).with_crop(crop)
    }
}
