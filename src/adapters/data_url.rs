//! File sink that prints the image as a `data:` URL.

use std::io::Write;

use crate::error::ExportError;
use crate::output::png_data_url;
use crate::ports::file_sink::{DeliverFuture, Delivery, FileSink};

/// Prints delivered PNG bytes to stdout as `data:image/png;base64,...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlSink;

impl FileSink for DataUrlSink {
    fn deliver(&self, filename: &str, bytes: Vec<u8>) -> DeliverFuture<'_> {
        tracing::debug!(filename, bytes = bytes.len(), "printing data URL");
        let result = print_data_url(&bytes);
        Box::pin(async move { result })
    }
}

fn print_data_url(bytes: &[u8]) -> Result<Delivery, ExportError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", png_data_url(bytes))?;
    stdout.flush()?;
    Ok(Delivery::Stdout)
}
