//! File sink that saves into a directory on disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::ports::file_sink::{DeliverFuture, Delivery, FileSink};

/// Writes delivered files into a fixed directory.
///
/// Bytes go to a hidden `.partial` file first and are renamed into place,
/// so an interrupted write never leaves a truncated file under the final
/// name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink targeting `dir`. The directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn deliver(&self, filename: &str, bytes: Vec<u8>) -> DeliverFuture<'_> {
        let dir = self.dir.clone();
        let filename = filename.to_string();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || write_atomically(&dir, &filename, &bytes))
                .await
                .map_err(|e| ExportError::Io(std::io::Error::other(e)))?
        })
    }
}

fn write_atomically(dir: &Path, filename: &str, bytes: &[u8]) -> Result<Delivery, ExportError> {
    if Path::new(filename).file_name() != Some(OsStr::new(filename)) {
        return Err(ExportError::InvalidArgument(format!("'{filename}' is not a plain file name")));
    }
    std::fs::create_dir_all(dir)?;

    let target = dir.join(filename);
    let partial = dir.join(format!(".{filename}.partial"));
    if let Err(e) = std::fs::write(&partial, bytes).and_then(|()| std::fs::rename(&partial, &target))
    {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
    }
    tracing::debug!(path = %target.display(), bytes = bytes.len(), "file written");
    Ok(Delivery::File(target))
}
