//! File sink port: the "save as file" collaborator.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde::Serialize;

use crate::error::ExportError;

/// Where a delivered file ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "target")]
pub enum Delivery {
    /// Written to this path on disk.
    File(PathBuf),
    /// Printed to stdout as a `data:` URL.
    Stdout,
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("<stdout>"),
        }
    }
}

/// Boxed future type returned by [`FileSink::deliver`].
pub type DeliverFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Delivery, ExportError>> + Send + 'a>>;

/// Receives the finished image bytes under their download filename.
pub trait FileSink: Send + Sync {
    /// Deliver one complete file.
    fn deliver(&self, filename: &str, bytes: Vec<u8>) -> DeliverFuture<'_>;
}
