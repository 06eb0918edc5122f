use std::path::PathBuf;

use thiserror::Error;

/// File level ingestion failures.
///
/// Problems with single hand blocks are never raised; they are counted on
/// the [`IngestResult`](super::IngestResult) instead.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unable to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input path {path}: {reason}")]
    InvalidPath { path: PathBuf, reason: &'static str },
}
