//! Ingesting session files into a [`HandStore`].
//!
//! Every hand block is handled on its own: a block that fails to parse or to
//! store is counted and logged, and the rest of the file carries on. A hand
//! the store already has is skipped, not failed, so re-importing a file is
//! harmless.
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::hand_history::{split_hands, HandParser, ParsedHand, HAND_MARKER};
use crate::store::HandStore;

mod errors;
mod session;

pub use errors::IngestError;
pub use session::SessionSummary;

/// Extension of the session files picked up from a directory.
pub const SESSION_FILE_EXTENSION: &str = "txt";

/// A hand block that couldn't be ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockFailure {
    /// The site hand id when the block has one, otherwise `block N`.
    pub block: String,
    /// First line of the error message.
    pub message: String,
}

/// Per file counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IngestResult {
    pub source: String,
    pub ingested: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<BlockFailure>,
    /// Built from the hands that were stored. `None` when nothing was.
    pub session: Option<SessionSummary>,
}

impl IngestResult {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn total(&self) -> usize {
        self.ingested + self.skipped + self.failed
    }

    fn fail(&mut self, block: String, err: &dyn std::fmt::Display) {
        let message = err
            .to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        error!(source = %self.source, %block, %message, "Failed to ingest hand");
        self.failed += 1;
        self.failures.push(BlockFailure { block, message });
    }
}

/// Parse and store every hand in `text`.
pub fn ingest_text<S: HandStore + ?Sized>(
    parser: &HandParser,
    store: &mut S,
    source: &str,
    text: &str,
) -> IngestResult {
    let mut result = IngestResult::new(source);
    let mut stored: Vec<ParsedHand> = Vec::new();

    for (idx, block) in split_hands(text).iter().enumerate() {
        let hand = match parser.parse(block) {
            Ok(hand) => hand,
            Err(e) => {
                result.fail(block_label(idx, block), &e);
                continue;
            }
        };

        match store.insert(&hand) {
            Ok(_) => {
                result.ingested += 1;
                stored.push(hand);
            }
            Err(e) if e.is_duplicate() => {
                warn!(%source, hand_id = %hand.hand.hand_id, "Skipping duplicate hand");
                result.skipped += 1;
            }
            Err(e) => result.fail(hand.hand.hand_id.clone(), &e),
        }
    }

    result.session = SessionSummary::from_hands(&stored);
    result
}

/// Read one session file and ingest it.
///
/// # Errors
///
/// Only when the file itself can't be read.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn ingest_file<S: HandStore + ?Sized>(
    parser: &HandParser,
    store: &mut S,
    path: impl AsRef<Path>,
) -> Result<IngestResult, IngestError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IngestError::InvalidPath {
            path: path.to_path_buf(),
            reason: "not a file",
        });
    }

    info!("Ingesting session file");
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let result = ingest_text(parser, store, &path.display().to_string(), &text);
    info!(
        ingested = result.ingested,
        skipped = result.skipped,
        failed = result.failed,
        "Finished session file"
    );
    Ok(result)
}

/// Ingest every session file in `dir`, in file name order.
///
/// # Errors
///
/// When `dir` isn't a readable directory, or a file in it can't be read.
pub fn ingest_directory<S: HandStore + ?Sized>(
    parser: &HandParser,
    store: &mut S,
    dir: impl AsRef<Path>,
) -> Result<Vec<IngestResult>, IngestError> {
    let dir = dir.as_ref();
    let files = session_files(dir)?;
    files
        .iter()
        .map(|file| ingest_file(parser, store, file))
        .collect()
}

/// Ingest a mix of files and directories.
pub fn ingest_paths<S: HandStore + ?Sized>(
    parser: &HandParser,
    store: &mut S,
    paths: &[PathBuf],
) -> Result<Vec<IngestResult>, IngestError> {
    let mut results = Vec::new();
    for path in paths {
        if path.is_dir() {
            results.extend(ingest_directory(parser, store, path)?);
        } else {
            results.push(ingest_file(parser, store, path)?);
        }
    }
    Ok(results)
}

fn session_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::InvalidPath {
            path: dir.to_path_buf(),
            reason: "not a directory",
        });
    }
    let io_err = |source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(SESSION_FILE_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn block_label(idx: usize, block: &str) -> String {
    block
        .strip_prefix(HAND_MARKER)
        .and_then(|rest| rest.split(':').next())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("block {}", idx + 1))
}
