//! Errors raised while running a line pipeline.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while cleaning a file.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Opening, reading, writing or flushing a file failed.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record lacks the character its rule splits on.
    #[error("line {line}: expected '{expected}' in record {record:?}")]
    MalformedRecord {
        /// 1-based line number in the input.
        line: usize,
        expected: char,
        record: String,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for a record that failed its rule's structural check.
    pub fn is_malformed(&self) -> bool {
        matches!(self, PipelineError::MalformedRecord { .. })
    }
}
