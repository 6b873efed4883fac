//! Failure kinds surfaced by the conversion and estimation pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tts_client::TtsError;

/// Which end of a page range a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBound {
    From,
    To,
}

impl fmt::Display for PageBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("start"),
            Self::To => f.write_str("end"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{bound} page {value} is out of range{}", .max.map(|m| format!(" (maximum {})", m)).unwrap_or_else(|| " (document has no pages)".to_string()))]
    OutOfRange {
        bound: PageBound,
        value: usize,
        /// Largest index this bound may take, if any
        max: Option<usize>,
    },

    #[error("Cannot parse document {}: {message}", .path.display())]
    CorruptDocument { path: PathBuf, message: String },

    #[error("Speech synthesis failed for chunk {index} ({chars} chars): {source}")]
    Synthesis {
        index: usize,
        chars: usize,
        #[source]
        source: TtsError,
    },

    #[error("No audio segments to stitch")]
    EmptyInput,

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Build a `map_err` adapter that tags an IO failure with the path involved.
pub fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PipelineError + '_ {
    move |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    }
}
