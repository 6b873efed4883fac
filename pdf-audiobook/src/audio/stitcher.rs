//! Audio file stitching.
//!
//! MP3 frames and headerless PCM can both be joined by appending bytes, so
//! stitching never decodes or re-encodes.

use crate::error::{PipelineError, Result, io_error};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Synthesized audio for one text chunk, stored as an intermediate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    /// Position of the chunk this audio was made from
    pub position: usize,
    /// Where the encoded audio lives
    pub path: PathBuf,
}

impl AudioSegment {
    pub fn new(position: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            position,
            path: path.into(),
        }
    }
}

/// Concatenate `segments` in the order given into `output_path`.
///
/// Any existing file at `output_path` is replaced. The output only appears
/// once every segment has been copied, so a failure never leaves a
/// truncated artifact behind.
pub fn stitch(segments: &[AudioSegment], output_path: &Path) -> Result<u64> {
    if segments.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(parent).map_err(io_error(parent))?;

    let mut written = 0;
    for segment in segments {
        let mut input = File::open(&segment.path).map_err(io_error(&segment.path))?;
        written += io::copy(&mut input, staging.as_file_mut()).map_err(io_error(output_path))?;
    }
    staging.as_file_mut().flush().map_err(io_error(output_path))?;

    staging
        .persist(output_path)
        .map_err(|e| e.error)
        .map_err(io_error(output_path))?;

    log::debug!(
        "Stitched {} segments ({} bytes) into {}",
        segments.len(),
        written,
        output_path.display()
    );

    Ok(written)
}
