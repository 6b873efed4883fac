//! In-memory stand-in for a PDF parser, used by tests.
//!
//! A "document" is a JSON array of page texts on disk, so range extraction
//! and scratch-file handling still go through the filesystem.

use super::{Page, PdfBackend};
use crate::error::{PipelineError, Result, io_error};
use std::path::Path;

pub struct JsonPdfBackend;

impl JsonPdfBackend {
    /// Write a document with the given page texts.
    pub fn write(path: &Path, pages: &[String]) {
        let json = serde_json::to_string(pages).unwrap();
        std::fs::write(path, json).unwrap();
    }

    fn read(path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path).map_err(io_error(path))?;
        serde_json::from_str(&content).map_err(|e| PipelineError::CorruptDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl PdfBackend for JsonPdfBackend {
    fn page_count(&self, path: &Path) -> Result<usize> {
        Ok(Self::read(path)?.len())
    }

    fn write_page_range(&self, source: &Path, from: usize, to: usize, dest: &Path) -> Result<()> {
        let pages = Self::read(source)?;
        let json = serde_json::to_string(&pages[from..=to]).map_err(|e| {
            PipelineError::CorruptDocument {
                path: source.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(dest, json).map_err(io_error(dest))
    }

    fn pages(&self, path: &Path) -> Result<Vec<Page>> {
        Ok(Self::read(path)?
            .into_iter()
            .enumerate()
            .map(|(index, text)| Page { index, text })
            .collect())
    }
}
