// PDF backend built on lopdf

use super::{Page, PdfBackend};
use crate::error::{PipelineError, Result, io_error};
use lopdf::Document as LoDocument;
use std::path::Path;

/// Pure-Rust PDF backend.
pub struct LopdfBackend;

impl LopdfBackend {
    fn load(path: &Path) -> Result<LoDocument> {
        // Surface a missing or unreadable file as IO rather than a parse failure
        std::fs::metadata(path).map_err(io_error(path))?;

        LoDocument::load(path).map_err(|e| PipelineError::CorruptDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Page numbers (1-based, as lopdf numbers them) in document order.
    fn page_numbers(doc: &LoDocument) -> Vec<u32> {
        doc.get_pages().keys().copied().collect()
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self, path: &Path) -> Result<usize> {
        Ok(Self::load(path)?.get_pages().len())
    }

    fn write_page_range(&self, source: &Path, from: usize, to: usize, dest: &Path) -> Result<()> {
        let mut doc = Self::load(source)?;

        let outside: Vec<u32> = Self::page_numbers(&doc)
            .into_iter()
            .enumerate()
            .filter(|(index, _)| *index < from || *index > to)
            .map(|(_, number)| number)
            .collect();

        doc.delete_pages(&outside);
        doc.prune_objects();
        doc.renumber_objects();
        doc.compress();

        doc.save(dest)
            .map_err(|e| std::io::Error::other(e.to_string()))
            .map_err(io_error(dest))?;

        Ok(())
    }

    fn pages(&self, path: &Path) -> Result<Vec<Page>> {
        let doc = Self::load(path)?;

        Self::page_numbers(&doc)
            .into_iter()
            .enumerate()
            .map(|(index, number)| {
                let text = doc
                    .extract_text(&[number])
                    .map_err(|e| PipelineError::CorruptDocument {
                        path: path.to_path_buf(),
                        message: format!("page {}: {}", index, e),
                    })?;
                Ok(Page { index, text })
            })
            .collect()
    }
}
