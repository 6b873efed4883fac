//! PDF page-range extraction and text extraction.

mod lopdf_backend;
#[cfg(test)]
pub mod testing;

pub use lopdf_backend::LopdfBackend;

use crate::error::{PageBound, PipelineError, Result};
use std::path::{Path, PathBuf};

/// One page of plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 0-based position in its document
    pub index: usize,
    /// Text as the PDF's text model yields it
    pub text: String,
}

/// Parsing capability the pipeline depends on.
///
/// Page indices are 0-based and inclusive on both ends.
pub trait PdfBackend: Send + Sync {
    /// Number of pages in the document at `path`.
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Write a new document holding pages `from..=to` of `source` to `dest`,
    /// replacing whatever is there.
    fn write_page_range(&self, source: &Path, from: usize, to: usize, dest: &Path) -> Result<()>;

    /// Every page of the document, in index order.
    fn pages(&self, path: &Path) -> Result<Vec<Page>>;
}

/// A loaded, read-only document handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub page_count: usize,
}

impl Document {
    /// Open the document at `path`.
    pub fn open(backend: &dyn PdfBackend, path: &Path) -> Result<Self> {
        let page_count = backend.page_count(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            page_count,
        })
    }

    /// Index of the last page, or None for an empty document.
    pub fn last_page_index(&self) -> Option<usize> {
        self.page_count.checked_sub(1)
    }
}

/// Check `from..=to` against the document without clamping.
pub fn validate_range(document: &Document, from: usize, to: usize) -> Result<()> {
    let Some(last) = document.last_page_index() else {
        return Err(PipelineError::OutOfRange {
            bound: PageBound::From,
            value: from,
            max: None,
        });
    };

    if to > last {
        return Err(PipelineError::OutOfRange {
            bound: PageBound::To,
            value: to,
            max: Some(last),
        });
    }

    if from > to {
        return Err(PipelineError::OutOfRange {
            bound: PageBound::From,
            value: from,
            max: Some(to),
        });
    }

    Ok(())
}

/// Copy pages `from..=to` into a new document at `dest`.
///
/// The source document is left untouched.
pub fn extract_range(
    backend: &dyn PdfBackend,
    document: &Document,
    from: usize,
    to: usize,
    dest: &Path,
) -> Result<Document> {
    validate_range(document, from, to)?;

    log::debug!(
        "Extracting pages {}..={} of {} to {}",
        from,
        to,
        document.path.display(),
        dest.display()
    );
    backend.write_page_range(&document.path, from, to, dest)?;

    Document::open(backend, dest)
}

/// Concatenate every page's text in page order, with no added separator.
pub fn extract_text(backend: &dyn PdfBackend, document: &Document) -> Result<String> {
    let mut pages = backend.pages(&document.path)?;
    pages.sort_by_key(|p| p.index);

    Ok(pages.into_iter().map(|p| p.text).collect())
}
