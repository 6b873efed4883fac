//! Conversion and estimation pipeline.
//!
//! Both operations share [`Pipeline::prepare`] (page range → text → chunks),
//! so the characters an estimate bills are exactly the characters a
//! conversion would synthesize.
//!
//! Every invocation works inside its own [`Scratch`] directory. A scratch
//! directory supplied by the caller must not be shared by two runs that are
//! in flight at the same time.

use crate::audio::{AudioSegment, stitch};
use crate::error::{PipelineError, Result, io_error};
use crate::pdf::{self, Document, PdfBackend};
use crate::pricing::{DEFAULT_CENTS_PER_MILLION_CHARS, PriceEstimate};
use crate::text::{DEFAULT_MAX_CHARS, TextChunk, chunk_text};
use crate::tts::{TtsOptions, synthesize_chunk};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tts_client::{SpeechProvider, Voice};

/// Base name shared by the intermediate files of one invocation.
pub const SCRATCH_STEM: &str = "excerpt";

/// Directory holding one invocation's intermediate artifacts.
#[derive(Debug)]
pub enum Scratch {
    /// Randomly named directory, removed when dropped
    Temporary(TempDir),
    /// Caller-owned directory, left in place afterwards
    Provided(PathBuf),
}

impl Scratch {
    /// Create a fresh, randomly named scratch directory.
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("pdf-audio-")
            .tempdir()
            .map_err(io_error(&std::env::temp_dir()))?;
        Ok(Self::Temporary(dir))
    }

    /// Use `dir` as scratch space, creating it if needed.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        Ok(Self::Provided(dir))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Temporary(dir) => dir.path(),
            Self::Provided(dir) => dir,
        }
    }

    fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

/// Everything the shared preparation step produced.
#[derive(Debug)]
pub struct Prepared {
    /// Document holding only the selected pages
    pub excerpt: Document,
    /// Chunks in synthesis order, each also written as a text file
    pub chunks: Vec<TextChunk>,
}

/// Parameters of one conversion.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub destination_dir: PathBuf,
    /// Output file name without extension
    pub output_name: String,
    pub from_page: usize,
    pub to_page: usize,
    pub options: TtsOptions,
}

impl ConversionRequest {
    /// Where the finished audio will be written.
    pub fn output_path(&self) -> PathBuf {
        self.destination_dir.join(format!(
            "{}.{}",
            self.output_name,
            self.options.format.extension()
        ))
    }
}

/// A finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub output_path: PathBuf,
    pub from_page: usize,
    pub to_page: usize,
    /// Pages actually narrated
    pub pages: usize,
    pub voice: Voice,
    pub chunk_count: usize,
    /// Characters sent for synthesis
    pub characters: usize,
    /// Size of the stitched audio
    pub bytes: u64,
}

/// The extraction → chunking → synthesis → stitching pipeline.
pub struct Pipeline<'a> {
    pdf: &'a dyn PdfBackend,
    max_chars: usize,
    cents_per_million: f64,
}

impl<'a> Pipeline<'a> {
    pub fn new(pdf: &'a dyn PdfBackend) -> Self {
        Self {
            pdf,
            max_chars: DEFAULT_MAX_CHARS,
            cents_per_million: DEFAULT_CENTS_PER_MILLION_CHARS,
        }
    }

    /// Set the maximum chunk size in characters.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    /// Set the price of one million characters, in cents.
    pub fn with_cents_per_million(mut self, cents: f64) -> Self {
        self.cents_per_million = cents;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Extract pages `from..=to` of `source`, pull their text and chunk it,
    /// writing every intermediate file into `scratch`.
    pub fn prepare(
        &self,
        source: &Path,
        from: usize,
        to: usize,
        scratch: &Scratch,
    ) -> Result<Prepared> {
        let document = Document::open(self.pdf, source)?;
        log::info!("Opened {} ({} pages)", source.display(), document.page_count);

        let excerpt_path = scratch.file(&format!("{}.pdf", SCRATCH_STEM));
        let excerpt = pdf::extract_range(self.pdf, &document, from, to, &excerpt_path)?;

        let text = pdf::extract_text(self.pdf, &excerpt)?;
        let text_path = excerpt_path.with_extension("txt");
        std::fs::write(&text_path, &text).map_err(io_error(&text_path))?;

        let chunks = chunk_text(&text, self.max_chars);
        log::info!(
            "Pages {}..={}: {} chars of text in {} chunks (max {})",
            from,
            to,
            text.chars().count(),
            chunks.len(),
            self.max_chars
        );

        for chunk in &chunks {
            let name = format!("{}_part{}.txt", SCRATCH_STEM, chunk.part_number());
            let path = scratch.file(&name);
            std::fs::write(&path, &chunk.text).map_err(io_error(&path))?;
        }
        log::debug!("Intermediate text in {}", text_path.display());

        Ok(Prepared { excerpt, chunks })
    }

    /// Price pages `from..=to` of `source` without synthesizing anything.
    pub fn estimate(
        &self,
        source: &Path,
        from: usize,
        to: usize,
        scratch: &Scratch,
    ) -> Result<PriceEstimate> {
        let prepared = self.prepare(source, from, to, scratch)?;
        Ok(PriceEstimate::from_chunks(
            &prepared.chunks,
            self.cents_per_million,
        ))
    }

    /// Convert the requested pages into one audio file.
    ///
    /// Chunks are synthesized one at a time in order; the first failure
    /// aborts the run and no output file is written. `on_progress` receives
    /// `(completed, total)` after each chunk.
    pub async fn convert<F>(
        &self,
        provider: &dyn SpeechProvider,
        request: &ConversionRequest,
        scratch: &Scratch,
        mut on_progress: F,
    ) -> Result<ConversionResult>
    where
        F: FnMut(usize, usize),
    {
        let prepared = self.prepare(
            &request.source,
            request.from_page,
            request.to_page,
            scratch,
        )?;
        let total = prepared.chunks.len();
        let extension = request.options.format.extension();

        let mut segments = Vec::with_capacity(total);
        for chunk in &prepared.chunks {
            log::debug!(
                "Synthesizing chunk {}/{} ({} chars)",
                chunk.part_number(),
                total,
                chunk.char_count()
            );
            let audio = synthesize_chunk(provider, chunk, &request.options).await?;

            let name = format!("{}_part{}.{}", SCRATCH_STEM, chunk.part_number(), extension);
            let path = scratch.file(&name);
            std::fs::write(&path, &audio).map_err(io_error(&path))?;
            segments.push(AudioSegment::new(chunk.position, path));

            on_progress(segments.len(), total);
        }

        segments.sort_by_key(|s| s.position);
        let output_path = request.output_path();
        let bytes = stitch(&segments, &output_path)?;
        log::info!("Wrote {} ({} bytes)", output_path.display(), bytes);

        Ok(ConversionResult {
            output_path,
            from_page: request.from_page,
            to_page: request.to_page,
            pages: prepared.excerpt.page_count,
            voice: request.options.voice,
            chunk_count: total,
            characters: prepared.chunks.iter().map(TextChunk::char_count).sum(),
            bytes,
        })
    }
}

/// Convenience check used by callers that want to fail fast before
/// touching the network.
pub fn ensure_destination(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(PipelineError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "destination directory does not exist",
            ),
        })
    }
}
