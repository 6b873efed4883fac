//! Text processing for TTS: word-aligned chunking.

pub mod chunker;

pub use chunker::{DEFAULT_MAX_CHARS, chunk_text};

/// A chunk of text ready for TTS processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// 0-based position; chunks of one text are numbered without gaps
    pub position: usize,
    /// Words of the chunk joined by single spaces
    pub text: String,
}

impl TextChunk {
    /// Create a new text chunk.
    pub fn new(position: usize, text: String) -> Self {
        Self { position, text }
    }

    /// Rendered length in characters, as billed.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// 1-based number used in intermediate file names.
    pub fn part_number(&self) -> usize {
        self.position + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_chunk_creation() {
        let chunk = TextChunk::new(1, "Hello world".to_string());
        assert_eq!(chunk.position, 1);
        assert_eq!(chunk.part_number(), 2);
        assert_eq!(chunk.text, "Hello world");
    }

    #[test]
    fn test_char_count_is_not_byte_count() {
        let chunk = TextChunk::new(0, "café naïve".to_string());
        assert_eq!(chunk.char_count(), 10);
        assert_eq!(chunk.text.len(), 12);
    }
}
