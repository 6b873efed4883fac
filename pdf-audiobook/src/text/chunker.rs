//! Text chunking for TTS processing.

use super::TextChunk;

/// Default maximum chunk size in characters.
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Split text into word-aligned chunks of at most `max_chars` characters.
///
/// Every word is charged its length plus one separator, including the last
/// word of a chunk. A word that alone exceeds `max_chars` still gets a chunk
/// of its own rather than being split.
///
/// # Arguments
/// * `text` - The text to chunk
/// * `max_chars` - Maximum chunk size in characters (default: 4000)
///
/// # Returns
/// Chunks in text order, numbered from 0.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0;

    for word in text.split_whitespace() {
        let word_size = word.chars().count() + 1;

        if current_size + word_size > max_chars && !current.is_empty() {
            chunks.push(TextChunk::new(chunks.len(), current.join(" ")));
            current.clear();
            current_size = 0;
        }

        current.push(word);
        current_size += word_size;
    }

    // Don't forget the last chunk
    if !current.is_empty() {
        chunks.push(TextChunk::new(chunks.len(), current.join(" ")));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(chunks: &[TextChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_chunk_short_text() {
        let chunks = chunk_text("Hello world. How are you?", DEFAULT_MAX_CHARS);
        assert_eq!(texts(&chunks), vec!["Hello world. How are you?"]);
        assert_eq!(chunks[0].position, 0);
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("", DEFAULT_MAX_CHARS).is_empty());
    }

    #[test]
    fn test_chunk_whitespace_only() {
        assert!(chunk_text("   \n\n \t  ", DEFAULT_MAX_CHARS).is_empty());
    }

    #[test]
    fn test_separator_charged_for_last_word() {
        // "one two" renders to 7 chars but costs 8, so it does not fit in 7
        assert_eq!(texts(&chunk_text("one two", 7)), vec!["one", "two"]);
        assert_eq!(texts(&chunk_text("one two", 8)), vec!["one two"]);
    }

    #[test]
    fn test_split_on_words() {
        let chunks = chunk_text("one two three four five", 11);
        assert_eq!(texts(&chunks), vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let chunks = chunk_text("  line one\n\nline\ttwo  ", DEFAULT_MAX_CHARS);
        assert_eq!(texts(&chunks), vec!["line one line two"]);
    }

    #[test]
    fn test_oversized_word_gets_own_chunk() {
        let chunks = chunk_text("a supercalifragilistic b", 10);
        assert_eq!(texts(&chunks), vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_oversized_first_word() {
        let chunks = chunk_text("abcdefghijkl x", 5);
        assert_eq!(texts(&chunks), vec!["abcdefghijkl", "x"]);
    }

    #[test]
    fn test_word_exactly_max_fits_alone() {
        let chunks = chunk_text("abcde fg", 5);
        assert_eq!(texts(&chunks), vec!["abcde", "fg"]);
    }

    #[test]
    fn test_positions_are_contiguous() {
        let text = "First sentence. Second sentence. Third sentence. Fourth sentence. Fifth sentence.";
        let chunks = chunk_text(text, 30);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.position, i);
        }
    }

    #[test]
    fn test_size_counts_characters_not_bytes() {
        // Each word is 4 chars (5 bytes), costing 5 units
        let chunks = chunk_text("café café", 10);
        assert_eq!(texts(&chunks), vec!["café café"]);
    }

    proptest! {
        #[test]
        fn prop_words_are_preserved(text in "[a-z \n\t]{0,300}", max_chars in 1usize..60) {
            let chunks = chunk_text(&text, max_chars);
            let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.text.split(' ')).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            prop_assert_eq!(rejoined, original);
        }

        #[test]
        fn prop_chunks_respect_bound(text in "[a-z]{1,12}( [a-z]{1,12}){0,40}", max_chars in 1usize..60) {
            for chunk in chunk_text(&text, max_chars) {
                let single_word = !chunk.text.contains(' ');
                prop_assert!(chunk.char_count() <= max_chars || single_word);
                prop_assert!(!chunk.text.is_empty());
            }
        }
    }
}
