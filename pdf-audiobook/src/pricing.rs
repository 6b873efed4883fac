//! Cost estimation from chunked text.

use crate::text::TextChunk;

/// Price of one million synthesized characters, in cents ($15.00).
pub const DEFAULT_CENTS_PER_MILLION_CHARS: f64 = 1500.0;

/// What synthesizing a set of chunks would cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEstimate {
    /// Characters that would be sent for synthesis
    pub characters: usize,
    /// Unrounded price in cents
    pub cents: f64,
}

impl PriceEstimate {
    /// Price the chunks exactly as they would be sent for synthesis.
    pub fn from_chunks(chunks: &[TextChunk], cents_per_million: f64) -> Self {
        let characters = chunks.iter().map(TextChunk::char_count).sum();
        Self {
            characters,
            cents: price_cents(characters, cents_per_million),
        }
    }
}

/// `(characters / 1_000_000) * cents_per_million`, with no rounding.
pub fn price_cents(characters: usize, cents_per_million: f64) -> f64 {
    (characters as f64 / 1_000_000.0) * cents_per_million
}

/// Render a price for display: five decimals below one dollar, two above.
pub fn format_dollars(cents: f64) -> String {
    let dollars = cents / 100.0;
    if dollars < 1.0 {
        format!("${:.5}", dollars)
    } else {
        format!("${:.2}", dollars)
    }
}
