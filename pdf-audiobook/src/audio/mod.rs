//! Audio assembly: gapless, ordered concatenation of synthesized segments.

pub mod stitcher;

pub use stitcher::{AudioSegment, stitch};
