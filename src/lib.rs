//! # TextGrid Processor: A Parser and Generator for Praat TextGrid Annotations
//!
//! This crate provides tools for handling TextGrid files, the text annotation
//! format used by the Praat speech analysis program. It offers a lenient
//! streaming reader that accepts both the "long" (labelled) and "short"
//! (terse) textual layouts, an in-memory tier/interval/point data model with
//! temporal query operations, and a generator that writes the canonical long
//! layout back out, validating temporal consistency as it goes.
//!
//! The two primary entry points are:
//! - [`parse_textgrid`]: Converts TextGrid file content into a [`TextGrid`].
//! - [`generate_textgrid`]: Renders a [`TextGrid`] back into long-format text.
//!
//! ## Examples
//!
//! Here is a basic round-trip example showing how to parse a short-format
//! TextGrid and generate the canonical long form from the parsed data.
//!
//! ```rust
//! use textgrid_processor::{Tier, parse_textgrid};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Define some TextGrid content (short format, input only)
//!     let content = r#"
//! "ooTextFile"
//! "TextGrid"
//! 0
//! 2.5
//! <exists>
//! 1
//! "IntervalTier"
//! "words"
//! 0
//! 2.5
//! 2
//! 0 0.65 "hello"
//! 0.65 2.5 ""
//! "#;
//!
//!     // 2. Parse the content into the structured model
//!     let grid = parse_textgrid(content)?;
//!
//!     assert_eq!(grid.len(), 1);
//!     let Tier::Interval(words) = &grid[0] else {
//!         unreachable!()
//!     };
//!     // Containment is half-open: an interval covers [xmin, xmax)
//!     assert_eq!(words.interval_at(0.3).map(|i| i.text.as_str()), Some("hello"));
//!     assert_eq!(words.interval_at(0.65).map(|i| i.text.as_str()), Some(""));
//!
//!     // 3. Generate the canonical long-format text
//!     let rendered = textgrid_processor::generate_textgrid(&grid)?;
//!     assert!(rendered.starts_with("\"ooTextFile\"\n\"TextGrid\"\n0 to 2.5 seconds <exists>"));
//!
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod model;
pub mod reader;

pub use codec::{praat_number, praat_string};
pub use error::TextGridError;
pub use model::{
    Interval, IntervalTier, Point, TextEncoding, TextGrid, TextTier, Tier, TierData, TierItem,
};
pub use reader::{PraatReader, Value};

/// 解析一段完整的 TextGrid 文本内容。
///
/// [`TextGrid::parse`] 的顶层别名, 接受长短两种格式。
pub fn parse_textgrid(content: &str) -> Result<TextGrid, TextGridError> {
    TextGrid::parse(content)
}

/// 将 TextGrid 序列化为 Praat 长格式文本。
///
/// [`TextGrid::to_praat`] 的顶层别名, 序列化前校验全部时间一致性。
pub fn generate_textgrid(grid: &TextGrid) -> Result<String, TextGridError> {
    grid.to_praat()
}
