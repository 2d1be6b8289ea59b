//! Thin reader for MAUS TextGrid output: tiers of (start, end, label) rows.

pub mod parse;
pub mod tier;

pub use parse::{parse_textgrid, parse_textgrid_file};
pub use tier::{Interval, TextGrid, Tier};
