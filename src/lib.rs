//! Convert MAUS TextGrid annotation tiers to RDF under the DADA schema.
//!
//! The core is the in-memory model in [`model`] (typed spans with a
//! property bag, `next`/`hasChild` links) and its deterministic triple
//! emission; [`textgrid`] is a thin reader for the alignment files and
//! [`convert`] wires the two together.

pub mod convert;
pub mod model;
pub mod ns;
pub mod textgrid;

pub type Result<T> = anyhow::Result<T>;
