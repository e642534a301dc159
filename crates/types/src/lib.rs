//! Primitive domain types shared across the coverage workspace.
//!
//! - [`Record`]: one loosely-typed report entry with explicit get-or-absent lookups
//! - [`Corpus`]: the ordered, immutable set of loaded records
//! - [`fields`]: names of the source fields the analysis understands

pub mod fields;
mod record;

pub use record::{Corpus, Record, RecordError};
