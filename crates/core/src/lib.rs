//! # Coverage Core
//!
//! Analysis of a line-delimited JSON corpus of radiology reports against the Xt-EHR imaging
//! report schema.
//!
//! Stages, leaves first:
//! - [`loader`]: parse records, skipping and reporting malformed lines
//! - [`profile`]: field-presence and categorical frequency tables
//! - [`classify`]: clinical phrase categories and text-length statistics
//! - [`mapping`]: coverage tiers and presence percentages per schema element
//! - [`report`] / [`summary`]: the compiled result and its markdown rendering
//!
//! Every stage is a pure function of the loaded [`Corpus`]. The loader and [`output`] are the
//! only modules that touch the filesystem.
//!
//! **No process concerns**: reading the environment, installing log subscribers and scheduling
//! stages on threads belong to the binaries.

pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod summary;

pub use classify::{
    classify_content, ClinicalCategory, ClinicalPatternCounts, ContentProfile, LengthStats,
};
pub use config::CoreConfig;
pub use coverage_types::{Corpus, Record};
pub use error::{CoverageError, CoverageResult};
pub use loader::{load_path, LineDiagnostic, LoadedCorpus};
pub use mapping::{map_to_schema, ElementPresence, SchemaMapping};
pub use pipeline::{analyse_corpus, AnalysisRun, AnalysisService, WrittenOutputs};
pub use profile::{profile_structure, FrequencyTable, StructureProfile};
pub use report::{AnalysisResult, DatasetInfo};
pub use summary::render_summary;
