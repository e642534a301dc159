//! Constants used throughout the coverage core crate.

/// Source corpus used when no input path is configured.
pub const DEFAULT_INPUT_PATH: &str = "data/PARROT_v1_0.jsonl";

/// Directory for analysis outputs when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Filename for the machine-readable analysis.
pub const ANALYSIS_JSON_FILENAME: &str = "parrot_analysis.json";

/// Filename for the markdown summary.
pub const SUMMARY_MD_FILENAME: &str = "parrot_summary.md";

/// Environment variable naming the source corpus.
pub const INPUT_ENV_VAR: &str = "COVERAGE_INPUT";

/// Environment variable naming the output directory.
pub const OUTPUT_DIR_ENV_VAR: &str = "COVERAGE_OUTPUT_DIR";
