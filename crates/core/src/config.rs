//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the pipeline. Library
//! code never reads process-wide environment variables itself; binaries read them and hand the
//! raw values to [`CoreConfig::from_env_values`].

use crate::constants::{
    ANALYSIS_JSON_FILENAME, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, SUMMARY_MD_FILENAME,
};
use crate::{CoverageError, CoverageResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    input_path: PathBuf,
    output_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoverageError::InvalidInput` if either path is empty.
    pub fn new(input_path: PathBuf, output_dir: PathBuf) -> CoverageResult<Self> {
        if input_path.as_os_str().is_empty() {
            return Err(CoverageError::InvalidInput(
                "input path cannot be empty".into(),
            ));
        }
        if output_dir.as_os_str().is_empty() {
            return Err(CoverageError::InvalidInput(
                "output directory cannot be empty".into(),
            ));
        }

        Ok(Self {
            input_path,
            output_dir,
        })
    }

    /// Build a configuration from optional raw values, typically read from the environment.
    ///
    /// `None`, empty and whitespace-only values fall back to the defaults.
    pub fn from_env_values(
        input: Option<String>,
        output_dir: Option<String>,
    ) -> CoverageResult<Self> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let input = non_blank(input).unwrap_or_else(|| DEFAULT_INPUT_PATH.into());
        let output_dir = non_blank(output_dir).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into());

        Self::new(PathBuf::from(input), PathBuf::from(output_dir))
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the machine-readable analysis is written.
    pub fn analysis_json_path(&self) -> PathBuf {
        self.output_dir.join(ANALYSIS_JSON_FILENAME)
    }

    /// Where the markdown summary is written.
    pub fn summary_md_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_MD_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_values_uses_defaults() {
        let config = CoreConfig::from_env_values(None, Some("   ".into())).unwrap();
        assert_eq!(config.input_path(), Path::new(DEFAULT_INPUT_PATH));
        assert_eq!(config.output_dir(), Path::new(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_from_env_values_trims_overrides() {
        let config =
            CoreConfig::from_env_values(Some(" corpus.jsonl ".into()), Some("out".into())).unwrap();
        assert_eq!(config.input_path(), Path::new("corpus.jsonl"));
        assert_eq!(
            config.analysis_json_path(),
            Path::new("out").join(ANALYSIS_JSON_FILENAME)
        );
        assert_eq!(
            config.summary_md_path(),
            Path::new("out").join(SUMMARY_MD_FILENAME)
        );
    }

    #[test]
    fn test_new_rejects_empty_paths() {
        let err = CoreConfig::new(PathBuf::new(), PathBuf::from("out")).unwrap_err();
        assert!(matches!(err, CoverageError::InvalidInput(msg) if msg.contains("input path")));

        let err = CoreConfig::new(PathBuf::from("in.jsonl"), PathBuf::new()).unwrap_err();
        assert!(matches!(err, CoverageError::InvalidInput(msg) if msg.contains("output directory")));
    }
}
