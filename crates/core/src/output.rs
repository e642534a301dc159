//! Writing analysis outputs to disk.
//!
//! Each target is written independently: a failure writing one file leaves the in-memory result
//! untouched and does not prevent writing the other.

use crate::report::AnalysisResult;
use crate::{CoverageError, CoverageResult};
use std::fs;
use std::path::Path;

/// Writes the machine-readable analysis as indented JSON, creating parent directories.
pub fn write_analysis_json(result: &AnalysisResult, path: &Path) -> CoverageResult<()> {
    let json = result.to_json_pretty()?;
    write_text(path, &json)?;
    tracing::info!("analysis results saved to {}", path.display());
    Ok(())
}

/// Writes the markdown summary, creating parent directories.
pub fn write_summary(summary: &str, path: &Path) -> CoverageResult<()> {
    write_text(path, summary)?;
    tracing::info!("summary saved to {}", path.display());
    Ok(())
}

/// Reads a previously written machine-readable analysis.
pub fn read_analysis_json(path: &Path) -> CoverageResult<AnalysisResult> {
    let contents = fs::read_to_string(path).map_err(CoverageError::FileRead)?;
    AnalysisResult::from_json(&contents)
}

fn write_text(path: &Path, contents: &str) -> CoverageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(CoverageError::OutputDirCreation)?;
    }
    fs::write(path, contents).map_err(CoverageError::FileWrite)
}
