//! End-to-end analysis: load, profile, classify, map, compile, write.
//!
//! The three analysis stages are independent read-only scans of the same corpus. They are run
//! one after another here; callers wanting them in parallel can invoke
//! [`profile_structure`], [`classify_content`] and [`map_to_schema`] themselves and pass the
//! outputs to [`AnalysisResult::compile`].

use crate::classify::classify_content;
use crate::config::CoreConfig;
use crate::loader::{load_path, LineDiagnostic, LoadedCorpus};
use crate::mapping::map_to_schema;
use crate::output::{write_analysis_json, write_summary};
use crate::profile::profile_structure;
use crate::report::AnalysisResult;
use crate::summary::render_summary;
use crate::CoverageResult;
use coverage_types::Corpus;
use std::path::PathBuf;

/// Runs every analysis stage over an already-loaded corpus.
pub fn analyse_corpus(corpus: &Corpus, source_file: &str) -> AnalysisResult {
    AnalysisResult::compile(
        source_file,
        corpus.len(),
        profile_structure(corpus),
        classify_content(corpus),
        map_to_schema(corpus),
    )
}

/// A completed run: the result plus any source lines that were skipped.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub result: AnalysisResult,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Where each output landed, or why it did not.
#[derive(Debug)]
pub struct WrittenOutputs {
    pub analysis_json: CoverageResult<PathBuf>,
    pub summary_md: CoverageResult<PathBuf>,
}

impl WrittenOutputs {
    pub fn all_ok(&self) -> bool {
        self.analysis_json.is_ok() && self.summary_md.is_ok()
    }
}

/// Analysis operations bound to a resolved configuration.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    config: CoreConfig,
}

impl AnalysisService {
    pub fn new(config: CoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Loads the configured source without analysing it.
    ///
    /// # Errors
    ///
    /// Fails only if the source cannot be opened or read. Malformed lines are returned as
    /// diagnostics.
    pub fn load(&self) -> CoverageResult<LoadedCorpus> {
        load_path(self.config.input_path())
    }

    /// Loads the configured source and analyses it.
    ///
    /// # Errors
    ///
    /// Same as [`AnalysisService::load`].
    pub fn run(&self) -> CoverageResult<AnalysisRun> {
        tracing::info!("starting complete dataset analysis");

        let loaded = self.load()?;
        let source = self.config.input_path().display().to_string();
        let result = analyse_corpus(&loaded.corpus, &source);

        Ok(AnalysisRun {
            result,
            diagnostics: loaded.diagnostics,
        })
    }

    /// Writes the JSON analysis and the markdown summary into the output directory.
    ///
    /// Both targets are attempted even if the first fails.
    pub fn write_outputs(&self, result: &AnalysisResult) -> WrittenOutputs {
        let json_path = self.config.analysis_json_path();
        let analysis_json = write_analysis_json(result, &json_path).map(|()| json_path);

        let summary_path = self.config.summary_md_path();
        let summary_md =
            write_summary(&render_summary(result), &summary_path).map(|()| summary_path);

        WrittenOutputs {
            analysis_json,
            summary_md,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::read_analysis_json;
    use crate::CoverageError;
    use std::fs;
    use tempfile::TempDir;

    const TWO_REPORTS: &str = concat!(
        r#"{"report": "Normal study, no acute findings.", "language": "en", "modality": "CT"}"#,
        "\n",
        r#"{"report": "Lesión sospechosa de 2 cm.", "translation": "Suspicious 2 cm lesion.", "language": "es", "modality": "MRI"}"#,
        "\n",
    );

    fn service_for(temp: &TempDir, contents: &str) -> AnalysisService {
        let input = temp.path().join("reports.jsonl");
        fs::write(&input, contents).unwrap();
        let config = CoreConfig::new(input, temp.path().join("output")).unwrap();
        AnalysisService::new(config)
    }

    #[test]
    fn test_run_counts_two_report_corpus() {
        let temp = TempDir::new().unwrap();
        let service = service_for(&temp, TWO_REPORTS);

        let run = service.run().unwrap();
        let result = &run.result;
        assert!(run.diagnostics.is_empty());
        assert_eq!(result.total_reports(), 2);
        assert_eq!(result.structure().languages.count("en"), 1);
        assert_eq!(result.structure().languages.count("es"), 1);
        assert_eq!(result.structure().modalities.count("CT"), 1);
        assert_eq!(result.structure().modalities.count("MRI"), 1);

        let patterns = result.content().clinical_patterns;
        assert_eq!(patterns.normal_reports, 1);
        assert_eq!(patterns.pathological_reports, 1);
        assert_eq!(patterns.measurements_present, 1);
        assert_eq!(patterns.findings_present, 2);
    }

    #[test]
    fn test_run_skips_invalid_line() {
        let temp = TempDir::new().unwrap();
        let contents = format!("{}{{broken\n", TWO_REPORTS);
        let service = service_for(&temp, &contents);

        let run = service.run().unwrap();
        assert_eq!(run.result.total_reports(), 2);
        assert_eq!(run.diagnostics.len(), 1);
        assert_eq!(run.diagnostics[0].line, 3);
    }

    #[test]
    fn test_load_returns_corpus_and_diagnostics() {
        let temp = TempDir::new().unwrap();
        let contents = format!("{}[1, 2]\n", TWO_REPORTS);
        let service = service_for(&temp, &contents);

        let loaded = service.load().unwrap();
        assert_eq!(loaded.corpus.len(), 2);
        assert_eq!(loaded.diagnostics.len(), 1);
        assert_eq!(loaded.diagnostics[0].line, 3);
        assert_eq!(
            loaded.corpus.len(),
            service.run().unwrap().result.total_reports()
        );
    }

    #[test]
    fn test_run_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let service = service_for(&temp, TWO_REPORTS);

        let first = service.run().unwrap().result;
        let second = service.run().unwrap().result;
        assert_eq!(first, second);
        assert_eq!(
            first.to_json_pretty().unwrap(),
            second.to_json_pretty().unwrap()
        );
    }

    #[test]
    fn test_empty_source_boundary() {
        let temp = TempDir::new().unwrap();
        let service = service_for(&temp, "");

        let result = service.run().unwrap().result;
        assert_eq!(result.total_reports(), 0);
        assert!(result.content().translation_length_stats.is_none());
        for presence in result
            .mapping()
            .presence_statistics
            .present_required
            .values()
        {
            assert_eq!(presence.percentage, 0.0);
        }
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config =
            CoreConfig::new(temp.path().join("absent.jsonl"), temp.path().join("out")).unwrap();
        let service = AnalysisService::new(config);
        assert!(matches!(
            service.load(),
            Err(CoverageError::SourceOpen { .. })
        ));
        assert!(matches!(
            service.run(),
            Err(CoverageError::SourceOpen { .. })
        ));
    }

    #[test]
    fn test_write_outputs_round_trip() {
        let temp = TempDir::new().unwrap();
        let service = service_for(&temp, TWO_REPORTS);
        let result = service.run().unwrap().result;

        let written = service.write_outputs(&result);
        assert!(written.all_ok());

        let json_path = written.analysis_json.unwrap();
        let summary_path = written.summary_md.unwrap();
        assert_eq!(read_analysis_json(&json_path).unwrap(), result);

        let summary = fs::read_to_string(summary_path).unwrap();
        assert_eq!(summary, render_summary(&result));
    }
}
