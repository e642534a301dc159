//! The compiled analysis result.

use crate::classify::ContentProfile;
use crate::mapping::SchemaMapping;
use crate::profile::StructureProfile;
use crate::{CoverageError, CoverageResult};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DatasetInfo {
    pub total_reports: usize,
    /// Identifier of the source the corpus was loaded from, usually its path.
    pub source_file: String,
}

/// Immutable aggregate of one analysis run.
///
/// Built once by [`AnalysisResult::compile`] and only read afterwards. Its serialised form is
/// the machine-readable output, and it deserialises back from that form.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    dataset_info: DatasetInfo,
    structure_analysis: StructureProfile,
    content_analysis: ContentProfile,
    xt_ehr_mapping: SchemaMapping,
}

impl AnalysisResult {
    /// Assembles the stage outputs into a result.
    pub fn compile(
        source_file: impl Into<String>,
        total_reports: usize,
        structure: StructureProfile,
        content: ContentProfile,
        mapping: SchemaMapping,
    ) -> Self {
        Self {
            dataset_info: DatasetInfo {
                total_reports,
                source_file: source_file.into(),
            },
            structure_analysis: structure,
            content_analysis: content,
            xt_ehr_mapping: mapping,
        }
    }

    pub fn dataset_info(&self) -> &DatasetInfo {
        &self.dataset_info
    }

    pub fn total_reports(&self) -> usize {
        self.dataset_info.total_reports
    }

    pub fn structure(&self) -> &StructureProfile {
        &self.structure_analysis
    }

    pub fn content(&self) -> &ContentProfile {
        &self.content_analysis
    }

    pub fn mapping(&self) -> &SchemaMapping {
        &self.xt_ehr_mapping
    }

    /// Serialises to indented JSON.
    pub fn to_json_pretty(&self) -> CoverageResult<String> {
        serde_json::to_string_pretty(self).map_err(CoverageError::Serialization)
    }

    pub fn from_json(json: &str) -> CoverageResult<Self> {
        serde_json::from_str(json).map_err(CoverageError::Deserialization)
    }
}
