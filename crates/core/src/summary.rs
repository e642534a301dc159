//! Human-readable markdown summary of an [`AnalysisResult`].
//!
//! Rendering is a pure function of the result: the same result always produces the same text.
//! Percentages are rounded to one decimal place and are 0.0 for an empty corpus.

use crate::classify::ClinicalPatternCounts;
use crate::mapping::percentage;
use crate::profile::FrequencyTable;
use crate::report::AnalysisResult;
use xtehr::CoverageTier;

const TITLE: &str = "# Imaging Report Dataset Analysis Summary";

/// Placeholder for a "most common" value when nothing was observed.
const NO_DATA: &str = "n/a";

/// Renders the markdown summary.
///
/// # Arguments
///
/// * `result` - A compiled analysis.
///
/// # Returns
///
/// Markdown text. Identical results render identically.
pub fn render_summary(result: &AnalysisResult) -> String {
    let total = result.total_reports();
    let structure = result.structure();
    let mut lines: Vec<String> = Vec::new();

    lines.push(TITLE.to_string());
    lines.push("=".repeat(50));
    lines.push(String::new());

    lines.push("## Dataset Overview".to_string());
    lines.push(format!("- Total Reports: {}", total));
    lines.push(format!("- Source: {}", result.dataset_info().source_file));
    lines.push(String::new());

    lines.push("## Data Structure Analysis".to_string());
    lines.push(format!(
        "- Languages: {} different languages",
        structure.languages.distinct()
    ));
    lines.push(format!(
        "- Modalities: {} different modalities",
        structure.modalities.distinct()
    ));
    lines.push(format!(
        "- Anatomical Areas: {} different areas",
        structure.anatomical_areas.distinct()
    ));
    lines.push(format!(
        "- Countries: {} different countries",
        structure.countries.distinct()
    ));
    lines.push(String::new());

    lines.push("### Most Common:".to_string());
    lines.push(format!("- Language: {}", most_common(&structure.languages)));
    lines.push(format!("- Modality: {}", most_common(&structure.modalities)));
    lines.push(format!(
        "- Area: {}",
        most_common(&structure.anatomical_areas)
    ));
    lines.push(String::new());

    lines.push("## Clinical Content Analysis".to_string());
    for (label, count) in pattern_rows(&result.content().clinical_patterns) {
        lines.push(format!(
            "- {}: {} ({:.1}%)",
            label,
            count,
            percentage(count, total)
        ));
    }
    lines.push(String::new());

    lines.push("## Xt-EHR Element Mapping".to_string());
    let mapping = &result.mapping().mapping;
    for tier in CoverageTier::ALL {
        lines.push(format!(
            "- {} Elements: {}",
            tier.label(),
            mapping.tier(tier).len()
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

fn most_common(table: &FrequencyTable) -> &str {
    table.most_frequent().map_or(NO_DATA, |(value, _)| value)
}

fn pattern_rows(patterns: &ClinicalPatternCounts) -> [(&'static str, usize); 7] {
    [
        ("Normal Reports", patterns.normal_reports),
        ("Pathological Reports", patterns.pathological_reports),
        ("Comparison Studies", patterns.comparison_mentioned),
        ("Contrast Use", patterns.contrast_mentioned),
        ("Measurements", patterns.measurements_present),
        ("Recommendations", patterns.recommendations_present),
        ("Technique Described", patterns.technique_described),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyse_corpus;
    use coverage_types::{Corpus, Record};

    fn corpus(lines: &[&str]) -> Corpus {
        lines
            .iter()
            .map(|line| Record::from_json_line(line).unwrap())
            .collect()
    }

    #[test]
    fn test_summary_for_two_record_corpus() {
        let result = analyse_corpus(
            &corpus(&[
                r#"{"report": "Normal study, no acute findings.", "language": "en", "modality": "CT"}"#,
                r#"{"report": "Lesión sospechosa de 2 cm.", "translation": "Suspicious 2 cm lesion.", "language": "es", "modality": "MRI"}"#,
            ]),
            "two.jsonl",
        );
        let summary = render_summary(&result);

        assert!(summary.starts_with("# Imaging Report Dataset Analysis Summary\n"));
        assert!(summary.contains("- Total Reports: 2\n"));
        assert!(summary.contains("- Languages: 2 different languages\n"));
        assert!(summary.contains("- Language: en\n"));
        assert!(summary.contains("- Modality: CT\n"));
        assert!(summary.contains("- Area: n/a\n"));
        assert!(summary.contains("- Normal Reports: 1 (50.0%)\n"));
        assert!(summary.contains("- Measurements: 1 (50.0%)\n"));
        assert!(summary.contains("- Always Present Elements: 5\n"));
        assert!(summary.contains("- Rarely Present Elements: 10\n"));
        assert!(!summary.contains("\\n"));
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        let result = analyse_corpus(
            &corpus(&[
                r#"{"report": "normal"}"#,
                r#"{"report": "lesion"}"#,
                r#"{"report": "lesion"}"#,
            ]),
            "three.jsonl",
        );
        let summary = render_summary(&result);
        assert!(summary.contains("- Normal Reports: 1 (33.3%)"));
        assert!(summary.contains("- Pathological Reports: 2 (66.7%)"));
    }

    #[test]
    fn test_empty_corpus_summary_has_zero_percentages() {
        let result = analyse_corpus(&Corpus::default(), "empty.jsonl");
        let summary = render_summary(&result);
        assert!(summary.contains("- Total Reports: 0"));
        assert!(summary.contains("- Contrast Use: 0 (0.0%)"));
        assert!(summary.contains("- Language: n/a"));
        assert!(!summary.contains("NaN"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let c = corpus(&[
            r#"{"report": "x", "modality": "US"}"#,
            r#"{"report": "y", "modality": "CT"}"#,
        ]);
        let first = render_summary(&analyse_corpus(&c, "a.jsonl"));
        let second = render_summary(&analyse_corpus(&c, "a.jsonl"));
        assert_eq!(first, second);
        assert!(first.contains("- Modality: CT"));
    }
}
