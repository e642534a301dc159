//! Clinical content classification of free-text reports.
//!
//! Each record's `report` and `translation` are joined with a single space, lower-cased, and
//! scanned for fixed multilingual (English/Spanish) keyword lists. A category counts a record at
//! most once, however many of its keywords match.

use coverage_types::{fields, Corpus, Record};

/// A clinical phrase category detected by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClinicalCategory {
    Normal,
    Pathological,
    Comparison,
    Contrast,
    Measurement,
    Recommendation,
    Technique,
}

impl ClinicalCategory {
    pub const ALL: [ClinicalCategory; 7] = [
        ClinicalCategory::Normal,
        ClinicalCategory::Pathological,
        ClinicalCategory::Comparison,
        ClinicalCategory::Contrast,
        ClinicalCategory::Measurement,
        ClinicalCategory::Recommendation,
        ClinicalCategory::Technique,
    ];

    /// Lower-case keywords matched as substrings.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ClinicalCategory::Normal => &[
                "normal",
                "unremarkable",
                "sin particularidades",
                "conservado",
                "respetado",
            ],
            ClinicalCategory::Pathological => &[
                "lesion",
                "abnormal",
                "pathological",
                "lesión",
                "anormal",
                "patológico",
            ],
            ClinicalCategory::Comparison => &[
                "comparison",
                "compare",
                "previous",
                "prior",
                "comparación",
                "previo",
            ],
            ClinicalCategory::Contrast => &["contrast", "gadolinium", "contraste", "gadolinio"],
            ClinicalCategory::Measurement => &["mm", "cm", "size", "diameter", "tamaño", "diámetro"],
            ClinicalCategory::Recommendation => &[
                "recommend",
                "suggest",
                "follow",
                "recomienda",
                "sugiere",
                "seguimiento",
            ],
            ClinicalCategory::Technique => &[
                "technique",
                "protocol",
                "sequence",
                "técnica",
                "protocolo",
                "secuencia",
            ],
        }
    }

    /// True if any keyword occurs in `lowered`, which must already be lower-cased.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords().iter().any(|term| lowered.contains(term))
    }
}

/// Per-category record counts. Each counter lies in `[0, total_reports]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClinicalPatternCounts {
    /// Records whose `report` field is present and non-empty.
    pub findings_present: usize,
    pub normal_reports: usize,
    pub pathological_reports: usize,
    pub comparison_mentioned: usize,
    pub contrast_mentioned: usize,
    pub measurements_present: usize,
    pub recommendations_present: usize,
    #[serde(default)]
    pub technique_described: usize,
}

impl ClinicalPatternCounts {
    /// Count for one keyword category.
    pub fn get(&self, category: ClinicalCategory) -> usize {
        match category {
            ClinicalCategory::Normal => self.normal_reports,
            ClinicalCategory::Pathological => self.pathological_reports,
            ClinicalCategory::Comparison => self.comparison_mentioned,
            ClinicalCategory::Contrast => self.contrast_mentioned,
            ClinicalCategory::Measurement => self.measurements_present,
            ClinicalCategory::Recommendation => self.recommendations_present,
            ClinicalCategory::Technique => self.technique_described,
        }
    }

    fn bump(&mut self, category: ClinicalCategory) {
        let counter = match category {
            ClinicalCategory::Normal => &mut self.normal_reports,
            ClinicalCategory::Pathological => &mut self.pathological_reports,
            ClinicalCategory::Comparison => &mut self.comparison_mentioned,
            ClinicalCategory::Contrast => &mut self.contrast_mentioned,
            ClinicalCategory::Measurement => &mut self.measurements_present,
            ClinicalCategory::Recommendation => &mut self.recommendations_present,
            ClinicalCategory::Technique => &mut self.technique_described,
        };
        *counter += 1;
    }
}

/// Summary statistics over a distribution of text lengths, in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub median: f64,
    pub min: usize,
    pub max: usize,
}

impl LengthStats {
    /// Computes statistics over `lengths`, or `None` when there are none.
    pub fn from_lengths(lengths: &[usize]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }

        let mut sorted = lengths.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let mean = sorted.iter().sum::<usize>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };

        Some(Self {
            mean,
            median,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Result of classifying a corpus.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentProfile {
    /// All zeros for an empty corpus.
    pub report_length_stats: LengthStats,
    /// `None` unless at least one record has a non-empty translation.
    pub translation_length_stats: Option<LengthStats>,
    pub clinical_patterns: ClinicalPatternCounts,
}

/// Scans every record's free text and accumulates pattern counts and length distributions.
///
/// # Arguments
///
/// * `corpus` - The loaded records.
///
/// # Returns
///
/// Per-category record counts, report length stats over every record (a missing report has
/// length 0), and translation length stats over non-empty translations only.
pub fn classify_content(corpus: &Corpus) -> ContentProfile {
    tracing::info!("analysing report content");

    let mut patterns = ClinicalPatternCounts::default();
    let mut report_lengths = Vec::with_capacity(corpus.len());
    let mut translation_lengths = Vec::new();

    for record in corpus {
        let report = record.text(fields::REPORT).unwrap_or("");
        let translation = record.text(fields::TRANSLATION).unwrap_or("");

        report_lengths.push(report.chars().count());
        if !translation.is_empty() {
            translation_lengths.push(translation.chars().count());
        }

        for category in categories_in(record) {
            patterns.bump(category);
        }

        if !report.is_empty() {
            patterns.findings_present += 1;
        }
    }

    ContentProfile {
        report_length_stats: LengthStats::from_lengths(&report_lengths).unwrap_or_default(),
        translation_length_stats: LengthStats::from_lengths(&translation_lengths),
        clinical_patterns: patterns,
    }
}

/// Categories whose keywords occur in the record's combined, lower-cased text.
pub fn categories_in(record: &Record) -> Vec<ClinicalCategory> {
    let report = record.text(fields::REPORT).unwrap_or("");
    let translation = record.text(fields::TRANSLATION).unwrap_or("");
    let full_text = format!("{} {}", report, translation).to_lowercase();

    ClinicalCategory::ALL
        .into_iter()
        .filter(|category| category.matches(&full_text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(lines: &[&str]) -> Corpus {
        lines
            .iter()
            .map(|line| Record::from_json_line(line).unwrap())
            .collect()
    }

    #[test]
    fn test_normal_and_pathological_reports_detected_across_languages() {
        let profile = classify_content(&corpus(&[
            r#"{"report": "Normal study, no acute findings.", "language": "en", "modality": "CT"}"#,
            r#"{"report": "Lesión sospechosa de 2 cm.", "translation": "Suspicious 2 cm lesion.", "language": "es", "modality": "MRI"}"#,
        ]));

        let p = profile.clinical_patterns;
        assert_eq!(p.normal_reports, 1);
        assert_eq!(p.pathological_reports, 1);
        assert_eq!(p.measurements_present, 1);
        assert_eq!(p.findings_present, 2);
        assert_eq!(p.contrast_mentioned, 0);
        assert_eq!(p.comparison_mentioned, 0);
    }

    #[test]
    fn test_category_counts_once_per_record() {
        let profile = classify_content(&corpus(&[
            r#"{"report": "Lesion 5 mm, second lesion 2 cm, abnormal.", "translation": "lesión"}"#,
        ]));
        assert_eq!(profile.clinical_patterns.pathological_reports, 1);
        assert_eq!(profile.clinical_patterns.measurements_present, 1);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_multilingual() {
        let record = Record::from_json_line(
            r#"{"report": "SE RECOMIENDA SEGUIMIENTO. Estudio PREVIO con GADOLINIO."}"#,
        )
        .unwrap();
        let categories = categories_in(&record);
        assert!(categories.contains(&ClinicalCategory::Recommendation));
        assert!(categories.contains(&ClinicalCategory::Comparison));
        assert!(categories.contains(&ClinicalCategory::Contrast));
        assert!(!categories.contains(&ClinicalCategory::Normal));
    }

    #[test]
    fn test_translation_only_text_is_scanned() {
        let profile = classify_content(&corpus(&[
            r#"{"translation": "Technique: axial sequence with contrast."}"#,
        ]));
        let p = profile.clinical_patterns;
        assert_eq!(p.technique_described, 1);
        assert_eq!(p.contrast_mentioned, 1);
        assert_eq!(p.findings_present, 0);
    }

    #[test]
    fn test_length_stats() {
        let profile = classify_content(&corpus(&[
            r#"{"report": "abcd", "translation": "xy"}"#,
            r#"{"report": "ab"}"#,
            r#"{"report": "abcdefgh", "translation": ""}"#,
            r#"{"language": "en"}"#,
        ]));

        let report = profile.report_length_stats;
        assert_eq!(report.min, 0);
        assert_eq!(report.max, 8);
        assert!((report.mean - 3.5).abs() < f64::EPSILON);
        assert!((report.median - 3.0).abs() < f64::EPSILON);

        let translation = profile.translation_length_stats.unwrap();
        assert_eq!((translation.min, translation.max), (2, 2));
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let profile = classify_content(&corpus(&[r#"{"report": "Lesión"}"#]));
        assert_eq!(profile.report_length_stats.max, 6);
    }

    #[test]
    fn test_translation_stats_absent_without_translations() {
        let profile = classify_content(&corpus(&[r#"{"report": "Normal.", "translation": ""}"#]));
        assert!(profile.translation_length_stats.is_none());
    }

    #[test]
    fn test_empty_corpus_is_all_zero() {
        let profile = classify_content(&Corpus::default());
        assert_eq!(profile.report_length_stats, LengthStats::default());
        assert!(profile.translation_length_stats.is_none());
        assert_eq!(profile.clinical_patterns, ClinicalPatternCounts::default());
    }

    #[test]
    fn test_counters_bounded_by_corpus_size() {
        let c = corpus(&[
            r#"{"report": "normal unremarkable contrast prior 3 mm follow-up lesion technique"}"#,
            r#"{"report": "normal"}"#,
        ]);
        let p = classify_content(&c).clinical_patterns;
        for category in ClinicalCategory::ALL {
            assert!(p.get(category) <= c.len());
        }
        assert_eq!(p.get(ClinicalCategory::Normal), 2);
    }

    #[test]
    fn test_median_of_odd_distribution() {
        let stats = LengthStats::from_lengths(&[9, 1, 5]).unwrap();
        assert!((stats.median - 5.0).abs() < f64::EPSILON);
        assert!(LengthStats::from_lengths(&[]).is_none());
    }
}
