//! Structural profiling: field presence and categorical value frequencies.

use coverage_types::{fields, Corpus, Record};
use std::collections::BTreeMap;

/// Occurrence counts of observed values for one field.
///
/// Backed by an ordered map so serialised output and iteration are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable(BTreeMap<String, usize>);

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: impl Into<String>) {
        *self.0.entry(key.into()).or_insert(0) += 1;
    }

    /// Count for `key`, 0 when never observed.
    pub fn count(&self, key: &str) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct values observed.
    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value with the highest count.
    ///
    /// Ties go to the lexicographically smallest key. `None` for an empty table.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (key, &count) in &self.0 {
            // Keys arrive in ascending order, so only a strictly greater count replaces.
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((key.as_str(), count));
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<K> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.increment(key);
        }
        table
    }
}

/// Field-presence and categorical frequency tables for a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StructureProfile {
    pub total_reports: usize,
    /// Keyed by field *name*: in how many records each field is populated.
    pub fields_present: FrequencyTable,
    pub languages: FrequencyTable,
    pub modalities: FrequencyTable,
    pub anatomical_areas: FrequencyTable,
    pub countries: FrequencyTable,
    pub subspecialties: FrequencyTable,
    pub icd_codes: FrequencyTable,
}

/// Splits an `icd` field value into trimmed codes.
///
/// Codes are separated by `", "`. A value without the delimiter is a single code. Codes that are
/// empty after trimming are dropped.
pub fn split_icd_codes(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(fields::ICD_DELIMITER)
        .map(str::trim)
        .filter(|code| !code.is_empty())
}

/// Builds every frequency table in a single pass over the corpus.
///
/// # Arguments
///
/// * `corpus` - The loaded records.
///
/// # Returns
///
/// Field presence counts plus the language, modality, area, country, subspecialty and ICD
/// code tables. An empty corpus yields an all-empty profile.
pub fn profile_structure(corpus: &Corpus) -> StructureProfile {
    tracing::info!("analysing basic report structure");

    corpus.iter().fold(
        StructureProfile {
            total_reports: corpus.len(),
            ..StructureProfile::default()
        },
        observe,
    )
}

fn observe(mut profile: StructureProfile, record: &Record) -> StructureProfile {
    for field in record.populated_fields() {
        profile.fields_present.increment(field);
    }

    let categorical = [
        (fields::LANGUAGE, &mut profile.languages),
        (fields::MODALITY, &mut profile.modalities),
        (fields::AREA, &mut profile.anatomical_areas),
        (fields::COUNTRY, &mut profile.countries),
        (fields::SUBSPECIALTY, &mut profile.subspecialties),
    ];
    for (field, table) in categorical {
        if let Some(value) = record.get(field) {
            table.increment(value.into_owned());
        }
    }

    if let Some(icd) = record.get(fields::ICD) {
        for code in split_icd_codes(&icd) {
            profile.icd_codes.increment(code);
        }
    }

    profile
}
