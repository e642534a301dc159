//! Mapping of corpus fields onto the Xt-EHR element catalogue.
//!
//! The tier assignment of each element is static (see [`xtehr::CATALOGUE`]). What depends on the
//! corpus is the count of records evidencing each measured element:
//!
//! - present-required: every record
//! - derivable: records where the named metadata field is populated
//! - content-derived: records where the content signal is detected, using the same detectors as
//!   [`crate::classify`]
//!
//! Rarely-present elements carry their rationale only.

use crate::classify::{categories_in, ClinicalCategory};
use crate::profile::split_icd_codes;
use coverage_types::{fields, Corpus, Record};
use std::collections::{BTreeMap, HashMap};
use xtehr::{ContentSignal, CoverageTier, Evidence, SchemaElement, CATALOGUE};

/// Element path to rationale, per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TierMapping {
    pub present_required: BTreeMap<String, String>,
    pub derivable: BTreeMap<String, String>,
    pub content_derived: BTreeMap<String, String>,
    pub rarely_present: BTreeMap<String, String>,
}

impl TierMapping {
    pub fn tier(&self, tier: CoverageTier) -> &BTreeMap<String, String> {
        match tier {
            CoverageTier::PresentRequired => &self.present_required,
            CoverageTier::Derivable => &self.derivable,
            CoverageTier::ContentDerived => &self.content_derived,
            CoverageTier::RarelyPresent => &self.rarely_present,
        }
    }

    fn tier_mut(&mut self, tier: CoverageTier) -> &mut BTreeMap<String, String> {
        match tier {
            CoverageTier::PresentRequired => &mut self.present_required,
            CoverageTier::Derivable => &mut self.derivable,
            CoverageTier::ContentDerived => &mut self.content_derived,
            CoverageTier::RarelyPresent => &mut self.rarely_present,
        }
    }
}

/// How many records evidence an element, and what share of the corpus that is.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementPresence {
    pub count: usize,
    pub percentage: f64,
}

impl ElementPresence {
    pub fn new(count: usize, total_reports: usize) -> Self {
        Self {
            count,
            percentage: percentage(count, total_reports),
        }
    }
}

/// Presence statistics for the measured tiers.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PresenceStatistics {
    pub present_required: BTreeMap<String, ElementPresence>,
    pub derivable: BTreeMap<String, ElementPresence>,
    pub content_derived: BTreeMap<String, ElementPresence>,
}

impl PresenceStatistics {
    /// Statistics for a tier; `None` for the unmeasured rarely-present tier.
    pub fn tier(&self, tier: CoverageTier) -> Option<&BTreeMap<String, ElementPresence>> {
        match tier {
            CoverageTier::PresentRequired => Some(&self.present_required),
            CoverageTier::Derivable => Some(&self.derivable),
            CoverageTier::ContentDerived => Some(&self.content_derived),
            CoverageTier::RarelyPresent => None,
        }
    }

    fn tier_mut(&mut self, tier: CoverageTier) -> Option<&mut BTreeMap<String, ElementPresence>> {
        match tier {
            CoverageTier::PresentRequired => Some(&mut self.present_required),
            CoverageTier::Derivable => Some(&mut self.derivable),
            CoverageTier::ContentDerived => Some(&mut self.content_derived),
            CoverageTier::RarelyPresent => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchemaMapping {
    pub mapping: TierMapping,
    pub presence_statistics: PresenceStatistics,
}

/// `100 * count / total`, or 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Classifies every catalogue element and measures the corpus against it.
///
/// # Arguments
///
/// * `corpus` - The loaded records.
///
/// # Returns
///
/// The tier of every element with its rationale, and count/percentage statistics for the
/// measured tiers. Percentages are 0 for an empty corpus.
pub fn map_to_schema(corpus: &Corpus) -> SchemaMapping {
    tracing::info!("mapping to Xt-EHR elements");

    let signals = count_content_signals(corpus);
    let total = corpus.len();

    let mut result = SchemaMapping::default();
    for element in CATALOGUE {
        result
            .mapping
            .tier_mut(element.tier)
            .insert(element.path.to_owned(), element.rationale.to_owned());

        let Some(count) = evidence_count(element, corpus, &signals) else {
            continue;
        };
        if let Some(stats) = result.presence_statistics.tier_mut(element.tier) {
            stats.insert(element.path.to_owned(), ElementPresence::new(count, total));
        }
    }

    result
}

fn evidence_count(
    element: &SchemaElement,
    corpus: &Corpus,
    signals: &HashMap<ContentSignal, usize>,
) -> Option<usize> {
    match element.evidence {
        Evidence::RecordExists => Some(corpus.len()),
        Evidence::Field(field) => Some(corpus.count_populated(field)),
        Evidence::Content(signal) => Some(signals.get(&signal).copied().unwrap_or(0)),
        Evidence::Unavailable => None,
    }
}

/// One pass over the corpus counting records per content signal.
fn count_content_signals(corpus: &Corpus) -> HashMap<ContentSignal, usize> {
    let mut counts = HashMap::new();
    for record in corpus {
        for signal in signals_in(record) {
            *counts.entry(signal).or_insert(0) += 1;
        }
    }
    counts
}

fn signals_in(record: &Record) -> Vec<ContentSignal> {
    let mut signals: Vec<ContentSignal> = categories_in(record)
        .into_iter()
        .filter_map(|category| match category {
            ClinicalCategory::Pathological => Some(ContentSignal::Pathology),
            ClinicalCategory::Comparison => Some(ContentSignal::Comparison),
            ClinicalCategory::Contrast => Some(ContentSignal::Contrast),
            ClinicalCategory::Recommendation => Some(ContentSignal::Recommendation),
            _ => None,
        })
        .collect();

    if record.text(fields::REPORT).is_some_and(|r| !r.is_empty()) {
        signals.push(ContentSignal::ReportText);
    }
    let has_codes = record
        .get(fields::ICD)
        .is_some_and(|icd| split_icd_codes(&icd).next().is_some());
    if has_codes {
        signals.push(ContentSignal::IcdCodes);
    }

    signals
}
