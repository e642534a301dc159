//! Xt-EHR imaging report boundary support.
//!
//! This crate holds the target-schema side of the coverage analysis: the fixed vocabulary of
//! Xt-EHR imaging-report elements (dot-delimited paths), the coverage tier each one is assigned
//! to, and the kind of evidence in a source record that can populate it.
//!
//! The association is static domain knowledge. Nothing here reads the corpus; counting is done
//! by `coverage-core`, which walks [`CATALOGUE`] and resolves each [`Evidence`] against the
//! loaded records.

pub mod catalogue;
pub mod validation;

pub use catalogue::{elements_in, CATALOGUE};

use std::fmt;
use std::str::FromStr;

/// Errors returned by the `xtehr` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum XtEhrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown Xt-EHR element: {0}")]
    UnknownElement(String),

    #[error("unknown coverage tier: {0}")]
    UnknownTier(String),
}

/// Type alias for Results that can fail with an [`XtEhrError`].
pub type XtEhrResult<T> = Result<T, XtEhrError>;

/// How well the source corpus can populate a schema element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    /// Implied by the existence of a report record.
    PresentRequired,
    /// Read directly from a named metadata field.
    Derivable,
    /// Inferred from free text or structured codes.
    ContentDerived,
    /// Essentially never available in the source.
    RarelyPresent,
}

impl CoverageTier {
    pub const ALL: [CoverageTier; 4] = [
        CoverageTier::PresentRequired,
        CoverageTier::Derivable,
        CoverageTier::ContentDerived,
        CoverageTier::RarelyPresent,
    ];

    /// Wire name, matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::PresentRequired => "present_required",
            CoverageTier::Derivable => "derivable",
            CoverageTier::ContentDerived => "content_derived",
            CoverageTier::RarelyPresent => "rarely_present",
        }
    }

    /// Heading used in human-readable output.
    pub fn label(&self) -> &'static str {
        match self {
            CoverageTier::PresentRequired => "Always Present",
            CoverageTier::Derivable => "Derivable",
            CoverageTier::ContentDerived => "Content-Derived",
            CoverageTier::RarelyPresent => "Rarely Present",
        }
    }

    /// Whether elements in this tier carry a count and percentage.
    pub fn is_measured(&self) -> bool {
        !matches!(self, CoverageTier::RarelyPresent)
    }
}

impl fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageTier {
    type Err = XtEhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        CoverageTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == wanted)
            .ok_or_else(|| XtEhrError::UnknownTier(s.to_owned()))
    }
}

/// A signal detected in report content that evidences a content-derived element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentSignal {
    /// The report text itself is present.
    ReportText,
    /// At least one ICD code is recorded.
    IcdCodes,
    /// Pathology terms occur in the text.
    Pathology,
    /// A prior or comparison study is mentioned.
    Comparison,
    /// A contrast agent is mentioned.
    Contrast,
    /// A recommendation or follow-up is made.
    Recommendation,
}

/// What in a source record evidences a schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    RecordExists,
    /// A named metadata field is populated.
    Field(&'static str),
    Content(ContentSignal),
    Unavailable,
}

/// One element of the target schema and its association with the source corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaElement {
    /// Dot-delimited element path, e.g. `header.authorship.author`.
    pub path: &'static str,
    pub tier: CoverageTier,
    pub evidence: Evidence,
    /// Human-readable reason for the tier assignment.
    pub rationale: &'static str,
}

/// Looks up a catalogue element by its dot-delimited path.
///
/// # Errors
///
/// Returns `XtEhrError::InvalidInput` if `path` is not a well-formed element path, or
/// `XtEhrError::UnknownElement` if it is well-formed but not in the catalogue.
pub fn lookup(path: &str) -> XtEhrResult<&'static SchemaElement> {
    let path = path.trim();
    validation::validate_element_path(path)?;
    CATALOGUE
        .iter()
        .find(|element| element.path == path)
        .ok_or_else(|| XtEhrError::UnknownElement(path.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parses_wire_and_hyphenated_names() {
        assert_eq!(
            "content_derived".parse::<CoverageTier>().unwrap(),
            CoverageTier::ContentDerived
        );
        assert_eq!(
            "Rarely-Present".parse::<CoverageTier>().unwrap(),
            CoverageTier::RarelyPresent
        );
        assert!(matches!(
            "sometimes".parse::<CoverageTier>(),
            Err(XtEhrError::UnknownTier(_))
        ));
    }

    #[test]
    fn test_tier_serialises_snake_case() {
        let s = serde_json::to_string(&CoverageTier::PresentRequired).unwrap();
        assert_eq!(s, "\"present_required\"");
    }

    #[test]
    fn test_only_rarely_present_is_unmeasured() {
        let unmeasured: Vec<_> = CoverageTier::ALL
            .into_iter()
            .filter(|tier| !tier.is_measured())
            .collect();
        assert_eq!(unmeasured, vec![CoverageTier::RarelyPresent]);
    }

    #[test]
    fn test_lookup_finds_known_element() {
        let element = lookup("header.authorship.author").unwrap();
        assert_eq!(element.tier, CoverageTier::Derivable);
        assert_eq!(element.evidence, Evidence::Field("contributor_code"));
    }

    #[test]
    fn test_lookup_rejects_malformed_and_unknown_paths() {
        assert!(matches!(
            lookup("header..status"),
            Err(XtEhrError::InvalidInput(_))
        ));
        assert!(matches!(
            lookup("header.favouriteColour"),
            Err(XtEhrError::UnknownElement(_))
        ));
    }
}
