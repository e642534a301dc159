//! Source field names recognised in report records.
//!
//! Records are heterogeneous: any of these may be missing from any record.

/// Primary free-text report.
pub const REPORT: &str = "report";

/// Optional secondary free text, usually an English translation of `report`.
pub const TRANSLATION: &str = "translation";

pub const LANGUAGE: &str = "language";

/// Imaging modality (CT, MRI, US, ...).
pub const MODALITY: &str = "modality";

/// Anatomical area examined.
pub const AREA: &str = "area";

pub const COUNTRY: &str = "country";

pub const SUBSPECIALTY: &str = "subspecialty";

/// Comma-separated ICD code list.
pub const ICD: &str = "icd";

/// Code identifying the contributing author or site.
pub const CONTRIBUTOR_CODE: &str = "contributor_code";

/// Delimiter between codes in the `icd` field.
pub const ICD_DELIMITER: &str = ", ";
