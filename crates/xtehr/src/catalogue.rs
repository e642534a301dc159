//! The static Xt-EHR imaging report element catalogue.
//!
//! Elements are listed tier by tier. Paths are unique across the whole catalogue.

use crate::{ContentSignal, CoverageTier, Evidence, SchemaElement};
use coverage_types::fields;

use CoverageTier::{ContentDerived, Derivable, PresentRequired, RarelyPresent};

/// Every target-schema element known to the coverage analysis.
pub const CATALOGUE: &[SchemaElement] = &[
    // Implied by the record existing at all.
    SchemaElement {
        path: "header.subject",
        tier: PresentRequired,
        evidence: Evidence::RecordExists,
        rationale: "Implied by report existence",
    },
    SchemaElement {
        path: "header.documentType",
        tier: PresentRequired,
        evidence: Evidence::RecordExists,
        rationale: "Implied as imaging report",
    },
    SchemaElement {
        path: "header.documentTitle",
        tier: PresentRequired,
        evidence: Evidence::RecordExists,
        rationale: "Can be derived from modality + area",
    },
    SchemaElement {
        path: "body.examinationReport.modality",
        tier: PresentRequired,
        evidence: Evidence::RecordExists,
        rationale: "Directly available in modality field",
    },
    SchemaElement {
        path: "body.examinationReport.conclusion.impression",
        tier: PresentRequired,
        evidence: Evidence::RecordExists,
        rationale: "Available in report/translation field",
    },
    // Metadata fields.
    SchemaElement {
        path: "header.language",
        tier: Derivable,
        evidence: Evidence::Field(fields::LANGUAGE),
        rationale: "Available in language field",
    },
    SchemaElement {
        path: "header.authorship.author",
        tier: Derivable,
        evidence: Evidence::Field(fields::CONTRIBUTOR_CODE),
        rationale: "Available in contributor_code field",
    },
    SchemaElement {
        path: "header.serviceSpecialty",
        tier: Derivable,
        evidence: Evidence::Field(fields::SUBSPECIALTY),
        rationale: "Available in subspecialty field",
    },
    SchemaElement {
        path: "body.examinationReport.bodyPart",
        tier: Derivable,
        evidence: Evidence::Field(fields::AREA),
        rationale: "Available in area field",
    },
    // Free text and codes.
    SchemaElement {
        path: "body.examinationReport.resultData.resultText",
        tier: ContentDerived,
        evidence: Evidence::Content(ContentSignal::ReportText),
        rationale: "Full report text",
    },
    SchemaElement {
        path: "body.examinationReport.conclusion.conditionOrFinding",
        tier: ContentDerived,
        evidence: Evidence::Content(ContentSignal::IcdCodes),
        rationale: "ICD codes provide structured findings",
    },
    SchemaElement {
        path: "body.supportingInformation.condition",
        tier: ContentDerived,
        evidence: Evidence::Content(ContentSignal::Pathology),
        rationale: "Can be derived from clinical context",
    },
    SchemaElement {
        path: "body.comparisonStudy",
        tier: ContentDerived,
        evidence: Evidence::Content(ContentSignal::Comparison),
        rationale: "When comparison studies mentioned",
    },
    SchemaElement {
        path: "body.examinationReport.medication",
        tier: ContentDerived,
        evidence: Evidence::Content(ContentSignal::Contrast),
        rationale: "When contrast agents mentioned",
    },
    SchemaElement {
        path: "body.recommendation",
        tier: ContentDerived,
        evidence: Evidence::Content(ContentSignal::Recommendation),
        rationale: "When recommendations present in text",
    },
    // Not carried by the source corpus.
    SchemaElement {
        path: "header.identifier",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No unique document identifiers",
    },
    SchemaElement {
        path: "header.authorship.datetime",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No timestamps available",
    },
    SchemaElement {
        path: "header.status",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No status information",
    },
    SchemaElement {
        path: "header.accessionNumber",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No accession numbers",
    },
    SchemaElement {
        path: "header.healthInsuranceAndPaymentInformation",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No insurance data",
    },
    SchemaElement {
        path: "body.orderInformation",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No order information",
    },
    SchemaElement {
        path: "body.exposureInformation",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No radiation dose information",
    },
    SchemaElement {
        path: "body.specimen",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "Limited specimen information",
    },
    SchemaElement {
        path: "dicomStudyMetadata",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No DICOM metadata",
    },
    SchemaElement {
        path: "attachments",
        tier: RarelyPresent,
        evidence: Evidence::Unavailable,
        rationale: "No file attachments",
    },
];

/// Catalogue elements assigned to `tier`, in catalogue order.
pub fn elements_in(tier: CoverageTier) -> impl Iterator<Item = &'static SchemaElement> {
    CATALOGUE.iter().filter(move |element| element.tier == tier)
}
