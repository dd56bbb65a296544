//! Per-kind field policy tables
//!
//! Each resource kind carries a static, declarative set of
//! `{path, action}` rules. A path addresses a location in the nested FHIR
//! structure; `[]` marks an array whose elements are each visited
//! ("name[].family" is the family part of every name entry). Any field not
//! listed is preserved verbatim - the 13 kinds and their shapes are closed
//! and known, so omission is a deliberate PRESERVE, not a gap.
//!
//! Reference fields (`subject.reference` and friends) never appear in a
//! rule: the target kind and id of a link must stay byte-identical so
//! downstream joins keep working. Only the `display` labels embedded next
//! to a reference are pseudonymized, through the same cache that governs
//! the target record, so both converge on one replacement.

use crate::deid::category::PseudonymCategory::{
    self, AddressLine, CityName, FamilyName, GivenName, OrganizationName, PersonName, PostalCode,
};
use crate::domain::kind::ResourceKind;

/// Fixed placeholder substituted for every redacted free-text field
pub const REDACTION_PLACEHOLDER: &str = "[PII REDACTED]";

/// Action applied at a policy path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Copy the field verbatim (listed explicitly so the report counts it)
    Preserve,
    /// Replace free text with [`REDACTION_PLACEHOLDER`], content unseen
    Redact,
    /// Replace via the pseudonym cache under the given category
    Pseudonymize(PseudonymCategory),
    /// Pseudonymize a contact point's `value` as phone or email depending
    /// on its sibling `system` (a path alone cannot tell the two apart)
    PseudonymizeContact,
    /// Shift the date/dateTime by the owning patient's day offset
    DateShift,
}

/// One field policy rule
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Dotted path with `[]` array markers, e.g. `"address[].city"`
    pub path: &'static str,
    pub action: FieldAction,
}

use FieldAction::{DateShift, Preserve, Pseudonymize, PseudonymizeContact, Redact};

macro_rules! rules {
    ($($path:literal => $action:expr),* $(,)?) => {
        &[$(FieldRule { path: $path, action: $action }),*]
    };
}

static PATIENT_RULES: &[FieldRule] = rules![
    "name[].given[]" => Pseudonymize(GivenName),
    "name[].family" => Pseudonymize(FamilyName),
    "name[].text" => Pseudonymize(PersonName),
    "address[].line[]" => Pseudonymize(AddressLine),
    "address[].city" => Pseudonymize(CityName),
    "address[].postalCode" => Pseudonymize(PostalCode),
    "address[].state" => Preserve,
    "telecom[]" => PseudonymizeContact,
    "birthDate" => DateShift,
    "deceasedDateTime" => DateShift,
    "gender" => Preserve,
    "identifier[].value" => Preserve,
];

static ENCOUNTER_RULES: &[FieldRule] = rules![
    "period.start" => DateShift,
    "period.end" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "participant[].individual.display" => Pseudonymize(PersonName),
    "location[].location.display" => Pseudonymize(OrganizationName),
    "serviceProvider.display" => Pseudonymize(OrganizationName),
    "status" => Preserve,
    "class.code" => Preserve,
    "type[].coding[].code" => Preserve,
    "length.value" => Preserve,
];

static CONDITION_RULES: &[FieldRule] = rules![
    "onsetDateTime" => DateShift,
    "abatementDateTime" => DateShift,
    "recordedDate" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "code.coding[].code" => Preserve,
    "clinicalStatus.coding[].code" => Preserve,
    "verificationStatus.coding[].code" => Preserve,
];

static OBSERVATION_RULES: &[FieldRule] = rules![
    "effectiveDateTime" => DateShift,
    "effectivePeriod.start" => DateShift,
    "effectivePeriod.end" => DateShift,
    "issued" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "performer[].display" => Pseudonymize(PersonName),
    "code.coding[].code" => Preserve,
    "valueQuantity.value" => Preserve,
    "valueQuantity.unit" => Preserve,
];

static MEDICATION_REQUEST_RULES: &[FieldRule] = rules![
    "authoredOn" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "requester.display" => Pseudonymize(PersonName),
    "medicationCodeableConcept.coding[].code" => Preserve,
    "dosageInstruction[].text" => Preserve,
];

static PROCEDURE_RULES: &[FieldRule] = rules![
    "performedDateTime" => DateShift,
    "performedPeriod.start" => DateShift,
    "performedPeriod.end" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "performer[].actor.display" => Pseudonymize(PersonName),
    "location.display" => Pseudonymize(OrganizationName),
    "code.coding[].code" => Preserve,
    "bodySite[].coding[].code" => Preserve,
];

static DIAGNOSTIC_REPORT_RULES: &[FieldRule] = rules![
    "effectiveDateTime" => DateShift,
    "issued" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "performer[].display" => Pseudonymize(PersonName),
    "resultsInterpreter[].display" => Pseudonymize(PersonName),
    "conclusion" => Redact,
    "presentedForm[].data" => Redact,
    "status" => Preserve,
    "code.coding[].code" => Preserve,
];

static DOCUMENT_REFERENCE_RULES: &[FieldRule] = rules![
    "date" => DateShift,
    "context.period.start" => DateShift,
    "context.period.end" => DateShift,
    "subject.display" => Pseudonymize(PersonName),
    "author[].display" => Pseudonymize(PersonName),
    "authenticator.display" => Pseudonymize(PersonName),
    "custodian.display" => Pseudonymize(OrganizationName),
    "description" => Redact,
    "content[].attachment.data" => Redact,
    "type.coding[].code" => Preserve,
];

static ALLERGY_INTOLERANCE_RULES: &[FieldRule] = rules![
    "onsetDateTime" => DateShift,
    "recordedDate" => DateShift,
    "patient.display" => Pseudonymize(PersonName),
    "recorder.display" => Pseudonymize(PersonName),
    "asserter.display" => Pseudonymize(PersonName),
    "code.coding[].code" => Preserve,
    "criticality" => Preserve,
    "clinicalStatus.coding[].code" => Preserve,
];

static IMMUNIZATION_RULES: &[FieldRule] = rules![
    "occurrenceDateTime" => DateShift,
    "recorded" => DateShift,
    "patient.display" => Pseudonymize(PersonName),
    "performer[].actor.display" => Pseudonymize(PersonName),
    "location.display" => Pseudonymize(OrganizationName),
    "vaccineCode.coding[].code" => Preserve,
    "status" => Preserve,
];

static PRACTITIONER_RULES: &[FieldRule] = rules![
    "name[].given[]" => Pseudonymize(GivenName),
    "name[].family" => Pseudonymize(FamilyName),
    "name[].text" => Pseudonymize(PersonName),
    "address[].line[]" => Pseudonymize(AddressLine),
    "address[].city" => Pseudonymize(CityName),
    "address[].postalCode" => Pseudonymize(PostalCode),
    "address[].state" => Preserve,
    "telecom[]" => PseudonymizeContact,
    "birthDate" => DateShift,
    "gender" => Preserve,
    "identifier[].value" => Preserve,
];

static PRACTITIONER_ROLE_RULES: &[FieldRule] = rules![
    "telecom[]" => PseudonymizeContact,
    "practitioner.display" => Pseudonymize(PersonName),
    "organization.display" => Pseudonymize(OrganizationName),
    "code[].coding[].code" => Preserve,
    "specialty[].coding[].code" => Preserve,
    "identifier[].value" => Preserve,
];

static ORGANIZATION_RULES: &[FieldRule] = rules![
    "name" => Pseudonymize(OrganizationName),
    "address[].line[]" => Pseudonymize(AddressLine),
    "address[].city" => Pseudonymize(CityName),
    "address[].postalCode" => Pseudonymize(PostalCode),
    "address[].state" => Preserve,
    "telecom[]" => PseudonymizeContact,
    "identifier[].value" => Preserve,
];

/// The policy table for a resource kind
///
/// Exhaustive over [`ResourceKind`]: adding a 14th kind will not compile
/// until it gets a rule set here.
pub fn policy_for(kind: ResourceKind) -> &'static [FieldRule] {
    match kind {
        ResourceKind::Patient => PATIENT_RULES,
        ResourceKind::Encounter => ENCOUNTER_RULES,
        ResourceKind::Condition => CONDITION_RULES,
        ResourceKind::Observation => OBSERVATION_RULES,
        ResourceKind::MedicationRequest => MEDICATION_REQUEST_RULES,
        ResourceKind::Procedure => PROCEDURE_RULES,
        ResourceKind::DiagnosticReport => DIAGNOSTIC_REPORT_RULES,
        ResourceKind::DocumentReference => DOCUMENT_REFERENCE_RULES,
        ResourceKind::AllergyIntolerance => ALLERGY_INTOLERANCE_RULES,
        ResourceKind::Immunization => IMMUNIZATION_RULES,
        ResourceKind::Practitioner => PRACTITIONER_RULES,
        ResourceKind::PractitionerRole => PRACTITIONER_ROLE_RULES,
        ResourceKind::Organization => ORGANIZATION_RULES,
    }
}

/// One segment of a parsed rule path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment<'a> {
    /// Object key to descend into
    pub key: &'a str,
    /// Whether the value at `key` is an array whose elements are each visited
    pub each: bool,
}

/// Parse a rule path into its segments
pub fn parse_path(path: &str) -> Vec<PathSegment<'_>> {
    path.split('.')
        .map(|part| match part.strip_suffix("[]") {
            Some(key) => PathSegment { key, each: true },
            None => PathSegment { key: part, each: false },
        })
        .collect()
}
