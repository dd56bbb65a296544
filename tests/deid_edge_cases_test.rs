//! Edge case tests for the de-identification pipeline

use serde_json::json;
use veil::deid::{AuditConfig, DeidConfig, DeidSession, WarningKind, REDACTION_PLACEHOLDER};
use veil::domain::VeilError;

fn session() -> DeidSession {
    let config = DeidConfig {
        audit: AuditConfig {
            enabled: false,
            ..AuditConfig::default()
        },
        ..DeidConfig::default()
    };
    DeidSession::new(config).expect("session")
}

#[test]
fn test_unknown_resource_kind_rejected() {
    let session = session();
    let err = session
        .transform(json!({"resourceType": "CarePlan", "id": "cp-1"}))
        .unwrap_err();
    assert!(matches!(err, VeilError::Deid(_)));
    assert!(err.to_string().contains("CarePlan"));
}

#[test]
fn test_missing_id_rejected() {
    let session = session();
    let err = session
        .transform(json!({"resourceType": "Patient"}))
        .unwrap_err();
    assert!(matches!(err, VeilError::Deid(_)));
}

#[test]
fn test_non_object_rejected() {
    let session = session();
    assert!(session.transform(json!([1, 2, 3])).is_err());
    assert!(session.transform(json!("Patient")).is_err());
}

#[test]
fn test_malformed_dates_left_unchanged_with_warning() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "birthDate": "not-a-date",
            "deceasedDateTime": "1980"
        }))
        .unwrap();

    // Year-only precision cannot absorb a day shift either
    assert_eq!(result.data["birthDate"], "not-a-date");
    assert_eq!(result.data["deceasedDateTime"], "1980");
    assert_eq!(result.report.date_shifted, 0);
    assert_eq!(result.report.warnings.len(), 2);
    assert!(result
        .report
        .warnings
        .iter()
        .all(|w| w.kind == WarningKind::MalformedTemporalValue));
}

#[test]
fn test_year_month_precision_not_shifted() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "birthDate": "1980-05"
        }))
        .unwrap();

    assert_eq!(result.data["birthDate"], "1980-05");
    assert_eq!(result.report.warnings.len(), 1);
}

#[test]
fn test_missing_subject_skips_date_shift_with_warning() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "Observation",
            "id": "obs-1",
            "code": {"coding": [{"code": "8302-2"}]},
            "effectiveDateTime": "2021-06-01T08:00:00Z"
        }))
        .unwrap();

    assert_eq!(result.data["effectiveDateTime"], "2021-06-01T08:00:00Z");
    assert!(result.patient_id.is_none());
    assert_eq!(result.report.warnings.len(), 1);
    assert_eq!(
        result.report.warnings[0].kind,
        WarningKind::MissingReferencedPatient
    );
}

#[test]
fn test_sparse_resource_transforms_cleanly() {
    let session = session();
    let result = session
        .transform(json!({"resourceType": "Patient", "id": "p-sparse"}))
        .unwrap();

    assert_eq!(result.data, json!({"resourceType": "Patient", "id": "p-sparse"}));
    assert!(result.report.warnings.is_empty());
    assert_eq!(result.report.total_modified(), 0);
}

#[test]
fn test_unexpected_fields_survive_unchanged() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "meta": {"versionId": "3", "lastUpdated": "2024-01-01T00:00:00Z"},
            "extension": [{"url": "http://example.com/flavor", "valueCode": "unusual"}],
            "customVendorBlock": {"nested": [1, 2, {"deep": true}]}
        }))
        .unwrap();

    // Fields outside the policy pass through verbatim, including temporal
    // metadata not governed by a date-shift rule
    assert_eq!(result.data["meta"]["lastUpdated"], "2024-01-01T00:00:00Z");
    assert_eq!(result.data["extension"][0]["valueCode"], "unusual");
    assert_eq!(result.data["customVendorBlock"]["nested"][2]["deep"], true);
}

#[test]
fn test_empty_strings() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "DiagnosticReport",
            "id": "dr-1",
            "subject": {"reference": "Patient/abc123"},
            "conclusion": "",
        }))
        .unwrap();
    // Redaction applies even to empty text; emptiness itself can leak
    assert_eq!(result.data["conclusion"], REDACTION_PLACEHOLDER);

    // Pseudonymization skips empty originals
    let result = session
        .transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "name": [{"family": ""}]
        }))
        .unwrap();
    assert_eq!(result.data["name"][0]["family"], "");
    assert_eq!(result.report.pseudonymized, 0);
}

#[test]
fn test_wrong_typed_fields_skipped() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "name": "Jane Doe",
            "birthDate": 19800510
        }))
        .unwrap();

    // A scalar where the policy expects an array, and a number where it
    // expects a string, are left alone rather than erroring
    assert_eq!(result.data["name"], "Jane Doe");
    assert_eq!(result.data["birthDate"], 19800510);
}

#[test]
fn test_practitioner_role_without_dates() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "PractitionerRole",
            "id": "role-1",
            "practitioner": {"reference": "Practitioner/pr-9", "display": "Dr. Alice Wong"},
            "organization": {"reference": "Organization/org-1", "display": "General Hospital"},
            "identifier": [{"system": "http://hl7.org/fhir/sid/us-npi", "value": "1234567890"}],
            "telecom": [{"system": "phone", "value": "555-987-0000"}]
        }))
        .unwrap();
    let data = &result.data;

    assert_ne!(data["practitioner"]["display"], "Dr. Alice Wong");
    assert_ne!(data["organization"]["display"], "General Hospital");
    assert_ne!(data["telecom"][0]["value"], "555-987-0000");
    // NPI is linkage, not identity: preserved
    assert_eq!(data["identifier"][0]["value"], "1234567890");
    assert!(result.report.warnings.is_empty());
}

#[test]
fn test_fractional_seconds_and_offset_spelling_preserved() {
    let session = session();
    let result = session
        .transform(json!({
            "resourceType": "Observation",
            "id": "obs-1",
            "subject": {"reference": "Patient/abc123"},
            "code": {"coding": [{"code": "8302-2"}]},
            "effectiveDateTime": "2021-06-01T08:00:00.250Z",
            "issued": "2021-06-01T08:05:00+02:00"
        }))
        .unwrap();

    let effective = result.data["effectiveDateTime"].as_str().unwrap();
    assert!(effective.contains('.'), "millis kept: {effective}");
    assert!(effective.ends_with('Z'), "Z spelling kept: {effective}");

    let issued = result.data["issued"].as_str().unwrap();
    assert!(issued.ends_with("+02:00"), "offset kept: {issued}");
}
