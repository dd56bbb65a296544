//! Resource transformer
//!
//! Walks one record's JSON structure under its kind's policy table,
//! applying the pseudonym cache and the patient date-shift offset,
//! producing the de-identified document plus a per-record report.
//!
//! The walk is pure over its inputs and the shared cache: no I/O, no
//! suspension. Fields absent from the input are skipped without error and
//! fields not covered by a rule are left untouched, so unexpected extras
//! pass through verbatim.

use crate::deid::category::PseudonymCategory;
use crate::deid::offset::{offset_days_in, shift_temporal};
use crate::deid::policy::{
    parse_path, policy_for, FieldAction, FieldRule, PathSegment, REDACTION_PLACEHOLDER,
};
use crate::deid::pseudonym::PseudonymCache;
use crate::deid::report::{ResourceReport, WarningKind};
use crate::domain::resource::RawResource;
use serde_json::Value;

/// Applies one kind's policy to one record
///
/// Borrows the session's pseudonym cache; construction is free, so the
/// session builds one per transform call.
pub struct Transformer<'a> {
    cache: &'a PseudonymCache,
    offset_range_days: i64,
}

impl<'a> Transformer<'a> {
    pub fn new(cache: &'a PseudonymCache, offset_range_days: i64) -> Self {
        Self {
            cache,
            offset_range_days,
        }
    }

    /// Transform one record, returning the new document and its report
    ///
    /// The input is read-only; the output is a fresh document of the same
    /// kind and shape with governed fields replaced per policy.
    pub fn transform(&self, resource: &RawResource) -> (Value, ResourceReport) {
        let mut body = resource.body().clone();
        let mut report = ResourceReport::new();

        // One offset per record: every date a record carries belongs to
        // the same patient, so intervals between its dates survive intact.
        let offset = resource
            .owning_patient()
            .map(|patient| offset_days_in(&patient, self.offset_range_days));

        for rule in policy_for(resource.kind()) {
            let segments = parse_path(rule.path);
            self.apply(&mut body, &segments, rule, offset, &mut report);
        }

        (body, report)
    }

    /// Descend along the rule path, fanning out through `[]` segments
    fn apply(
        &self,
        node: &mut Value,
        segments: &[PathSegment<'_>],
        rule: &FieldRule,
        offset: Option<i64>,
        report: &mut ResourceReport,
    ) {
        let Some(segment) = segments.first() else {
            self.apply_action(node, rule, offset, report);
            return;
        };

        let Some(child) = node.get_mut(segment.key) else {
            // Absent in the input: skip without error
            return;
        };

        if segment.each {
            if let Value::Array(items) = child {
                for item in items {
                    self.apply(item, &segments[1..], rule, offset, report);
                }
            }
        } else {
            self.apply(child, &segments[1..], rule, offset, report);
        }
    }

    fn apply_action(
        &self,
        node: &mut Value,
        rule: &FieldRule,
        offset: Option<i64>,
        report: &mut ResourceReport,
    ) {
        match rule.action {
            FieldAction::Preserve => {
                if !node.is_null() {
                    report.preserved += 1;
                }
            }
            FieldAction::Redact => {
                // Fixed placeholder regardless of content, including empty
                // or very long input; no content inspection
                if node.is_string() {
                    *node = Value::String(REDACTION_PLACEHOLDER.to_string());
                    report.redacted += 1;
                }
            }
            FieldAction::Pseudonymize(category) => {
                self.pseudonymize_node(node, category, report);
            }
            FieldAction::PseudonymizeContact => {
                // A contact point's system decides the category; systems
                // the engine doesn't govern (url, other) pass through
                let category = match node.get("system").and_then(Value::as_str) {
                    Some("phone") | Some("fax") | Some("pager") | Some("sms") => {
                        Some(PseudonymCategory::Phone)
                    }
                    Some("email") => Some(PseudonymCategory::Email),
                    _ => None,
                };
                if let Some(category) = category {
                    if let Some(value) = node.get_mut("value") {
                        self.pseudonymize_node(value, category, report);
                    }
                }
            }
            FieldAction::DateShift => {
                let Value::String(original) = &*node else {
                    return;
                };
                let Some(offset) = offset else {
                    report.warn(rule.path, WarningKind::MissingReferencedPatient);
                    return;
                };
                match shift_temporal(original, offset) {
                    Some(shifted) => {
                        *node = Value::String(shifted);
                        report.date_shifted += 1;
                    }
                    None => {
                        // Leave the value unmodified rather than failing
                        // the whole record
                        report.warn(rule.path, WarningKind::MalformedTemporalValue);
                    }
                }
            }
        }
    }

    fn pseudonymize_node(
        &self,
        node: &mut Value,
        category: PseudonymCategory,
        report: &mut ResourceReport,
    ) {
        let Value::String(original) = &*node else {
            return;
        };
        if let Some(replacement) = self.cache.resolve(category, original) {
            *node = Value::String(replacement);
            report.pseudonymized += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deid::offset::DEFAULT_OFFSET_RANGE_DAYS;
    use serde_json::json;

    fn transform(value: Value) -> (Value, ResourceReport) {
        let cache = PseudonymCache::new();
        let transformer = Transformer::new(&cache, DEFAULT_OFFSET_RANGE_DAYS);
        let resource = RawResource::from_value(value).unwrap();
        transformer.transform(&resource)
    }

    #[test]
    fn test_patient_name_pseudonymized() {
        let (out, report) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "name": [{"use": "official", "given": ["Jane"], "family": "Doe"}]
        }));

        assert_ne!(out["name"][0]["given"][0], "Jane");
        assert_ne!(out["name"][0]["family"], "Doe");
        assert_eq!(out["name"][0]["use"], "official");
        assert_eq!(report.pseudonymized, 2);
    }

    #[test]
    fn test_patient_birth_date_shifted() {
        let (out, report) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "birthDate": "1980-05-10"
        }));

        let shifted = out["birthDate"].as_str().unwrap();
        assert_ne!(shifted, "1980-05-10");
        assert_eq!(shifted.len(), 10, "date-only precision preserved");
        assert_eq!(report.date_shifted, 1);
    }

    #[test]
    fn test_references_untouched() {
        let (out, _) = transform(json!({
            "resourceType": "Condition",
            "id": "cond-1",
            "subject": {"reference": "Patient/abc123", "display": "Jane Doe"},
            "onsetDateTime": "2021-01-01T10:00:00Z"
        }));

        assert_eq!(out["subject"]["reference"], "Patient/abc123");
        assert_ne!(out["subject"]["display"], "Jane Doe");
    }

    #[test]
    fn test_codings_untouched() {
        let (out, _) = transform(json!({
            "resourceType": "Condition",
            "id": "cond-1",
            "subject": {"reference": "Patient/abc123"},
            "code": {"coding": [{
                "system": "http://snomed.info/sct",
                "code": "44054006",
                "display": "Diabetes mellitus type 2"
            }]}
        }));

        assert_eq!(out["code"]["coding"][0]["system"], "http://snomed.info/sct");
        assert_eq!(out["code"]["coding"][0]["code"], "44054006");
        assert_eq!(
            out["code"]["coding"][0]["display"],
            "Diabetes mellitus type 2"
        );
    }

    #[test]
    fn test_conclusion_redacted_exactly() {
        let (out, report) = transform(json!({
            "resourceType": "DiagnosticReport",
            "id": "dr-1",
            "subject": {"reference": "Patient/abc123"},
            "conclusion": "Patient shows early signs of X"
        }));

        assert_eq!(out["conclusion"], REDACTION_PLACEHOLDER);
        assert_eq!(report.redacted, 1);
    }

    #[test]
    fn test_redaction_of_empty_string() {
        let (out, _) = transform(json!({
            "resourceType": "DiagnosticReport",
            "id": "dr-1",
            "subject": {"reference": "Patient/abc123"},
            "conclusion": ""
        }));
        assert_eq!(out["conclusion"], REDACTION_PLACEHOLDER);
    }

    #[test]
    fn test_telecom_phone_and_email() {
        let (out, report) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "telecom": [
                {"system": "phone", "value": "555-123-4567"},
                {"system": "email", "value": "jane@example.com"},
                {"system": "url", "value": "https://example.com/jane"}
            ]
        }));

        assert_ne!(out["telecom"][0]["value"], "555-123-4567");
        assert_ne!(out["telecom"][1]["value"], "jane@example.com");
        // Ungoverned contact systems pass through
        assert_eq!(out["telecom"][2]["value"], "https://example.com/jane");
        assert_eq!(report.pseudonymized, 2);
    }

    #[test]
    fn test_malformed_date_warns_and_preserves() {
        let (out, report) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "birthDate": "unknown"
        }));

        assert_eq!(out["birthDate"], "unknown");
        assert_eq!(report.date_shifted, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].kind,
            WarningKind::MalformedTemporalValue
        );
    }

    #[test]
    fn test_missing_patient_warns_and_skips() {
        let (out, report) = transform(json!({
            "resourceType": "Observation",
            "id": "obs-1",
            "effectiveDateTime": "2021-06-01T08:00:00Z"
        }));

        assert_eq!(out["effectiveDateTime"], "2021-06-01T08:00:00Z");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].kind,
            WarningKind::MissingReferencedPatient
        );
    }

    #[test]
    fn test_absent_fields_skipped_silently() {
        let (_, report) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123"
        }));
        assert!(report.warnings.is_empty());
        assert_eq!(report.total_modified(), 0);
    }

    #[test]
    fn test_unexpected_extra_fields_preserved() {
        let (out, _) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "extension": [{"url": "http://example.com/ext", "valueString": "kept"}],
            "someVendorField": 42
        }));

        assert_eq!(out["extension"][0]["valueString"], "kept");
        assert_eq!(out["someVendorField"], 42);
    }

    #[test]
    fn test_preserve_rules_counted() {
        let (out, report) = transform(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "gender": "female",
            "address": [{"state": "IL", "city": "Springfield"}]
        }));

        assert_eq!(out["gender"], "female");
        assert_eq!(out["address"][0]["state"], "IL");
        assert_ne!(out["address"][0]["city"], "Springfield");
        assert_eq!(report.preserved, 2);
    }

    #[test]
    fn test_observation_values_preserved() {
        let (out, _) = transform(json!({
            "resourceType": "Observation",
            "id": "obs-1",
            "subject": {"reference": "Patient/abc123"},
            "code": {"coding": [{"code": "8302-2"}]},
            "valueQuantity": {"value": 172.5, "unit": "cm"}
        }));

        assert_eq!(out["valueQuantity"]["value"], 172.5);
        assert_eq!(out["valueQuantity"]["unit"], "cm");
    }

    #[test]
    fn test_same_patient_dates_share_offset() {
        let cache = PseudonymCache::new();
        let transformer = Transformer::new(&cache, DEFAULT_OFFSET_RANGE_DAYS);

        let encounter = RawResource::from_value(json!({
            "resourceType": "Encounter",
            "id": "enc-1",
            "subject": {"reference": "Patient/abc123"},
            "period": {"start": "2021-01-01T08:00:00Z", "end": "2021-01-04T08:00:00Z"}
        }))
        .unwrap();

        let (out, _) = transformer.transform(&encounter);
        let start =
            chrono::DateTime::parse_from_rfc3339(out["period"]["start"].as_str().unwrap())
                .unwrap();
        let end = chrono::DateTime::parse_from_rfc3339(out["period"]["end"].as_str().unwrap())
            .unwrap();
        // 3-day stay survives the shift
        assert_eq!((end - start).num_days(), 3);
    }
}
