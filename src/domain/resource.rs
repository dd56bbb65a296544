//! Raw resource wrapper
//!
//! A [`RawResource`] is one FHIR resource as received from the upstream
//! source: an immutable JSON document of a known [`ResourceKind`] with a
//! logical id. The wrapper validates kind and id up front and knows how to
//! resolve the patient a record belongs to, which drives date shifting.

use crate::domain::errors::DeidError;
use crate::domain::ids::{PatientId, ResourceId};
use crate::domain::kind::ResourceKind;
use serde_json::Value;
use std::str::FromStr;

/// One structured clinical record, read-only for the duration of a transform
#[derive(Debug, Clone)]
pub struct RawResource {
    kind: ResourceKind,
    id: ResourceId,
    body: Value,
}

impl RawResource {
    /// Wraps a FHIR JSON document, validating its `resourceType` and `id`
    ///
    /// # Errors
    ///
    /// - [`DeidError::NotAnObject`] if the value is not a JSON object
    /// - [`DeidError::UnknownResourceKind`] if `resourceType` is missing or
    ///   not one of the 13 governed kinds
    /// - [`DeidError::MissingResourceId`] if the document has no `id`
    pub fn from_value(body: Value) -> Result<Self, DeidError> {
        let obj = body.as_object().ok_or(DeidError::NotAnObject)?;

        let kind_str = obj
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| DeidError::UnknownResourceKind("<missing resourceType>".to_string()))?;
        let kind = ResourceKind::from_str(kind_str)?;

        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| ResourceId::new(s).ok())
            .ok_or(DeidError::MissingResourceId(kind))?;

        Ok(Self { kind, id, body })
    }

    /// The resource kind
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The resource's logical id
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// The underlying JSON document
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Resolves the patient id that owns this record's dates
    ///
    /// Patients and practitioners own their own dates (a practitioner's
    /// birth date is shifted by an offset keyed on the practitioner id).
    /// AllergyIntolerance and Immunization point at their patient through
    /// the `patient` reference; the remaining clinical kinds use `subject`.
    /// PractitionerRole and Organization carry no dates to shift.
    pub fn owning_patient(&self) -> Option<PatientId> {
        match self.kind {
            ResourceKind::Patient | ResourceKind::Practitioner => {
                PatientId::new(self.id.as_str()).ok()
            }
            ResourceKind::AllergyIntolerance | ResourceKind::Immunization => {
                self.reference_target("patient")
            }
            ResourceKind::Encounter
            | ResourceKind::Condition
            | ResourceKind::Observation
            | ResourceKind::MedicationRequest
            | ResourceKind::Procedure
            | ResourceKind::DiagnosticReport
            | ResourceKind::DocumentReference => self.reference_target("subject"),
            ResourceKind::PractitionerRole | ResourceKind::Organization => None,
        }
    }

    fn reference_target(&self, field: &str) -> Option<PatientId> {
        let reference = self.body.get(field)?.get("reference")?.as_str()?;
        PatientId::from_reference(reference).ok()
    }
}
