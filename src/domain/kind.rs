//! Closed enumeration of the supported FHIR resource kinds
//!
//! The transformer dispatches on this enum with exhaustive matching, so
//! adding a new kind forces a compile-time review of its field policy.

use crate::domain::errors::DeidError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 13 FHIR resource kinds the engine governs.
///
/// Anything else is rejected with [`DeidError::UnknownResourceKind`] because
/// no field policy exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Patient,
    Encounter,
    Condition,
    Observation,
    MedicationRequest,
    Procedure,
    DiagnosticReport,
    DocumentReference,
    AllergyIntolerance,
    Immunization,
    Practitioner,
    PractitionerRole,
    Organization,
}

impl ResourceKind {
    /// All supported kinds, in a stable order
    pub const ALL: [ResourceKind; 13] = [
        Self::Patient,
        Self::Encounter,
        Self::Condition,
        Self::Observation,
        Self::MedicationRequest,
        Self::Procedure,
        Self::DiagnosticReport,
        Self::DocumentReference,
        Self::AllergyIntolerance,
        Self::Immunization,
        Self::Practitioner,
        Self::PractitionerRole,
        Self::Organization,
    ];

    /// The FHIR `resourceType` string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Encounter => "Encounter",
            Self::Condition => "Condition",
            Self::Observation => "Observation",
            Self::MedicationRequest => "MedicationRequest",
            Self::Procedure => "Procedure",
            Self::DiagnosticReport => "DiagnosticReport",
            Self::DocumentReference => "DocumentReference",
            Self::AllergyIntolerance => "AllergyIntolerance",
            Self::Immunization => "Immunization",
            Self::Practitioner => "Practitioner",
            Self::PractitionerRole => "PractitionerRole",
            Self::Organization => "Organization",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = DeidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(Self::Patient),
            "Encounter" => Ok(Self::Encounter),
            "Condition" => Ok(Self::Condition),
            "Observation" => Ok(Self::Observation),
            "MedicationRequest" => Ok(Self::MedicationRequest),
            "Procedure" => Ok(Self::Procedure),
            "DiagnosticReport" => Ok(Self::DiagnosticReport),
            "DocumentReference" => Ok(Self::DocumentReference),
            "AllergyIntolerance" => Ok(Self::AllergyIntolerance),
            "Immunization" => Ok(Self::Immunization),
            "Practitioner" => Ok(Self::Practitioner),
            "PractitionerRole" => Ok(Self::PractitionerRole),
            "Organization" => Ok(Self::Organization),
            other => Err(DeidError::UnknownResourceKind(other.to_string())),
        }
    }
}
