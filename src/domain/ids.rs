//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for FHIR identifiers.
//! Each type ensures type safety so a resource id can never be confused
//! with the patient id that owns a record's date-shift offset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource identifier newtype wrapper
///
/// The logical id of a FHIR resource, unique within its resource kind.
///
/// # Examples
///
/// ```
/// use veil::domain::ids::ResourceId;
/// use std::str::FromStr;
///
/// let id = ResourceId::from_str("abc123").unwrap();
/// assert_eq!(id.as_str(), "abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new ResourceId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Resource ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the resource ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Patient identifier newtype wrapper
///
/// The id of the patient a record belongs to. Every date in a record is
/// shifted by an offset derived purely from this id, which is what keeps
/// dates consistent across all of one patient's records.
///
/// # Examples
///
/// ```
/// use veil::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let id = PatientId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
/// assert_eq!(id.as_str(), "7d44b88c-4199-4bad-97dc-d78268e01398");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Creates a PatientId from a FHIR reference string
    ///
    /// Accepts both a bare id (`"abc123"`) and a typed relative reference
    /// (`"Patient/abc123"`), returning the id portion.
    pub fn from_reference(reference: &str) -> Result<Self, String> {
        let id = match reference.rsplit_once('/') {
            Some((_, tail)) => tail,
            None => reference,
        };
        Self::new(id)
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_valid() {
        let id = ResourceId::new("obs-42").unwrap();
        assert_eq!(id.as_str(), "obs-42");
        assert_eq!(id.to_string(), "obs-42");
    }

    #[test]
    fn test_resource_id_empty_rejected() {
        assert!(ResourceId::new("").is_err());
        assert!(ResourceId::new("   ").is_err());
    }

    #[test]
    fn test_patient_id_from_reference() {
        let id = PatientId::from_reference("Patient/abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_patient_id_from_bare_reference() {
        let id = PatientId::from_reference("abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_patient_id_from_empty_reference() {
        assert!(PatientId::from_reference("").is_err());
        assert!(PatientId::from_reference("Patient/").is_err());
    }

    #[test]
    fn test_ids_are_distinct_types() {
        let resource = ResourceId::new("x").unwrap();
        let patient = PatientId::new("x").unwrap();
        // Same inner value, different types; equality only within a type
        assert_eq!(resource.as_str(), patient.as_str());
    }

    #[test]
    fn test_into_inner() {
        let id = PatientId::new("p1").unwrap();
        assert_eq!(id.into_inner(), "p1");
    }
}
