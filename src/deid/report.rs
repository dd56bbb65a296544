//! Transform reporting
//!
//! Every transform produces a [`ResourceReport`] of applied actions for
//! auditing and metrics; it is advisory and never required for
//! correctness. [`SessionReport`] aggregates per-record results across a
//! batch, with console and JSON formatting.

use crate::domain::ids::{PatientId, ResourceId};
use crate::domain::kind::ResourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Locally recovered condition noted during one record's transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A DATE_SHIFT field held a value that could not be parsed or whose
    /// precision (year, year-month) cannot absorb a day shift; the value
    /// was left unchanged
    MalformedTemporalValue,
    /// A DATE_SHIFT field needed a patient id the record does not carry;
    /// the field was skipped
    MissingReferencedPatient,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTemporalValue => write!(f, "malformed temporal value"),
            Self::MissingReferencedPatient => write!(f, "missing referenced patient"),
        }
    }
}

/// One warning, tied to the policy path that produced it
///
/// Carries the path only, never the field's value - warnings flow into
/// logs and audit files where plaintext PHI must not appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformWarning {
    pub field_path: String,
    pub kind: WarningKind,
}

impl TransformWarning {
    pub fn new(field_path: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
        }
    }
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.field_path)
    }
}

/// Counts of actions applied to one record, plus warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceReport {
    /// Fields replaced through the pseudonym cache
    pub pseudonymized: usize,
    /// Free-text fields replaced with the fixed placeholder
    pub redacted: usize,
    /// Date/dateTime fields shifted by the patient offset
    pub date_shifted: usize,
    /// Fields an explicit PRESERVE rule matched (unlisted fields are
    /// preserved too, but not counted)
    pub preserved: usize,
    /// Locally recovered conditions
    pub warnings: Vec<TransformWarning>,
}

impl ResourceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total fields the policy acted on (excluding preserves)
    pub fn total_modified(&self) -> usize {
        self.pseudonymized + self.redacted + self.date_shifted
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warn(&mut self, field_path: &str, kind: WarningKind) {
        self.warnings.push(TransformWarning::new(field_path, kind));
    }
}

/// A de-identified record plus its transform metadata
///
/// Output of one transform call: the privacy-safe document, same shape and
/// kind as the input, handed to the caller for persistence. The engine
/// retains no reference to it.
#[derive(Debug, Clone, Serialize)]
pub struct TransformedResource {
    /// Resource kind (unchanged from the input)
    pub kind: ResourceKind,
    /// Resource id (unchanged - ids are linkage, never altered)
    pub id: ResourceId,
    /// The patient whose offset governed this record's dates, if any
    pub patient_id: Option<PatientId>,
    /// The de-identified document
    pub data: Value,
    /// Actions applied and warnings raised
    pub report: ResourceReport,
    /// Wall-clock time spent in the transform
    pub processing_time_ms: u64,
    /// When the transform ran
    pub timestamp: DateTime<Utc>,
}

/// Aggregated results for a batch of transforms
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Records transformed successfully
    pub total_resources: usize,
    /// Records that failed outright (unknown kind, missing id)
    pub failed_resources: usize,
    /// Successful records by kind
    pub resources_by_kind: HashMap<ResourceKind, usize>,
    /// Action totals across all records
    pub pseudonymized: usize,
    pub redacted: usize,
    pub date_shifted: usize,
    pub preserved: usize,
    /// Warnings carried up from per-record reports, plus batch-level notes
    pub warnings: Vec<String>,
    /// Total processing time across records (ms)
    pub total_processing_time_ms: u64,
    /// Average processing time per record (ms)
    pub avg_processing_time_ms: u64,
}

impl SessionReport {
    /// Create a new empty session report
    pub fn new() -> Self {
        Self {
            total_resources: 0,
            failed_resources: 0,
            resources_by_kind: HashMap::new(),
            pseudonymized: 0,
            redacted: 0,
            date_shifted: 0,
            preserved: 0,
            warnings: Vec::new(),
            total_processing_time_ms: 0,
            avg_processing_time_ms: 0,
        }
    }

    /// Fold one successful transform into the report
    pub fn add_resource(&mut self, resource: &TransformedResource) {
        self.total_resources += 1;
        *self.resources_by_kind.entry(resource.kind).or_insert(0) += 1;

        self.pseudonymized += resource.report.pseudonymized;
        self.redacted += resource.report.redacted;
        self.date_shifted += resource.report.date_shifted;
        self.preserved += resource.report.preserved;

        for warning in &resource.report.warnings {
            self.warnings
                .push(format!("{}/{}: {}", resource.kind, resource.id, warning));
        }

        self.total_processing_time_ms += resource.processing_time_ms;
        if self.total_resources > 0 {
            self.avg_processing_time_ms =
                self.total_processing_time_ms / self.total_resources as u64;
        }
    }

    /// Record a failed record with its error message
    pub fn add_failure(&mut self, message: String) {
        self.failed_resources += 1;
        self.warnings.push(message);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                 DE-IDENTIFICATION SESSION REPORT              \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Resources Transformed:  {}\n",
            self.total_resources
        ));
        output.push_str(&format!(
            "  Resources Failed:       {}\n",
            self.failed_resources
        ));
        output.push_str(&format!("  Fields Pseudonymized:   {}\n", self.pseudonymized));
        output.push_str(&format!("  Fields Redacted:        {}\n", self.redacted));
        output.push_str(&format!("  Fields Date-Shifted:    {}\n", self.date_shifted));
        output.push_str(&format!("  Fields Preserved:       {}\n", self.preserved));
        output.push_str(&format!(
            "  Avg Processing Time:    {} ms\n",
            self.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.resources_by_kind.is_empty() {
            output.push_str("🗂  RESOURCES BY KIND\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut kinds: Vec<_> = self.resources_by_kind.iter().collect();
            kinds.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

            for (kind, count) in kinds {
                output.push_str(&format!("  {:30} {:>5}\n", kind.as_str(), count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self
            .format_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

impl Default for SessionReport {
    fn default() -> Self {
        Self::new()
    }
}
