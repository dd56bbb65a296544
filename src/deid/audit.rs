//! Audit logger for de-identification operations
//!
//! One JSONL entry per transformed record. Entries carry counts and a
//! SHA-256 hash of the owning patient id; person-level identifiers never
//! appear in plaintext.

use crate::deid::report::TransformedResource;
use crate::domain::kind::ResourceKind;
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    resource_kind: String,
    /// Logical resource id. Hashed for Patient and Practitioner records,
    /// where the resource id IS the person's id; plaintext otherwise.
    resource_id: String,
    /// SHA-256 hash of the owning patient id (never log the plaintext id)
    patient_hash: Option<String>,
    pseudonymized: usize,
    redacted: usize,
    date_shifted: usize,
    preserved: usize,
    warnings: usize,
    processing_time_ms: u64,
}

/// Append-only audit trail for transformed records
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            // Ensure parent directory exists
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Log one transformed record
    pub fn log_transform(&self, resource: &TransformedResource) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        // For self-owning kinds the resource id is the person's id, so
        // writing it in plaintext would defeat the patient hash.
        let resource_id = match resource.kind {
            ResourceKind::Patient | ResourceKind::Practitioner => {
                hash_identifier(resource.id.as_str())
            }
            _ => resource.id.to_string(),
        };

        let entry = AuditLogEntry {
            timestamp: resource.timestamp.to_rfc3339(),
            resource_kind: resource.kind.to_string(),
            resource_id,
            patient_hash: resource
                .patient_id
                .as_ref()
                .map(|id| hash_identifier(id.as_str())),
            pseudonymized: resource.report.pseudonymized,
            redacted: resource.report.redacted,
            date_shifted: resource.report.date_shifted,
            preserved: resource.report.preserved,
            warnings: resource.report.warnings.len(),
            processing_time_ms: resource.processing_time_ms,
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            // Plain text format
            writeln!(
                file,
                "[{}] {}/{} | Pseudonymized: {} | Redacted: {} | Shifted: {} | Warnings: {} | Time: {}ms",
                entry.timestamp,
                entry.resource_kind,
                entry.resource_id,
                entry.pseudonymized,
                entry.redacted,
                entry.date_shifted,
                entry.warnings,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash an identifier using SHA-256
fn hash_identifier(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
