//! De-identification session
//!
//! A [`DeidSession`] owns the pseudonym cache and audit trail for one
//! processing run. Every record transformed through the same session sees
//! the same replacement mappings, so identical originals converge on
//! identical pseudonyms across the whole run. Sessions are shared by
//! reference; all entry points take `&self`.

use crate::deid::audit::AuditLogger;
use crate::deid::config::DeidConfig;
use crate::deid::pseudonym::PseudonymCache;
use crate::deid::report::{SessionReport, TransformedResource};
use crate::deid::transformer::Transformer;
use crate::domain::{RawResource, Result, VeilError};
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

/// Stateful engine for one de-identification run
pub struct DeidSession {
    config: DeidConfig,
    pseudonyms: PseudonymCache,
    audit: Option<AuditLogger>,
}

impl DeidSession {
    /// Create a session from configuration
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Audit`] if the audit log location cannot be
    /// prepared.
    pub fn new(config: DeidConfig) -> Result<Self> {
        let audit = if config.audit.enabled {
            Some(
                AuditLogger::new(
                    config.audit.log_path.clone(),
                    config.audit.json_format,
                    true,
                )
                .map_err(|e| VeilError::Audit(e.to_string()))?,
            )
        } else {
            None
        };

        info!(
            offset_range_days = config.offset_range_days,
            audit_enabled = config.audit.enabled,
            "De-identification session initialized"
        );

        Ok(Self {
            config,
            pseudonyms: PseudonymCache::new(),
            audit,
        })
    }

    /// Transform a single record
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Deid`] when the input is not a governed
    /// resource (unknown kind, missing id, not an object) and
    /// [`VeilError::Audit`] when the audit trail cannot be written.
    pub fn transform(&self, value: Value) -> Result<TransformedResource> {
        let start = Instant::now();
        let resource = RawResource::from_value(value)?;

        let transformer = Transformer::new(&self.pseudonyms, self.config.offset_range_days);
        let (data, report) = transformer.transform(&resource);

        let transformed = TransformedResource {
            kind: resource.kind(),
            id: resource.id().clone(),
            patient_id: resource.owning_patient(),
            data,
            report,
            processing_time_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };

        debug!(
            kind = %transformed.kind,
            id = %transformed.id,
            modified = transformed.report.total_modified(),
            warnings = transformed.report.warnings.len(),
            "Record transformed"
        );

        if let Some(audit) = &self.audit {
            audit
                .log_transform(&transformed)
                .map_err(|e| VeilError::Audit(e.to_string()))?;
        }

        Ok(transformed)
    }

    /// Transform a batch, continuing past per-record failures
    ///
    /// Failed records are counted in the report and logged; the rest of
    /// the batch proceeds.
    pub fn transform_batch(&self, values: Vec<Value>) -> (Vec<TransformedResource>, SessionReport) {
        let mut report = SessionReport::new();
        let total = values.len();
        let mut results = Vec::with_capacity(total);

        for (index, value) in values.into_iter().enumerate() {
            crate::log_batch_processing!(index + 1, total);
            match self.transform(value) {
                Ok(transformed) => {
                    report.add_resource(&transformed);
                    results.push(transformed);
                }
                Err(e) => {
                    error!(index, error = %e, "Record failed to transform");
                    report.add_failure(format!("record {index}: {e}"));
                }
            }
        }

        info!(
            transformed = results.len(),
            failed = report.failed_resources,
            pseudonyms = self.pseudonyms.len(),
            "Batch complete"
        );

        (results, report)
    }

    /// The session's pseudonym cache
    pub fn pseudonyms(&self) -> &PseudonymCache {
        &self.pseudonyms
    }

    /// The session's configuration
    pub fn config(&self) -> &DeidConfig {
        &self.config
    }
}
