//! De-identification configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::deid::offset::{DEFAULT_OFFSET_RANGE_DAYS, MAX_OFFSET_RANGE_DAYS};

/// De-identification engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeidConfig {
    /// Half-width of the per-patient date shift window, in days
    #[serde(default = "default_offset_range_days")]
    pub offset_range_days: i64,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_offset_range_days() -> i64 {
    DEFAULT_OFFSET_RANGE_DAYS
}

impl Default for DeidConfig {
    fn default() -> Self {
        Self {
            offset_range_days: default_offset_range_days(),
            audit: AuditConfig::default(),
        }
    }
}

impl DeidConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.offset_range_days < 1 {
            anyhow::bail!(
                "offset_range_days must be at least 1, got {}",
                self.offset_range_days
            );
        }

        if self.offset_range_days > MAX_OFFSET_RANGE_DAYS {
            anyhow::bail!(
                "offset_range_days must be at most {MAX_OFFSET_RANGE_DAYS}, got {}",
                self.offset_range_days
            );
        }

        self.audit
            .validate()
            .context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("VEIL_DEID_OFFSET_RANGE_DAYS") {
            self.offset_range_days = val
                .parse()
                .context("Invalid VEIL_DEID_OFFSET_RANGE_DAYS value")?;
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/deid.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            // Ensure parent directory exists or can be created
            if let Some(parent) = self.log_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create audit log directory: {}", parent.display())
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("VEIL_DEID_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid VEIL_DEID_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("VEIL_DEID_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("VEIL_DEID_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid VEIL_DEID_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
