//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the veil configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!(
                    "  Date Shift Window: ±{} days",
                    config.deid.offset_range_days
                );
                println!("  Audit Enabled: {}", config.deid.audit.enabled);
                if config.deid.audit.enabled {
                    println!("  Audit Log: {}", config.deid.audit.log_path.display());
                    println!(
                        "  Audit Format: {}",
                        if config.deid.audit.json_format {
                            "json"
                        } else {
                            "text"
                        }
                    );
                }
                println!("  File Logging: {}", config.logging.local_enabled);
                if config.logging.local_enabled {
                    println!("  Log Path: {}", config.logging.local_path);
                    println!("  Log Rotation: {}", config.logging.local_rotation);
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
