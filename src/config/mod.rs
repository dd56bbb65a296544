//! Configuration management for veil.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Veil uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("veil.toml")?;
//!
//! // Access configuration sections
//! println!("Offset window: ±{} days", config.deid.offset_range_days);
//! println!("Audit log: {}", config.deid.audit.log_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`crate::deid::DeidConfig`] - De-identification engine settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [deid]
//! offset_range_days = 365
//!
//! [deid.audit]
//! enabled = true
//! log_path = "./audit/deid.log"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution, and
//! `VEIL_<SECTION>_<KEY>` variables to override individual settings:
//!
//! ```bash
//! export VEIL_APPLICATION_LOG_LEVEL="debug"
//! export VEIL_DEID_OFFSET_RANGE_DAYS="180"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, LoggingConfig, VeilConfig};
