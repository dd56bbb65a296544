// Veil - FHIR De-Identification Engine
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - FHIR De-Identification Engine
//!
//! Veil transforms FHIR clinical records into privacy-safe documents suitable
//! for research and analytics. Identifying text is replaced with realistic
//! pseudonyms, clinical dates are shifted per patient, and free-text fields
//! that cannot be safely scanned are redacted outright, while codes,
//! references, and quantitative values pass through untouched.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Pseudonymizing** names, addresses, and contact points with consistent,
//!   reproducible fakes
//! - **Shifting** every date a patient's records carry by the same hidden
//!   offset, preserving intervals between clinical events
//! - **Redacting** narrative free text with a fixed placeholder
//! - **Reporting** exactly what was done to every record
//!
//! ## Architecture
//!
//! Veil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`deid`] - De-identification engine (cache, offsets, policy, transformer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veil::deid::{DeidConfig, DeidSession};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = DeidSession::new(DeidConfig::default())?;
//!
//!     let result = session.transform(json!({
//!         "resourceType": "Patient",
//!         "id": "abc123",
//!         "name": [{"given": ["Jane"], "family": "Doe"}],
//!         "birthDate": "1980-05-10"
//!     }))?;
//!
//!     println!("{}", serde_json::to_string_pretty(&result.data)?);
//!     println!("Pseudonymized fields: {}", result.report.pseudonymized);
//!     Ok(())
//! }
//! ```
//!
//! ## Consistency
//!
//! All records transformed through one [`deid::DeidSession`] share a
//! pseudonym cache: the same original value always maps to the same
//! replacement, so a patient's name lines up across every record that
//! mentions it. Replacements are derived from the original content, so
//! separate runs over the same data converge on the same output.
//!
//! ## Error Handling
//!
//! Veil uses the [`domain::VeilError`] type for all errors:
//!
//! ```rust,no_run
//! use veil::domain::VeilError;
//!
//! fn example() -> Result<(), VeilError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = veil::config::load_config("veil.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Veil uses structured logging with the `tracing` crate. Log lines carry
//! resource kinds, ids, and counts, never field values, so logs stay free
//! of patient identifiers:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(kind = "Patient", id = "abc123", "Record transformed");
//! warn!(field_path = "birthDate", "Malformed temporal value");
//! ```

pub mod cli;
pub mod config;
pub mod deid;
pub mod domain;
pub mod logging;
