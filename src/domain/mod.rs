//! Domain models and types for Veil.
//!
//! This module contains the core domain models, types, and business rules
//! for the de-identification engine.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ResourceId`], [`PatientId`])
//! - **The closed resource kind enumeration** ([`ResourceKind`])
//! - **The raw resource wrapper** ([`RawResource`])
//! - **Error types** ([`VeilError`], [`DeidError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Veil uses the newtype pattern for identifiers to prevent mixing different
//! ID types:
//!
//! ```rust
//! use veil::domain::{ResourceId, PatientId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resource_id = ResourceId::new("obs-42")?;
//! let patient_id = PatientId::new("abc123")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: PatientId = resource_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{Result, ResourceKind};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let kind: ResourceKind = "Patient".parse()?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod kind;
pub mod resource;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DeidError, VeilError};
pub use ids::{PatientId, ResourceId};
pub use kind::ResourceKind;
pub use resource::RawResource;
pub use result::Result;
