//! De-identification engine
//!
//! Transforms FHIR clinical records into privacy-safe documents while
//! preserving their analytic utility. The engine rests on three pillars:
//!
//! - **Pseudonym cache**: identifying text (names, addresses, contact
//!   points) is replaced with realistic fakes, and the same original
//!   always maps to the same fake within a session ([`PseudonymCache`]).
//! - **Date shifting**: every date a patient's records carry moves by the
//!   same hash-derived number of days, so intervals between clinical
//!   events survive ([`offset`]).
//! - **Declarative policy**: each resource kind has a static table of
//!   field rules; the transformer walks a record under its table and
//!   leaves unlisted fields untouched ([`policy`], [`Transformer`]).
//!
//! [`DeidSession`] is the entry point: it owns the cache and audit trail
//! and exposes single-record and batch transforms.

pub mod audit;
pub mod category;
pub mod config;
pub mod offset;
pub mod policy;
pub mod pseudonym;
pub mod report;
pub mod session;
pub mod transformer;

pub use audit::AuditLogger;
pub use category::PseudonymCategory;
pub use config::{AuditConfig, DeidConfig};
pub use offset::{offset_days, offset_days_in, shift_temporal, DEFAULT_OFFSET_RANGE_DAYS};
pub use policy::{policy_for, FieldAction, FieldRule, REDACTION_PLACEHOLDER};
pub use pseudonym::PseudonymCache;
pub use report::{
    ResourceReport, SessionReport, TransformWarning, TransformedResource, WarningKind,
};
pub use session::DeidSession;
pub use transformer::Transformer;
