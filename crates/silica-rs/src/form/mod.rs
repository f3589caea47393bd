//! The archaeological context questionnaire.
//!
//! This module contains the whole form engine:
//!
//! - [`record::ContextRecord`] — the 11-field record and its catalogs
//!   ([`ContextType`], [`Country`], [`SiteType`], [`EstimatedPeriod`],
//!   [`Artifact`], [`OccupationType`]). Start here.
//! - [`session::FormSession`] — a mutable filling session. Edits go through
//!   [`FieldEdit`] and [`FormSession::set_artifact`] so the cross-field
//!   rules always hold.
//! - [`validate`] — pure validation: [`validate()`](validate::validate)
//!   builds a [`ValidationReport`] keyed by [`FieldId`], and
//!   [`filled_field_count`] drives the progress counter.

pub mod record;
pub mod session;
pub mod validate;

// Re-export commonly used items at the module level.
pub use record::{
    Artifact, ContextRecord, ContextType, Country, Dating, EstimatedPeriod, FireEvidence,
    OccupationType, SiteType,
};
pub use session::{FieldEdit, FormSession};
pub use validate::{
    FieldId, MIN_NOTES_CHARS, TOTAL_FIELDS, ValidationReport, filled_field_count, validate,
};
