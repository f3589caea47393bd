//! Convenience re-exports for common `silica-rs` types.
//!
//! Meant to be glob-imported when wiring up an analysis:
//!
//! ```ignore
//! use silica_rs::prelude::*;
//! ```
//!
//! This pulls in the types needed for the vast majority of programs: the
//! [`GeminiClient`], the form engine ([`FormSession`] + catalogs +
//! validation), the [`Analyzer`] seam, and the [`AnalysisWorkflow`].
//! Specialized pieces (raw prompt assembly, fence stripping, report
//! internals) are intentionally excluded — import those from their
//! modules directly when needed.

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{
    Content, DEFAULT_MODEL, GeminiClient, GenerateContentRequest, GenerateReply, GenerationConfig,
    Part, json_schema_for,
};

// ── Form engine ─────────────────────────────────────────────────────
pub use crate::form::{
    Artifact, ContextRecord, ContextType, Country, Dating, EstimatedPeriod, FieldEdit, FieldId,
    FireEvidence, FormSession, OccupationType, SiteType, ValidationReport, filled_field_count,
    validate,
};

// ── Analysis ────────────────────────────────────────────────────────
pub use crate::analysis::{
    AnalysisRequest, AnalysisResult, Analyzer, AnalyzerFuture, ConfidenceLevel, GeminiAnalyzer,
};

// ── Workflow ────────────────────────────────────────────────────────
pub use crate::workflow::{AnalysisWorkflow, AppState};

// ── Attachments and errors ──────────────────────────────────────────
pub use crate::error::{AnalysisError, ImageError, PreconditionError, WorkflowError};
pub use crate::image::{ACCEPTED_IMAGE_TYPES, ImageAttachment, MAX_IMAGE_BYTES};

// ── Reporting ───────────────────────────────────────────────────────
pub use crate::report::render_report;
