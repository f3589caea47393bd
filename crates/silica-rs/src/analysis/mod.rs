//! From submitted sample to structured report.
//!
//! The pipeline is prompt → model call → parse:
//!
//! - [`prompt::build_analysis_prompt`] — renders the Portuguese analysis
//!   prompt from a [`ContextRecord`](crate::form::ContextRecord).
//! - [`analyzer`] — the [`Analyzer`] trait (the async seam the workflow
//!   depends on) and [`GeminiAnalyzer`], the production backend.
//! - [`parse`] — fence stripping plus schema validation of the reply.
//! - [`result`] — the [`AnalysisResult`] tree the rest of the crate
//!   consumes.

pub mod analyzer;
pub mod parse;
pub mod prompt;
pub mod result;

// Re-export commonly used items at the module level.
pub use analyzer::{AnalysisRequest, Analyzer, AnalyzerFuture, GeminiAnalyzer};
pub use parse::{parse_analysis_result, strip_code_fences};
pub use prompt::build_analysis_prompt;
pub use result::{
    AnalysisResult, ConfidenceAnalysis, ConfidenceLevel, ContextInterpretation, HistoricalPeriod,
    MorphologicalDescription, SampleSiteDetails, SpeciesAssessment,
};
