//! Error types for the analysis workflow.
//!
//! Field-level validation problems are *not* errors — they are data, carried
//! by [`ValidationReport`](crate::form::ValidationReport) so callers can
//! render them next to the fields. The types here cover everything else:
//! submission gates, image constraints, model-call failures, and the
//! workflow umbrella.

use thiserror::Error;

/// A submission was attempted while one of its gates was closed.
///
/// Display strings are the user-facing submit-button texts, so they can be
/// surfaced verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    /// No image is attached. Checked before field validity.
    #[error("Faça o upload da imagem primeiro")]
    NoImage,
    /// One or more questionnaire fields are invalid.
    #[error("Preencha todos os campos obrigatórios")]
    InvalidFields,
}

/// The model call failed or produced an unusable response.
///
/// Analysis failures are terminal for the attempt: nothing is retried and
/// no partial result is kept.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status from the API, with the server's message.
    #[error("Gemini API HTTP {status}: {message}")]
    Api { status: u16, message: String },
    /// The prompt was rejected by a safety filter before generation.
    #[error("prompt blocked: {reason}")]
    Blocked { reason: String },
    /// The response carried no candidates or no text.
    #[error("empty model response")]
    Empty,
    #[error("failed to parse model response: {0}")]
    Json(#[from] serde_json::Error),
    /// The response parsed as JSON but does not match the result schema.
    #[error("model response does not match the expected schema:\n{problems}")]
    Schema { problems: String },
}

/// An image failed the attachment constraints.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("invalid file type '{mime}': upload JPG, PNG, TIFF, BMP, or WEBP")]
    UnsupportedType { mime: String },
    #[error("file is too large ({size} bytes): maximum size is {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("cannot infer an image type from '{path}'")]
    UnrecognizedExtension { path: String },
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for driving the workflow end to end.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("{0}")]
    Precondition(#[from] PreconditionError),
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("invalid image: {0}")]
    Image(#[from] ImageError),
    /// An analysis was started while a previous one was running or showing.
    #[error("analysis can only be started from the form phase (current phase: {phase})")]
    WrongPhase { phase: &'static str },
}
