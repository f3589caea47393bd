//! Phytolith image analysis workflow: context questionnaire, Gemini vision
//! client, and report rendering.
//!
//! `silica-rs` turns a microscope image of a phytolith plus a structured
//! archaeological-context record into a scientific interpretation. The core
//! abstraction is the [`AnalysisWorkflow`](workflow::AnalysisWorkflow) — a
//! small state machine that validates the questionnaire, gates submission on
//! an attached image, sends one request to a multimodal model, and lands on
//! an atomic [`AnalysisResult`](analysis::AnalysisResult) or a failure.
//!
//! # Getting started
//!
//! Add `silica-rs` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! silica-rs = { path = "../silica-rs" }
//! ```
//!
//! Then drive a full analysis:
//!
//! ```ignore
//! use silica_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), WorkflowError> {
//!     let api_key = std::env::var("GEMINI_API_KEY").unwrap();
//!
//!     // Fill the questionnaire.
//!     let mut workflow = AnalysisWorkflow::new();
//!     let session = workflow.session_mut();
//!     session.apply(FieldEdit::Depth(150.0));
//!     session.apply(FieldEdit::ContextType(Some(ContextType::ArchaeologicalLayer)));
//!     // ... remaining fields ...
//!
//!     // Attach the microscope image.
//!     let image = ImageAttachment::from_path("phytolith.png")?;
//!     workflow.attach_image(image);
//!
//!     // One submission, one atomic outcome.
//!     let analyzer = GeminiAnalyzer::new(GeminiClient::new(api_key)?);
//!     workflow.run_analysis(&analyzer).await?;
//!
//!     if let Some(result) = workflow.result() {
//!         println!("{}", render_report(result));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! If you're looking for how to...
//!
//! - **Fill and validate the questionnaire:** see
//!   [`ContextRecord`](form::ContextRecord) for the record itself,
//!   [`validate`](form::validate()) for the pure field-by-field check,
//!   and [`FormSession`](form::FormSession) for the mutable editing session
//!   with [`FieldEdit`](form::FieldEdit) updates and artifact selection.
//!
//! - **Gate and run a submission:** see
//!   [`AnalysisWorkflow`](workflow::AnalysisWorkflow). `can_submit` mirrors
//!   the submit-button state; `run_analysis` performs the guarded
//!   FORM → ANALYZING → RESULTS/ERROR pass; `reset` is the only way back.
//!
//! - **Swap the model backend:** implement [`Analyzer`](analysis::Analyzer).
//!   [`GeminiAnalyzer`](analysis::GeminiAnalyzer) is the production
//!   implementation; tests script their own.
//!
//! - **Talk to Gemini directly:** use [`GeminiClient`] with
//!   [`GenerateContentRequest`] — typed `generateContent` wire structs live
//!   in this module.
//!
//! - **Render results:** [`report::render_report`] produces the text
//!   report; the raw [`AnalysisResult`](analysis::AnalysisResult) serializes
//!   to JSON.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`form`] | [`ContextRecord`](form::ContextRecord), option catalogs, validation, [`FormSession`](form::FormSession) |
//! | [`workflow`] | [`AnalysisWorkflow`](workflow::AnalysisWorkflow) state machine |
//! | [`analysis`] | [`Analyzer`](analysis::Analyzer) seam, prompt builder, response parsing, typed [`AnalysisResult`](analysis::AnalysisResult) |
//! | [`image`] | [`ImageAttachment`](image::ImageAttachment) with type and size constraints |
//! | [`report`] | Text report rendering |
//! | [`error`] | Precondition, analysis, image, and workflow errors |

pub mod analysis;
pub mod error;
pub mod form;
pub mod image;
pub mod prelude;
pub mod report;
pub mod workflow;

use crate::error::AnalysisError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

// Re-export schemars for downstream crates.
pub use schemars;

// ── Constants ──────────────────────────────────────────────────────

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for all analysis calls.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`. This is the bridge between strong Rust types
/// and the schema the model's JSON output is validated against.
///
/// # Example
///
/// ```
/// use silica_rs::json_schema_for;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Identification {
///     morphotype: String,
///     #[serde(default)]
///     subfamily: Option<String>,
/// }
///
/// let schema = json_schema_for::<Identification>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"morphotype".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Request types ──────────────────────────────────────────────────

/// One part of a request content: either text or inline binary data.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Base64-encoded binary payload with its MIME type.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A content block: an ordered list of parts.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Sampling parameters. Unused optional fields are omitted from
/// serialization.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// `generateContent` request body.
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawGenerateResponse {
    candidates: Option<Vec<RawCandidate>>,
    prompt_feedback: Option<RawPromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<RawApiError>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    content: Option<RawCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawCandidateContent {
    parts: Option<Vec<RawCandidatePart>>,
}

#[derive(Deserialize, Debug)]
struct RawCandidatePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawApiError {
    message: String,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

/// Clean return type from [`GeminiClient::generate_content`].
#[derive(Debug)]
pub struct GenerateReply {
    /// Concatenated text of the first candidate's parts.
    pub text: String,
    pub finish_reason: Option<String>,
    pub usage: Option<UsageMetadata>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AnalysisError> {
        Self::with_base_url(api_key, GEMINI_BASE_URL)
    }

    /// Create a new client against a custom base URL (proxies, tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .user_agent("silica-rs/0.3")
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Send a `generateContent` request to the given model.
    pub async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateReply, AnalysisError> {
        let part_count: usize = body.contents.iter().map(|c| c.parts.len()).sum();
        debug!(
            "Gemini request: model={}, contents={}, parts={}",
            model,
            body.contents.len(),
            part_count,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        let elapsed = start.elapsed();
        debug!(
            "Gemini response: HTTP {} in {:.1}s ({} bytes)",
            status,
            elapsed.as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            let message = serde_json::from_str::<RawGenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map_or(text, |e| e.message);
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: RawGenerateResponse = serde_json::from_str(&text)?;

        if let Some(feedback) = parsed.prompt_feedback
            && let Some(reason) = feedback.block_reason
        {
            return Err(AnalysisError::Blocked { reason });
        }

        if let Some(ref usage) = parsed.usage_metadata {
            debug!(
                "Token usage: prompt={}, candidates={}, total={}",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0),
                usage.total_token_count.unwrap_or(0),
            );
        }

        let candidate = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or(AnalysisError::Empty)?;

        let reply_text: String = candidate
            .content
            .and_then(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if reply_text.is_empty() {
            return Err(AnalysisError::Empty);
        }

        debug!(
            "Gemini output: {} chars text, finish_reason={}",
            reply_text.len(),
            candidate.finish_reason.as_deref().unwrap_or("(none)")
        );

        Ok(GenerateReply {
            text: reply_text,
            finish_reason: candidate.finish_reason,
            usage: parsed.usage_metadata,
        })
    }
}
