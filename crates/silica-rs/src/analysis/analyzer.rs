//! The analyzer seam.
//!
//! [`Analyzer`] is the one async boundary in the crate: a submitted
//! image-plus-context pair goes in, a typed [`AnalysisResult`] or an
//! [`AnalysisError`] comes out. The workflow only ever talks to this
//! trait, so tests drive it with scripted analyzers and the CLI plugs
//! in [`GeminiAnalyzer`].

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::analysis::parse::parse_analysis_result;
use crate::analysis::prompt::build_analysis_prompt;
use crate::analysis::result::AnalysisResult;
use crate::error::AnalysisError;
use crate::form::ContextRecord;
use crate::image::ImageAttachment;
use crate::{Content, DEFAULT_MODEL, GeminiClient, GenerateContentRequest, GenerationConfig, Part};

/// Boxed future returned by [`Analyzer::analyze`].
pub type AnalyzerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send + 'a>>;

/// Everything one analysis needs: the validated micrograph and the
/// submitted context record.
#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    pub image: ImageAttachment,
    pub context: ContextRecord,
}

/// An analysis backend.
///
/// Returns a boxed future rather than using `async fn` so the trait
/// stays dyn-compatible.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> AnalyzerFuture<'_>;
}

/// The production analyzer: one `generateContent` call against the
/// Gemini vision model, reply parsed and schema-checked.
pub struct GeminiAnalyzer {
    client: GeminiClient,
    model: String,
    generation: Option<GenerationConfig>,
}

impl GeminiAnalyzer {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            generation: None,
        }
    }

    /// Override the model id.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set sampling parameters for the call.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation = Some(config);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Analyzer for GeminiAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> AnalyzerFuture<'_> {
        // Image first, then the prompt: the order the original contract
        // was written for.
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    request.image.to_inline_part(),
                    Part::text(build_analysis_prompt(&request.context)),
                ],
            }],
            generation_config: self.generation.clone(),
        };
        debug!(
            model = %self.model,
            image_bytes = request.image.len(),
            mime = request.image.mime(),
            "submitting phytolith analysis"
        );
        Box::pin(async move {
            let reply = self.client.generate_content(&self.model, &body).await?;
            parse_analysis_result(&reply.text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> AnalysisRequest {
        AnalysisRequest {
            image: ImageAttachment::new(vec![1, 2, 3], "image/png").unwrap(),
            context: ContextRecord::default(),
        }
    }

    #[test]
    fn request_carries_image_and_context() {
        let request = make_request();
        assert_eq!(request.image.mime(), "image/png");
        assert_eq!(request.context, ContextRecord::default());
    }

    #[test]
    fn builder_overrides_model_and_sampling() {
        let client = GeminiClient::new("test-key").unwrap();
        let analyzer = GeminiAnalyzer::new(client)
            .with_model("gemini-2.5-pro")
            .with_generation_config(GenerationConfig {
                temperature: Some(0.2),
                ..GenerationConfig::default()
            });
        assert_eq!(analyzer.model(), "gemini-2.5-pro");
        assert_eq!(
            analyzer.generation.as_ref().and_then(|g| g.temperature),
            Some(0.2)
        );
    }

    #[test]
    fn default_model_is_the_flash_vision_model() {
        let client = GeminiClient::new("test-key").unwrap();
        assert_eq!(GeminiAnalyzer::new(client).model(), DEFAULT_MODEL);
    }
}
