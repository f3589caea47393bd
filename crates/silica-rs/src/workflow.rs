//! The application state machine.
//!
//! One [`AnalysisWorkflow`] owns one [`FormSession`] and at most one
//! [`ImageAttachment`], and walks the four phases: form filling, one
//! in-flight analysis, and the two terminal screens (results or error).
//! `run_analysis` takes `&mut self` and awaits exactly one analyzer
//! call, so a session can never have two submissions in flight.

use tracing::{debug, info, warn};

use crate::analysis::{AnalysisRequest, AnalysisResult, Analyzer};
use crate::error::{PreconditionError, WorkflowError};
use crate::form::FormSession;
use crate::image::ImageAttachment;

/// Which screen the session is on.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AppState {
    /// Filling the questionnaire. The only phase that accepts a
    /// submission.
    #[default]
    Form,
    /// One analysis in flight.
    Analyzing,
    /// Terminal: the analysis came back.
    Results(AnalysisResult),
    /// Terminal: the analysis failed. Holds the human-readable message.
    Error(String),
}

impl AppState {
    pub fn name(&self) -> &'static str {
        match self {
            AppState::Form => "form",
            AppState::Analyzing => "analyzing",
            AppState::Results(_) => "results",
            AppState::Error(_) => "error",
        }
    }
}

/// One researcher's end-to-end pass: fill the form, attach a
/// micrograph, run the analysis, read the report.
#[derive(Default)]
pub struct AnalysisWorkflow {
    session: FormSession,
    image: Option<ImageAttachment>,
    state: AppState,
}

impl AnalysisWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-filled session (for example a record loaded
    /// from disk).
    pub fn with_session(session: FormSession) -> Self {
        Self {
            session,
            image: None,
            state: AppState::Form,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }

    /// Attach (or replace) the micrograph.
    pub fn attach_image(&mut self, image: ImageAttachment) {
        debug!(bytes = image.len(), mime = image.mime(), "image attached");
        self.image = Some(image);
    }

    /// Detach the micrograph, returning it if one was attached.
    pub fn remove_image(&mut self) -> Option<ImageAttachment> {
        self.image.take()
    }

    pub fn image_present(&self) -> bool {
        self.image.is_some()
    }

    /// Whether a submission would be accepted right now.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, AppState::Form) && self.session.can_submit(self.image.is_some())
    }

    /// The analysis, if the workflow reached the results screen.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            AppState::Results(result) => Some(result),
            _ => None,
        }
    }

    /// The failure message, if the workflow reached the error screen.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            AppState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Submit the form and run one analysis.
    ///
    /// Rejections happen in a fixed order: wrong phase, then missing
    /// image, then invalid fields. A precondition rejection leaves the
    /// workflow on the form, still correctable. Once the preconditions
    /// pass the workflow moves to `Analyzing` and ends on `Results` or
    /// `Error`, where only [`reset`](Self::reset) can take it back.
    pub async fn run_analysis(&mut self, analyzer: &impl Analyzer) -> Result<(), WorkflowError> {
        if !matches!(self.state, AppState::Form) {
            return Err(WorkflowError::WrongPhase {
                phase: self.state.name(),
            });
        }
        let Some(image) = self.image.clone() else {
            return Err(PreconditionError::NoImage.into());
        };
        let context = self.session.submit(true)?;

        self.state = AppState::Analyzing;
        info!(
            filled = self.session.filled_field_count(),
            image_bytes = image.len(),
            "starting analysis"
        );
        let request = AnalysisRequest { image, context };
        match analyzer.analyze(&request).await {
            Ok(result) => {
                info!(morphotype = %result.morphotype, "analysis complete");
                self.state = AppState::Results(result);
                Ok(())
            }
            Err(error) => {
                warn!(%error, "analysis failed");
                self.state = AppState::Error(error.to_string());
                Err(WorkflowError::Analysis(error))
            }
        }
    }

    /// Back to a blank form. Drops the record, the image, and any
    /// result or error.
    pub fn reset(&mut self) {
        self.session.reset();
        self.image = None;
        self.state = AppState::Form;
    }
}
