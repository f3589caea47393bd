//! The mutable form-filling session.
//!
//! A [`FormSession`] owns one [`ContextRecord`] and funnels every edit
//! through [`FormSession::apply`] and [`FormSession::set_artifact`], which
//! keep the record's cross-field rules intact (chronology-branch clearing,
//! "Nenhum" exclusivity). Validation is recomputed on demand; nothing is
//! cached between edits.

use super::record::{
    Artifact, ContextRecord, ContextType, Country, Dating, EstimatedPeriod, FireEvidence,
    OccupationType, SiteType,
};
use super::validate::{ValidationReport, filled_field_count, validate};
use crate::error::PreconditionError;

/// One edit to a scalar field of the record.
///
/// Every field name a caller can touch is a variant, so there is no way to
/// address an unknown field. Artifact selection has its own operation,
/// [`FormSession::set_artifact`].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldEdit {
    Depth(f64),
    ContextType(Option<ContextType>),
    Country(Option<Country>),
    Region(String),
    SiteType(Option<SiteType>),
    HasDating(Dating),
    DatingYears(Option<f64>),
    EstimatedPeriod(Option<EstimatedPeriod>),
    OccupationType(Option<OccupationType>),
    FireEvidence(FireEvidence),
    Notes(String),
}

/// A single researcher filling a single questionnaire.
#[derive(Clone, Debug, Default)]
pub struct FormSession {
    record: ContextRecord,
}

impl FormSession {
    /// Start from a blank form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record (for example one loaded from JSON).
    ///
    /// Records built outside a session may carry both chronology branches;
    /// only the active one is kept, the same effect toggling the dating
    /// switch has. The artifact list is reduced to a set, and
    /// [`Artifact::None`] is dropped when any other class accompanies it.
    pub fn with_record(record: ContextRecord) -> Self {
        let mut session = Self { record };
        match session.record.has_dating {
            Dating::Sim => session.record.estimated_period = None,
            Dating::Nao => session.record.dating_years = None,
        }
        let artifacts = &mut session.record.artifacts;
        if artifacts.iter().any(|a| *a != Artifact::None) {
            artifacts.retain(|a| *a != Artifact::None);
        }
        let mut kept = Vec::with_capacity(artifacts.len());
        for artifact in artifacts.drain(..) {
            if !kept.contains(&artifact) {
                kept.push(artifact);
            }
        }
        *artifacts = kept;
        session
    }

    /// The current record.
    pub fn record(&self) -> &ContextRecord {
        &self.record
    }

    /// Apply one field edit.
    ///
    /// Switching `has_dating` clears the field of the branch that becomes
    /// inactive, so a stale value can never leak into a submission. The
    /// clear is unconditional, which makes re-applying the same switch a
    /// no-op.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Depth(value) => self.record.depth = value,
            FieldEdit::ContextType(value) => self.record.context_type = value,
            FieldEdit::Country(value) => self.record.country = value,
            FieldEdit::Region(value) => self.record.region = value,
            FieldEdit::SiteType(value) => self.record.site_type = value,
            FieldEdit::HasDating(value) => {
                self.record.has_dating = value;
                match value {
                    Dating::Sim => self.record.estimated_period = None,
                    Dating::Nao => self.record.dating_years = None,
                }
            }
            FieldEdit::DatingYears(value) => self.record.dating_years = value,
            FieldEdit::EstimatedPeriod(value) => self.record.estimated_period = value,
            FieldEdit::OccupationType(value) => self.record.occupation_type = value,
            FieldEdit::FireEvidence(value) => self.record.fire_evidence = value,
            FieldEdit::Notes(value) => self.record.notes = value,
        }
    }

    /// Select or deselect one artifact class.
    ///
    /// Selecting [`Artifact::None`] replaces the whole selection with it;
    /// selecting anything else removes [`Artifact::None`] first. Selection
    /// is a set: re-selecting a held class changes nothing.
    pub fn set_artifact(&mut self, artifact: Artifact, selected: bool) {
        let artifacts = &mut self.record.artifacts;
        if !selected {
            artifacts.retain(|a| *a != artifact);
            return;
        }
        if artifact == Artifact::None {
            *artifacts = vec![Artifact::None];
            return;
        }
        artifacts.retain(|a| *a != Artifact::None);
        if !artifacts.contains(&artifact) {
            artifacts.push(artifact);
        }
    }

    /// Fresh validation of the current record.
    pub fn errors(&self) -> ValidationReport {
        validate(&self.record)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Whether a submission would be accepted right now.
    pub fn can_submit(&self, image_present: bool) -> bool {
        image_present && self.is_valid()
    }

    /// Submit the questionnaire.
    ///
    /// Returns a copy of the record: later edits to the session do not
    /// reach an analysis already in flight. A missing image is reported
    /// before invalid fields.
    pub fn submit(&self, image_present: bool) -> Result<ContextRecord, PreconditionError> {
        if !image_present {
            return Err(PreconditionError::NoImage);
        }
        if !self.is_valid() {
            return Err(PreconditionError::InvalidFields);
        }
        Ok(self.record.clone())
    }

    /// How many of the 11 fields currently hold a value.
    pub fn filled_field_count(&self) -> usize {
        filled_field_count(&self.record)
    }

    /// Return to the blank form.
    pub fn reset(&mut self) {
        self.record = ContextRecord::default();
    }
}
