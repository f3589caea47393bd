//! Pure validation over a [`ContextRecord`].
//!
//! [`validate`] never mutates and never caches: callers re-run it whenever
//! they need a fresh verdict. The [`ValidationReport`] keys messages by
//! [`FieldId`] in form order, with at most one message per field. Only the
//! active chronology branch is checked.

use super::record::{ContextRecord, Dating};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed denominator of the progress indicator.
///
/// This is a business rule, not a struct measurement: the two chronology
/// fields share one slot, so the form always reports out of 11.
pub const TOTAL_FIELDS: usize = 11;

/// Minimum length of the `notes` field, in characters.
pub const MIN_NOTES_CHARS: usize = 20;

const REQUIRED_FIELD: &str = "Campo obrigatório.";

/// Validatable fields, in the order they appear on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Depth,
    ContextType,
    Country,
    Region,
    SiteType,
    DatingYears,
    EstimatedPeriod,
    Artifacts,
    OccupationType,
    Notes,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Depth => "depth",
            FieldId::ContextType => "context_type",
            FieldId::Country => "country",
            FieldId::Region => "region",
            FieldId::SiteType => "site_type",
            FieldId::DatingYears => "dating_years",
            FieldId::EstimatedPeriod => "estimated_period",
            FieldId::Artifacts => "artifacts",
            FieldId::OccupationType => "occupation_type",
            FieldId::Notes => "notes",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages. Empty means the record is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldId, String>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message for one field, if it failed.
    pub fn message(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Iterate messages in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

/// Check every active field of the record.
pub fn validate(record: &ContextRecord) -> ValidationReport {
    let mut report = ValidationReport::default();

    if record.depth <= 0.0 {
        report.insert(FieldId::Depth, "Profundidade deve ser maior que 0.");
    }
    if record.context_type.is_none() {
        report.insert(FieldId::ContextType, REQUIRED_FIELD);
    }
    if record.country.is_none() {
        report.insert(FieldId::Country, REQUIRED_FIELD);
    }
    if record.region.is_empty() {
        report.insert(FieldId::Region, REQUIRED_FIELD);
    }
    if record.site_type.is_none() {
        report.insert(FieldId::SiteType, REQUIRED_FIELD);
    }
    if record.has_dating == Dating::Sim && !record.dating_years.is_some_and(|y| y > 0.0) {
        report.insert(FieldId::DatingYears, "Datação AP deve ser maior que 0.");
    }
    if record.has_dating == Dating::Nao && record.estimated_period.is_none() {
        report.insert(FieldId::EstimatedPeriod, REQUIRED_FIELD);
    }
    if record.artifacts.is_empty() {
        report.insert(FieldId::Artifacts, "Selecione ao menos uma opção.");
    }
    if record.occupation_type.is_none() {
        report.insert(FieldId::OccupationType, REQUIRED_FIELD);
    }
    if record.notes.chars().count() < MIN_NOTES_CHARS {
        report.insert(FieldId::Notes, format!("Mínimo de {MIN_NOTES_CHARS} caracteres."));
    }

    report
}

/// Count the fields that currently hold a value, out of [`TOTAL_FIELDS`].
///
/// A field counts when it differs from the blank-form value; the inactive
/// chronology field never counts. Filled is not the same as valid: a
/// negative depth counts as filled but fails [`validate`].
pub fn filled_field_count(record: &ContextRecord) -> usize {
    // has_dating and fire_evidence always hold a value.
    let mut filled = 2;

    if record.depth != 0.0 {
        filled += 1;
    }
    if record.context_type.is_some() {
        filled += 1;
    }
    if record.country.is_some() {
        filled += 1;
    }
    if !record.region.is_empty() {
        filled += 1;
    }
    if record.site_type.is_some() {
        filled += 1;
    }
    if record.has_dating == Dating::Sim && record.dating_years.is_some_and(|y| y != 0.0) {
        filled += 1;
    }
    if record.has_dating == Dating::Nao && record.estimated_period.is_some() {
        filled += 1;
    }
    if !record.artifacts.is_empty() {
        filled += 1;
    }
    if record.occupation_type.is_some() {
        filled += 1;
    }
    if !record.notes.is_empty() {
        filled += 1;
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::record::{
        Artifact, ContextType, Country, EstimatedPeriod, FireEvidence, OccupationType, SiteType,
    };

    fn make_valid_record() -> ContextRecord {
        ContextRecord {
            depth: 150.0,
            context_type: Some(ContextType::ArchaeologicalLayer),
            country: Some(Country::Brazil),
            region: "Amazônia".into(),
            site_type: Some(SiteType::Archaeological),
            has_dating: Dating::Nao,
            dating_years: None,
            estimated_period: Some(EstimatedPeriod::MidHolocene),
            artifacts: vec![Artifact::Ceramics, Artifact::Charcoal],
            occupation_type: Some(OccupationType::Domestic),
            fire_evidence: FireEvidence::Sim,
            notes: "Amostra coletada junto a estruturas de combustão e cerâmica.".into(),
        }
    }

    #[test]
    fn valid_record_passes() {
        let report = validate(&make_valid_record());
        assert!(report.is_empty(), "unexpected errors: {report:?}");
    }

    #[test]
    fn blank_form_fails_every_active_field() {
        let report = validate(&ContextRecord::default());
        let failed: Vec<FieldId> = report.iter().map(|(field, _)| field).collect();
        assert_eq!(
            failed,
            vec![
                FieldId::Depth,
                FieldId::ContextType,
                FieldId::Country,
                FieldId::Region,
                FieldId::SiteType,
                FieldId::EstimatedPeriod,
                FieldId::Artifacts,
                FieldId::OccupationType,
                FieldId::Notes,
            ]
        );
        // dating_years is inactive while has_dating is nao.
        assert!(report.message(FieldId::DatingYears).is_none());
    }

    #[test]
    fn messages_match_the_form() {
        let report = validate(&ContextRecord::default());
        assert_eq!(
            report.message(FieldId::Depth),
            Some("Profundidade deve ser maior que 0.")
        );
        assert_eq!(report.message(FieldId::Country), Some("Campo obrigatório."));
        assert_eq!(
            report.message(FieldId::Artifacts),
            Some("Selecione ao menos uma opção.")
        );
        assert_eq!(
            report.message(FieldId::Notes),
            Some("Mínimo de 20 caracteres.")
        );
    }

    #[test]
    fn negative_depth_fails() {
        let mut record = make_valid_record();
        record.depth = -3.0;
        let report = validate(&record);
        assert_eq!(
            report.message(FieldId::Depth),
            Some("Profundidade deve ser maior que 0.")
        );
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn dating_branch_activates_years_and_deactivates_period() {
        let mut record = make_valid_record();
        record.has_dating = Dating::Sim;
        record.estimated_period = None;

        // Missing years fails on the active branch.
        record.dating_years = None;
        let report = validate(&record);
        assert_eq!(
            report.message(FieldId::DatingYears),
            Some("Datação AP deve ser maior que 0.")
        );
        assert!(report.message(FieldId::EstimatedPeriod).is_none());

        // Zero years is as bad as missing.
        record.dating_years = Some(0.0);
        assert!(validate(&record).message(FieldId::DatingYears).is_some());

        record.dating_years = Some(4500.0);
        assert!(validate(&record).is_empty());
    }

    #[test]
    fn inactive_period_is_not_checked() {
        let mut record = make_valid_record();
        record.has_dating = Dating::Sim;
        record.dating_years = Some(4500.0);
        // Leftover period on the inactive branch does not matter.
        record.estimated_period = None;
        assert!(validate(&record).is_empty());
    }

    #[test]
    fn notes_length_counts_characters_not_bytes() {
        let mut record = make_valid_record();

        // 19 accented characters: more than 20 bytes, still too short.
        record.notes = "ãé".repeat(9) + "ã";
        assert_eq!(record.notes.chars().count(), 19);
        assert!(validate(&record).message(FieldId::Notes).is_some());

        record.notes.push('!');
        assert!(validate(&record).is_empty());
    }

    #[test]
    fn report_iterates_in_form_order() {
        let mut record = make_valid_record();
        record.notes.clear();
        record.depth = 0.0;
        let failed: Vec<FieldId> = validate(&record).iter().map(|(field, _)| field).collect();
        assert_eq!(failed, vec![FieldId::Depth, FieldId::Notes]);
    }

    #[test]
    fn blank_form_counts_two_filled_fields() {
        assert_eq!(filled_field_count(&ContextRecord::default()), 2);
    }

    #[test]
    fn complete_record_counts_all_eleven() {
        assert_eq!(filled_field_count(&make_valid_record()), TOTAL_FIELDS);
    }

    #[test]
    fn switching_branch_unfills_the_other_chronology_field() {
        let mut record = make_valid_record();
        assert_eq!(filled_field_count(&record), 11);

        // Period no longer counts once the record claims a radiocarbon date.
        record.has_dating = Dating::Sim;
        assert_eq!(filled_field_count(&record), 10);

        record.dating_years = Some(4500.0);
        assert_eq!(filled_field_count(&record), 11);
    }

    #[test]
    fn filled_is_not_valid() {
        let mut record = make_valid_record();
        record.depth = -50.0;
        assert_eq!(filled_field_count(&record), TOTAL_FIELDS);
        assert!(!validate(&record).is_empty());
    }
}
