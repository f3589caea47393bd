//! The archaeological-context record and its option catalogs.
//!
//! Catalog enums serialize to the exact strings the questionnaire offers,
//! so records round-trip through JSON with the labels field researchers
//! actually see. [`label()`](ContextType::label) returns the same string
//! for display.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Option catalogs ────────────────────────────────────────────────

/// Stratigraphic context of the sample collection.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextType {
    #[serde(rename = "Superficial (0-20cm)")]
    Superficial,
    #[serde(rename = "Camada arqueológica (20-100cm)")]
    ArchaeologicalLayer,
    #[serde(rename = "Sedimento profundo (>100cm)")]
    DeepSediment,
}

impl ContextType {
    /// All options, in form order.
    pub const ALL: [ContextType; 3] = [
        ContextType::Superficial,
        ContextType::ArchaeologicalLayer,
        ContextType::DeepSediment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContextType::Superficial => "Superficial (0-20cm)",
            ContextType::ArchaeologicalLayer => "Camada arqueológica (20-100cm)",
            ContextType::DeepSediment => "Sedimento profundo (>100cm)",
        }
    }
}

/// Country of the collection site.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Country {
    Brazil,
    #[serde(rename = "USA")]
    Usa,
    Mexico,
    Argentina,
    Peru,
    Colombia,
    Chile,
    Ecuador,
    Bolivia,
    Other,
}

impl Country {
    pub const ALL: [Country; 10] = [
        Country::Brazil,
        Country::Usa,
        Country::Mexico,
        Country::Argentina,
        Country::Peru,
        Country::Colombia,
        Country::Chile,
        Country::Ecuador,
        Country::Bolivia,
        Country::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Country::Brazil => "Brazil",
            Country::Usa => "USA",
            Country::Mexico => "Mexico",
            Country::Argentina => "Argentina",
            Country::Peru => "Peru",
            Country::Colombia => "Colombia",
            Country::Chile => "Chile",
            Country::Ecuador => "Ecuador",
            Country::Bolivia => "Bolivia",
            Country::Other => "Other",
        }
    }
}

/// Depositional setting of the site.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteType {
    #[serde(rename = "Arqueológico")]
    Archaeological,
    #[serde(rename = "Solo natural")]
    NaturalSoil,
    #[serde(rename = "Sedimento lacustre")]
    LacustrineSediment,
    #[serde(rename = "Paleosolo")]
    Paleosol,
    #[serde(rename = "Outro")]
    Other,
}

impl SiteType {
    pub const ALL: [SiteType; 5] = [
        SiteType::Archaeological,
        SiteType::NaturalSoil,
        SiteType::LacustrineSediment,
        SiteType::Paleosol,
        SiteType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SiteType::Archaeological => "Arqueológico",
            SiteType::NaturalSoil => "Solo natural",
            SiteType::LacustrineSediment => "Sedimento lacustre",
            SiteType::Paleosol => "Paleosolo",
            SiteType::Other => "Outro",
        }
    }
}

/// Coarse chronological bracket, used when no radiocarbon dating exists.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstimatedPeriod {
    #[serde(rename = "Moderno (<100 anos)")]
    Modern,
    #[serde(rename = "Histórico (100-500 anos)")]
    Historic,
    #[serde(rename = "Holoceno recente (500-4000 anos)")]
    LateHolocene,
    #[serde(rename = "Holoceno médio (4000-8000 anos)")]
    MidHolocene,
    #[serde(rename = "Holoceno inicial (8000-12000 anos)")]
    EarlyHolocene,
    #[serde(rename = "Pleistoceno (>12000 anos)")]
    Pleistocene,
    #[serde(rename = "Desconhecido")]
    Unknown,
}

impl EstimatedPeriod {
    pub const ALL: [EstimatedPeriod; 7] = [
        EstimatedPeriod::Modern,
        EstimatedPeriod::Historic,
        EstimatedPeriod::LateHolocene,
        EstimatedPeriod::MidHolocene,
        EstimatedPeriod::EarlyHolocene,
        EstimatedPeriod::Pleistocene,
        EstimatedPeriod::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EstimatedPeriod::Modern => "Moderno (<100 anos)",
            EstimatedPeriod::Historic => "Histórico (100-500 anos)",
            EstimatedPeriod::LateHolocene => "Holoceno recente (500-4000 anos)",
            EstimatedPeriod::MidHolocene => "Holoceno médio (4000-8000 anos)",
            EstimatedPeriod::EarlyHolocene => "Holoceno inicial (8000-12000 anos)",
            EstimatedPeriod::Pleistocene => "Pleistoceno (>12000 anos)",
            EstimatedPeriod::Unknown => "Desconhecido",
        }
    }
}

/// Artifact classes found in association with the sample.
///
/// [`Artifact::None`] is exclusive: selecting it clears every other class,
/// and selecting any other class clears it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
    #[serde(rename = "Cerâmica")]
    Ceramics,
    #[serde(rename = "Lítico")]
    Lithics,
    #[serde(rename = "Carvão")]
    Charcoal,
    #[serde(rename = "Ossos")]
    Bones,
    #[serde(rename = "Restos vegetais")]
    PlantRemains,
    #[serde(rename = "Estruturas de combustão")]
    CombustionFeatures,
    #[serde(rename = "Nenhum")]
    None,
}

impl Artifact {
    pub const ALL: [Artifact; 7] = [
        Artifact::Ceramics,
        Artifact::Lithics,
        Artifact::Charcoal,
        Artifact::Bones,
        Artifact::PlantRemains,
        Artifact::CombustionFeatures,
        Artifact::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Ceramics => "Cerâmica",
            Artifact::Lithics => "Lítico",
            Artifact::Charcoal => "Carvão",
            Artifact::Bones => "Ossos",
            Artifact::PlantRemains => "Restos vegetais",
            Artifact::CombustionFeatures => "Estruturas de combustão",
            Artifact::None => "Nenhum",
        }
    }
}

/// Kind of human occupation the context indicates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupationType {
    #[serde(rename = "Doméstica")]
    Domestic,
    #[serde(rename = "Ritual")]
    Ritual,
    #[serde(rename = "Funerária")]
    Funerary,
    #[serde(rename = "Produtiva (agrícola/artesanal)")]
    Productive,
    #[serde(rename = "Natural (sem ocupação humana)")]
    Natural,
    #[serde(rename = "Indeterminado")]
    Undetermined,
}

impl OccupationType {
    pub const ALL: [OccupationType; 6] = [
        OccupationType::Domestic,
        OccupationType::Ritual,
        OccupationType::Funerary,
        OccupationType::Productive,
        OccupationType::Natural,
        OccupationType::Undetermined,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OccupationType::Domestic => "Doméstica",
            OccupationType::Ritual => "Ritual",
            OccupationType::Funerary => "Funerária",
            OccupationType::Productive => "Produtiva (agrícola/artesanal)",
            OccupationType::Natural => "Natural (sem ocupação humana)",
            OccupationType::Undetermined => "Indeterminado",
        }
    }
}

/// Whether the sample has a radiocarbon date.
///
/// Controls which chronology field is active: `Sim` activates
/// `dating_years`, `Nao` activates `estimated_period`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Dating {
    Sim,
    #[default]
    Nao,
}

/// Evidence of fire use in the context.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FireEvidence {
    Sim,
    Nao,
    #[default]
    Incerto,
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for EstimatedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for OccupationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// The yes/no enums display as their data values, which is also how the
// prompt builder interpolates them.
impl fmt::Display for Dating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dating::Sim => write!(f, "sim"),
            Dating::Nao => write!(f, "nao"),
        }
    }
}

impl fmt::Display for FireEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireEvidence::Sim => write!(f, "sim"),
            FireEvidence::Nao => write!(f, "nao"),
            FireEvidence::Incerto => write!(f, "incerto"),
        }
    }
}

// ── ContextRecord ──────────────────────────────────────────────────

/// One sample's archaeological context, as filled in by the researcher.
///
/// The default value is the blank form: optional catalogs unselected,
/// `has_dating` at `nao`, `fire_evidence` at `incerto`. Unknown JSON keys
/// are rejected outright so a mistyped field name cannot silently vanish.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ContextRecord {
    /// Collection depth in centimetres. Zero means not yet filled.
    pub depth: f64,
    pub context_type: Option<ContextType>,
    pub country: Option<Country>,
    /// Region or state, free text.
    pub region: String,
    pub site_type: Option<SiteType>,
    /// Selects the active chronology branch.
    pub has_dating: Dating,
    /// Radiocarbon date in years BP. Active only when `has_dating` is `Sim`.
    pub dating_years: Option<f64>,
    /// Coarse period bracket. Active only when `has_dating` is `Nao`.
    pub estimated_period: Option<EstimatedPeriod>,
    /// Associated artifact classes, set semantics.
    pub artifacts: Vec<Artifact>,
    pub occupation_type: Option<OccupationType>,
    pub fire_evidence: FireEvidence,
    /// Free-text contextual observations, at least 20 characters.
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_record() -> ContextRecord {
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
    fn default_record_is_the_blank_form() {
        let record = ContextRecord::default();
        assert_eq!(record.depth, 0.0);
        assert!(record.context_type.is_none());
        assert!(record.country.is_none());
        assert!(record.region.is_empty());
        assert!(record.site_type.is_none());
        assert_eq!(record.has_dating, Dating::Nao);
        assert!(record.dating_years.is_none());
        assert!(record.estimated_period.is_none());
        assert!(record.artifacts.is_empty());
        assert!(record.occupation_type.is_none());
        assert_eq!(record.fire_evidence, FireEvidence::Incerto);
        assert!(record.notes.is_empty());
    }

    #[test]
    fn catalogs_serialize_as_their_labels() {
        for v in ContextType::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.label());
        }
        for v in Country::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.label());
        }
        for v in SiteType::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.label());
        }
        for v in EstimatedPeriod::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.label());
        }
        for v in Artifact::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.label());
        }
        for v in OccupationType::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.label());
        }
    }

    #[test]
    fn yes_no_fields_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Dating::Sim).unwrap(), "sim");
        assert_eq!(serde_json::to_value(Dating::Nao).unwrap(), "nao");
        assert_eq!(serde_json::to_value(FireEvidence::Incerto).unwrap(), "incerto");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = make_test_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("Camada arqueológica (20-100cm)"));
        assert!(json.contains("Cerâmica"));

        let back: ContextRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let record: ContextRecord =
            serde_json::from_str(r#"{"depth": 50.0, "region": "Cerrado"}"#).unwrap();
        assert_eq!(record.depth, 50.0);
        assert_eq!(record.region, "Cerrado");
        assert_eq!(record.has_dating, Dating::Nao);
        assert_eq!(record.fire_evidence, FireEvidence::Incerto);
    }

    #[test]
    fn unknown_json_keys_are_rejected() {
        let err = serde_json::from_str::<ContextRecord>(r#"{"depht": 50.0}"#).unwrap_err();
        assert!(err.to_string().contains("depht"));
    }

    #[test]
    fn unknown_catalog_value_is_rejected() {
        let err =
            serde_json::from_str::<ContextRecord>(r#"{"country": "Atlantis"}"#).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }
}
