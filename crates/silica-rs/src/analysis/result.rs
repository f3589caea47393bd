//! The typed analysis report returned by the model.
//!
//! Field names match the JSON contract in the prompt exactly, so these
//! types double as the schema the raw response is validated against
//! (via [`json_schema_for`](crate::json_schema_for)). The form engine
//! treats the whole tree as opaque output; only the report renderer
//! reads into it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Qualitative confidence for the species match.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceLevel {
    Alta,
    #[serde(rename = "Média")]
    Media,
    Baixa,
}

impl ConfidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alta => "Alta",
            Self::Media => "Média",
            Self::Baixa => "Baixa",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate species with the model's own confidence and reasoning.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct SpeciesAssessment {
    pub possible_matches: Vec<String>,
    pub confidence_level: ConfidenceLevel,
    pub reasoning: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct MorphologicalDescription {
    pub shape: String,
    pub dimensions: String,
    pub surface_ornamentation: String,
    pub diagnostic_features: String,
    pub preservation_state: String,
}

/// Chronological placement derived from the sample context.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct HistoricalPeriod {
    pub geological_cultural_period: String,
    pub estimated_age_range: String,
    pub confidence_percentage: f64,
    pub dating_basis: String,
}

/// Cultural reading of the find against its archaeological context.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ContextInterpretation {
    pub plant_use: String,
    pub cultural_significance: String,
    pub fire_impact_analysis: String,
    pub association_with_artifacts: String,
    pub subsistence_strategy: String,
    pub environmental_reconstruction: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct SampleSiteDetails {
    pub sample_type: String,
    pub sample_site: String,
    pub research_group: String,
    pub id_sample: String,
}

/// Per-criterion confidence scores, 0 to 100.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ConfidenceAnalysis {
    pub morphotype: f64,
    pub family: f64,
    pub subfamily: f64,
    pub species: f64,
    pub period: f64,
    pub archaeological_interpretation: f64,
}

impl ConfidenceAnalysis {
    /// The scores in report order, with display labels.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("Morphotype", self.morphotype),
            ("Family", self.family),
            ("Subfamily", self.subfamily),
            ("Species", self.species),
            ("Period", self.period),
            ("Archaeological interpretation", self.archaeological_interpretation),
        ]
    }
}

/// The complete structured report for one micrograph.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub morphotype: String,
    pub cell_type: String,
    pub family: String,
    pub subfamily: String,
    pub species: SpeciesAssessment,
    pub plant_part: String,
    pub morphological_description: MorphologicalDescription,
    pub historical_period: HistoricalPeriod,
    pub archaeological_context_interpretation: ContextInterpretation,
    pub sample_site_details: SampleSiteDetails,
    pub additional_observations: String,
    pub confidence_analysis: ConfidenceAnalysis,
    pub recommendations: String,
}
