//! Turning raw model text into an [`AnalysisResult`].
//!
//! The model is told to answer with bare JSON, but replies wrapped in
//! markdown fences still occur. After unfencing, the payload is checked
//! against the schema generated from [`AnalysisResult`] so a malformed
//! reply fails with a per-field problem list instead of a serde error
//! deep inside the tree.

use crate::analysis::result::AnalysisResult;
use crate::error::AnalysisError;
use crate::json_schema_for;

/// Remove a surrounding markdown code fence, if any.
///
/// Handles both ```` ```json ```` and bare ```` ``` ```` openings. Text
/// without a matching closing fence is returned as-is (trimmed) rather
/// than blindly truncated.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let opened = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"));
    match opened.and_then(|rest| rest.strip_suffix("```")) {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Parse and validate one model reply.
pub fn parse_analysis_result(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let payload = strip_code_fences(text);
    let value: serde_json::Value = serde_json::from_str(payload)?;
    check_against_schema(&value)?;
    Ok(serde_json::from_value(value)?)
}

fn check_against_schema(value: &serde_json::Value) -> Result<(), AnalysisError> {
    let schema = json_schema_for::<AnalysisResult>();
    // If the schema itself does not compile, skip validation rather than
    // failing the reply.
    let Ok(validator) = jsonschema::validator_for(&schema) else {
        return Ok(());
    };
    let problems: Vec<String> = validator
        .iter_errors(value)
        .map(|error| format!("  - {}: {error}", error.instance_path()))
        .collect();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::Schema {
            problems: problems.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::ConfidenceLevel;

    const VALID_REPLY: &str = r#"{
      "morphotype": "Bilobado",
      "cell_type": "short cell",
      "family": "Poaceae",
      "subfamily": "Panicoideae",
      "species": {
        "possible_matches": ["Zea mays", "Setaria parviflora"],
        "confidence_level": "Média",
        "reasoning": "Lóbulos curtos com istmo estreito."
      },
      "plant_part": "folha",
      "morphological_description": {
        "shape": "Bilobada simétrica",
        "dimensions": "18-22 µm",
        "surface_ornamentation": "Lisa",
        "diagnostic_features": "Istmo estreito, lóbulos convexos",
        "preservation_state": "Bom"
      },
      "historical_period": {
        "geological_cultural_period": "Holoceno médio",
        "estimated_age_range": "4000-6000 anos AP",
        "confidence_percentage": 75,
        "dating_basis": "estratigrafia"
      },
      "archaeological_context_interpretation": {
        "plant_use": "alimentação",
        "cultural_significance": "Cultivo incipiente",
        "fire_impact_analysis": "Sem alteração térmica",
        "association_with_artifacts": "Compatível com cerâmica utilitária",
        "subsistence_strategy": "Horticultura",
        "environmental_reconstruction": "Vegetação aberta"
      },
      "sample_site_details": {
        "sample_type": "Sedimento",
        "sample_site": "Camada II",
        "research_group": "Não informado",
        "id_sample": "FIT-0042"
      },
      "additional_observations": "Amostra bem preservada.",
      "confidence_analysis": {
        "morphotype": 90,
        "family": 85,
        "subfamily": 70,
        "species": 60,
        "period": 75,
        "archaeological_interpretation": 80
      },
      "recommendations": "Comparar com coleção de referência regional."
    }"#;

    #[test]
    fn parses_a_bare_json_reply() {
        let result = parse_analysis_result(VALID_REPLY).unwrap();
        assert_eq!(result.morphotype, "Bilobado");
        assert_eq!(result.species.confidence_level, ConfidenceLevel::Media);
        assert_eq!(result.confidence_analysis.species, 60.0);
    }

    #[test]
    fn parses_a_json_fenced_reply() {
        let fenced = format!("```json\n{VALID_REPLY}\n```");
        let result = parse_analysis_result(&fenced).unwrap();
        assert_eq!(result.family, "Poaceae");
    }

    #[test]
    fn parses_a_plain_fenced_reply() {
        let fenced = format!("```\n{VALID_REPLY}\n```");
        assert!(parse_analysis_result(&fenced).is_ok());
    }

    #[test]
    fn rejects_non_json_text() {
        let err = parse_analysis_result("A amostra parece ser de Poaceae.").unwrap_err();
        assert!(matches!(err, AnalysisError::Json(_)));
    }

    #[test]
    fn missing_field_is_a_schema_problem() {
        let mut value: serde_json::Value = serde_json::from_str(VALID_REPLY).unwrap();
        value.as_object_mut().unwrap().remove("family");
        let err = parse_analysis_result(&value.to_string()).unwrap_err();
        match err {
            AnalysisError::Schema { problems } => assert!(problems.contains("family")),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_reported_with_its_path() {
        let mut value: serde_json::Value = serde_json::from_str(VALID_REPLY).unwrap();
        value["historical_period"]["confidence_percentage"] = "alta".into();
        let err = parse_analysis_result(&value.to_string()).unwrap_err();
        match err {
            AnalysisError::Schema { problems } => {
                assert!(problems.contains("/historical_period/confidence_percentage"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn unfenced_text_passes_through_strip() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn unterminated_fence_is_left_alone() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "```json\n{\"a\": 1}");
    }
}
