//! Prompt assembly.
//!
//! The prompt is the contract with the model: a sample-context header
//! interpolated from the [`ContextRecord`], then a fixed task block with
//! the JSON template the response must follow. Deterministic for a given
//! record, which keeps it testable.

use std::fmt::Display;

use crate::form::{Artifact, ContextRecord, Dating, EstimatedPeriod};

const TASK_BLOCK: &str = r#"

TAREFA DE ANÁLISE:
Analise o fitólito na imagem fornecida e produza um relatório científico estruturado em JSON com os seguintes campos:

{
  "morphotype": "Classificação morfológica detalhada",
  "cell_type": "Tipo de célula específico (short cell, long cell, bulliform, hair cell, etc.)",
  "family": "Família botânica",
  "subfamily": "Subfamília (se identificável, caso contrário 'Indeterminado')",
  "species": {
    "possible_matches": ["espécie 1", "espécie 2", "espécie 3"],
    "confidence_level": "Alta/Média/Baixa",
    "reasoning": "Justificativa para as correspondências"
  },
  "plant_part": "Parte da planta de origem (folha, caule, inflorescência, raiz)",
  "morphological_description": {
    "shape": "Descrição detalhada da forma",
    "dimensions": "Dimensões estimadas em micrometros",
    "surface_ornamentation": "Ornamentação da superfície",
    "diagnostic_features": "Características diagnósticas principais",
    "preservation_state": "Estado de preservação"
  },
  "historical_period": {
    "geological_cultural_period": "Período geológico/cultural baseado no contexto",
    "estimated_age_range": "Intervalo de anos estimado",
    "confidence_percentage": 85,
    "dating_basis": "Base para a estimativa (estratigrafia, datação C14, artefatos associados)"
  },
  "archaeological_context_interpretation": {
    "plant_use": "Uso provável da planta (alimentação, construção, combustível, ritual, medicinal, etc.)",
    "cultural_significance": "Significância cultural no contexto",
    "fire_impact_analysis": "Análise de impacto do fogo (se aplicável)",
    "association_with_artifacts": "Interpretação das associações com artefatos",
    "subsistence_strategy": "Estratégia de subsistência indicada",
    "environmental_reconstruction": "Reconstrução ambiental sugerida"
  },
  "sample_site_details": {
    "sample_type": "Tipo de amostra",
    "sample_site": "Local da amostra",
    "research_group": "Grupo de pesquisa (se fornecido)",
    "id_sample": "ID da amostra (gerar código único)"
  },
  "additional_observations": "Qualquer informação técnica ou contexto adicional relevante",
  "confidence_analysis": {
    "morphotype": 90,
    "family": 85,
    "subfamily": 70,
    "species": 60,
    "period": 75,
    "archaeological_interpretation": 80
  },
  "recommendations": "Recomendações para análises complementares ou validações necessárias"
}

DIRETRIZES CRÍTICAS:
- Use o contexto arqueológico COMPLETO fornecido para fazer interpretações culturais
- A datação deve considerar PRIMARIAMENTE: estratigrafia > datação C14 > artefatos associados > morfologia
- Seja específico sobre o uso cultural da planta no contexto arqueológico fornecido
- Considere a geografia para espécies prováveis da região
- Seja honesto sobre incertezas e indique nível de confiança
- Use terminologia científica apropriada
- Interprete as associações com artefatos e tipo de ocupação
- Analise evidências de processamento/uso do fogo se presente

Retorne APENAS um objeto JSON válido, sem markdown, sem ```json, sem texto adicional."#;

/// Render the full analysis prompt for one record.
///
/// The chronology line depends on the dating switch: measured years give
/// "<years> anos AP", otherwise the estimated period is named (falling
/// back to "Desconhecido" for an unvalidated record with neither).
pub fn build_analysis_prompt(record: &ContextRecord) -> String {
    let dating_info = match record.has_dating {
        Dating::Sim => format!("{} anos AP", record.dating_years.unwrap_or_default()),
        Dating::Nao => format!(
            "Período estimado: {}",
            record.estimated_period.unwrap_or(EstimatedPeriod::Unknown)
        ),
    };
    let artifacts = record
        .artifacts
        .iter()
        .map(Artifact::label)
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        r"Você é um especialista sênior em análise de fitólitos com décadas de experiência em arqueobotânica, paleoecologia e análise de contextos arqueológicos.

CONTEXTO COMPLETO DA AMOSTRA:

ESTRATIGRAFIA:
- Profundidade: {depth} cm
- Tipo de contexto: {context_type}
- Tipo de sítio: {site_type}

LOCALIZAÇÃO:
- País: {country}
- Região: {region}

CRONOLOGIA:
- Datação: {dating_info}

CONTEXTO ARQUEOLÓGICO COMPLETO:
- Artefatos associados: {artifacts}
- Tipo de ocupação: {occupation_type}
- Evidências de uso do fogo: {fire_evidence}
- Observações contextuais detalhadas: {notes}",
        depth = record.depth,
        context_type = opt_label(record.context_type),
        site_type = opt_label(record.site_type),
        country = opt_label(record.country),
        region = record.region,
        occupation_type = opt_label(record.occupation_type),
        fire_evidence = record.fire_evidence,
        notes = record.notes,
    );
    prompt.push_str(TASK_BLOCK);
    prompt
}

fn opt_label<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
