//! Plain-text report rendering.
//!
//! Mirrors the section structure of the exported PDF report: header with
//! sample id and date, taxonomic identification, morphological
//! description, dating, candidate species, the full archaeological
//! interpretation, sample data, observations, and per-criterion
//! confidence scores.

use chrono::{Local, NaiveDate};

use crate::analysis::AnalysisResult;

const FOOTER: &str = "Análise automatizada por IA - Requer validação por especialista em fitólitos.";

/// Render the report for terminal output, dated today.
pub fn render_report(result: &AnalysisResult) -> String {
    render_report_on(result, Local::now().date_naive())
}

fn render_report_on(result: &AnalysisResult, date: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("RELATÓRIO DE ANÁLISE DE FITÓLITO\n");
    out.push_str(&format!(
        "ID da Amostra: {} | Data: {}\n",
        result.sample_site_details.id_sample,
        date.format("%d/%m/%Y")
    ));
    rule(&mut out);

    section(&mut out, "Identificação Taxonômica");
    line(&mut out, "Morfotipo", &result.morphotype);
    line(&mut out, "Família", &result.family);
    line(&mut out, "Subfamília", &result.subfamily);
    line(&mut out, "Tipo de célula", &result.cell_type);
    line(&mut out, "Parte da planta", &result.plant_part);

    section(&mut out, "Descrição Morfológica");
    let desc = &result.morphological_description;
    line(&mut out, "Forma", &desc.shape);
    line(&mut out, "Dimensões", &desc.dimensions);
    line(&mut out, "Ornamentação", &desc.surface_ornamentation);
    line(&mut out, "Diagnóstico", &desc.diagnostic_features);
    line(&mut out, "Preservação", &desc.preservation_state);

    section(&mut out, "Datação e Período Histórico");
    let period = &result.historical_period;
    line(&mut out, "Período", &period.geological_cultural_period);
    line(&mut out, "Intervalo Estimado", &period.estimated_age_range);
    line(&mut out, "Base da Datação", &period.dating_basis);
    line(
        &mut out,
        "Confiança na datação",
        &format!("{}%", period.confidence_percentage),
    );

    section(&mut out, "Possíveis Espécies");
    line(
        &mut out,
        "Correspondências",
        &result.species.possible_matches.join(", "),
    );
    line(
        &mut out,
        "Nível de confiança",
        result.species.confidence_level.label(),
    );
    line(&mut out, "Justificativa", &result.species.reasoning);

    section(&mut out, "Contexto Arqueológico Completo");
    let interp = &result.archaeological_context_interpretation;
    line(&mut out, "Uso da Planta", &interp.plant_use);
    line(&mut out, "Significância Cultural", &interp.cultural_significance);
    line(&mut out, "Impacto do Fogo", &interp.fire_impact_analysis);
    line(
        &mut out,
        "Associação com Artefatos",
        &interp.association_with_artifacts,
    );
    line(
        &mut out,
        "Estratégia de Subsistência",
        &interp.subsistence_strategy,
    );
    line(
        &mut out,
        "Reconstrução Ambiental",
        &interp.environmental_reconstruction,
    );

    section(&mut out, "Dados da Amostra");
    line(&mut out, "Tipo de amostra", &result.sample_site_details.sample_type);
    line(&mut out, "Local do sítio", &result.sample_site_details.sample_site);

    section(&mut out, "Observações e Recomendações");
    line(
        &mut out,
        "Observações Adicionais",
        &result.additional_observations,
    );
    line(&mut out, "Recomendações", &result.recommendations);

    section(&mut out, "Análise de Confiança");
    for (label, value) in result.confidence_analysis.entries() {
        line(&mut out, label, &format!("{value}%"));
    }

    out.push('\n');
    out.push_str(FOOTER);
    out.push('\n');
    out
}

fn rule(out: &mut String) {
    for _ in 0..60 {
        out.push('─');
    }
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    for _ in 0..title.chars().count() {
        out.push('─');
    }
    out.push('\n');
}

fn line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        ConfidenceAnalysis, ConfidenceLevel, ContextInterpretation, HistoricalPeriod,
        MorphologicalDescription, SampleSiteDetails, SpeciesAssessment,
    };

    fn make_result() -> AnalysisResult {
        AnalysisResult {
            morphotype: "Bilobado".into(),
            cell_type: "short cell".into(),
            family: "Poaceae".into(),
            subfamily: "Panicoideae".into(),
            species: SpeciesAssessment {
                possible_matches: vec!["Zea mays".into(), "Setaria parviflora".into()],
                confidence_level: ConfidenceLevel::Media,
                reasoning: "Lóbulos curtos com istmo estreito.".into(),
            },
            plant_part: "folha".into(),
            morphological_description: MorphologicalDescription {
                shape: "Bilobada simétrica".into(),
                dimensions: "18-22 µm".into(),
                surface_ornamentation: "Lisa".into(),
                diagnostic_features: "Istmo estreito".into(),
                preservation_state: "Bom".into(),
            },
            historical_period: HistoricalPeriod {
                geological_cultural_period: "Holoceno médio".into(),
                estimated_age_range: "4000-6000 anos AP".into(),
                confidence_percentage: 75.0,
                dating_basis: "estratigrafia".into(),
            },
            archaeological_context_interpretation: ContextInterpretation {
                plant_use: "alimentação".into(),
                cultural_significance: "Cultivo incipiente".into(),
                fire_impact_analysis: "Sem alteração térmica".into(),
                association_with_artifacts: "Cerâmica utilitária".into(),
                subsistence_strategy: "Horticultura".into(),
                environmental_reconstruction: "Vegetação aberta".into(),
            },
            sample_site_details: SampleSiteDetails {
                sample_type: "Sedimento".into(),
                sample_site: "Camada II".into(),
                research_group: "Não informado".into(),
                id_sample: "FIT-0042".into(),
            },
            additional_observations: "Amostra bem preservada.".into(),
            confidence_analysis: ConfidenceAnalysis {
                morphotype: 90.0,
                family: 85.0,
                subfamily: 70.0,
                species: 60.0,
                period: 75.0,
                archaeological_interpretation: 80.0,
            },
            recommendations: "Comparar com coleção de referência.".into(),
        }
    }

    fn render_fixed() -> String {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        render_report_on(&make_result(), date)
    }

    #[test]
    fn header_names_the_sample_and_the_date() {
        let report = render_fixed();
        assert!(report.starts_with("RELATÓRIO DE ANÁLISE DE FITÓLITO\n"));
        assert!(report.contains("ID da Amostra: FIT-0042 | Data: 05/03/2024"));
    }

    #[test]
    fn sections_appear_in_report_order() {
        let report = render_fixed();
        let titles = [
            "Identificação Taxonômica",
            "Descrição Morfológica",
            "Datação e Período Histórico",
            "Possíveis Espécies",
            "Contexto Arqueológico Completo",
            "Dados da Amostra",
            "Observações e Recomendações",
            "Análise de Confiança",
        ];
        let positions: Vec<usize> = titles
            .iter()
            .map(|title| {
                report
                    .find(title)
                    .unwrap_or_else(|| panic!("section {title} missing"))
            })
            .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "sections out of order: {positions:?}"
        );
    }

    #[test]
    fn fields_carry_their_labels() {
        let report = render_fixed();
        assert!(report.contains("Morfotipo: Bilobado"));
        assert!(report.contains("Família: Poaceae"));
        assert!(report.contains("Forma: Bilobada simétrica"));
        assert!(report.contains("Intervalo Estimado: 4000-6000 anos AP"));
        assert!(report.contains("Confiança na datação: 75%"));
        assert!(report.contains("Correspondências: Zea mays, Setaria parviflora"));
        assert!(report.contains("Nível de confiança: Média"));
        assert!(report.contains("Uso da Planta: alimentação"));
        assert!(report.contains("Local do sítio: Camada II"));
    }

    #[test]
    fn confidence_scores_render_as_percentages() {
        let report = render_fixed();
        assert!(report.contains("Morphotype: 90%"));
        assert!(report.contains("Archaeological interpretation: 80%"));
    }

    #[test]
    fn footer_closes_the_report() {
        let report = render_fixed();
        assert!(report.ends_with(&format!("{FOOTER}\n")));
    }
}
