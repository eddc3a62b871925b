//! GenerateAdviceHandler - the recommendation retrieval-and-fallback flow.
//!
//! Sends the consultant prompt to the text-generation port, parses the
//! response into a normalized batch, and recovers with the rule-based
//! generator when the output cannot be trusted. Transport failures are the
//! only errors that escape: availability of *some* advice is prioritized
//! over transparency about a parse failure.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{rule_based_recommendations, DishFinancials, Recommendation};
use crate::ports::{GenerationError, TextGenerator};

use super::model_output::parse_recommendation_batch;
use super::prompt::consultant_prompt;

/// Where a recommendation batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceSource {
    /// Parsed and normalized from the model's response.
    Model,
    /// Synthesized locally after an unusable model response.
    RuleBased,
}

/// A recommendation batch plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceReport {
    pub recommendations: Vec<Recommendation>,
    pub source: AdviceSource,
}

/// Handler for generating a dish's recommendation batch.
pub struct GenerateAdviceHandler {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateAdviceHandler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Requests advice for the given financial snapshot.
    ///
    /// # Errors
    ///
    /// Only transport-level failures ([`GenerationError`]) are returned;
    /// unusable model output is absorbed by the rule-based fallback.
    pub async fn handle(
        &self,
        financials: &DishFinancials,
    ) -> Result<AdviceReport, GenerationError> {
        let prompt = consultant_prompt(financials);
        let content = self.generator.generate(&prompt).await?;

        match parse_recommendation_batch(&content) {
            Ok(recommendations) => Ok(AdviceReport {
                recommendations,
                source: AdviceSource::Model,
            }),
            Err(reason) => {
                warn!(%reason, "model output unusable, falling back to rule-based advice");
                Ok(AdviceReport {
                    recommendations: rule_based_recommendations(financials),
                    source: AdviceSource::RuleBased,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::domain::{ImpactLevel, Pillar};

    fn financials() -> DishFinancials {
        DishFinancials {
            dish_name: "Temaki".to_string(),
            sale_price: 30.0,
            ingredient_cost: 20.0,
            marketplace_fee_percent: 20.0,
            net_profit: 4.0,
            profit_margin_percent: 13.333333333333334,
        }
    }

    fn model_payload() -> String {
        r#"```json
{
  "recomendacoes": [
    {"titulo": "Markup agressivo", "descricao_detalhada": "a. b. c.", "nivel_de_impacto": "Alto", "pilar": "Estratégia de Preço"},
    {"titulo": "Troque o salmão", "descricao_detalhada": "a. b. c.", "nivel_de_impacto": "Médio", "pilar": "Otimização de Custos"},
    {"titulo": "Combo delivery", "descricao_detalhada": "a. b. c.", "nivel_de_impacto": "Baixo", "pilar": "Marketing e Destaque"}
  ]
}
```"#
        .to_string()
    }

    #[tokio::test]
    async fn well_formed_model_output_is_used() {
        let generator = Arc::new(MockTextGenerator::new().with_response(model_payload()));
        let handler = GenerateAdviceHandler::new(generator.clone());

        let report = handler.handle(&financials()).await.unwrap();

        assert_eq!(report.source, AdviceSource::Model);
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.recommendations[0].title, "Markup agressivo");

        // The prompt carried the dish data.
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Temaki"));
    }

    #[tokio::test]
    async fn non_json_output_falls_back_to_rules() {
        let generator =
            Arc::new(MockTextGenerator::new().with_response("Desculpe, não consegui ajudar."));
        let handler = GenerateAdviceHandler::new(generator);

        let report = handler.handle(&financials()).await.unwrap();

        assert_eq!(report.source, AdviceSource::RuleBased);
        assert_eq!(report.recommendations.len(), 3);
        // margin < 20 -> the pricing card is High impact
        assert_eq!(report.recommendations[0].pillar, Pillar::PricingStrategy);
        assert_eq!(report.recommendations[0].impact, ImpactLevel::High);
    }

    #[tokio::test]
    async fn wrong_count_falls_back_to_rules() {
        let generator = Arc::new(
            MockTextGenerator::new()
                .with_response(r#"{"recomendacoes": [{"titulo": "só uma"}]}"#),
        );
        let handler = GenerateAdviceHandler::new(generator);

        let report = handler.handle(&financials()).await.unwrap();
        assert_eq!(report.source, AdviceSource::RuleBased);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let generator = Arc::new(MockTextGenerator::new().with_missing_credentials());
        let handler = GenerateAdviceHandler::new(generator);

        let result = handler.handle(&financials()).await;
        assert!(matches!(result, Err(GenerationError::MissingCredentials)));
    }

    #[tokio::test]
    async fn rate_limit_propagates_distinctly() {
        let generator = Arc::new(MockTextGenerator::new().with_rate_limit(30));
        let handler = GenerateAdviceHandler::new(generator);

        let result = handler.handle(&financials()).await;
        match result {
            Err(err) => assert!(err.is_rate_limit()),
            Ok(_) => panic!("expected a rate-limit error"),
        }
    }
}
