//! HTTP DTOs for the recommendation endpoint.
//!
//! The wire contract uses the published Portuguese camelCase field names.

use serde::{Deserialize, Serialize};

use crate::domain::{DishFinancials, Recommendation};

/// Request body for POST /api/recommendations.
///
/// Only the net profit and margin are required; the remaining fields
/// enrich the prompt and default to zero / unnamed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub lucro_liquido: Option<f64>,
    pub margem_lucro: Option<f64>,
    #[serde(default)]
    pub nome_prato: Option<String>,
    #[serde(default)]
    pub preco_venda: Option<f64>,
    #[serde(default)]
    pub custo_ingredientes: Option<f64>,
    #[serde(default)]
    pub taxa_marketplace: Option<f64>,
}

impl RecommendationsRequest {
    /// Validates the required parameters and builds the financial
    /// snapshot the advice handler consumes.
    pub fn into_financials(self) -> Result<DishFinancials, MissingParameters> {
        let (Some(net_profit), Some(profit_margin_percent)) =
            (self.lucro_liquido, self.margem_lucro)
        else {
            return Err(MissingParameters);
        };

        Ok(DishFinancials {
            dish_name: self.nome_prato.unwrap_or_default(),
            sale_price: self.preco_venda.unwrap_or(0.0),
            ingredient_cost: self.custo_ingredientes.unwrap_or(0.0),
            marketplace_fee_percent: self.taxa_marketplace.unwrap_or(0.0),
            net_profit,
            profit_margin_percent,
        })
    }
}

/// Marker for a request missing its required parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingParameters;

/// Success body: always exactly three recommendations.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

/// Error body for every non-success status.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
