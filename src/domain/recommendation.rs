//! Strategy recommendation model.
//!
//! Every recommendation batch holds exactly three entries, one per pillar,
//! in a stable pillar order. Wire names and labels stay in Portuguese to
//! match the published API contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed recommendation categories. Each batch covers all three, once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    #[serde(rename = "Estratégia de Preço")]
    PricingStrategy,
    #[serde(rename = "Otimização de Custos")]
    CostOptimization,
    #[serde(rename = "Marketing e Destaque")]
    MarketingHighlight,
}

impl Pillar {
    /// Stable batch order: pricing, cost, marketing.
    pub const ORDER: [Pillar; 3] = [
        Pillar::PricingStrategy,
        Pillar::CostOptimization,
        Pillar::MarketingHighlight,
    ];

    /// Pillar assigned to a batch position (0, 1, 2).
    pub fn for_position(index: usize) -> Self {
        Self::ORDER[index % 3]
    }

    /// Portuguese label used on the wire and in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Pillar::PricingStrategy => "Estratégia de Preço",
            Pillar::CostOptimization => "Otimização de Custos",
            Pillar::MarketingHighlight => "Marketing e Destaque",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expected business impact of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Médio")]
    Medium,
    #[serde(rename = "Baixo")]
    Low,
}

impl ImpactLevel {
    /// Parses a wire label, returning `None` for anything unrecognized.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Alto" => Some(ImpactLevel::High),
            "Médio" => Some(ImpactLevel::Medium),
            "Baixo" => Some(ImpactLevel::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::High => "Alto",
            ImpactLevel::Medium => "Médio",
            ImpactLevel::Low => "Baixo",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single strategy recommendation card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short headline (advisory limit: 60 characters).
    #[serde(rename = "titulo")]
    pub title: String,
    /// Detailed, actionable description.
    #[serde(rename = "descricao_detalhada")]
    pub detailed_description: String,
    #[serde(rename = "nivel_de_impacto")]
    pub impact: ImpactLevel,
    #[serde(rename = "pilar")]
    pub pillar: Pillar,
}

/// Financial snapshot of a dish, the payload an advice request is built
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct DishFinancials {
    pub dish_name: String,
    pub sale_price: f64,
    pub ingredient_cost: f64,
    pub marketplace_fee_percent: f64,
    pub net_profit: f64,
    pub profit_margin_percent: f64,
}
