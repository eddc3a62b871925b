//! Deterministic rule-based recommendations.
//!
//! Used whenever the model's output cannot be trusted or parsed: the
//! operator always gets a full batch of advice, synthesized locally from
//! the dish numbers. Always exactly three entries, one per pillar, in the
//! stable pillar order.

use super::recommendation::{DishFinancials, ImpactLevel, Pillar, Recommendation};

/// Synthesizes the three-card batch from the dish financials.
pub fn rule_based_recommendations(financials: &DishFinancials) -> Vec<Recommendation> {
    vec![
        pricing_recommendation(financials),
        cost_recommendation(financials),
        marketing_recommendation(financials),
    ]
}

fn pricing_recommendation(f: &DishFinancials) -> Recommendation {
    let margin = f.profit_margin_percent;
    if margin < 20.0 {
        let suggested_increase = ((25.0 - margin) / 2.0).ceil();
        Recommendation {
            title: "Ajuste Estratégico de Preço Necessário".to_string(),
            detailed_description: format!(
                "A margem atual de {margin:.1}% está abaixo do recomendado para o mercado \
                 brasileiro (mínimo 20-25%). Considere aumentar o preço em {suggested_increase:.0}% \
                 para atingir uma margem saudável. Pesquise a concorrência no mesmo segmento e \
                 posicione o prato como premium se a qualidade justificar. Teste aumentos graduais \
                 de 3-5% e monitore a aceitação do cliente."
            ),
            impact: ImpactLevel::High,
            pillar: Pillar::PricingStrategy,
        }
    } else {
        Recommendation {
            title: "Preço Competitivo e Saudável".to_string(),
            detailed_description: format!(
                "Sua margem de {margin:.1}% está dentro da faixa ideal para o mercado brasileiro. \
                 Mantenha monitoramento constante da concorrência para garantir competitividade. \
                 Considere criar variações do prato com diferentes faixas de preço para capturar \
                 diferentes segmentos de clientes. Ajustes sazonais podem ser aplicados em \
                 períodos de alta demanda."
            ),
            impact: ImpactLevel::Medium,
            pillar: Pillar::PricingStrategy,
        }
    }
}

fn cost_recommendation(f: &DishFinancials) -> Recommendation {
    let cost_ratio = if f.sale_price > 0.0 {
        f.ingredient_cost / f.sale_price * 100.0
    } else {
        0.0
    };

    if cost_ratio > 40.0 {
        Recommendation {
            title: "Otimização de Insumos Urgente".to_string(),
            detailed_description: format!(
                "O custo dos ingredientes representa {cost_ratio:.1}% do preço de venda, acima do \
                 ideal (máximo 35%). Negocie com fornecedores para obter descontos por volume ou \
                 considere substituir ingredientes caros por alternativas de qualidade similar. \
                 Para \"{}\", analise se há ingredientes premium que podem ser substituídos sem \
                 comprometer a percepção de valor. Implemente controle rigoroso de desperdício e \
                 padronize as porções.",
                f.dish_name
            ),
            impact: ImpactLevel::High,
            pillar: Pillar::CostOptimization,
        }
    } else {
        Recommendation {
            title: "Custos de Insumos Controlados".to_string(),
            detailed_description: format!(
                "O custo dos ingredientes está em {cost_ratio:.1}% do preço de venda, dentro do \
                 esperado. Mantenha negociações ativas com fornecedores para garantir melhores \
                 condições. Considere compras sazonais de ingredientes perecíveis quando estiverem \
                 em alta disponibilidade. Implemente um sistema de controle de estoque para \
                 reduzir perdas e otimizar o uso de ingredientes."
            ),
            impact: ImpactLevel::Medium,
            pillar: Pillar::CostOptimization,
        }
    }
}

fn marketing_recommendation(f: &DishFinancials) -> Recommendation {
    Recommendation {
        title: "Estratégia de Posicionamento no Cardápio".to_string(),
        detailed_description: format!(
            "Posicione \"{}\" como prato destaque no início do cardápio digital para aumentar a \
             visibilidade. Crie combos que incluam este prato com itens complementares (bebidas, \
             sobremesas) para aumentar o ticket médio. Use descrições apetitosas e fotos \
             profissionais que destaquem os ingredientes premium. Considere criar uma versão \
             \"premium\" ou \"especial\" com pequenos upgrades para segmentar o público e \
             aumentar a margem.",
            f.dish_name
        ),
        impact: ImpactLevel::Medium,
        pillar: Pillar::MarketingHighlight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn financials(
        sale_price: f64,
        ingredient_cost: f64,
        fee_percent: f64,
        net_profit: f64,
        margin: f64,
    ) -> DishFinancials {
        DishFinancials {
            dish_name: "Pizza Margherita".to_string(),
            sale_price,
            ingredient_cost,
            marketplace_fee_percent: fee_percent,
            net_profit,
            profit_margin_percent: margin,
        }
    }

    #[test]
    fn thin_margin_yields_high_impact_pricing_card() {
        // salePrice=30, cost=20, fee=20% -> profit 4, margin ~13.33%
        let f = financials(30.0, 20.0, 20.0, 4.0, 13.333333333333334);
        let batch = rule_based_recommendations(&f);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].pillar, Pillar::PricingStrategy);
        assert_eq!(batch[0].impact, ImpactLevel::High);
        // ceil((25 - 13.33) / 2) = 6
        assert!(batch[0].detailed_description.contains("aumentar o preço em 6%"));
    }

    #[test]
    fn healthy_margin_yields_medium_impact_pricing_card() {
        let f = financials(50.0, 20.0, 10.0, 25.0, 50.0);
        let batch = rule_based_recommendations(&f);

        assert_eq!(batch[0].impact, ImpactLevel::Medium);
        assert!(batch[0].detailed_description.contains("50.0%"));
    }

    #[test]
    fn excessive_cost_ratio_yields_high_impact_cost_card() {
        // cost ratio 20/30 = 66.7% > 40%
        let f = financials(30.0, 20.0, 20.0, 4.0, 13.3);
        let batch = rule_based_recommendations(&f);

        assert_eq!(batch[1].pillar, Pillar::CostOptimization);
        assert_eq!(batch[1].impact, ImpactLevel::High);
        assert!(batch[1].detailed_description.contains("Pizza Margherita"));
    }

    #[test]
    fn controlled_cost_ratio_yields_medium_impact_cost_card() {
        // cost ratio 20/50 = 40%, not above the threshold
        let f = financials(50.0, 20.0, 10.0, 25.0, 50.0);
        let batch = rule_based_recommendations(&f);

        assert_eq!(batch[1].impact, ImpactLevel::Medium);
    }

    #[test]
    fn marketing_card_references_dish_name() {
        let f = financials(50.0, 20.0, 10.0, 25.0, 50.0);
        let batch = rule_based_recommendations(&f);

        assert_eq!(batch[2].pillar, Pillar::MarketingHighlight);
        assert_eq!(batch[2].impact, ImpactLevel::Medium);
        assert!(batch[2].detailed_description.contains("Pizza Margherita"));
    }

    #[test]
    fn zero_price_does_not_divide_by_zero() {
        let f = financials(0.0, 10.0, 20.0, -10.0, 0.0);
        let batch = rule_based_recommendations(&f);

        assert_eq!(batch.len(), 3);
        // ratio is defined as 0 when the price is 0
        assert_eq!(batch[1].impact, ImpactLevel::Medium);
    }

    proptest! {
        #[test]
        fn batch_always_covers_each_pillar_once(
            sale_price in 0.0f64..10_000.0,
            ingredient_cost in 0.0f64..10_000.0,
            fee_percent in 0.0f64..=100.0,
            net_profit in -10_000.0f64..10_000.0,
            margin in -1_000.0f64..1_000.0,
        ) {
            let f = financials(sale_price, ingredient_cost, fee_percent, net_profit, margin);
            let batch = rule_based_recommendations(&f);

            prop_assert_eq!(batch.len(), 3);
            prop_assert_eq!(batch[0].pillar, Pillar::PricingStrategy);
            prop_assert_eq!(batch[1].pillar, Pillar::CostOptimization);
            prop_assert_eq!(batch[2].pillar, Pillar::MarketingHighlight);
        }
    }
}
