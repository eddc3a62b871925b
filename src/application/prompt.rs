//! Prompt template for the menu-engineering consultant persona.

use crate::domain::DishFinancials;

/// Builds the consultant prompt for a dish's financial snapshot.
///
/// The template demands exactly 3 JSON recommendation objects, one per
/// pillar, each with at least 3 sentences of description. The sentence
/// requirement is a contract with the model only; structurally the caller
/// enforces nothing beyond count and enum validity.
pub fn consultant_prompt(f: &DishFinancials) -> String {
    let dish_name = display_name(&f.dish_name, "Não informado");
    let marketing_name = display_name(&f.dish_name, "este prato");

    format!(
        r#"Você é um Consultor Sênior de Engenharia de Cardápio. Não dê respostas óbvias. Analise o lucro_liquido e o nome do prato para sugerir estratégias de Markup, redução de desperdício em insumos específicos e como transformar esse prato em um "Best Seller" no delivery.

Dados do prato:
- Nome: {dish_name}
- Preço de Venda: R$ {sale_price:.2}
- Custo dos Ingredientes: R$ {ingredient_cost:.2}
- Taxa do Marketplace: {fee_percent}%
- Lucro Líquido: R$ {net_profit:.2}
- Margem de Lucro: {margin:.2}%

Você DEVE retornar EXATAMENTE 3 recomendações estratégicas e não óbvias, uma para cada pilar abaixo:

1. ESTRATÉGIA DE PREÇO (Markup): Analise estratégias específicas de Markup baseadas no lucro_liquido atual. Considere como otimizar o preço para maximizar a lucratividade sem perder competitividade no delivery.

2. OTIMIZAÇÃO DE CUSTOS (Redução de Desperdício): Com base no nome do prato "{dish_name}", sugira reduções específicas de desperdício em insumos concretos. Identifique ingredientes específicos que podem ser otimizados ou substituídos para reduzir custos.

3. MARKETING E DESTAQUE (Best Seller): Sugira estratégias específicas para transformar "{marketing_name}" em um "Best Seller" no delivery. Pense em posicionamento, embalagem, descrição, fotografia e estratégias de vendas específicas para este prato.

IMPORTANTE: Retorne APENAS um JSON válido, sem texto adicional, no seguinte formato:
{{
  "recomendacoes": [
    {{
      "titulo": "Título da recomendação (máximo 60 caracteres)",
      "descricao_detalhada": "Descrição técnica detalhada com mínimo de 3 frases. Seja específico, técnico e acionável. Inclua valores quando possível.",
      "nivel_de_impacto": "Alto" ou "Médio" ou "Baixo",
      "pilar": "Estratégia de Preço" ou "Otimização de Custos" ou "Marketing e Destaque"
    }},
    {{
      "titulo": "...",
      "descricao_detalhada": "...",
      "nivel_de_impacto": "...",
      "pilar": "..."
    }},
    {{
      "titulo": "...",
      "descricao_detalhada": "...",
      "nivel_de_impacto": "...",
      "pilar": "..."
    }}
  ]
}}

Certifique-se de que cada descricao_detalhada tenha pelo menos 3 frases técnicas e específicas."#,
        sale_price = f.sale_price,
        ingredient_cost = f.ingredient_cost,
        fee_percent = f.marketplace_fee_percent,
        net_profit = f.net_profit,
        margin = f.profit_margin_percent,
    )
}

fn display_name<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}
