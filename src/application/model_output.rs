//! Best-effort extraction of structured JSON from model output.
//!
//! Generation services frequently wrap JSON in a fenced code block or
//! surround it with prose, even when asked for a JSON MIME type. The
//! extractor strips a leading/trailing fence (with or without a language
//! tag) and, failing that, takes the span from the first `{` to the last
//! `}` before the caller gives up on the payload.

use crate::domain::{ImpactLevel, Pillar, Recommendation};

/// Why a model response could not be turned into a recommendation batch.
///
/// These failures never reach the user: the caller recovers with the
/// rule-based generator.
#[derive(Debug, thiserror::Error)]
pub enum ModelOutputError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected exactly 3 recommendations, got {0}")]
    WrongCount(usize),
}

/// Narrows raw model text down to its most plausible JSON payload.
pub fn extract_json_payload(content: &str) -> &str {
    let trimmed = content.trim();
    let unfenced = strip_code_fence(trimmed);

    // A bare object span beats surrounding prose.
    match brace_span(unfenced) {
        Some(span) => span,
        None => unfenced,
    }
}

/// Removes a surrounding markdown code fence, tolerating a language tag.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the language tag (e.g. "json") up to the first line break.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.strip_suffix("```").map(str::trim).unwrap_or(body).trim()
}

/// The span from the first `{` to the last `}`, if any.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses and normalizes a model response into exactly three
/// recommendations.
///
/// Normalization is deliberate enforcement, not trust in the model:
/// missing titles and descriptions get placeholder copy, an unrecognized
/// impact label becomes `Medium`, and the pillar is assigned positionally
/// (0 -> pricing, 1 -> cost, 2 -> marketing) regardless of what the model
/// claimed, so every batch covers each pillar exactly once.
pub fn parse_recommendation_batch(content: &str) -> Result<Vec<Recommendation>, ModelOutputError> {
    let payload = extract_json_payload(content);
    let parsed: serde_json::Value = serde_json::from_str(payload)?;

    let entries = parsed
        .get("recomendacoes")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    if entries.len() != 3 {
        return Err(ModelOutputError::WrongCount(entries.len()));
    }

    let batch = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Recommendation {
            title: entry
                .get("titulo")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Recomendação {}", index + 1)),
            detailed_description: entry
                .get("descricao_detalhada")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| "Análise detalhada não disponível.".to_string()),
            impact: entry
                .get("nivel_de_impacto")
                .and_then(|v| v.as_str())
                .and_then(ImpactLevel::from_label)
                .unwrap_or(ImpactLevel::Medium),
            pillar: Pillar::for_position(index),
        })
        .collect();

    Ok(batch)
}
