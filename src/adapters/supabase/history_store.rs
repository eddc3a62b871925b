//! Supabase implementation of HistoryStore.
//!
//! Talks to the project's PostgREST interface with the public (anon) key.
//! The table keeps Portuguese snake_case column names; this adapter owns
//! the mapping to the crate's field names and backfills the marketplace
//! fee amount for rows written before that column existed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::domain::{CalculationRecord, NewCalculation};
use crate::ports::{HistoryStore, StoreError};

/// Supabase-backed calculation history.
pub struct SupabaseHistoryStore {
    client: Client,
    base_url: String,
    table: String,
    anon_key: Secret<String>,
}

impl SupabaseHistoryStore {
    /// Creates a store client for the given project endpoint and anon key.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
            table: "calculos".to_string(),
            anon_key: Secret::new(anon_key.into()),
        }
    }

    /// Builds the client from the application config section.
    ///
    /// The config is validated at startup, so a missing key here only
    /// means every request will fail with an auth error.
    pub fn from_app_config(config: &StoreConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: trim_trailing_slash(config.url.clone()),
            table: config.table.clone(),
            anon_key: Secret::new(config.anon_key().unwrap_or_default().to_string()),
        }
    }

    /// Overrides the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn anon_key(&self) -> &str {
        self.anon_key.expose_secret()
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Maps a response status onto the store error taxonomy.
fn status_to_error(status: StatusCode, body: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth(body),
        _ => StoreError::Unexpected(format!("status {}: {}", status, body)),
    }
}

fn send_error(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

#[async_trait]
impl HistoryStore for SupabaseHistoryStore {
    async fn append(&self, new: &NewCalculation) -> Result<CalculationRecord, StoreError> {
        let payload = [InsertRow::from(new)];

        let response = self
            .client
            .post(self.rows_url())
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, body));
        }

        let mut rows: Vec<CalculationRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Unexpected(format!("undecodable insert response: {}", e)))?;

        if rows.is_empty() {
            return Err(StoreError::Unexpected(
                "insert acknowledged without a row".to_string(),
            ));
        }
        Ok(rows.remove(0).into())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<CalculationRecord>, StoreError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.rows_url())
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, body));
        }

        let rows: Vec<CalculationRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Unexpected(format!("undecodable list response: {}", e)))?;

        Ok(rows.into_iter().map(CalculationRecord::from).collect())
    }
}

// ════════════════════════════════════════════════════════════════════════
// Wire rows
// ════════════════════════════════════════════════════════════════════════

/// Insert payload; id and created_at are assigned by the store.
#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    nome_prato: &'a str,
    preco_venda: f64,
    custo_ingredientes: f64,
    taxa_marketplace: f64,
    lucro_liquido: f64,
    margem_lucro: f64,
}

impl<'a> From<&'a NewCalculation> for InsertRow<'a> {
    fn from(new: &'a NewCalculation) -> Self {
        Self {
            nome_prato: &new.dish_name,
            preco_venda: new.sale_price,
            custo_ingredientes: new.ingredient_cost,
            taxa_marketplace: new.marketplace_fee_percent,
            lucro_liquido: new.net_profit,
            margem_lucro: new.profit_margin_percent,
        }
    }
}

/// A stored row as the table keeps it.
#[derive(Debug, Deserialize)]
struct CalculationRow {
    id: i64,
    nome_prato: String,
    preco_venda: f64,
    custo_ingredientes: f64,
    taxa_marketplace: f64,
    lucro_liquido: f64,
    margem_lucro: f64,
    /// Older rows predate this column.
    #[serde(default)]
    taxa_marketplace_valor: Option<f64>,
    created_at: DateTime<Utc>,
}

impl From<CalculationRow> for CalculationRecord {
    fn from(row: CalculationRow) -> Self {
        let marketplace_fee_amount = row
            .taxa_marketplace_valor
            .unwrap_or(row.preco_venda * row.taxa_marketplace / 100.0);

        Self {
            id: row.id,
            dish_name: row.nome_prato,
            sale_price: row.preco_venda,
            ingredient_cost: row.custo_ingredientes,
            marketplace_fee_percent: row.taxa_marketplace,
            marketplace_fee_amount,
            net_profit: row.lucro_liquido,
            profit_margin_percent: row.margem_lucro,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(taxa_marketplace_valor: Option<f64>) -> CalculationRow {
        CalculationRow {
            id: 7,
            nome_prato: "Pizza Margherita".to_string(),
            preco_venda: 50.0,
            custo_ingredientes: 20.0,
            taxa_marketplace: 10.0,
            lucro_liquido: 25.0,
            margem_lucro: 50.0,
            taxa_marketplace_valor,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_maps_columns_to_internal_names() {
        let record = CalculationRecord::from(row(Some(5.0)));

        assert_eq!(record.id, 7);
        assert_eq!(record.dish_name, "Pizza Margherita");
        assert_eq!(record.sale_price, 50.0);
        assert_eq!(record.ingredient_cost, 20.0);
        assert_eq!(record.marketplace_fee_percent, 10.0);
        assert_eq!(record.marketplace_fee_amount, 5.0);
        assert_eq!(record.net_profit, 25.0);
        assert_eq!(record.profit_margin_percent, 50.0);
    }

    #[test]
    fn missing_fee_amount_is_backfilled() {
        let record = CalculationRecord::from(row(None));
        assert_eq!(record.marketplace_fee_amount, 5.0);
    }

    #[test]
    fn row_deserializes_from_store_payload() {
        let json = r#"{
            "id": 3,
            "nome_prato": "Temaki",
            "preco_venda": 30.0,
            "custo_ingredientes": 20.0,
            "taxa_marketplace": 20.0,
            "lucro_liquido": 4.0,
            "margem_lucro": 13.33,
            "created_at": "2026-08-01T12:00:00Z"
        }"#;

        let row: CalculationRow = serde_json::from_str(json).unwrap();
        let record = CalculationRecord::from(row);
        assert_eq!(record.marketplace_fee_amount, 6.0);
    }

    #[test]
    fn insert_row_uses_store_column_names() {
        let new = NewCalculation {
            dish_name: "Temaki".to_string(),
            sale_price: 30.0,
            ingredient_cost: 20.0,
            marketplace_fee_percent: 20.0,
            net_profit: 4.0,
            profit_margin_percent: 13.33,
        };

        let json = serde_json::to_value(InsertRow::from(&new)).unwrap();
        assert_eq!(json["nome_prato"], "Temaki");
        assert_eq!(json["preco_venda"], 30.0);
        assert_eq!(json["custo_ingredientes"], 20.0);
        assert_eq!(json["taxa_marketplace"], 20.0);
        assert_eq!(json["lucro_liquido"], 4.0);
        assert_eq!(json["margem_lucro"], 13.33);
        // id and created_at are store-assigned, never sent
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn rows_url_joins_base_and_table() {
        let store = SupabaseHistoryStore::new("https://project.supabase.co/", "key")
            .with_table("calculos");
        assert_eq!(store.rows_url(), "https://project.supabase.co/rest/v1/calculos");
    }

    #[test]
    fn auth_statuses_map_to_auth_errors() {
        assert!(matches!(
            status_to_error(StatusCode::UNAUTHORIZED, "bad key".to_string()),
            StoreError::Auth(_)
        ));
        assert!(matches!(
            status_to_error(StatusCode::FORBIDDEN, "rls".to_string()),
            StoreError::Auth(_)
        ));
        assert!(matches!(
            status_to_error(StatusCode::NOT_FOUND, "missing table".to_string()),
            StoreError::Unexpected(_)
        ));
    }
}
