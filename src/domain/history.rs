//! Persisted calculation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profitability::{compute_breakdown, DishInputs, ProfitBreakdown};

/// A calculation about to be persisted.
///
/// Carries the raw inputs plus the derived figures; the store assigns the
/// identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    pub dish_name: String,
    pub sale_price: f64,
    pub ingredient_cost: f64,
    pub marketplace_fee_percent: f64,
    pub net_profit: f64,
    pub profit_margin_percent: f64,
}

impl NewCalculation {
    /// Builds a record from inputs, deriving the financial figures.
    ///
    /// The dish name is trimmed before persisting.
    pub fn from_inputs(inputs: &DishInputs) -> Self {
        let ProfitBreakdown {
            net_profit,
            profit_margin_percent,
            ..
        } = compute_breakdown(inputs);

        Self {
            dish_name: inputs.dish_name.trim().to_string(),
            sale_price: inputs.sale_price,
            ingredient_cost: inputs.ingredient_cost,
            marketplace_fee_percent: inputs.marketplace_fee_percent,
            net_profit,
            profit_margin_percent,
        }
    }
}

/// A stored calculation, immutable once written.
///
/// Write-once, read-many; ordered by `created_at` descending when listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Store-assigned identifier.
    pub id: i64,
    pub dish_name: String,
    pub sale_price: f64,
    pub ingredient_cost: f64,
    pub marketplace_fee_percent: f64,
    /// Backfilled from price and fee percent when the store lacks it.
    pub marketplace_fee_amount: f64,
    pub net_profit: f64,
    pub profit_margin_percent: f64,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_calculation_derives_figures() {
        let inputs = DishInputs::new("  Pizza Margherita  ", 50.0, 20.0, 10.0);
        let new = NewCalculation::from_inputs(&inputs);

        assert_eq!(new.dish_name, "Pizza Margherita");
        assert_eq!(new.net_profit, 25.0);
        assert_eq!(new.profit_margin_percent, 50.0);
    }

    #[test]
    fn new_calculation_preserves_losses() {
        let inputs = DishInputs::new("Feijoada", 20.0, 25.0, 15.0);
        let new = NewCalculation::from_inputs(&inputs);

        assert_eq!(new.net_profit, -8.0);
        assert_eq!(new.profit_margin_percent, -40.0);
    }
}
