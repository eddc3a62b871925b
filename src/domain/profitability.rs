//! Per-dish profitability calculator.
//!
//! The calculator is a pure, total function: any finite numeric input
//! produces a finite result, with the division by a zero sale price
//! guarded explicitly. Negative results (loss-making dishes) are
//! preserved, never clamped.

use serde::{Deserialize, Serialize};

/// Raw financial inputs for a single dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishInputs {
    /// Dish name as entered by the operator.
    pub dish_name: String,
    /// Sale price charged on the marketplace.
    pub sale_price: f64,
    /// Cost of ingredients (CMV).
    pub ingredient_cost: f64,
    /// Marketplace commission, percent of the sale price (0-100).
    pub marketplace_fee_percent: f64,
}

impl DishInputs {
    pub fn new(
        dish_name: impl Into<String>,
        sale_price: f64,
        ingredient_cost: f64,
        marketplace_fee_percent: f64,
    ) -> Self {
        Self {
            dish_name: dish_name.into(),
            sale_price,
            ingredient_cost,
            marketplace_fee_percent,
        }
    }
}

/// Derived profitability figures for a dish.
///
/// Never stored independently of the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    /// Amount retained by the marketplace, in currency.
    pub marketplace_fee_amount: f64,
    /// Sale price minus ingredient cost minus marketplace fee.
    pub net_profit: f64,
    /// Net profit as a percentage of the sale price (0 when price is 0).
    pub profit_margin_percent: f64,
}

/// Computes the fee amount, net profit and margin for the given inputs.
///
/// Re-evaluated on every input change by the dashboard controller, not
/// only on submit.
pub fn compute_breakdown(inputs: &DishInputs) -> ProfitBreakdown {
    let marketplace_fee_amount = inputs.sale_price * inputs.marketplace_fee_percent / 100.0;
    let net_profit = inputs.sale_price - inputs.ingredient_cost - marketplace_fee_amount;
    let profit_margin_percent = if inputs.sale_price > 0.0 {
        net_profit / inputs.sale_price * 100.0
    } else {
        0.0
    };

    ProfitBreakdown {
        marketplace_fee_amount,
        net_profit,
        profit_margin_percent,
    }
}
