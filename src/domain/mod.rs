//! Domain types and pure logic.
//!
//! Everything in this module is side-effect free: the profitability
//! calculator, the persisted history record, the recommendation model and
//! the rule-based fallback generator.

pub mod fallback;
pub mod history;
pub mod profitability;
pub mod recommendation;

pub use fallback::rule_based_recommendations;
pub use history::{CalculationRecord, NewCalculation};
pub use profitability::{compute_breakdown, DishInputs, ProfitBreakdown};
pub use recommendation::{DishFinancials, ImpactLevel, Pillar, Recommendation};
