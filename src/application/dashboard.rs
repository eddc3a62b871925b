//! DashboardController - view-side orchestration.
//!
//! Owns the state a dashboard UI shell renders: the raw input fields, the
//! live profitability breakdown, the cached history list, the analysis
//! state machine and the auto-save bookkeeping. The shell forwards input
//! edits and button presses here and re-renders from the accessors; no
//! rendering concern lives in this crate.
//!
//! Auto-save contract: every input change re-arms a debounce deadline
//! (last-write-wins, nothing is queued). The embedding event loop sleeps
//! until [`DashboardController::autosave_deadline`] and then calls
//! [`DashboardController::flush_autosave`], which persists at most once
//! per input signature. The signature covers all four raw input strings
//! and is updated only after a confirmed write.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::error;

use crate::domain::{
    compute_breakdown, CalculationRecord, DishFinancials, DishInputs, NewCalculation,
    ProfitBreakdown, Recommendation,
};
use crate::ports::{HistoryStore, StoreError};

use super::advice::{AdviceSource, GenerateAdviceHandler};

/// User-input problems, handled locally; no I/O is issued for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos!")]
    MissingFields,

    #[error("Por favor, insira valores válidos!")]
    InvalidValues,

    #[error("Preencha os dados necessários para gerar a análise")]
    InsufficientAnalysisData,
}

/// Outcome of a manual submit, surfaced synchronously to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    Rejected(ValidationError),
    /// The store rejected the write; previous state is retained.
    Failed(String),
    /// Another save is still in flight.
    Busy,
}

/// Outcome of a debounce-triggered auto-save attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AutosaveOutcome {
    Saved,
    /// Nothing to do: invalid inputs, unchanged signature, or a save in
    /// flight.
    Skipped,
    /// The write failed; logged, retried on the next input change.
    Failed(String),
}

/// Recommendation-request lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Requesting,
    Success(Vec<Recommendation>),
    FallbackUsed(Vec<Recommendation>),
    Error(AnalysisFailure),
}

/// A visible, retryable analysis failure (transport-level only).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisFailure {
    /// User-facing copy; rate limits get distinct wording.
    pub message: String,
    pub rate_limited: bool,
}

const RATE_LIMIT_COPY: &str = "Limite de consultas atingido. Tente novamente em alguns segundos.";
const GENERIC_FAILURE_COPY: &str = "Não foi possível carregar recomendações";

/// Raw input field values, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawInputs {
    pub dish_name: String,
    pub sale_price: String,
    pub ingredient_cost: String,
    pub marketplace_fee_percent: String,
}

impl RawInputs {
    pub fn new(
        dish_name: impl Into<String>,
        sale_price: impl Into<String>,
        ingredient_cost: impl Into<String>,
        marketplace_fee_percent: impl Into<String>,
    ) -> Self {
        Self {
            dish_name: dish_name.into(),
            sale_price: sale_price.into(),
            ingredient_cost: ingredient_cost.into(),
            marketplace_fee_percent: marketplace_fee_percent.into(),
        }
    }

    /// Exact-match duplicate-suppression key over the four raw fields.
    fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.dish_name, self.sale_price, self.ingredient_cost, self.marketplace_fee_percent
        )
    }

    fn any_blank(&self) -> bool {
        self.dish_name.trim().is_empty()
            || self.sale_price.trim().is_empty()
            || self.ingredient_cost.trim().is_empty()
            || self.marketplace_fee_percent.trim().is_empty()
    }

    /// Lenient numeric view for live recomputation: unparseable fields
    /// count as zero, mirroring an empty form rendering zeroed figures.
    fn to_dish_inputs(&self) -> DishInputs {
        DishInputs {
            dish_name: self.dish_name.clone(),
            sale_price: self.sale_price.trim().parse().unwrap_or(0.0),
            ingredient_cost: self.ingredient_cost.trim().parse().unwrap_or(0.0),
            marketplace_fee_percent: self.marketplace_fee_percent.trim().parse().unwrap_or(0.0),
        }
    }
}

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Maximum history entries kept for display.
    pub history_limit: usize,
    /// Quiet period after the last input change before auto-saving.
    pub autosave_debounce: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            history_limit: 10,
            autosave_debounce: Duration::from_secs(1),
        }
    }
}

/// The dashboard view controller.
pub struct DashboardController {
    store: Arc<dyn HistoryStore>,
    advice: GenerateAdviceHandler,
    options: DashboardOptions,

    inputs: RawInputs,
    breakdown: ProfitBreakdown,
    history: Vec<CalculationRecord>,
    analysis: AnalysisState,

    /// Signature of the last tuple confirmed written, manual or auto.
    last_saved_signature: Option<String>,
    save_in_flight: bool,
    autosave_deadline: Option<Instant>,
}

impl DashboardController {
    pub fn new(store: Arc<dyn HistoryStore>, advice: GenerateAdviceHandler) -> Self {
        Self::with_options(store, advice, DashboardOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn HistoryStore>,
        advice: GenerateAdviceHandler,
        options: DashboardOptions,
    ) -> Self {
        Self {
            store,
            advice,
            options,
            inputs: RawInputs::default(),
            breakdown: ProfitBreakdown::default(),
            history: Vec::new(),
            analysis: AnalysisState::Idle,
            last_saved_signature: None,
            save_in_flight: false,
            autosave_deadline: None,
        }
    }

    // ── Accessors the UI renders from ────────────────────────────────────

    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    /// Live figures, recomputed on every input change.
    pub fn breakdown(&self) -> ProfitBreakdown {
        self.breakdown
    }

    pub fn history(&self) -> &[CalculationRecord] {
        &self.history
    }

    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    /// When the pending auto-save should fire, if one is armed.
    pub fn autosave_deadline(&self) -> Option<Instant> {
        self.autosave_deadline
    }

    // ── Input handling ───────────────────────────────────────────────────

    /// Records an edit: recomputes the live breakdown and re-arms the
    /// auto-save debounce. Setting identical values changes nothing.
    pub fn set_inputs(&mut self, inputs: RawInputs) {
        if inputs == self.inputs {
            return;
        }
        self.inputs = inputs;
        self.breakdown = compute_breakdown(&self.inputs.to_dish_inputs());
        self.autosave_deadline = Some(Instant::now() + self.options.autosave_debounce);
    }

    fn validate_for_save(&self) -> Result<NewCalculation, ValidationError> {
        if self.inputs.any_blank() {
            return Err(ValidationError::MissingFields);
        }

        let parse = |field: &str| field.trim().parse::<f64>();
        let (Ok(sale_price), Ok(ingredient_cost), Ok(fee_percent)) = (
            parse(&self.inputs.sale_price),
            parse(&self.inputs.ingredient_cost),
            parse(&self.inputs.marketplace_fee_percent),
        ) else {
            return Err(ValidationError::InvalidValues);
        };

        if sale_price <= 0.0 || ingredient_cost < 0.0 || !(0.0..=100.0).contains(&fee_percent) {
            return Err(ValidationError::InvalidValues);
        }

        Ok(NewCalculation::from_inputs(&DishInputs {
            dish_name: self.inputs.dish_name.clone(),
            sale_price,
            ingredient_cost,
            marketplace_fee_percent: fee_percent,
        }))
    }

    // ── Persistence ──────────────────────────────────────────────────────

    /// Manual save. Validates every field, persists, refreshes the history
    /// list and reports the outcome synchronously.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.save_in_flight {
            return SubmitOutcome::Busy;
        }

        let new = match self.validate_for_save() {
            Ok(new) => new,
            Err(reason) => return SubmitOutcome::Rejected(reason),
        };

        match self.persist(new).await {
            Ok(()) => SubmitOutcome::Saved,
            Err(message) => SubmitOutcome::Failed(message),
        }
    }

    /// Debounce-triggered save. Skips silently when the inputs are not
    /// persistable, the signature is unchanged since the last confirmed
    /// write, or a save is already in flight.
    pub async fn flush_autosave(&mut self) -> AutosaveOutcome {
        if self.autosave_deadline.take().is_none() {
            return AutosaveOutcome::Skipped;
        }
        if self.save_in_flight {
            return AutosaveOutcome::Skipped;
        }

        let Ok(new) = self.validate_for_save() else {
            return AutosaveOutcome::Skipped;
        };

        if self.last_saved_signature.as_deref() == Some(self.inputs.signature().as_str()) {
            return AutosaveOutcome::Skipped;
        }

        match self.persist(new).await {
            Ok(()) => AutosaveOutcome::Saved,
            Err(message) => AutosaveOutcome::Failed(message),
        }
    }

    /// Inserts the record, then updates the signature and re-reads the
    /// history. The signature moves only after the store acknowledged the
    /// write, and the re-read is issued only after that acknowledgement
    /// (read-after-write).
    async fn persist(&mut self, new: NewCalculation) -> Result<(), String> {
        let signature = self.inputs.signature();

        self.save_in_flight = true;
        let result = self.store.append(&new).await;
        self.save_in_flight = false;

        match result {
            Ok(_) => {
                self.last_saved_signature = Some(signature);
                // Best effort: a failed refresh keeps the previous list.
                let _ = self.refresh_history().await;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to persist calculation");
                Err(err.to_string())
            }
        }
    }

    /// Re-reads the recent history. On failure the previous in-memory list
    /// is retained and the error is reported to the caller.
    pub async fn refresh_history(&mut self) -> Result<(), StoreError> {
        match self.store.list_recent(self.options.history_limit).await {
            Ok(records) => {
                self.history = records;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to refresh history, keeping previous list");
                Err(err)
            }
        }
    }

    // ── Recommendations ──────────────────────────────────────────────────

    /// Starts an analysis for the current inputs. Explicit user action
    /// only, never automatic.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InsufficientAnalysisData`] (state
    /// unchanged) when the sale price is not positive or the figures are
    /// all zero.
    pub async fn request_analysis(&mut self) -> Result<(), ValidationError> {
        if self.analysis == AnalysisState::Requesting {
            return Ok(());
        }

        let dish = self.inputs.to_dish_inputs();
        if dish.sale_price <= 0.0
            || (self.breakdown.net_profit == 0.0 && self.breakdown.profit_margin_percent == 0.0)
        {
            return Err(ValidationError::InsufficientAnalysisData);
        }

        let financials = DishFinancials {
            dish_name: dish.dish_name.clone(),
            sale_price: dish.sale_price,
            ingredient_cost: dish.ingredient_cost,
            marketplace_fee_percent: dish.marketplace_fee_percent,
            net_profit: self.breakdown.net_profit,
            profit_margin_percent: self.breakdown.profit_margin_percent,
        };

        self.analysis = AnalysisState::Requesting;
        self.analysis = match self.advice.handle(&financials).await {
            Ok(report) => match report.source {
                AdviceSource::Model => AnalysisState::Success(report.recommendations),
                AdviceSource::RuleBased => AnalysisState::FallbackUsed(report.recommendations),
            },
            Err(err) => {
                error!(error = %err, "recommendation request failed");
                AnalysisState::Error(AnalysisFailure {
                    message: if err.is_rate_limit() {
                        RATE_LIMIT_COPY.to_string()
                    } else {
                        GENERIC_FAILURE_COPY.to_string()
                    },
                    rate_limited: err.is_rate_limit(),
                })
            }
        };

        Ok(())
    }

    /// Discards the current recommendation batch and returns to `Idle`.
    pub fn reset_analysis(&mut self) {
        self.analysis = AnalysisState::Idle;
    }
}
