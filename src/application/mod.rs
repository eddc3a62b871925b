//! Application layer - orchestration between domain logic and ports.

pub mod advice;
pub mod dashboard;
pub mod model_output;
pub mod prompt;

pub use advice::{AdviceReport, AdviceSource, GenerateAdviceHandler};
pub use dashboard::{
    AnalysisFailure, AnalysisState, AutosaveOutcome, DashboardController, DashboardOptions,
    RawInputs, SubmitOutcome, ValidationError,
};
