//! Generative-AI adapters.

mod gemini_provider;
mod mock_generator;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_generator::MockTextGenerator;
