//! History store configuration
//!
//! The store is a hosted relational database reached over its REST
//! interface, authenticated with the project's public (anon) key.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// History store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Project endpoint URL (e.g. https://xyz.supabase.co)
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key
    pub anon_key: Option<Secret<String>>,

    /// Table holding calculation history
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Exposes the anon key (for making requests)
    pub fn anon_key(&self) -> Option<&str> {
        self.anon_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// Validate store configuration
    ///
    /// Both connection parameters are required: a missing endpoint or key
    /// must fail at startup, not degrade into per-request errors.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE_URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidStoreUrl);
        }
        match self.anon_key() {
            None | Some("") => Err(ValidationError::MissingRequired("STORE_ANON_KEY")),
            Some(_) => Ok(()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: None,
            table: default_table(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_table() -> String {
    "calculos".to_string()
}

fn default_timeout() -> u64 {
    15
}
