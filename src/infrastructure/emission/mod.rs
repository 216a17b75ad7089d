pub mod http_client;

use serde::Deserialize;
use std::fmt;

use crate::domain::invoice::EmissionError;

pub use http_client::HttpEmissionClient;

/// Emission provider settings, built once at start-up and handed to the client.
#[derive(Clone, Default, Deserialize)]
pub struct EmissionConfig {
  /// Endpoint that receives the emission POST.
  #[serde(default)]
  pub url: String,
  /// Sent verbatim as the `Authorization` header.
  #[serde(default)]
  pub api_key: String,
}

impl EmissionConfig {
  pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      api_key: api_key.into(),
    }
  }

  pub fn validate(&self) -> Result<(), EmissionError> {
    if self.url.trim().is_empty() {
      return Err(EmissionError::InvalidConfiguration(
        "Emission API URL is not configured. Set FISCAL_EMITTER_EMISSION__URL".to_string(),
      ));
    }

    if self.api_key.trim().is_empty() {
      return Err(EmissionError::InvalidConfiguration(
        "Emission API key is not configured. Set FISCAL_EMITTER_EMISSION__API_KEY".to_string(),
      ));
    }

    Ok(())
  }
}

impl fmt::Debug for EmissionConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EmissionConfig")
      .field("url", &self.url)
      .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_config() {
    assert!(EmissionConfig::new("http://localhost/emit", "key").validate().is_ok());
  }

  #[test]
  fn test_missing_url() {
    let error = EmissionConfig::new("", "key").validate().unwrap_err();
    assert!(matches!(error, EmissionError::InvalidConfiguration(_)));
    assert!(error.to_string().contains("URL"));
  }

  #[test]
  fn test_missing_api_key() {
    let error = EmissionConfig::new("http://localhost/emit", "  ")
      .validate()
      .unwrap_err();
    assert!(matches!(error, EmissionError::InvalidConfiguration(_)));
    assert!(error.to_string().contains("key"));
  }

  #[test]
  fn test_debug_redacts_api_key() {
    let debug = format!("{:?}", EmissionConfig::new("http://localhost/emit", "secret"));
    assert!(!debug.contains("secret"));
  }
}
