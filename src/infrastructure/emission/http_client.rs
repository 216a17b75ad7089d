use async_trait::async_trait;
use reqwest::{
  Client,
  header::{AUTHORIZATION, CONTENT_TYPE},
};

use crate::domain::invoice::{EmissionError, EmissionProvider, EmissionRequest, EmissionResponse};

use super::EmissionConfig;

/// Emission provider reached over HTTP.
///
/// One POST per emission, no retries, transport-default timeouts. Every
/// failure is classified through [`EmissionError::from_transport_failure`].
pub struct HttpEmissionClient {
  client: Client,
  config: EmissionConfig,
}

impl HttpEmissionClient {
  pub fn new(config: EmissionConfig) -> Self {
    Self::with_client(Client::new(), config)
  }

  pub fn with_client(client: Client, config: EmissionConfig) -> Self {
    Self { client, config }
  }
}

/// Extracts the `message` field of a provider error body, if any.
fn provider_message(body: &str) -> Option<String> {
  serde_json::from_str::<serde_json::Value>(body)
    .ok()?
    .get("message")?
    .as_str()
    .map(str::to_string)
}

#[async_trait]
impl EmissionProvider for HttpEmissionClient {
  async fn emit(&self, request: EmissionRequest) -> Result<EmissionResponse, EmissionError> {
    self.config.validate()?;

    tracing::debug!(url = %self.config.url, cnpj = %request.cnpj, "Sending invoice to emission provider");

    let response = self
      .client
      .post(&self.config.url)
      .header(AUTHORIZATION, self.config.api_key.as_str())
      .header(CONTENT_TYPE, "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| {
        EmissionError::from_transport_failure(
          e.status().map(|s| s.as_u16()),
          None,
          Some(&e.to_string()),
        )
      })?;

    let status = response.status();

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let transport_message = format!("request failed with status code {}", status.as_u16());

      tracing::debug!(status = status.as_u16(), body = %body, "Emission provider rejected request");

      return Err(EmissionError::from_transport_failure(
        Some(status.as_u16()),
        provider_message(&body).as_deref(),
        Some(&transport_message),
      ));
    }

    response
      .json::<EmissionResponse>()
      .await
      .map_err(|e| EmissionError::from_transport_failure(None, None, Some(&e.to_string())))
  }
}
