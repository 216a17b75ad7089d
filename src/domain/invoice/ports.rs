use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::Invoice;
use super::errors::{EmissionError, InvoiceError};
use super::value_objects::InvoiceStatus;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
  /// All invoices, newest first.
  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError>;
  /// Persists `invoice` only if the stored row still has `expected_status`.
  ///
  /// Returns `None` when the guard did not match, meaning another writer
  /// changed the status in between.
  async fn update_if_status(
    &self,
    invoice: Invoice,
    expected_status: InvoiceStatus,
  ) -> Result<Option<Invoice>, InvoiceError>;
}

/// Body sent to the emission provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRequest {
  pub cnpj: String,
  #[serde(rename = "municipio")]
  pub municipality: String,
  #[serde(rename = "estado")]
  pub state: String,
  #[serde(rename = "valor", with = "rust_decimal::serde::float")]
  pub amount: Decimal,
  /// ISO-8601, millisecond precision, `Z` suffix.
  #[serde(rename = "dataDesejadaEmissao")]
  pub desired_emission_date: String,
  #[serde(rename = "descricao")]
  pub description: String,
}

impl From<&Invoice> for EmissionRequest {
  fn from(invoice: &Invoice) -> Self {
    Self {
      cnpj: invoice.cnpj.clone(),
      municipality: invoice.municipality.clone(),
      state: invoice.state.clone(),
      amount: invoice.amount,
      desired_emission_date: invoice
        .desired_emission_date
        .to_rfc3339_opts(SecondsFormat::Millis, true),
      description: invoice.description.clone(),
    }
  }
}

/// Successful answer of the emission provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResponse {
  #[serde(rename = "numeroNF")]
  pub invoice_number: String,
  #[serde(rename = "dataEmissao")]
  pub emitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait EmissionProvider: Send + Sync {
  async fn emit(&self, request: EmissionRequest) -> Result<EmissionResponse, EmissionError>;
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rust_decimal_macros::dec;

  #[test]
  fn test_emission_request_wire_format() {
    let invoice = Invoice::new(
      "12345678000190".to_string(),
      "São Paulo".to_string(),
      "SP".to_string(),
      dec!(1000.50),
      Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
      "consulting service".to_string(),
    );

    let json = serde_json::to_value(EmissionRequest::from(&invoice)).unwrap();

    assert_eq!(
      json,
      serde_json::json!({
        "cnpj": "12345678000190",
        "municipio": "São Paulo",
        "estado": "SP",
        "valor": 1000.5,
        "dataDesejadaEmissao": "2024-01-15T00:00:00.000Z",
        "descricao": "consulting service"
      })
    );
  }

  #[test]
  fn test_emission_response_parses_iso_timestamp() {
    let response: EmissionResponse = serde_json::from_str(
      r#"{"numeroNF": "NF-12345", "dataEmissao": "2024-01-15T10:00:00.000Z"}"#,
    )
    .unwrap();

    assert_eq!(response.invoice_number, "NF-12345");
    assert_eq!(
      response.emitted_at,
      Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    );
  }
}
