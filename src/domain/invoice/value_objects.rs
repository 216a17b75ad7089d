use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("All fields are required")]
  MissingRequiredFields,
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
  #[error("Invalid desired emission date: {0}")]
  InvalidEmissionDate(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
  PendingEmission,
  Emitted,
  /// Reserved. Nothing transitions into it yet.
  Cancelled,
}

impl InvoiceStatus {
  pub fn can_transition_to(&self, new_status: InvoiceStatus) -> bool {
    matches!(
      (self, new_status),
      (InvoiceStatus::PendingEmission, InvoiceStatus::Emitted)
    )
  }

  pub fn is_emittable(&self) -> bool {
    matches!(self, InvoiceStatus::PendingEmission)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::PendingEmission => "PENDING_EMISSION",
      InvoiceStatus::Emitted => "EMITTED",
      InvoiceStatus::Cancelled => "CANCELLED",
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "PENDING_EMISSION" => Ok(InvoiceStatus::PendingEmission),
      "EMITTED" => Ok(InvoiceStatus::Emitted),
      "CANCELLED" => Ok(InvoiceStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(s.to_string())),
    }
  }
}

/// Parses the desired emission date sent by clients.
///
/// Accepts RFC 3339 timestamps (`2024-01-15T00:00:00.000Z`) and bare calendar
/// dates (`2024-01-15`), the latter read as midnight UTC.
pub fn parse_emission_date(value: &str) -> Result<DateTime<Utc>, ValueObjectError> {
  let trimmed = value.trim();

  if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
    return Ok(timestamp.with_timezone(&Utc));
  }

  NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
    .ok_or_else(|| ValueObjectError::InvalidEmissionDate(value.to_string()))
}
