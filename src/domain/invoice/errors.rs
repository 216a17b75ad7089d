use super::value_objects::{InvoiceStatus, ValueObjectError};
use thiserror::Error;

const UNKNOWN_ERROR: &str = "unknown error";

/// Why an emission attempt against the provider failed.
///
/// The rendered message always starts with a fixed label per kind followed by
/// the upstream detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmissionError {
  #[error("{0}")]
  InvalidConfiguration(String),

  #[error("Validation error: {0}")]
  ValidationFailed(String),

  #[error("Authentication error: {0}")]
  AuthenticationFailed(String),

  #[error("Emission provider internal server error: {0}")]
  ServerFailure(String),

  #[error("Failed to emit invoice: {0}")]
  EmissionFailed(String),
}

impl EmissionError {
  /// Classifies a failed outbound call.
  ///
  /// `status` is the HTTP status when the provider answered at all,
  /// `provider_message` the `message` field of its error body and
  /// `transport_message` the generic error text of the transport. The
  /// provider message is only used for the 400, 401 and 500 kinds.
  pub fn from_transport_failure(
    status: Option<u16>,
    provider_message: Option<&str>,
    transport_message: Option<&str>,
  ) -> Self {
    let transport_message = transport_message.filter(|m| !m.is_empty());
    let message = || {
      provider_message
        .filter(|m| !m.is_empty())
        .or(transport_message)
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
    };

    match status {
      Some(400) => EmissionError::ValidationFailed(message()),
      Some(401) => EmissionError::AuthenticationFailed(message()),
      Some(500) => EmissionError::ServerFailure(message()),
      // Provider body text is ignored for unclassified failures
      _ => EmissionError::EmissionFailed(transport_message.unwrap_or(UNKNOWN_ERROR).to_string()),
    }
  }
}

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  NotFound(String),

  #[error("Only invoices with status PENDING_EMISSION can be emitted (current status: {current})")]
  NotPendingEmission { current: InvoiceStatus },

  #[error(transparent)]
  Emission(#[from] EmissionError),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
