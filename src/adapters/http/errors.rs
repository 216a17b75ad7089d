use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::invoice::{EmissionError, InvoiceError};

use super::dtos::ErrorResponse;

const DEFAULT_INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type that maps domain errors to HTTP responses
///
/// The carried message is sent to the client verbatim as `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
  /// Validation or eligibility failure (400 Bad Request)
  Validation(String),

  /// Unknown invoice (404 Not Found)
  NotFound(String),

  /// Emission provider failed on its side (502 Bad Gateway)
  BadGateway(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl ApiError {
  pub fn message(&self) -> &str {
    match self {
      ApiError::Validation(msg)
      | ApiError::NotFound(msg)
      | ApiError::BadGateway(msg)
      | ApiError::Internal(msg) => msg,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();

    if status.is_server_error() {
      tracing::error!(status = status.as_u16(), "Request failed: {}", self.message());
    }

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(ErrorResponse::new(self.message()))
  }
}

/// Maps an error message to an HTTP error using ordered substring rules.
///
/// First match wins:
/// - "not found" → 404
/// - "pending_emission", "pending emission", "validation", "authentication" → 400
/// - "internal server" → 502
/// - anything else → 500
///
/// Matching is case-insensitive. The message is kept as is, except that an
/// empty message on the 500 path becomes "Internal server error".
pub fn map_message_to_http(message: &str) -> ApiError {
  let lowered = message.to_lowercase();

  if lowered.contains("not found") {
    return ApiError::NotFound(message.to_string());
  }

  if ["pending_emission", "pending emission", "validation", "authentication"]
    .iter()
    .any(|needle| lowered.contains(needle))
  {
    return ApiError::Validation(message.to_string());
  }

  if lowered.contains("internal server") {
    return ApiError::BadGateway(message.to_string());
  }

  if message.is_empty() {
    ApiError::Internal(DEFAULT_INTERNAL_MESSAGE.to_string())
  } else {
    ApiError::Internal(message.to_string())
  }
}

/// Maps a lifecycle error to an HTTP error.
///
/// Typed kinds map directly; failures without a dedicated kind (generic
/// emission failures, database and repository errors) fall back to
/// [`map_message_to_http`].
pub fn map_error_to_http(error: &InvoiceError) -> ApiError {
  let message = error.to_string();

  match error {
    InvoiceError::Emission(emission) => match emission {
      EmissionError::InvalidConfiguration(_) => ApiError::Internal(message),
      EmissionError::ValidationFailed(_) => ApiError::Validation(message),
      EmissionError::AuthenticationFailed(_) => ApiError::Validation(message),
      EmissionError::ServerFailure(_) => ApiError::BadGateway(message),
      EmissionError::EmissionFailed(_) => map_message_to_http(&message),
    },
    InvoiceError::NotFound(_) => ApiError::NotFound(message),
    InvoiceError::NotPendingEmission { .. } => ApiError::Validation(message),
    InvoiceError::Validation(_) => ApiError::Validation(message),
    InvoiceError::Repository(_) | InvoiceError::Database(_) => map_message_to_http(&message),
  }
}

/// Convert InvoiceError to ApiError
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    map_error_to_http(&error)
  }
}
