use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::invoice::{
  CreateInvoiceCommand, CreateInvoiceUseCase, EmitInvoiceCommand, EmitInvoiceUseCase,
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
  validate_creation_request,
};

/// Reads a creation body regardless of content type.
///
/// An absent or blank body is an empty request, so it reaches the presence
/// check like `{}` would.
fn parse_creation_body(body: &[u8]) -> Result<CreateInvoiceCommand, ApiError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(CreateInvoiceCommand::default());
  }

  serde_json::from_slice(body).map_err(|e| {
    tracing::debug!("Rejected invoice body: {}", e);
    ApiError::Validation(format!("Invalid request body: {}", e))
  })
}

/// Handler for registering an invoice
///
/// POST /api/invoices
/// Body: CreateInvoiceCommand (JSON)
/// Response: InvoiceDto (JSON) with status 201
pub async fn create_invoice_handler(
  body: web::Bytes,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = parse_creation_body(&body)?;

  // Presence check happens before anything touches the domain
  if let Some(message) = validate_creation_request(&command) {
    return Err(ApiError::Validation(message.to_string()));
  }

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(invoice))
}

/// Handler for listing invoices, newest first
///
/// GET /api/invoices
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoices = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(invoices))
}

/// Handler for a single invoice
///
/// GET /api/invoices/{id}
/// Response: InvoiceDto (JSON), or 404 for unknown and malformed ids
pub async fn get_invoice_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetInvoiceDetailsCommand {
    invoice_id: path.into_inner(),
  };

  match use_case.execute(command).await? {
    Some(invoice) => Ok(HttpResponse::Ok().json(invoice)),
    None => Err(ApiError::NotFound("Invoice not found".to_string())),
  }
}

/// Handler for emitting a pending invoice through the provider
///
/// POST /api/invoices/{id}/emit
/// Response: updated InvoiceDto (JSON)
pub async fn emit_invoice_handler(
  path: web::Path<String>,
  use_case: web::Data<Arc<EmitInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = EmitInvoiceCommand {
    invoice_id: path.into_inner(),
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(invoice))
}
