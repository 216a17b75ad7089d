use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{
  CreateInvoiceUseCase, EmitInvoiceUseCase, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
};

use super::handlers::invoices::{
  create_invoice_handler, emit_invoice_handler, get_invoice_handler, list_invoices_handler,
};

/// Use cases needed by the invoice routes
#[derive(Clone)]
pub struct InvoiceRouteDependencies {
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub get_invoice_details_use_case: Arc<GetInvoiceDetailsUseCase>,
  pub emit_invoice_use_case: Arc<EmitInvoiceUseCase>,
}

/// Configure invoice routes
///
/// All routes are prefixed with the enclosing scope path (e.g. /api).
///
/// # Routes
///
/// - POST /invoices - Register an invoice pending emission
/// - GET /invoices - List invoices, newest first
/// - GET /invoices/{id} - Fetch one invoice
/// - POST /invoices/{id}/emit - Emit a pending invoice through the provider
///
/// # Example
///
/// ```ignore
/// use actix_web::{App, web};
///
/// let app = App::new().service(
///   web::scope("/api").configure(|cfg| configure_invoice_routes(cfg, deps.clone())),
/// );
/// ```
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: InvoiceRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.create_invoice_use_case))
    .app_data(web::Data::new(deps.list_invoices_use_case))
    .app_data(web::Data::new(deps.get_invoice_details_use_case))
    .app_data(web::Data::new(deps.emit_invoice_use_case))
    .service(
      web::scope("/invoices")
        .route("", web::post().to(create_invoice_handler))
        .route("", web::get().to(list_invoices_handler))
        .route("/{id}", web::get().to(get_invoice_handler))
        .route("/{id}/emit", web::post().to(emit_invoice_handler)),
    );
}
