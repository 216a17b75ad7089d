pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, HealthResponse};
pub use errors::{ApiError, map_error_to_http, map_message_to_http};
pub use handlers::{
  create_invoice_handler, emit_invoice_handler, get_invoice_handler, health_handler,
  list_invoices_handler,
};
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{InvoiceRouteDependencies, configure_invoice_routes};
