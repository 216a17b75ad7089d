pub mod health;
pub mod invoices;

pub use health::health_handler;
pub use invoices::{
  create_invoice_handler, emit_invoice_handler, get_invoice_handler, list_invoices_handler,
};
