pub mod create_invoice;
pub mod emit_invoice;
pub mod get_invoice_details;
pub mod list_invoices;
pub mod validator;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use emit_invoice::{EmitInvoiceCommand, EmitInvoiceUseCase};
pub use get_invoice_details::{GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDto};
pub use list_invoices::ListInvoicesUseCase;
pub use validator::{ALL_FIELDS_REQUIRED, validate_creation_request};
