use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::get_invoice_details::InvoiceDto;

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Newest first. An empty list is a normal result.
  pub async fn execute(&self) -> Result<Vec<InvoiceDto>, InvoiceError> {
    let invoices = self.invoice_service.list_all().await?;

    Ok(invoices.into_iter().map(InvoiceDto::from).collect())
  }
}
