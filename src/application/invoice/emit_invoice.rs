use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::get_invoice_details::InvoiceDto;

#[derive(Debug)]
pub struct EmitInvoiceCommand {
  pub invoice_id: String,
}

pub struct EmitInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl EmitInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: EmitInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let invoice_id = Uuid::parse_str(&command.invoice_id)
      .map_err(|_| InvoiceError::NotFound(command.invoice_id.clone()))?;

    let invoice = self.invoice_service.emit(invoice_id).await?;

    Ok(InvoiceDto::from(invoice))
  }
}
