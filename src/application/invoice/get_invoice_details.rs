use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

#[derive(Debug)]
pub struct GetInvoiceDetailsCommand {
  /// Identifier exactly as received; anything that is not a UUID is simply
  /// not found.
  pub invoice_id: String,
}

/// Invoice as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDto {
  pub id: Uuid,
  pub cnpj: String,
  pub municipality: String,
  pub state: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub amount: Decimal,
  pub desired_emission_date: DateTime<Utc>,
  pub description: String,
  pub status: String,
  pub invoice_number: Option<String>,
  pub emitted_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      cnpj: invoice.cnpj,
      municipality: invoice.municipality,
      state: invoice.state,
      amount: invoice.amount,
      desired_emission_date: invoice.desired_emission_date,
      description: invoice.description,
      status: invoice.status.as_str().to_string(),
      invoice_number: invoice.invoice_number,
      emitted_at: invoice.emitted_at,
      created_at: invoice.created_at,
      updated_at: invoice.updated_at,
    }
  }
}

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// `Ok(None)` when no invoice has the given identifier.
  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<Option<InvoiceDto>, InvoiceError> {
    let Ok(invoice_id) = Uuid::parse_str(&command.invoice_id) else {
      return Ok(None);
    };

    let invoice = self.invoice_service.find_by_id(invoice_id).await?;

    Ok(invoice.map(InvoiceDto::from))
  }
}
