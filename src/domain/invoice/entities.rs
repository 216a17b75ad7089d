use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::InvoiceError;
use super::value_objects::InvoiceStatus;

// Invoice - fiscal document request awaiting or past emission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub cnpj: String,
  pub municipality: String,
  pub state: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub amount: Decimal,
  pub desired_emission_date: DateTime<Utc>,
  pub description: String,
  pub status: InvoiceStatus,
  /// Document number assigned by the emission provider.
  pub invoice_number: Option<String>,
  pub emitted_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Invoice {
  pub fn new(
    cnpj: String,
    municipality: String,
    state: String,
    amount: Decimal,
    desired_emission_date: DateTime<Utc>,
    description: String,
  ) -> Self {
    let now = Utc::now();

    Self {
      id: Uuid::new_v4(),
      cnpj,
      municipality,
      state,
      amount: amount.round_dp(2),
      desired_emission_date,
      description,
      status: InvoiceStatus::PendingEmission,
      invoice_number: None,
      emitted_at: None,
      created_at: now,
      updated_at: now,
    }
  }

  /// Records the provider's answer and moves the invoice to `EMITTED`.
  pub fn mark_emitted(
    &mut self,
    invoice_number: String,
    emitted_at: DateTime<Utc>,
  ) -> Result<(), InvoiceError> {
    if !self.status.can_transition_to(InvoiceStatus::Emitted) {
      return Err(InvoiceError::NotPendingEmission {
        current: self.status,
      });
    }

    self.invoice_number = Some(invoice_number);
    self.emitted_at = Some(emitted_at);
    self.status = InvoiceStatus::Emitted;
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn is_emittable(&self) -> bool {
    self.status.is_emittable()
  }
}
