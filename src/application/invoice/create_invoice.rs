use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

use crate::domain::invoice::{InvoiceData, InvoiceError, InvoiceService, ValueObjectError};

use super::get_invoice_details::InvoiceDto;

/// Invoice creation request as received from clients.
///
/// Every field is optional at this stage so that incomplete payloads reach the
/// presence check instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInvoiceCommand {
  #[validate(required, length(min = 1))]
  #[serde(default, deserialize_with = "deserialize_text")]
  pub cnpj: Option<String>,

  #[validate(required, length(min = 1))]
  #[serde(default, deserialize_with = "deserialize_text")]
  pub municipality: Option<String>,

  #[validate(required, length(min = 1))]
  #[serde(default, deserialize_with = "deserialize_text")]
  pub state: Option<String>,

  #[validate(required)]
  #[serde(default, deserialize_with = "deserialize_amount")]
  pub amount: Option<Decimal>,

  #[validate(required, length(min = 1))]
  #[serde(default, deserialize_with = "deserialize_text")]
  pub desired_emission_date: Option<String>,

  #[validate(required, length(min = 1))]
  #[serde(default, deserialize_with = "deserialize_text")]
  pub description: Option<String>,
}

impl CreateInvoiceCommand {
  fn into_invoice_data(self) -> Option<InvoiceData> {
    Some(InvoiceData {
      cnpj: self.cnpj?,
      municipality: self.municipality?,
      state: self.state?,
      amount: self.amount?,
      desired_emission_date: self.desired_emission_date?,
      description: self.description?,
    })
  }
}

/// Accepts any JSON scalar for a text field, numbers and booleans rendered as
/// text; `null` and `""` are treated as absent.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawText {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
  }

  Ok(match Option::<RawText>::deserialize(deserializer)? {
    None => None,
    Some(RawText::Text(text)) if text.is_empty() => None,
    Some(RawText::Text(text)) => Some(text),
    Some(RawText::Number(number)) => Some(number.to_string()),
    Some(RawText::Flag(flag)) => Some(flag.to_string()),
  })
}

/// Accepts the amount as a JSON number or numeric string; `null` and `""` are
/// treated as absent.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawAmount {
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Text(String),
  }

  match Option::<RawAmount>::deserialize(deserializer)? {
    None => Ok(None),
    Some(RawAmount::Number(value)) => Ok(Some(value)),
    Some(RawAmount::Text(text)) if text.is_empty() => Ok(None),
    Some(RawAmount::Text(text)) => Decimal::from_str(text.trim())
      .map(Some)
      .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", text))),
  }
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let data = command
      .into_invoice_data()
      .ok_or(ValueObjectError::MissingRequiredFields)?;

    let invoice = self.invoice_service.create(data).await?;

    Ok(InvoiceDto::from(invoice))
  }
}
