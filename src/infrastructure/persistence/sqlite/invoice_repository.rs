use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  Invoice, InvoiceError, InvoiceStatus, ValueObjectError, ports::InvoiceRepository,
};

const INVOICE_COLUMNS: &str = "id, cnpj, municipality, state, amount, desired_emission_date, \
   description, status, invoice_number, emitted_at, created_at, updated_at";

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: String,
  cnpj: String,
  municipality: String,
  state: String,
  amount: String,
  desired_emission_date: DateTime<Utc>,
  description: String,
  status: String,
  invoice_number: Option<String>,
  emitted_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let id = Uuid::parse_str(&row.id)
      .map_err(|e| InvoiceError::Repository(format!("Corrupt invoice id '{}': {}", row.id, e)))?;
    let amount =
      Decimal::from_str(&row.amount).map_err(|_| ValueObjectError::InvalidAmount(row.amount))?;
    let status = InvoiceStatus::from_str(&row.status)?;

    Ok(Invoice {
      id,
      cnpj: row.cnpj,
      municipality: row.municipality,
      state: row.state,
      amount,
      desired_emission_date: row.desired_emission_date,
      description: row.description,
      status,
      invoice_number: row.invoice_number,
      emitted_at: row.emitted_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct SqliteInvoiceRepository {
  pool: SqlitePool,
}

impl SqliteInvoiceRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            INSERT INTO invoices (
                id, cnpj, municipality, state, amount, desired_emission_date,
                description, status, invoice_number, emitted_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {INVOICE_COLUMNS}
            "#
    ))
    .bind(invoice.id.to_string())
    .bind(&invoice.cnpj)
    .bind(&invoice.municipality)
    .bind(&invoice.state)
    .bind(invoice.amount.to_string())
    .bind(invoice.desired_emission_date)
    .bind(&invoice.description)
    .bind(invoice.status.as_str())
    .bind(&invoice.invoice_number)
    .bind(invoice.emitted_at)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
    ))
    .bind(id.to_string())
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn update_if_status(
    &self,
    invoice: Invoice,
    expected_status: InvoiceStatus,
  ) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            UPDATE invoices
            SET status = $2, invoice_number = $3, emitted_at = $4, updated_at = $5
            WHERE id = $1 AND status = $6
            RETURNING {INVOICE_COLUMNS}
            "#
    ))
    .bind(invoice.id.to_string())
    .bind(invoice.status.as_str())
    .bind(&invoice.invoice_number)
    .bind(invoice.emitted_at)
    .bind(invoice.updated_at)
    .bind(expected_status.as_str())
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }
}
