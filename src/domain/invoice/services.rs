use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::Invoice;
use super::errors::InvoiceError;
use super::ports::{EmissionProvider, EmissionRequest, InvoiceRepository};
use super::value_objects::{InvoiceStatus, parse_emission_date};

/// Invoice creation data
pub struct InvoiceData {
  pub cnpj: String,
  pub municipality: String,
  pub state: String,
  pub amount: Decimal,
  /// Raw client value, parsed by [`InvoiceService::create`].
  pub desired_emission_date: String,
  pub description: String,
}

/// Drives the invoice status machine: `PENDING_EMISSION -> EMITTED`.
pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  emission_provider: Arc<dyn EmissionProvider>,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    emission_provider: Arc<dyn EmissionProvider>,
  ) -> Self {
    Self {
      invoice_repo,
      emission_provider,
    }
  }

  pub async fn create(&self, data: InvoiceData) -> Result<Invoice, InvoiceError> {
    let desired_emission_date = parse_emission_date(&data.desired_emission_date)?;

    let invoice = Invoice::new(
      data.cnpj,
      data.municipality,
      data.state,
      data.amount,
      desired_emission_date,
      data.description,
    );

    let invoice = self.invoice_repo.create(invoice).await?;
    tracing::info!(invoice_id = %invoice.id, "Invoice registered, pending emission");
    Ok(invoice)
  }

  pub async fn list_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_repo.find_all().await
  }

  pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    self.invoice_repo.find_by_id(id).await
  }

  pub async fn emit(&self, id: Uuid) -> Result<Invoice, InvoiceError> {
    let mut invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or_else(|| InvoiceError::NotFound(id.to_string()))?;

    if !invoice.is_emittable() {
      tracing::warn!(
        invoice_id = %id,
        status = %invoice.status,
        "Rejected emission of non-pending invoice"
      );
      return Err(InvoiceError::NotPendingEmission {
        current: invoice.status,
      });
    }

    let request = EmissionRequest::from(&invoice);

    let response = self
      .emission_provider
      .emit(request)
      .await
      .inspect_err(|e| tracing::warn!(invoice_id = %id, error = %e, "Emission failed"))?;

    invoice.mark_emitted(response.invoice_number, response.emitted_at)?;

    let invoice = self
      .invoice_repo
      .update_if_status(invoice, InvoiceStatus::PendingEmission)
      .await?
      .ok_or_else(|| {
        tracing::warn!(invoice_id = %id, "Invoice was emitted concurrently");
        InvoiceError::NotPendingEmission {
          current: InvoiceStatus::Emitted,
        }
      })?;

    tracing::info!(
      invoice_id = %invoice.id,
      invoice_number = invoice.invoice_number.as_deref().unwrap_or_default(),
      "Invoice emitted"
    );

    Ok(invoice)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::errors::EmissionError;
  use crate::domain::invoice::ports::EmissionResponse;
  use async_trait::async_trait;
  use chrono::{TimeZone, Utc};
  use rust_decimal_macros::dec;
  use std::sync::Mutex;

  #[derive(Default)]
  struct InMemoryInvoiceRepository {
    invoices: Mutex<Vec<Invoice>>,
  }

  #[async_trait]
  impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
      self.invoices.lock().unwrap().push(invoice.clone());
      Ok(invoice)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
      Ok(
        self
          .invoices
          .lock()
          .unwrap()
          .iter()
          .find(|i| i.id == id)
          .cloned(),
      )
    }

    async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
      let mut invoices = self.invoices.lock().unwrap().clone();
      invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
      Ok(invoices)
    }

    async fn update_if_status(
      &self,
      invoice: Invoice,
      expected_status: InvoiceStatus,
    ) -> Result<Option<Invoice>, InvoiceError> {
      let mut invoices = self.invoices.lock().unwrap();
      match invoices
        .iter_mut()
        .find(|i| i.id == invoice.id && i.status == expected_status)
      {
        Some(stored) => {
          *stored = invoice.clone();
          Ok(Some(invoice))
        }
        None => Ok(None),
      }
    }
  }

  struct StubEmissionProvider {
    outcome: Result<EmissionResponse, EmissionError>,
    requests: Mutex<Vec<EmissionRequest>>,
  }

  impl StubEmissionProvider {
    fn returning(outcome: Result<EmissionResponse, EmissionError>) -> Self {
      Self {
        outcome,
        requests: Mutex::new(Vec::new()),
      }
    }

    fn calls(&self) -> Vec<EmissionRequest> {
      self.requests.lock().unwrap().clone()
    }
  }

  #[async_trait]
  impl EmissionProvider for StubEmissionProvider {
    async fn emit(&self, request: EmissionRequest) -> Result<EmissionResponse, EmissionError> {
      self.requests.lock().unwrap().push(request);
      self.outcome.clone()
    }
  }

  /// Provider during whose call another request emits the same invoice.
  struct ConcurrentlyEmittedProvider {
    repo: Arc<InMemoryInvoiceRepository>,
  }

  #[async_trait]
  impl EmissionProvider for ConcurrentlyEmittedProvider {
    async fn emit(&self, _request: EmissionRequest) -> Result<EmissionResponse, EmissionError> {
      for invoice in self.repo.invoices.lock().unwrap().iter_mut() {
        invoice
          .mark_emitted("NF-FIRST".to_string(), Utc::now())
          .unwrap();
      }
      Ok(ok_response())
    }
  }

  fn ok_response() -> EmissionResponse {
    EmissionResponse {
      invoice_number: "NF-12345".to_string(),
      emitted_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
    }
  }

  fn invoice_data() -> InvoiceData {
    InvoiceData {
      cnpj: "12345678000190".to_string(),
      municipality: "São Paulo".to_string(),
      state: "SP".to_string(),
      amount: dec!(1000.50),
      desired_emission_date: "2024-01-15T00:00:00.000Z".to_string(),
      description: "consulting service".to_string(),
    }
  }

  fn service_with(
    provider: StubEmissionProvider,
  ) -> (InvoiceService, Arc<InMemoryInvoiceRepository>, Arc<StubEmissionProvider>) {
    let repo = Arc::new(InMemoryInvoiceRepository::default());
    let provider = Arc::new(provider);
    let service = InvoiceService::new(repo.clone(), provider.clone());
    (service, repo, provider)
  }

  #[tokio::test]
  async fn test_create_starts_pending() {
    let (service, _, _) = service_with(StubEmissionProvider::returning(Ok(ok_response())));

    let invoice = service.create(invoice_data()).await.unwrap();

    assert_eq!(invoice.status, InvoiceStatus::PendingEmission);
    assert_eq!(invoice.amount, dec!(1000.50));
    assert_eq!(
      invoice.desired_emission_date,
      Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    );
    assert!(invoice.invoice_number.is_none());
    assert!(invoice.emitted_at.is_none());
  }

  #[tokio::test]
  async fn test_create_rejects_unparseable_date() {
    let (service, repo, _) = service_with(StubEmissionProvider::returning(Ok(ok_response())));
    let mut data = invoice_data();
    data.desired_emission_date = "next monday".to_string();

    let result = service.create(data).await;

    assert!(matches!(result, Err(InvoiceError::Validation(_))));
    assert!(repo.find_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_find_by_id_missing_is_none() {
    let (service, _, _) = service_with(StubEmissionProvider::returning(Ok(ok_response())));

    assert!(service.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_list_all_empty() {
    let (service, _, _) = service_with(StubEmissionProvider::returning(Ok(ok_response())));

    assert!(service.list_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_emit_success_records_provider_values() {
    let (service, _, provider) =
      service_with(StubEmissionProvider::returning(Ok(ok_response())));
    let invoice = service.create(invoice_data()).await.unwrap();

    let emitted = service.emit(invoice.id).await.unwrap();

    assert_eq!(emitted.status, InvoiceStatus::Emitted);
    assert_eq!(emitted.invoice_number.as_deref(), Some("NF-12345"));
    assert_eq!(emitted.emitted_at, Some(ok_response().emitted_at));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cnpj, "12345678000190");
    assert_eq!(calls[0].municipality, "São Paulo");
    assert_eq!(calls[0].state, "SP");
    assert_eq!(calls[0].amount, dec!(1000.50));
    assert_eq!(calls[0].desired_emission_date, "2024-01-15T00:00:00.000Z");

    let stored = service.find_by_id(invoice.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvoiceStatus::Emitted);
  }

  #[tokio::test]
  async fn test_emit_unknown_invoice() {
    let (service, _, provider) =
      service_with(StubEmissionProvider::returning(Ok(ok_response())));

    let result = service.emit(Uuid::new_v4()).await;

    assert!(matches!(result, Err(InvoiceError::NotFound(_))));
    assert!(provider.calls().is_empty());
  }

  #[tokio::test]
  async fn test_emit_twice_is_rejected() {
    let (service, _, provider) =
      service_with(StubEmissionProvider::returning(Ok(ok_response())));
    let invoice = service.create(invoice_data()).await.unwrap();
    service.emit(invoice.id).await.unwrap();

    let error = service.emit(invoice.id).await.unwrap_err();

    assert!(error.to_string().contains("PENDING_EMISSION"));
    assert_eq!(provider.calls().len(), 1);
  }

  #[tokio::test]
  async fn test_emit_cancelled_is_rejected() {
    let (service, repo, provider) =
      service_with(StubEmissionProvider::returning(Ok(ok_response())));
    let mut invoice = Invoice::new(
      "12345678000190".to_string(),
      "Curitiba".to_string(),
      "PR".to_string(),
      dec!(5),
      Utc::now(),
      "cancelled".to_string(),
    );
    invoice.status = InvoiceStatus::Cancelled;
    let invoice = repo.create(invoice).await.unwrap();

    let result = service.emit(invoice.id).await;

    assert!(matches!(
      result,
      Err(InvoiceError::NotPendingEmission {
        current: InvoiceStatus::Cancelled
      })
    ));
    assert!(provider.calls().is_empty());
  }

  #[tokio::test]
  async fn test_emit_propagates_provider_error_unchanged() {
    let failure = EmissionError::AuthenticationFailed("invalid key".to_string());
    let (service, _, _) = service_with(StubEmissionProvider::returning(Err(failure.clone())));
    let invoice = service.create(invoice_data()).await.unwrap();

    let result = service.emit(invoice.id).await;

    match result {
      Err(InvoiceError::Emission(error)) => assert_eq!(error, failure),
      other => panic!("Expected emission error, got {:?}", other),
    }

    let stored = service.find_by_id(invoice.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvoiceStatus::PendingEmission);
    assert!(stored.invoice_number.is_none());
  }

  #[tokio::test]
  async fn test_emit_losing_concurrent_writer_is_rejected() {
    let repo = Arc::new(InMemoryInvoiceRepository::default());
    let provider = Arc::new(ConcurrentlyEmittedProvider { repo: repo.clone() });
    let service = InvoiceService::new(repo.clone(), provider);
    let invoice = service.create(invoice_data()).await.unwrap();

    let result = service.emit(invoice.id).await;

    assert!(matches!(
      result,
      Err(InvoiceError::NotPendingEmission {
        current: InvoiceStatus::Emitted
      })
    ));

    let stored = service.find_by_id(invoice.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvoiceStatus::Emitted);
    assert_eq!(stored.invoice_number.as_deref(), Some("NF-FIRST"));
  }
}
