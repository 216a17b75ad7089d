use actix_web::{App, HttpServer, middleware::Logger, web};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiscal_emitter::{
  adapters::http::{
    InvoiceRouteDependencies, RequestIdMiddleware, configure_invoice_routes, health_handler,
  },
  application::invoice::{
    CreateInvoiceUseCase, EmitInvoiceUseCase, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
  },
  domain::invoice::InvoiceService,
  infrastructure::{
    config::Config,
    emission::HttpEmissionClient,
    persistence::sqlite::{self, SqliteInvoiceRepository},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fiscal_emitter=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting fiscal emitter");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  if let Err(e) = config.emission.validate() {
    tracing::warn!("Emission provider is not configured, emissions will fail: {}", e);
  }

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    sqlite::connect(&config.database),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to open database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlite::run_migrations(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Wire adapters into the domain service
  let invoice_repo = Arc::new(SqliteInvoiceRepository::new(db_pool));
  let emission_client = Arc::new(HttpEmissionClient::new(config.emission.clone()));
  let invoice_service = Arc::new(InvoiceService::new(invoice_repo, emission_client));

  let deps = InvoiceRouteDependencies {
    create_invoice_use_case: Arc::new(CreateInvoiceUseCase::new(invoice_service.clone())),
    list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
    get_invoice_details_use_case: Arc::new(GetInvoiceDetailsUseCase::new(
      invoice_service.clone(),
    )),
    emit_invoice_use_case: Arc::new(EmitInvoiceUseCase::new(invoice_service)),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      .route("/health", web::get().to(health_handler))
      .service(web::scope("/api").configure(|cfg| configure_invoice_routes(cfg, deps.clone())))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
