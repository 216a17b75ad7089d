use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use super::emission::EmissionConfig;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  #[serde(default)]
  pub emission: EmissionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// sqlx SQLite URL, e.g. `sqlite://data/invoices.db` or `sqlite::memory:`
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. built-in defaults
  /// 2. config/default.toml (if exists)
  /// 3. config/local.toml (if exists)
  /// 4. config/{RUN_MODE}.toml (if exists)
  /// 5. Environment variables with FISCAL_EMITTER_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the FISCAL_EMITTER_ prefix and are separated by double underscores:
  /// - `FISCAL_EMITTER_SERVER__PORT=3000`
  /// - `FISCAL_EMITTER_DATABASE__URL=sqlite://database.sqlite`
  /// - `FISCAL_EMITTER_EMISSION__URL=https://provider.example/emit`
  /// - `FISCAL_EMITTER_EMISSION__API_KEY=secret`
  ///
  /// Missing emission settings are not an error here; the emission client
  /// reports them when an emission is attempted.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .set_default("server.host", "127.0.0.1")?
      .set_default("server.port", 3000_i64)?
      .set_default("database.url", "sqlite://database.sqlite")?
      .set_default("database.max_connections", 5_i64)?
      .set_default("emission.url", "")?
      .set_default("emission.api_key", "")?
      .add_source(File::with_name("config/default").required(false))
      // Add optional local configuration (for local development overrides)
      .add_source(File::with_name("config/local").required(false))
      // Add optional environment-specific configuration
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("FISCAL_EMITTER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "sqlite://database.sqlite"
            max_connections = 5

            [emission]
            url = "https://provider.example/nfse"
            api_key = "secret-key"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.url, "sqlite://database.sqlite");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.emission.url, "https://provider.example/nfse");
    assert_eq!(config.emission.api_key, "secret-key");
  }

  #[test]
  fn test_emission_section_is_optional() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "sqlite::memory:"
            max_connections = 1
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert!(config.emission.url.is_empty());
    assert!(config.emission.api_key.is_empty());
    assert!(config.emission.validate().is_err());
  }
}
