use anyhow::{Context, Result, bail};
use std::env;

/// Connection settings for the Spanner-backed store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

/// Which store backs the pets table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Spanner(SpannerConfig),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = var("PET_STORE").unwrap_or_else(|| "spanner".to_string());

        let store = match backend.as_str() {
            "spanner" => {
                let emulator_host = var("SPANNER_EMULATOR_HOST");

                let project = var("SPANNER_PROJECT")
                    .context("SPANNER_PROJECT environment variable is required")?;

                let instance = var("SPANNER_INSTANCE")
                    .context("SPANNER_INSTANCE environment variable is required")?;

                let database = var("SPANNER_DATABASE")
                    .context("SPANNER_DATABASE environment variable is required")?;

                StoreBackend::Spanner(SpannerConfig {
                    emulator_host,
                    project,
                    instance,
                    database,
                })
            }
            "memory" => StoreBackend::Memory,
            other => bail!("PET_STORE must be one of: spanner, memory, got '{}'", other),
        };

        let service_port = var("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = var("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            store,
            service_port,
            service_host,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.store {
            StoreBackend::Spanner(spanner) => {
                tracing::info!("  Pet store: spanner");
                tracing::info!(
                    "  Spanner emulator: {}",
                    spanner
                        .emulator_host
                        .as_deref()
                        .unwrap_or("disabled (using production)")
                );
                tracing::info!("  Spanner project: {}", spanner.project);
                tracing::info!("  Spanner instance: {}", spanner.instance);
                tracing::info!("  Spanner database: {}", spanner.database);
            }
            StoreBackend::Memory => {
                tracing::info!("  Pet store: in-memory (data is lost on restart)");
            }
        }
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}
