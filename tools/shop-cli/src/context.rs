//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use shop_app::Storefront;
use shop_data::{FetchClient, HttpTransport};
use shop_store::{FileStore, Store};

use crate::config::{CliConfig, API_URL_ENV};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from an explicit config file or the nearest one.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                CliConfig::find(&cwd)
            }
        };

        let config = match &path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        }
        .with_env_overrides(std::env::var(API_URL_ENV).ok());

        if let Some(path) = &path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self { config, output })
    }

    /// Open the storage file.
    pub fn store(&self) -> Result<Store> {
        let path = self.config.storage.resolve();
        self.output.debug(&format!("Storage at {}", path.display()));
        let backend = FileStore::open(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;
        Ok(Store::new(backend))
    }

    /// Build the API client.
    pub fn client(&self) -> Result<FetchClient> {
        let transport = HttpTransport::new(self.config.api.request_timeout())
            .context("Failed to build HTTP client")?;
        Ok(FetchClient::new(transport).with_base_url(&self.config.api.base_url))
    }

    /// Build the storefront state over the configured storage and backend.
    pub fn storefront(&self) -> Result<Storefront> {
        Ok(Storefront::new(self.store()?, self.client()?)
            .with_processing_delay(self.config.payment.processing_delay()))
    }
}
