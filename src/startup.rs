use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle};
use anyhow::Context;

use crate::config::{Configuration, ConfigurationProvider};
use crate::run::run;
use crate::storage::{JsonFileStore, SubmissionStore};
use crate::views::{HtmlTemplates, ViewRenderer};

pub struct AppServer {
    port: u16,
    address: String,
    server: Server,
}

impl AppServer {
    /// Loads the configuration from `provider` and builds the server.
    /// A provider error aborts startup.
    pub async fn from_provider(provider: &dyn ConfigurationProvider) -> Result<Self, anyhow::Error> {
        let configuration = provider
            .load()
            .context("Failed to load the service configuration")?;
        Self::build(configuration).await
    }

    pub async fn build(configuration: Configuration) -> Result<Self, anyhow::Error> {
        let settings = &configuration.app;

        let views: Arc<dyn ViewRenderer> = Arc::new(
            HtmlTemplates::load(&settings.templates_dir).with_context(|| {
                format!(
                    "Failed to load templates from {}",
                    settings.templates_dir.display()
                )
            })?,
        );
        let store: Arc<dyn SubmissionStore> = Arc::new(JsonFileStore::new(&settings.data_file));

        let listener = TcpListener::bind(format!("{}:{}", settings.host, configuration.port))
            .with_context(|| format!("Failed to bind to port {}", configuration.port))?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            address = %settings.host,
            port,
            data_file = %settings.data_file.display(),
            "Starting the server"
        );

        let server = run(listener, store, views, settings)?;

        Ok(Self {
            port,
            address: settings.host.clone(),
            server,
        })
    }

    pub fn to_server_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Handle for stopping the server from outside, e.g. in tests.
    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
