use contact_form::config::EnvFileProvider;
use contact_form::startup::AppServer;
use contact_form::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber(get_subscriber("contact-form", "info", std::io::stdout))?;

    let server = AppServer::from_provider(&EnvFileProvider::default())
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to start the server");
            e
        })?;

    server.run_until_stopped().await?;
    tracing::info!("Server exiting");

    Ok(())
}
