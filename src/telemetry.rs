use anyhow::Context;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Bunyan-formatted JSON records tagged with `service_name`, written to
/// whatever `sink` produces.
///
/// `RUST_LOG` takes precedence over `default_level`. Tests hand in
/// `std::io::sink` unless they want to see the records.
pub fn get_subscriber<Sink>(
    service_name: &str,
    default_level: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let level_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    Registry::default()
        .with(level_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(service_name.to_string(), sink))
}

/// Makes `subscriber` the process-wide default and routes `log` records
/// (actix internals) into it. Fails when called a second time.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), anyhow::Error> {
    tracing_log::LogTracer::init().context("A `log` logger is already installed")?;
    tracing::subscriber::set_global_default(subscriber)
        .context("A global tracing subscriber is already installed")?;
    Ok(())
}
