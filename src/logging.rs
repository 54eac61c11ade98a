use std::env;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter, Registry};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("log tracer already initialized")]
    LogTracerAlreadyInitialized,

    #[error("global tracing subscriber already set")]
    SubscriberAlreadySet,
}

fn json_enabled() -> bool {
    env::var("JSON_LOG").map_or(false, |s| s.parse().unwrap_or_default())
}

/// Logs go to stderr so stdout carries only the inventory.
/// Keep the returned guard alive until exit to flush buffered lines.
pub fn setup_logger() -> Result<WorkerGuard, SetupError> {
    // Redirect the logs from log library to tracing's subscribers.
    LogTracer::init().map_err(|_| SetupError::LogTracerAlreadyInitialized)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let json = json_enabled();
    let json_layer = json.then(|| {
        tracing_fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(non_blocking_writer.clone())
    });
    let text_layer = (!json).then(|| {
        tracing_fmt::layer()
            .with_target(false)
            .with_writer(non_blocking_writer)
    });

    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(json_layer)
        .with(text_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| SetupError::SubscriberAlreadySet)?;

    Ok(guard)
}
