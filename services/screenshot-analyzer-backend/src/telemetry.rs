use axum::body::Body;
use axum::http::Request;
use std::fmt;
use tracing::{Span, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;
use uuid::Uuid;

#[derive(Debug)]
pub enum Error {
    Logger {
        context: String,
        source: tracing_log::log_tracer::SetLoggerError,
    },
    Subscriber {
        context: String,
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Logger { context, source } => {
                write!(fmt, "Logger: {context} | {source}")
            }
            Error::Subscriber { context, source } => {
                write!(fmt, "Subscriber: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Sets up a tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `env_filter`.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let bunyan_format = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(filter_layer)
        .with(JsonStorageLayer)
        .with(bunyan_format)
}

/// Register a subscriber as global default, and redirect `log` records to it.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), Error> {
    LogTracer::init().map_err(|err| Error::Logger {
        context: "Failed to set logger".to_string(),
        source: err,
    })?;
    tracing::subscriber::set_global_default(subscriber).map_err(|err| Error::Subscriber {
        context: "Failed to set global subscriber".to_string(),
        source: err,
    })
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> String {
    if debug {
        "info,screenshot_analyzer=debug,tower_http=debug".to_string()
    } else {
        "info".to_string()
    }
}

/// Span wrapping each HTTP request, so that every log line of a request can be
/// correlated.
pub fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "HTTP Request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    )
}
