//! Tracing subscriber construction and installation.
//!
//! Logs are emitted as structured JSON (Bunyan format) with environment-based
//! filtering. `log`-crate records from dependencies are bridged into the same
//! pipeline.

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Composes the tracing subscriber: env filter, span storage, and Bunyan
/// JSON formatting into the given sink.
///
/// The `RUST_LOG` environment variable overrides `env_filter` when set.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs the subscriber as the process-wide default.
///
/// Must be called exactly once, before any spans or events are recorded.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("failed to set log tracer");
    set_global_default(subscriber).expect("failed to set tracing subscriber");
}
