//! Tracing and OpenTelemetry setup for books-api
//!
//! Console logging is always on. Spans are additionally exported over OTLP
//! when a collector endpoint is configured and the `telemetry` feature is
//! built in. A collector that cannot be set up never stops the server: we log
//! a warning and fall back to console output.
//!
//! Environment variables:
//!   RUST_LOG                          # Log filter (default: info)
//!   OTEL_EXPORTER_OTLP_ENDPOINT       # OTLP endpoint, e.g. http://localhost:4317
//!   OTEL_SERVICE_NAME                 # Service name (default: books-api)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Default `service.name` resource attribute
pub const DEFAULT_SERVICE_NAME: &str = "books-api";

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// OTLP collector endpoint; `None` disables export
    pub otel_endpoint: Option<String>,
    pub service_name: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            otel_endpoint: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize tracing with console output only (no OTEL)
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.debug))
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Initialize tracing with OpenTelemetry OTLP export
#[cfg(feature = "telemetry")]
pub fn init_tracing_with_otel(config: &TracingConfig, endpoint: &str) -> Result<()> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use opentelemetry_sdk::trace::TracerProvider;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Build OTLP exporter (connects lazily, an absent collector is not an error here)
    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

    let resource = opentelemetry_sdk::Resource::new(vec![KeyValue::new(
        "service.name",
        config.service_name.clone(),
    )]);

    // Build tracer provider with batch export
    let provider = TracerProvider::builder()
        .with_batch_exporter(otlp_exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer("books-api");
    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    // Keep the provider alive globally; dropping it stops export
    let _ = opentelemetry::global::set_tracer_provider(provider);
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(config.debug))
        .with(fmt_layer)
        .with(telemetry_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    tracing::info!(
        endpoint = %endpoint,
        service = %config.service_name,
        "OpenTelemetry tracing initialized"
    );

    Ok(())
}

/// Shutdown OpenTelemetry (flush pending spans)
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// No-op shutdown when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

/// Initialize tracing based on configuration
///
/// Uses OTLP export when an endpoint is configured, console-only otherwise.
pub fn init(config: &TracingConfig) -> Result<()> {
    #[cfg(feature = "telemetry")]
    if let Some(endpoint) = &config.otel_endpoint {
        match init_tracing_with_otel(config, endpoint) {
            Ok(()) => return Ok(()),
            Err(err) => {
                init_tracing(config)?;
                tracing::warn!(endpoint = %endpoint, "OpenTelemetry disabled: {:#}", err);
                return Ok(());
            }
        }
    }

    init_tracing(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_console_only() {
        let config = TracingConfig::default();
        assert!(!config.debug);
        assert!(config.otel_endpoint.is_none());
        assert_eq!(config.service_name, "books-api");
    }
}
