//! Log output for the `shoplist` binary
//!
//! `RUST_LOG` wins over `--debug`. With the `telemetry` feature, `--otel`
//! adds an OTLP span exporter next to the console output; its target comes
//! from `OTEL_EXPORTER_OTLP_ENDPOINT` and `OTEL_SERVICE_NAME`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";
const DEFAULT_SERVICE_NAME: &str = "shoplist";

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Log at debug level when `RUST_LOG` is unset
    pub debug: bool,
    pub otel: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level()))
    }

    fn level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Where spans go when OTLP export is on
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExportTarget {
    endpoint: String,
    service: String,
}

impl ExportTarget {
    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_owned()),
            service: lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_owned()),
        }
    }

    #[cfg_attr(not(feature = "telemetry"), allow(dead_code))]
    fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }
}

fn init_console(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(feature = "telemetry")]
fn init_with_otlp(config: &TracingConfig) -> Result<()> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let target = ExportTarget::from_env();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&target.endpoint)
        .build()
        .map_err(|e| anyhow!("OTLP exporter for {}: {}", target.endpoint, e))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            target.service.clone(),
        )]))
        .build();
    let otel_layer = tracing_opentelemetry::layer().with_tracer(provider.tracer(DEFAULT_SERVICE_NAME));

    // Export stops once the provider is dropped.
    let _ = opentelemetry::global::set_tracer_provider(provider);

    tracing_subscriber::registry()
        .with(config.filter())
        .with(tracing_subscriber::fmt::layer().with_target(config.debug).compact())
        .with(otel_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    tracing::info!(endpoint = %target.endpoint, service = %target.service, "Exporting spans over OTLP");
    Ok(())
}

/// Flush buffered spans before exit
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

/// Install the global subscriber
pub fn init(config: &TracingConfig) -> Result<()> {
    #[cfg(feature = "telemetry")]
    if config.otel {
        return init_with_otlp(config);
    }

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        eprintln!("--otel ignored: shoplist was built without the telemetry feature");
    }

    init_console(config)
}
