use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use shared_types::{AppError, FeatureFlags};
use std::sync::OnceLock;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tokio runtime for the OTLP gRPC exporters. Tonic's `connect_lazy()`
/// calls `tokio::spawn`, which needs a runtime context.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Exporter settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySettings {
    pub endpoint: String,
    pub service_name: String,
    pub environment: String,
    pub ingestion_key: Option<String>,
}

impl TelemetrySettings {
    /// Build settings from a variable lookup. `None` when no collector
    /// endpoint is configured.
    ///
    ///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address
    ///       Local: `http://localhost:4317`
    ///       SigNoz Cloud: `https://ingest.{region}.signoz.cloud:443`
    ///   - `OTEL_SERVICE_NAME`: service name tag (default `recall-engine`)
    ///   - `SIGNOZ_INGESTION_KEY`: SigNoz Cloud access token (optional for local)
    ///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty())?;
        Some(Self {
            endpoint,
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| "recall-engine".to_string()),
            environment: lookup("DEPLOY_ENV").unwrap_or_else(|| "development".to_string()),
            ingestion_key: lookup("SIGNOZ_INGESTION_KEY").filter(|k| !k.is_empty()),
        })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn uses_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    pub fn mode(&self) -> &'static str {
        if self.ingestion_key.is_some() {
            "cloud"
        } else {
            "local"
        }
    }

    fn metadata(&self) -> Result<Option<opentelemetry_otlp::tonic_types::metadata::MetadataMap>, AppError> {
        let Some(key) = &self.ingestion_key else {
            return Ok(None);
        };
        let value = key
            .parse()
            .map_err(|_| AppError::bad_request("Invalid SIGNOZ_INGESTION_KEY value"))?;
        let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
        metadata.insert("signoz-ingestion-key", value);
        Ok(Some(metadata))
    }

    fn tls_config() -> opentelemetry_otlp::tonic_types::transport::ClientTlsConfig {
        opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots()
    }
}

/// Set up the OpenTelemetry trace and log exporters and register them
/// globally. Does nothing unless the `telemetry` flag is on and an OTLP
/// endpoint is configured.
pub fn init_telemetry(flags: &FeatureFlags) -> Result<(), AppError> {
    if !flags.telemetry {
        tracing::debug!("Telemetry feature disabled");
        return Ok(());
    }

    let _ = dotenvy::dotenv();

    let Some(settings) = TelemetrySettings::from_env() else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return Ok(());
    };

    let rt = match OTEL_RUNTIME.get() {
        Some(rt) => rt,
        None => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(1)
                .build()
                .map_err(|e| AppError::internal(format!("Failed to create OTEL runtime: {e}")))?;
            OTEL_RUNTIME.get_or_init(|| runtime)
        }
    };
    let _guard = rt.enter();

    let metadata = settings.metadata()?;

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if settings.uses_tls() {
        builder = builder.with_tls_config(TelemetrySettings::tls_config());
    }
    if let Some(md) = metadata.clone() {
        builder = builder.with_metadata(md);
    }
    let exporter = builder
        .build()
        .map_err(|e| AppError::upstream("otlp", format!("span exporter: {e}")))?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(settings.service_name.clone())
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", settings.environment.clone()))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    // Log exporter (uses the `log` crate, not the `tracing` subscriber)
    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if settings.uses_tls() {
        log_builder = log_builder.with_tls_config(TelemetrySettings::tls_config());
    }
    if let Some(md) = metadata {
        log_builder = log_builder.with_metadata(md);
    }
    let log_exporter = log_builder
        .build()
        .map_err(|e| AppError::upstream("otlp", format!("log exporter: {e}")))?;

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::debug!("Log bridge skipped, a log crate logger is already set"),
    }

    tracing::info!(
        version = APP_VERSION,
        endpoint = %settings.endpoint,
        mode = settings.mode(),
        "Telemetry initialized, traces and logs exporting"
    );
    Ok(())
}
