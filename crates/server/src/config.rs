use shared_types::{AppConfig, FeatureFlags, RoutingConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse config file contents. Unparseable contents fall back to defaults:
/// telemetry off, every routing stage on.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` and store it in the global `OnceLock`. Only the first
/// call has effect.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, routing = ?config.routing, "Config loaded");
            config
        }
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "Config not found, using defaults");
            AppConfig::default()
        }
    })
}

/// Loaded feature flags, or all-false defaults if `load_config()` hasn't
/// been called yet.
pub fn feature_flags() -> FeatureFlags {
    CONFIG.get().map(|c| c.features.clone()).unwrap_or_default()
}

/// Loaded routing switches, or the defaults if `load_config()` hasn't been
/// called yet.
pub fn routing_config() -> RoutingConfig {
    CONFIG.get().map(|c| c.routing.clone()).unwrap_or_default()
}
