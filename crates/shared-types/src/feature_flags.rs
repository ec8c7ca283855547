use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at startup. Every field defaults to `false`
/// so that a missing or incomplete config file disables all optional
/// features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
}

/// Switches for the optional stages of smart routing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Reclassify non-critical validation failures as the happy path when
    /// dropping non-recallable cases was what caused them.
    #[serde(default = "enabled")]
    pub smart_override: bool,
    /// Run a full assessment when the journey already has a revocation date.
    #[serde(default = "enabled")]
    pub supplementary_assessment: bool,
}

fn enabled() -> bool {
    true
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            smart_override: true,
            supplementary_assessment: true,
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub routing: RoutingConfig,
}
