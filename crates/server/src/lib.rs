pub mod recall;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod telemetry;
