//! Recall eligibility and routing.
//!
//! `assessor` decides, for a proposed revocation date, which sentences can
//! be recalled and how the recall should be routed. `orchestrator` wraps it
//! with next steps, degraded fallbacks and the smart-filtering path used
//! before a revocation date is known.

pub mod assessor;
pub mod classification;
pub mod date_validation;
pub mod orchestrator;
pub mod recall_types;
pub mod ual;

#[cfg(feature = "server")]
pub mod data_source;

pub use assessor::assess;
pub use orchestrator::{
    apply_smart_override, next_steps, require_recallable_cases, route, route_with_smart_filtering,
    smart_override_applies,
};
