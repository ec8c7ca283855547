pub mod error;
pub mod feature_flags;

// Recall engine domain modules
pub mod eligibility;
pub mod recall;
pub mod recall_type;
pub mod routing;
pub mod validation;

pub use error::*;
pub use feature_flags::*;

pub use eligibility::*;
pub use recall::*;
pub use recall_type::*;
pub use routing::*;
pub use validation::{is_critical_code, CRITICAL_VALIDATION_CODES};
