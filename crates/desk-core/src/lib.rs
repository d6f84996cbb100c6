pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use config::{
    AccessibilityMode, ConfigError, ConstraintConfig, EmergencyDeskPolicy, ExecutiveDeskPolicy,
    OptimizerConfig, ScoringWeights, SpecialNeedsMode,
};
pub use error::{MalformedReason, OptimizeError, OptimizeResult};
pub use types::*;
pub use validate::validate_request;
