//! desk.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default tolerance for score equality in the solver.
pub const DEFAULT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub scoring: ScoringWeights,
    pub constraints: ConstraintConfig,
    pub solver: SolverConfig,
}

/// Weights for the additive preference rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub location: f64,
    pub desk_type: f64,
    pub accessibility: f64,
    pub privacy: f64,
    /// Desk team zone is among the employee's adjacency hints.
    pub team_adjacency: f64,
    /// Per special-needs tag found in the desk's features.
    pub special_needs: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 1.0,
            desk_type: 1.0,
            accessibility: 2.0,
            privacy: 1.0,
            team_adjacency: 0.0,
            special_needs: 0.0,
        }
    }
}

impl ScoringWeights {
    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("location", self.location),
            ("desk_type", self.desk_type),
            ("accessibility", self.accessibility),
            ("privacy", self.privacy),
            ("team_adjacency", self.team_adjacency),
            ("special_needs", self.special_needs),
        ]
    }
}

/// How an employee's accessibility requirement is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessibilityMode {
    /// Matching desks earn a bonus; any desk stays permitted.
    #[default]
    Score,
    /// Non-accessible desks are excluded for employees who require access.
    Require,
}

/// How an employee's special-needs tags are enforced against desk features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialNeedsMode {
    /// Each matching feature earns the `special_needs` weight.
    #[default]
    Score,
    /// A desk must carry every tag the employee lists (e.g. `dual-monitor`).
    Require,
}

/// Who may sit at desks flagged `executive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutiveDeskPolicy {
    #[default]
    Open,
    /// Executive desks go to executives only.
    Reserved,
}

/// Whether emergency desks and desks next to an emergency exit are handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyDeskPolicy {
    #[default]
    Assignable,
    /// Treated like occupied desks.
    Excluded,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    pub accessibility: AccessibilityMode,
    pub special_needs: SpecialNeedsMode,
    pub executive_desks: ExecutiveDeskPolicy,
    pub emergency_desks: EmergencyDeskPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scoring weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("solver epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),
}

impl OptimizerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: OptimizerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scores must stay non-negative and bounded for the solver's guarantees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.scoring.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let eps = self.solver.epsilon;
        if !eps.is_finite() || eps <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(eps));
        }
        Ok(())
    }
}
