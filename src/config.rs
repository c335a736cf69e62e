// src/config.rs
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::by_rune::WeightsByRune;
use crate::counts::CountWeights;
use crate::levenshtein::{DistanceMeasurer, Weights};
use crate::normalized::normalized;

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    InvalidCost { field: String, cost: f64 },
    OverridesInCountMode,
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(err) => write!(f, "invalid scorer config: {}", err),
            ConfigError::InvalidCost { field, cost } => {
                write!(f, "cost for {} must be finite and non-negative, got {}", field, cost)
            }
            ConfigError::OverridesInCountMode => {
                write!(f, "per-character overrides are only supported in path mode")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

/// How the weights turn into a distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Run the DP with the weights.
    #[default]
    Path,
    /// Weigh the edit counts of the unit-cost path.
    Count,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuneCost {
    pub chars: String,
    pub cost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairCost {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

/// Serializable description of a distance measurer.
///
/// ```json
/// {
///   "weights": { "insert": 1.0, "delete": 1.0, "replace": 0.5 },
///   "insert": [{ "chars": "aeiou", "cost": 0.2 }],
///   "replace": [{ "from": "0", "to": "oO", "cost": 0.1 }],
///   "normalize": true
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScorerConfig {
    pub weights: Weights,
    pub mode: CostMode,
    pub insert: Vec<RuneCost>,
    pub delete: Vec<RuneCost>,
    pub replace: Vec<PairCost>,
    pub normalize: bool,
}

fn check_cost(field: impl Into<String>, cost: f64) -> Result<(), ConfigError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCost { field: field.into(), cost })
    }
}

impl ScorerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ScorerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn has_overrides(&self) -> bool {
        !(self.insert.is_empty() && self.delete.is_empty() && self.replace.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|(name, cost)| ConfigError::InvalidCost { field: format!("weights.{}", name), cost })?;
        for o in &self.insert {
            check_cost(format!("insert {:?}", o.chars), o.cost)?;
        }
        for o in &self.delete {
            check_cost(format!("delete {:?}", o.chars), o.cost)?;
        }
        for o in &self.replace {
            check_cost(format!("replace {:?} -> {:?}", o.from, o.to), o.cost)?;
        }
        if self.mode == CostMode::Count && self.has_overrides() {
            return Err(ConfigError::OverridesInCountMode);
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Box<dyn DistanceMeasurer>, ConfigError> {
        self.validate()?;
        let base: Box<dyn DistanceMeasurer> = match self.mode {
            CostMode::Count => Box::new(CountWeights {
                insert: self.weights.insert,
                delete: self.weights.delete,
                replace: self.weights.replace,
            }),
            CostMode::Path if !self.has_overrides() => Box::new(self.weights),
            CostMode::Path => {
                let mut wr = WeightsByRune::new(self.weights);
                for o in &self.insert {
                    wr = wr.insert(&o.chars, o.cost);
                }
                for o in &self.delete {
                    wr = wr.delete(&o.chars, o.cost);
                }
                for o in &self.replace {
                    wr = wr.replace(&o.from, &o.to, o.cost);
                }
                Box::new(wr)
            }
        };
        log::debug!(
            "built {:?} scorer (overrides: {}, normalized: {})",
            self.mode,
            self.has_overrides(),
            self.normalize
        );
        if self.normalize {
            Ok(Box::new(normalized(base)))
        } else {
            Ok(base)
        }
    }
}
