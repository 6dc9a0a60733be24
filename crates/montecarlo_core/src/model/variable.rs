//! User-defined random variables as they arrive from the outside world.
//!
//! A [`VariableSpec`] is loosely typed: the distribution is a tag and the
//! parameters are a name → value map that may hold numbers or numeric
//! strings. [`VariableSpec::resolve`] turns it into a typed [`Distribution`],
//! applying per-family defaults and validating the shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::distribution::Distribution;
use crate::error::{Result, SimulationError};

/// Distribution family tag attached to a variable.
///
/// Parsing is case-insensitive. Tags that name no known family are kept
/// verbatim in [`DistributionKind::Other`] and sample from Uniform(0, 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DistributionKind {
    Normal,
    Uniform,
    Triangular,
    Other(String),
}

impl DistributionKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::Uniform => "Uniform",
            Self::Triangular => "Triangular",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for DistributionKind {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "normal" => Self::Normal,
            "uniform" => Self::Uniform,
            "triangular" => Self::Triangular,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for DistributionKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<DistributionKind> for String {
    fn from(kind: DistributionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw parameter value: either a number or text that should parse as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl ParamValue {
    fn coerce(&self, variable: &str, param: &str) -> Result<f64> {
        let value = match self {
            ParamValue::Number(v) => *v,
            ParamValue::Text(text) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| SimulationError::NonNumericParam {
                        variable: variable.to_string(),
                        param: param.to_string(),
                        value: text.clone(),
                    })?
            }
        };

        if !value.is_finite() {
            return Err(SimulationError::NonFiniteParam {
                variable: variable.to_string(),
                param: param.to_string(),
                value,
            });
        }
        Ok(value)
    }
}

/// One random variable of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub distribution: DistributionKind,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl VariableSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, distribution: DistributionKind) -> Self {
        Self {
            name: name.into(),
            distribution,
            params: BTreeMap::new(),
        }
    }

    /// Set a parameter, replacing any previous value
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a numeric parameter, falling back to `default` when absent
    fn param_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.params.get(key) {
            Some(value) => value.coerce(&self.name, key),
            None => Ok(default),
        }
    }

    /// Resolve this spec into a typed, validated distribution.
    ///
    /// Missing parameters take the family defaults: Normal(50, 15),
    /// Uniform(0, 100), Triangular(10, 50, 90). Unknown families resolve to
    /// [`Distribution::Fallback`] and ignore their parameters.
    pub fn resolve(&self) -> Result<Distribution> {
        let distribution = match &self.distribution {
            DistributionKind::Normal => Distribution::Normal {
                mean: self.param_or("mean", 50.0)?,
                std: self.param_or("std", 15.0)?,
            },
            DistributionKind::Uniform => Distribution::Uniform {
                low: self.param_or("low", 0.0)?,
                high: self.param_or("high", 100.0)?,
            },
            DistributionKind::Triangular => Distribution::Triangular {
                left: self.param_or("left", 10.0)?,
                mode: self.param_or("mode", 50.0)?,
                right: self.param_or("right", 90.0)?,
            },
            DistributionKind::Other(_) => Distribution::Fallback,
        };

        distribution
            .validate()
            .map_err(|reason| SimulationError::InvalidDistribution {
                variable: self.name.clone(),
                distribution: distribution.family(),
                reason,
            })?;

        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!(DistributionKind::from("Normal"), DistributionKind::Normal);
        assert_eq!(DistributionKind::from("normal"), DistributionKind::Normal);
        assert_eq!(DistributionKind::from(" UNIFORM "), DistributionKind::Uniform);
        assert_eq!(
            DistributionKind::from("Beta"),
            DistributionKind::Other("Beta".to_string())
        );
    }

    #[test]
    fn test_defaults_applied() {
        let spec = VariableSpec::new("x", DistributionKind::Triangular);
        assert_eq!(
            spec.resolve().unwrap(),
            Distribution::Triangular {
                left: 10.0,
                mode: 50.0,
                right: 90.0
            }
        );

        let spec = VariableSpec::new("y", DistributionKind::Normal).with_param("mean", 3.0);
        assert_eq!(
            spec.resolve().unwrap(),
            Distribution::Normal {
                mean: 3.0,
                std: 15.0
            }
        );
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let spec = VariableSpec::new("x", DistributionKind::Uniform)
            .with_param("low", " 5 ")
            .with_param("high", "7.5");
        assert_eq!(
            spec.resolve().unwrap(),
            Distribution::Uniform {
                low: 5.0,
                high: 7.5
            }
        );
    }

    #[test]
    fn test_non_numeric_param_rejected() {
        let spec = VariableSpec::new("x", DistributionKind::Normal).with_param("std", "wide");
        let err = spec.resolve().unwrap_err();
        assert_eq!(
            err,
            SimulationError::NonNumericParam {
                variable: "x".to_string(),
                param: "std".to_string(),
                value: "wide".to_string(),
            }
        );
    }

    #[test]
    fn test_non_finite_param_rejected() {
        let spec = VariableSpec::new("x", DistributionKind::Normal).with_param("mean", "inf");
        assert!(matches!(
            spec.resolve(),
            Err(SimulationError::NonFiniteParam { .. })
        ));
    }

    #[test]
    fn test_unknown_family_ignores_params() {
        let spec = VariableSpec::new("x", DistributionKind::from("weibull"))
            .with_param("shape", "not a number");
        assert_eq!(spec.resolve().unwrap(), Distribution::Fallback);
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{"name": "cost", "distribution": "normal", "params": {"mean": 10, "std": "2"}}"#;
        let spec: VariableSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.distribution, DistributionKind::Normal);
        assert_eq!(
            spec.resolve().unwrap(),
            Distribution::Normal {
                mean: 10.0,
                std: 2.0
            }
        );
    }
}
