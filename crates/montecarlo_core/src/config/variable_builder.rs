//! Variable Builder
//!
//! Fluent construction of [`VariableSpec`]s with typed parameter setters:
//!
//! ```ignore
//! VariableBuilder::normal("Labor").mean(120.0).std(20.0)
//! VariableBuilder::uniform("Permits").low(5.0).high(15.0)
//! VariableBuilder::triangular("Materials").left(40.0).mode(55.0).right(90.0)
//! VariableBuilder::custom("Delay", "Weibull").param("shape", 1.5)
//! ```
//!
//! Parameters left unset take the engine defaults when the run resolves them.

use crate::model::{DistributionKind, ParamValue, VariableSpec};

#[derive(Debug, Clone)]
pub struct VariableBuilder {
    spec: VariableSpec,
}

impl VariableBuilder {
    fn with_kind(name: impl Into<String>, kind: DistributionKind) -> Self {
        Self {
            spec: VariableSpec::new(name, kind),
        }
    }

    #[must_use]
    pub fn normal(name: impl Into<String>) -> Self {
        Self::with_kind(name, DistributionKind::Normal)
    }

    #[must_use]
    pub fn uniform(name: impl Into<String>) -> Self {
        Self::with_kind(name, DistributionKind::Uniform)
    }

    #[must_use]
    pub fn triangular(name: impl Into<String>) -> Self {
        Self::with_kind(name, DistributionKind::Triangular)
    }

    /// A variable with an arbitrary distribution tag
    #[must_use]
    pub fn custom(name: impl Into<String>, distribution: &str) -> Self {
        Self::with_kind(name, DistributionKind::from(distribution))
    }

    /// Set any parameter by name
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.spec.params.insert(key.to_string(), value.into());
        self
    }

    // =========================================================================
    // Normal
    // =========================================================================

    #[must_use]
    pub fn mean(self, mean: f64) -> Self {
        self.param("mean", mean)
    }

    #[must_use]
    pub fn std(self, std: f64) -> Self {
        self.param("std", std)
    }

    // =========================================================================
    // Uniform
    // =========================================================================

    #[must_use]
    pub fn low(self, low: f64) -> Self {
        self.param("low", low)
    }

    #[must_use]
    pub fn high(self, high: f64) -> Self {
        self.param("high", high)
    }

    // =========================================================================
    // Triangular
    // =========================================================================

    #[must_use]
    pub fn left(self, left: f64) -> Self {
        self.param("left", left)
    }

    #[must_use]
    pub fn mode(self, mode: f64) -> Self {
        self.param("mode", mode)
    }

    #[must_use]
    pub fn right(self, right: f64) -> Self {
        self.param("right", right)
    }

    #[must_use]
    pub fn build(self) -> VariableSpec {
        self.spec
    }
}

impl From<VariableBuilder> for VariableSpec {
    fn from(builder: VariableBuilder) -> Self {
        builder.build()
    }
}
