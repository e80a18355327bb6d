use serde::Serialize;

use crate::error::ConfigError;
use crate::interp::clamp01;
use crate::subscores::SubScores;

pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights of the net-zero readiness index. Always sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeWeights {
    ambition: f64,
    progress: f64,
    credibility: f64,
    disclosure: f64,
}

impl CompositeWeights {
    pub const DEFAULT: Self = Self {
        ambition: 0.25,
        progress: 0.30,
        credibility: 0.25,
        disclosure: 0.20,
    };

    pub fn new(
        ambition: f64,
        progress: f64,
        credibility: f64,
        disclosure: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("ambition", ambition),
            ("progress", progress),
            ("credibility", credibility),
            ("disclosure", disclosure),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        let weights = Self {
            ambition,
            progress,
            credibility,
            disclosure,
        };
        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(weights)
    }

    /// Parses `ambition,progress,credibility,disclosure`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let values = raw
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| ConfigError::Parse(format!("`{}`: {e}", part.trim())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [a, p, c, d] => Self::new(*a, *p, *c, *d),
            _ => Err(ConfigError::Parse(format!(
                "expected 4 comma-separated weights, got {}",
                values.len()
            ))),
        }
    }

    pub fn sum(&self) -> f64 {
        self.ambition + self.progress + self.credibility + self.disclosure
    }

    pub fn ambition(&self) -> f64 {
        self.ambition
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn credibility(&self) -> f64 {
        self.credibility
    }

    pub fn disclosure(&self) -> f64 {
        self.disclosure
    }
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn netzero_readiness(scores: &SubScores, weights: &CompositeWeights) -> f64 {
    clamp01(
        weights.ambition * scores.ambition
            + weights.progress * scores.progress
            + weights.credibility * scores.credibility
            + weights.disclosure * scores.disclosure,
    )
}
