use std::fmt;

use serde::{Deserialize, Serialize};

const HIGH_AMBITION: f64 = 0.7;
const HIGH_CAPEX_CEILING_PCT: f64 = 12.0;
const MEDIUM_AMBITION: f64 = 0.6;
const MEDIUM_PROGRESS_CEILING: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GreenwashRisk {
    Low,
    Medium,
    High,
}

impl GreenwashRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for GreenwashRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First matching tier wins.
///
/// High: ambitious targets, little green capex, emissions still rising.
/// Medium: ambitious targets without matching progress.
pub fn classify_greenwash_risk(
    ambition: f64,
    progress: f64,
    capex_green_pct: f64,
    yoy_change_pct: f64,
) -> GreenwashRisk {
    if ambition > HIGH_AMBITION && capex_green_pct < HIGH_CAPEX_CEILING_PCT && yoy_change_pct > 0.0
    {
        GreenwashRisk::High
    } else if ambition > MEDIUM_AMBITION && progress < MEDIUM_PROGRESS_CEILING {
        GreenwashRisk::Medium
    } else {
        GreenwashRisk::Low
    }
}
