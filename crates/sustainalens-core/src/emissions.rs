use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::record::CompanyRecord;

const TONS_PER_MT: f64 = 1e6;
const EMPLOYEES_PER_K: f64 = 1e3;

/// Absolute and normalised emission figures for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionTotals {
    pub total_mt: f64,
    pub intensity_mt_per_billion: f64,
    pub intensity_t_per_employee: f64,
    pub yoy_change_mt: f64,
    pub yoy_change_pct: f64,
}

fn bounded(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::validation(
            field,
            "derived value is not finite; inputs are out of range",
        ))
    }
}

/// Undisclosed scopes contribute nothing to the total.
///
/// Callers must have run [`CompanyRecord::validate`]; the divisors are
/// assumed strictly positive. Inputs that are finite but extreme (a
/// subnormal divisor, scopes near `f64::MAX`) still overflow, so every
/// derived figure is checked before it is returned.
pub fn compute_totals(record: &CompanyRecord) -> Result<EmissionTotals, ScoringError> {
    let total_mt = bounded(
        "total_mt",
        record.scope1_mt.unwrap_or(0.0)
            + record.scope2_mt.unwrap_or(0.0)
            + record.scope3_mt.unwrap_or(0.0),
    )?;
    let yoy_change_mt = bounded("yoy_change_mt", total_mt - record.last_year_total_mt)?;

    Ok(EmissionTotals {
        total_mt,
        intensity_mt_per_billion: bounded(
            "intensity_mt_per_billion",
            total_mt / record.revenue_usd_b,
        )?,
        intensity_t_per_employee: bounded(
            "intensity_t_per_employee",
            (total_mt * TONS_PER_MT) / (record.employees_k * EMPLOYEES_PER_K),
        )?,
        yoy_change_mt,
        yoy_change_pct: bounded(
            "yoy_change_pct",
            (yoy_change_mt / record.last_year_total_mt) * 100.0,
        )?,
    })
}
