use serde::{Deserialize, Serialize};

use crate::emissions::EmissionTotals;
use crate::interp::{clamp01, ClampedLerp};
use crate::record::CompanyRecord;

const NET_ZERO_HORIZON: i32 = 2050;
const TARGET_YEAR_SPAN: f64 = 20.0;
const INTERIM_BASELINE_PCT: f64 = 60.0;
const SBTI_VALIDATED: f64 = 1.0;
const SBTI_ABSENT: f64 = 0.6;

const CAPEX_STRONG_PCT: f64 = 35.0;

const CDP_WEIGHT: f64 = 0.7;
const COMPLETENESS_WEIGHT: f64 = 0.3;

const AMBITION_GAP_PENALTY: f64 = 0.3;

/// Emission reduction in percent: 5% growth scores 0, a 30% cut scores 1.
pub const YOY_REDUCTION_CURVE: ClampedLerp = ClampedLerp::new((-5.0, 0.0), (30.0, 1.0));

/// Green capex share: 5% scores 0, 35% scores 1.
pub const CAPEX_ALIGNMENT_CURVE: ClampedLerp = ClampedLerp::new((5.0, 0.0), (35.0, 1.0));

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub ambition: f64,
    pub progress: f64,
    pub disclosure: f64,
    pub credibility: f64,
}

/// Target-setting ambition. Terms may exceed 1.0 individually; only the
/// blend is clamped.
pub fn ambition_score(sbti: bool, target_year: i32, interim_2030_pct: f64) -> f64 {
    let year_bonus =
        f64::from(NET_ZERO_HORIZON.saturating_sub(target_year).max(0)) / TARGET_YEAR_SPAN;
    let interim = interim_2030_pct / INTERIM_BASELINE_PCT;
    let sbti = if sbti { SBTI_VALIDATED } else { SBTI_ABSENT };

    clamp01(0.4 * year_bonus + 0.4 * interim + 0.2 * sbti)
}

/// Reductions (negative change) are rewarded.
pub fn yoy_norm(yoy_change_pct: f64) -> f64 {
    YOY_REDUCTION_CURVE.eval(-yoy_change_pct)
}

pub fn progress_score(yoy_change_pct: f64, renewable_pct: f64, capex_green_pct: f64) -> f64 {
    let yoy = yoy_norm(yoy_change_pct);
    let ren = renewable_pct / 100.0;
    let capex = capex_green_pct / CAPEX_STRONG_PCT;

    clamp01(0.5 * yoy + 0.3 * ren + 0.2 * capex)
}

/// Share of the six disclosure inputs (three scopes, renewables, green capex,
/// CDP label) present on the record.
///
/// A CDP label counts as present even when it is not one we can map.
pub fn disclosure_completeness(record: &CompanyRecord) -> f64 {
    let present = [
        record.scope1_mt.is_some(),
        record.scope2_mt.is_some(),
        record.scope3_mt.is_some(),
        record.renewable_pct.is_some(),
        record.capex_green_pct.is_some(),
        record.cdp_score.is_some(),
    ];
    let count = present.iter().filter(|p| **p).count();
    let count = u32::try_from(count).unwrap_or(0);
    f64::from(count) / 6.0
}

pub fn disclosure_score(cdp_norm: f64, completeness: f64) -> f64 {
    clamp01(CDP_WEIGHT * cdp_norm + COMPLETENESS_WEIGHT * completeness)
}

pub fn capex_alignment(capex_green_pct: f64) -> f64 {
    CAPEX_ALIGNMENT_CURVE.eval(capex_green_pct)
}

/// Needs the other three sub-scores of the same record.
///
/// Ambition running ahead of progress is penalised by 0.3 per unit of gap.
pub fn credibility_score(
    ambition: f64,
    progress: f64,
    disclosure: f64,
    capex_green_pct: f64,
) -> f64 {
    let align = capex_alignment(capex_green_pct);
    let penalty = (ambition - progress).max(0.0) * AMBITION_GAP_PENALTY;

    clamp01(0.5 * ambition + 0.3 * align + 0.2 * disclosure - penalty)
}

pub fn compute_subscores(
    record: &CompanyRecord,
    totals: &EmissionTotals,
    cdp_norm: f64,
) -> SubScores {
    let capex = record.capex_green_pct_or_zero();

    let ambition = ambition_score(record.sbti, record.target_year, record.interim_2030_pct);
    let progress = progress_score(totals.yoy_change_pct, record.renewable_pct_or_zero(), capex);
    let disclosure = disclosure_score(cdp_norm, disclosure_completeness(record));
    let credibility = credibility_score(ambition, progress, disclosure, capex);

    SubScores {
        ambition,
        progress,
        disclosure,
        credibility,
    }
}
