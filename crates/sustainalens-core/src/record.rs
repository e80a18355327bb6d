use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScoringError;

/// Record as it arrives from a loader: every field may be absent.
///
/// Turned into a [`CompanyRecord`] with [`RawCompanyRecord::into_record`],
/// which reports the first missing required field as a schema error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCompanyRecord {
    pub company: Option<String>,
    pub sector: Option<String>,
    pub revenue_usd_b: Option<f64>,
    pub employees_k: Option<f64>,
    pub scope1_mt: Option<f64>,
    pub scope2_mt: Option<f64>,
    pub scope3_mt: Option<f64>,
    pub last_year_total_mt: Option<f64>,
    pub sbti: Option<bool>,
    pub target_year: Option<i32>,
    pub interim_2030_pct: Option<f64>,
    pub renewable_pct: Option<f64>,
    pub capex_green_pct: Option<f64>,
    pub cdp_score: Option<String>,
    pub year: Option<i32>,
}

/// One company in one reporting period.
///
/// The disclosure fields (`scope*_mt`, `renewable_pct`, `capex_green_pct`,
/// `cdp_score`) stay optional because their absence is scored, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company: String,
    pub sector: String,
    pub revenue_usd_b: f64,
    pub employees_k: f64,
    pub scope1_mt: Option<f64>,
    pub scope2_mt: Option<f64>,
    pub scope3_mt: Option<f64>,
    pub last_year_total_mt: f64,
    pub sbti: bool,
    pub target_year: i32,
    pub interim_2030_pct: f64,
    pub renewable_pct: Option<f64>,
    pub capex_green_pct: Option<f64>,
    pub cdp_score: Option<String>,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIdentity {
    pub index: usize,
    pub company: Option<String>,
    pub year: Option<i32>,
}

impl RecordIdentity {
    pub fn from_raw(index: usize, raw: &RawCompanyRecord) -> Self {
        Self {
            index,
            company: raw.company.clone(),
            year: raw.year,
        }
    }

    /// Best-effort identity for an element that did not deserialize.
    pub fn from_value(index: usize, value: &Value) -> Self {
        Self {
            index,
            company: value
                .get("company")
                .and_then(Value::as_str)
                .map(str::to_string),
            year: value
                .get("year")
                .and_then(Value::as_i64)
                .and_then(|y| i32::try_from(y).ok()),
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ScoringError> {
    value.ok_or(ScoringError::Schema { field })
}

impl RawCompanyRecord {
    pub fn into_record(self) -> Result<CompanyRecord, ScoringError> {
        Ok(CompanyRecord {
            company: required(self.company, "company")?,
            sector: required(self.sector, "sector")?,
            revenue_usd_b: required(self.revenue_usd_b, "revenue_usd_b")?,
            employees_k: required(self.employees_k, "employees_k")?,
            scope1_mt: self.scope1_mt,
            scope2_mt: self.scope2_mt,
            scope3_mt: self.scope3_mt,
            last_year_total_mt: required(self.last_year_total_mt, "last_year_total_mt")?,
            sbti: required(self.sbti, "sbti")?,
            target_year: required(self.target_year, "target_year")?,
            interim_2030_pct: required(self.interim_2030_pct, "interim_2030_pct")?,
            renewable_pct: self.renewable_pct,
            capex_green_pct: self.capex_green_pct,
            cdp_score: self.cdp_score,
            year: required(self.year, "year")?,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::validation(field, "must be a finite number"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ScoringError::validation(
            field,
            format!("must be greater than zero, got {value}"),
        ))
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<(), ScoringError> {
    let Some(v) = value else {
        return Ok(());
    };
    if finite(field, v)? < 0.0 {
        Err(ScoringError::validation(
            field,
            format!("must not be negative, got {v}"),
        ))
    } else {
        Ok(())
    }
}

impl CompanyRecord {
    /// Range checks applied before any ratio is taken.
    ///
    /// Zero revenue, headcount or baseline would make the intensity and
    /// year-over-year ratios unbounded, so such records are rejected.
    pub fn validate(&self) -> Result<(), ScoringError> {
        positive("revenue_usd_b", self.revenue_usd_b)?;
        positive("employees_k", self.employees_k)?;
        positive("last_year_total_mt", self.last_year_total_mt)?;
        finite("interim_2030_pct", self.interim_2030_pct)?;
        non_negative("scope1_mt", self.scope1_mt)?;
        non_negative("scope2_mt", self.scope2_mt)?;
        non_negative("scope3_mt", self.scope3_mt)?;
        non_negative("renewable_pct", self.renewable_pct)?;
        non_negative("capex_green_pct", self.capex_green_pct)?;
        Ok(())
    }

    pub fn renewable_pct_or_zero(&self) -> f64 {
        self.renewable_pct.unwrap_or(0.0)
    }

    pub fn capex_green_pct_or_zero(&self) -> f64 {
        self.capex_green_pct.unwrap_or(0.0)
    }
}
