use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::composite::netzero_readiness;
use crate::config::EngineConfig;
use crate::emissions::compute_totals;
use crate::error::{ErrorKind, ScoringError};
use crate::rating::cdp_norm;
use crate::record::{CompanyRecord, RawCompanyRecord, RecordIdentity};
use crate::risk::{classify_greenwash_risk, GreenwashRisk};
use crate::subscores::compute_subscores;

/// Input fields plus everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CompanyRecord,
    pub total_mt: f64,
    pub intensity_mt_per_billion: f64,
    pub intensity_t_per_employee: f64,
    pub yoy_change_mt: f64,
    pub yoy_change_pct: f64,
    pub cdp_norm: f64,
    pub ambition_score: f64,
    pub progress_score: f64,
    pub disclosure_score: f64,
    pub credibility_score: f64,
    pub netzero_readiness: f64,
    pub greenwash_risk: GreenwashRisk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub identity: RecordIdentity,
    pub kind: ErrorKind,
    pub field: String,
    pub message: String,
}

impl RecordFailure {
    pub fn new(identity: RecordIdentity, error: &ScoringError) -> Self {
        Self {
            identity,
            kind: error.kind(),
            field: error.field().to_string(),
            message: error.to_string(),
        }
    }
}

/// Scored records in input order, plus the records that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreReport {
    pub scored: Vec<ScoredRecord>,
    pub failures: Vec<RecordFailure>,
}

impl ScoreReport {
    fn from_outcomes(outcomes: Vec<Result<ScoredRecord, RecordFailure>>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(scored) => report.scored.push(scored),
                Err(failure) => report.failures.push(failure),
            }
        }
        report
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: EngineConfig,
}

impl MetricsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Scores a single record. Does not touch the input.
    pub fn score_record(&self, record: &CompanyRecord) -> Result<ScoredRecord, ScoringError> {
        record.validate()?;

        let totals = compute_totals(record)?;
        let cdp_norm = cdp_norm(record.cdp_score.as_deref());
        let scores = compute_subscores(record, &totals, cdp_norm);
        let readiness = netzero_readiness(&scores, &self.config.weights);
        let risk = classify_greenwash_risk(
            scores.ambition,
            scores.progress,
            record.capex_green_pct_or_zero(),
            totals.yoy_change_pct,
        );

        debug!(
            company = %record.company,
            year = record.year,
            readiness,
            risk = risk.as_str(),
            "record scored"
        );

        Ok(ScoredRecord {
            record: record.clone(),
            total_mt: totals.total_mt,
            intensity_mt_per_billion: totals.intensity_mt_per_billion,
            intensity_t_per_employee: totals.intensity_t_per_employee,
            yoy_change_mt: totals.yoy_change_mt,
            yoy_change_pct: totals.yoy_change_pct,
            cdp_norm,
            ambition_score: scores.ambition,
            progress_score: scores.progress,
            disclosure_score: scores.disclosure,
            credibility_score: scores.credibility,
            netzero_readiness: readiness,
            greenwash_risk: risk,
        })
    }

    fn score_raw(
        &self,
        index: usize,
        raw: &RawCompanyRecord,
    ) -> Result<ScoredRecord, RecordFailure> {
        raw.clone()
            .into_record()
            .and_then(|record| self.score_record(&record))
            .map_err(|err| reject(RecordIdentity::from_raw(index, raw), &err))
    }

    fn score_value(&self, index: usize, value: &Value) -> Result<ScoredRecord, RecordFailure> {
        let raw = RawCompanyRecord::deserialize(value).map_err(|err| {
            reject(
                RecordIdentity::from_value(index, value),
                &ScoringError::validation("record", err.to_string()),
            )
        })?;
        self.score_raw(index, &raw)
    }

    #[instrument(skip_all, fields(records = records.len()))]
    pub fn score(&self, records: &[RawCompanyRecord]) -> ScoreReport {
        info!(parallel = self.config.parallel, "scoring batch");
        let outcomes: Vec<_> = if self.config.parallel {
            records
                .par_iter()
                .enumerate()
                .map(|(index, raw)| self.score_raw(index, raw))
                .collect()
        } else {
            records
                .iter()
                .enumerate()
                .map(|(index, raw)| self.score_raw(index, raw))
                .collect()
        };
        finish(outcomes)
    }

    /// Like [`MetricsEngine::score`], but each element is deserialized on its
    /// own so a mistyped field only fails that element.
    #[instrument(skip_all, fields(records = values.len()))]
    pub fn score_values(&self, values: &[Value]) -> ScoreReport {
        info!(parallel = self.config.parallel, "scoring batch");
        let outcomes: Vec<_> = if self.config.parallel {
            values
                .par_iter()
                .enumerate()
                .map(|(index, value)| self.score_value(index, value))
                .collect()
        } else {
            values
                .iter()
                .enumerate()
                .map(|(index, value)| self.score_value(index, value))
                .collect()
        };
        finish(outcomes)
    }
}

fn reject(identity: RecordIdentity, err: &ScoringError) -> RecordFailure {
    warn!(
        index = identity.index,
        company = identity.company.as_deref().unwrap_or("<unknown>"),
        kind = ?err.kind(),
        error = %err,
        "record rejected"
    );
    RecordFailure::new(identity, err)
}

fn finish(outcomes: Vec<Result<ScoredRecord, RecordFailure>>) -> ScoreReport {
    let report = ScoreReport::from_outcomes(outcomes);
    info!(
        scored = report.scored.len(),
        failed = report.failures.len(),
        "batch scored"
    );
    report
}

/// Scores a batch with the default configuration.
pub fn score(records: &[RawCompanyRecord]) -> ScoreReport {
    MetricsEngine::default().score(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::CompositeWeights;
    use crate::record::tests::example_bank;
    use serde_json::json;

    fn raw(record: &CompanyRecord) -> RawCompanyRecord {
        serde_json::from_value(serde_json::to_value(record).expect("to value")).expect("raw")
    }

    fn steel() -> CompanyRecord {
        CompanyRecord {
            company: "Smokestack Steel".to_string(),
            sector: "Materials".to_string(),
            revenue_usd_b: 40.0,
            employees_k: 50.0,
            scope1_mt: Some(60.0),
            scope2_mt: Some(21.0),
            scope3_mt: Some(20.0),
            last_year_total_mt: 100.0,
            sbti: false,
            target_year: 2030,
            interim_2030_pct: 30.0,
            renewable_pct: Some(20.0),
            capex_green_pct: Some(10.0),
            cdp_score: Some("C".to_string()),
            year: 2024,
        }
    }

    #[test]
    fn example_bank_scenario() {
        let engine = MetricsEngine::default();
        let out = engine.score_record(&example_bank()).expect("scored");

        assert!((out.total_mt - 5.5).abs() < 1e-12);
        assert!((out.yoy_change_mt + 0.5).abs() < 1e-12);
        assert!((out.yoy_change_pct + 8.33).abs() < 0.01);
        assert_eq!(out.cdp_norm, 0.9);
        assert!(out.ambition_score > 0.6);
        assert!(out.netzero_readiness > 0.4 && out.netzero_readiness < 0.8);
        assert!((out.netzero_readiness - 0.661_071_428_571_428_5).abs() < 1e-9);
        assert_eq!(out.greenwash_risk, GreenwashRisk::Low);
    }

    #[test]
    fn rising_emissions_with_thin_capex_is_high_risk() {
        let engine = MetricsEngine::default();
        let record = steel();
        let out = engine.score_record(&record).expect("scored");
        assert!(out.ambition_score > 0.7);
        assert!(out.yoy_change_pct > 0.0);
        assert_eq!(out.greenwash_risk, GreenwashRisk::High);

        let mut record = steel();
        record.capex_green_pct = Some(20.0);
        let out = engine.score_record(&record).expect("scored");
        assert_ne!(out.greenwash_risk, GreenwashRisk::High);
        assert_eq!(out.greenwash_risk, GreenwashRisk::Medium);
    }

    #[test]
    fn unmapped_cdp_score_uses_default() {
        let mut record = example_bank();
        record.cdp_score = Some("F".to_string());
        let out = MetricsEngine::default().score_record(&record).expect("scored");
        assert_eq!(out.cdp_norm, 0.5);
    }

    #[test]
    fn scoring_is_deterministic_and_order_independent() {
        let engine = MetricsEngine::default();
        let records = vec![raw(&example_bank()), raw(&steel())];
        let reversed: Vec<_> = records.iter().rev().cloned().collect();

        let forward = engine.score(&records);
        let backward = engine.score(&reversed);
        assert_eq!(forward.scored.len(), 2);
        assert_eq!(forward.scored[0], backward.scored[1]);
        assert_eq!(forward.scored[1], backward.scored[0]);

        let alone = engine.score_record(&steel()).expect("scored");
        assert_eq!(forward.scored[1], alone);
        assert_eq!(
            forward.scored[1].netzero_readiness.to_bits(),
            alone.netzero_readiness.to_bits()
        );
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let records: Vec<_> = (0..64)
            .map(|i| {
                let mut record = if i % 2 == 0 { example_bank() } else { steel() };
                record.company = format!("company-{i}");
                record.renewable_pct = Some(f64::from(i));
                raw(&record)
            })
            .collect();

        let parallel = MetricsEngine::default().score(&records);
        let sequential = MetricsEngine::new(EngineConfig::sequential()).score(&records);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.scored[63].record.company, "company-63");
    }

    #[test]
    fn bad_records_are_reported_and_siblings_scored() {
        let mut zero_revenue = raw(&example_bank());
        zero_revenue.company = Some("Zero Revenue".to_string());
        zero_revenue.revenue_usd_b = Some(0.0);

        let mut no_sector = raw(&steel());
        no_sector.sector = None;

        let records = vec![raw(&example_bank()), zero_revenue, no_sector, raw(&steel())];
        let report = score(&records);

        assert_eq!(report.scored.len(), 2);
        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 2);

        let first = &report.failures[0];
        assert_eq!(first.identity.index, 1);
        assert_eq!(first.identity.company.as_deref(), Some("Zero Revenue"));
        assert_eq!(first.kind, ErrorKind::Validation);
        assert_eq!(first.field, "revenue_usd_b");

        let second = &report.failures[1];
        assert_eq!(second.identity.index, 2);
        assert_eq!(second.kind, ErrorKind::Schema);
        assert_eq!(second.field, "sector");
    }

    #[test]
    fn mistyped_value_fails_alone() {
        let mut bad = serde_json::to_value(example_bank()).expect("to value");
        bad["company"] = json!("Typo Corp");
        bad["target_year"] = json!("soon");
        let values = vec![serde_json::to_value(steel()).expect("to value"), bad];

        let report = MetricsEngine::default().score_values(&values);
        assert_eq!(report.scored.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].identity.company.as_deref(), Some("Typo Corp"));
        assert_eq!(report.failures[0].kind, ErrorKind::Validation);
    }

    #[test]
    fn custom_weights_drive_readiness() {
        let weights = CompositeWeights::new(1.0, 0.0, 0.0, 0.0).expect("weights");
        let engine = MetricsEngine::new(EngineConfig {
            weights,
            parallel: false,
        });
        let out = engine.score_record(&example_bank()).expect("scored");
        assert_eq!(out.netzero_readiness, out.ambition_score);
    }

    #[test]
    fn scored_record_serializes_flat() {
        let out = MetricsEngine::default()
            .score_record(&example_bank())
            .expect("scored");
        let value = serde_json::to_value(&out).expect("serialize");
        assert_eq!(value["company"], "ExampleBank");
        assert_eq!(value["cdp_score"], "A-");
        assert_eq!(value["greenwash_risk"], "Low");
        assert!(value.get("record").is_none());
    }

    #[test]
    fn overflowing_derived_values_are_rejected() {
        let mut tiny = serde_json::to_value(example_bank()).expect("to value");
        tiny["company"] = json!("Penny Holdings");
        tiny["revenue_usd_b"] = json!(1e-310);
        tiny["last_year_total_mt"] = json!(1e-310);

        let mut huge = serde_json::to_value(steel()).expect("to value");
        huge["company"] = json!("Overflow Mining");
        huge["scope1_mt"] = json!(1e308);
        huge["scope2_mt"] = json!(1e308);

        let values = vec![tiny, huge, serde_json::to_value(steel()).expect("to value")];
        let report = MetricsEngine::default().score_values(&values);

        assert_eq!(report.scored.len(), 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(
            report.failures[0].identity.company.as_deref(),
            Some("Penny Holdings")
        );
        assert_eq!(report.failures[0].field, "intensity_mt_per_billion");
        assert_eq!(
            report.failures[1].identity.company.as_deref(),
            Some("Overflow Mining")
        );
        assert_eq!(report.failures[1].field, "total_mt");

        let body = serde_json::to_string(&report).expect("serialize");
        assert!(!body.contains(":null"));
        for scored in &report.scored {
            assert!(scored.yoy_change_pct.is_finite());
            assert!(scored.intensity_mt_per_billion.is_finite());
        }
    }
}
