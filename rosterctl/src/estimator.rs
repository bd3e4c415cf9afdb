//! Salary estimation from an offline-trained linear model.
//!
//! The model is a two-feature linear regression: the department encoded as
//! its ordinal index into the department list, and the hire date encoded as
//! a unix timestamp. The artifact persisted to disk carries the department
//! list that was in effect at training time, so predictions always encode
//! against the trained mapping rather than the live enumeration - retraining
//! is the only way a changed department list can alter encodings.
//!
//! The estimator is constructed once at startup and shared read-only. A
//! missing or unreadable artifact disables only the prediction endpoint;
//! CRUD keeps serving.

use crate::errors::{Error, Result};
use crate::types::DEPARTMENTS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Persisted regression artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryModel {
    /// Department list captured at training time; governs feature encoding.
    pub departments: Vec<String>,
    pub intercept: f64,
    pub department_coef: f64,
    pub hire_date_coef: f64,
    pub trained_at: DateTime<Utc>,
}

impl SalaryModel {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn predict(&self, department_index: f64, timestamp: f64) -> f64 {
        self.intercept + self.department_coef * department_index + self.hire_date_coef * timestamp
    }
}

/// A single (department, hire date, salary) training row.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub department: String,
    pub hire_date: DateTime<Utc>,
    pub salary: f64,
}

/// Fit a two-feature linear regression by ordinary least squares.
///
/// The normal equations are solved on mean-centered features (a 2x2 system
/// for the slopes, with the intercept recovered from the means), which keeps
/// the solve well conditioned despite the large timestamp feature. Samples
/// whose department is outside the fixed enumeration are skipped.
///
/// A feature with zero variance (e.g. every sample in the same department)
/// gets a zero coefficient rather than failing the fit.
pub fn fit(samples: &[TrainingSample]) -> anyhow::Result<SalaryModel> {
    let rows: Vec<(f64, f64, f64)> = samples
        .iter()
        .filter_map(|s| {
            let idx = DEPARTMENTS.iter().position(|d| *d == s.department)?;
            Some((idx as f64, s.hire_date.timestamp() as f64, s.salary))
        })
        .collect();

    if rows.len() < 3 {
        anyhow::bail!("need at least 3 usable training samples, got {}", rows.len());
    }

    let n = rows.len() as f64;
    let mean_x1 = rows.iter().map(|r| r.0).sum::<f64>() / n;
    let mean_x2 = rows.iter().map(|r| r.1).sum::<f64>() / n;
    let mean_y = rows.iter().map(|r| r.2).sum::<f64>() / n;

    let mut s11 = 0.0;
    let mut s12 = 0.0;
    let mut s22 = 0.0;
    let mut sy1 = 0.0;
    let mut sy2 = 0.0;
    for (x1, x2, y) in &rows {
        let d1 = x1 - mean_x1;
        let d2 = x2 - mean_x2;
        let dy = y - mean_y;
        s11 += d1 * d1;
        s12 += d1 * d2;
        s22 += d2 * d2;
        sy1 += d1 * dy;
        sy2 += d2 * dy;
    }

    let det = s11 * s22 - s12 * s12;
    let (c1, c2) = if det.abs() > f64::EPSILON * s11.max(s22).max(1.0) {
        ((s22 * sy1 - s12 * sy2) / det, (s11 * sy2 - s12 * sy1) / det)
    } else {
        // Degenerate covariance: fall back to independent single-feature fits
        let c1 = if s11 > 0.0 { sy1 / s11 } else { 0.0 };
        let c2 = if s22 > 0.0 { sy2 / s22 } else { 0.0 };
        (c1, c2)
    };

    Ok(SalaryModel {
        departments: DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
        intercept: mean_y - c1 * mean_x1 - c2 * mean_x2,
        department_coef: c1,
        hire_date_coef: c2,
        trained_at: Utc::now(),
    })
}

/// Loaded, read-only salary predictor.
#[derive(Debug, Clone)]
pub struct SalaryEstimator {
    model: SalaryModel,
}

impl SalaryEstimator {
    /// Load the artifact from disk. Failure here is fatal to the estimator
    /// only; callers decide whether the rest of the service keeps going.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let model = SalaryModel::load(path)
            .map_err(|e| anyhow::anyhow!("failed to load salary model from {}: {e}", path.display()))?;
        info!(
            departments = model.departments.len(),
            trained_at = %model.trained_at,
            "Loaded salary model from {}",
            path.display()
        );
        Ok(Self { model })
    }

    pub fn from_model(model: SalaryModel) -> Self {
        Self { model }
    }

    /// Produce a point estimate for a department and hire date.
    ///
    /// The department must belong to the artifact's own department list;
    /// anything else is a client validation error.
    pub fn estimate(&self, department: &str, hire_date: DateTime<Utc>) -> Result<f64> {
        let index = self
            .model
            .departments
            .iter()
            .position(|d| d == department)
            .ok_or_else(|| Error::bad_request(format!("{department} is not a valid department")))?;

        Ok(self.model.predict(index as f64, hire_date.timestamp() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(department: &str, year: i32, salary: f64) -> TrainingSample {
        TrainingSample {
            department: department.to_string(),
            hire_date: Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap(),
            salary,
        }
    }

    /// Generate samples that are exactly linear in (index, timestamp)
    fn linear_samples(intercept: f64, c1: f64, c2: f64) -> Vec<TrainingSample> {
        let mut samples = Vec::new();
        for (idx, dept) in DEPARTMENTS.iter().enumerate() {
            for year in [2015, 2018, 2021, 2024] {
                let hire_date = Utc.with_ymd_and_hms(year, 3, 15, 12, 0, 0).unwrap();
                let salary = intercept + c1 * idx as f64 + c2 * hire_date.timestamp() as f64;
                samples.push(TrainingSample {
                    department: dept.to_string(),
                    hire_date,
                    salary,
                });
            }
        }
        samples
    }

    #[test]
    fn test_fit_recovers_exact_linear_relationship() {
        let samples = linear_samples(20_000.0, 5_000.0, 1e-5);
        let model = fit(&samples).unwrap();
        let estimator = SalaryEstimator::from_model(model);

        // Predictions on the training points should match to high precision
        for s in &samples {
            let predicted = estimator.estimate(&s.department, s.hire_date).unwrap();
            let rel_err = (predicted - s.salary).abs() / s.salary;
            assert!(rel_err < 1e-6, "predicted {predicted}, wanted {}", s.salary);
        }
    }

    #[test]
    fn test_fit_requires_samples() {
        assert!(fit(&[]).is_err());
        assert!(fit(&[sample("Sales", 2020, 50_000.0)]).is_err());
    }

    #[test]
    fn test_fit_skips_unknown_departments() {
        let samples = vec![
            sample("Astrology", 2018, 10_000.0),
            sample("Astrology", 2019, 20_000.0),
            sample("Astrology", 2020, 30_000.0),
        ];
        assert!(fit(&samples).is_err());
    }

    #[test]
    fn test_fit_handles_single_department() {
        // Zero variance in the department feature must not blow up the solve
        let samples = vec![
            sample("Sales", 2016, 40_000.0),
            sample("Sales", 2019, 55_000.0),
            sample("Sales", 2022, 70_000.0),
        ];
        let model = fit(&samples).unwrap();
        assert_eq!(model.department_coef, 0.0);
        assert!(model.hire_date_coef.is_finite());
    }

    #[test]
    fn test_estimate_rejects_unknown_department() {
        let model = fit(&linear_samples(20_000.0, 100.0, 0.0)).unwrap();
        let estimator = SalaryEstimator::from_model(model);
        let err = estimator
            .estimate("Astrology", Utc::now())
            .expect_err("unknown department should be rejected");
        assert!(matches!(err, Error::BadRequest { .. }));
    }

    #[test]
    fn test_artifact_round_trip() {
        let model = fit(&linear_samples(30_000.0, 2_000.0, 1e-6)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        model.save(&path).unwrap();
        let loaded = SalaryModel::load(&path).unwrap();
        assert_eq!(model, loaded);
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        assert!(SalaryEstimator::load(Path::new("/nonexistent/model.json")).is_err());
    }
}
