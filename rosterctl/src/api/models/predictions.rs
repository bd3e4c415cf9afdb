//! API request models for salary prediction.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /predict_salary/`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PredictSalaryRequest {
    /// Department to predict for; validated against the trained model's
    /// own department mapping
    #[schema(example = "Sales")]
    pub department: String,
    /// Hypothetical hire timestamp; naive values are treated as UTC
    #[serde(deserialize_with = "super::flexible_timestamp::deserialize")]
    #[schema(value_type = String, example = "2023-01-01T00:00:00")]
    pub hire_date: DateTime<Utc>,
}
