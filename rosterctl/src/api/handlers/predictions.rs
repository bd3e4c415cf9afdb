//! Salary prediction handler.

use crate::AppState;
use crate::api::models::ScalarResponse;
use crate::api::models::predictions::PredictSalaryRequest;
use crate::errors::{Error, Result};
use axum::{Json, extract::State};

#[utoipa::path(
    post,
    path = "/predict_salary/",
    tag = "predictions",
    summary = "Predict a salary from department and hire date",
    request_body = PredictSalaryRequest,
    responses(
        (status = 200, description = "Point estimate", body = ScalarResponse),
        (status = 400, description = "Unknown department"),
        (status = 503, description = "No model artifact loaded")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn predict_salary(State(state): State<AppState>, Json(body): Json<PredictSalaryRequest>) -> Result<Json<ScalarResponse>> {
    let estimator = state.estimator.as_ref().ok_or(Error::ModelUnavailable)?;

    let data = estimator.estimate(&body.department, body.hire_date)?;

    Ok(Json(ScalarResponse { data }))
}
