//! Prediction handlers

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::{AppState, AppResult};
use crate::logic::{self, HealthInput, ModelInfo, PredictionOutcome};

/// Classify one health record
pub async fn predict_cluster(
    State(state): State<AppState>,
    payload: Result<Json<HealthInput>, JsonRejection>,
) -> AppResult<Json<PredictionOutcome>> {
    let Json(input) = payload?;

    let outcome = logic::predict(&input, state.params)?;

    Ok(Json(outcome))
}

/// Describe the classifier and its accepted vocabularies
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(logic::model_info(state.params))
}
