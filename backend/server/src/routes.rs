use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use schema::validate;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::AppError::{self, MalformedPayload},
    state::AppState,
    upstream::forward_prediction,
};

pub const PREDICT_PATH: &str = "/api/predict";

pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let value: Value = serde_json::from_slice(&body).map_err(|_| MalformedPayload)?;
    let input = validate(&value)?;

    if let Some(api_url) = &input.api_url {
        debug!("Ignoring client endpoint override {api_url}");
    }

    let prediction = forward_prediction(&state, &input.payload()).await?;
    info!("Prediction served for age {}", input.age);

    Ok(Json(prediction))
}
