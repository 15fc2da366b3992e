//! # Prediction Service
//!
//! Outbound leg of the proxy.
//!
//! The body is forwarded as `{ age, salary }` to `PREDICTION_API_URL` and the
//! JSON answer comes back untouched. The endpoint override a client may send
//! in `apiUrl` never reaches this module.
//!
//! ## Failure classes
//! - Reachable, non-2xx: [`AppError::UpstreamStatus`]
//! - Unreachable, reset, timed out: [`AppError::Connectivity`]
//! - 2xx with a body that is not JSON: [`AppError::InternalError`]
use schema::PredictionPayload;
use serde_json::Value;
use tracing::debug;

use crate::{error::AppError, state::AppState};

pub async fn forward_prediction(
    state: &AppState,
    payload: &PredictionPayload,
) -> Result<Value, AppError> {
    let url = state.config.prediction_url.clone();
    debug!("Forwarding prediction request to {url}");

    let response = state
        .http_client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::UpstreamStatus(status));
    }

    let bytes = response.bytes().await.map_err(classify)?;

    serde_json::from_slice(&bytes).map_err(|e| AppError::InternalError(Box::new(e)))
}

fn classify(e: reqwest::Error) -> AppError {
    if e.is_builder() {
        AppError::InternalError(Box::new(e))
    } else {
        AppError::Connectivity(e)
    }
}
