use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schema::{ErrorBody, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

pub const UPSTREAM_UNAVAILABLE: &str =
    "Prediction service unavailable. Please check your prediction backend.";
pub const UPSTREAM_UNREACHABLE: &str =
    "Unable to connect to prediction service. Please verify the prediction API endpoint.";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Prediction service responded with {0}")]
    UpstreamStatus(StatusCode),

    #[error("Prediction service unreachable: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamStatus(_) | AppError::Connectivity(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-visible body, never carries upstream details.
    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::MalformedPayload => ErrorBody::new(self.to_string()),
            AppError::Validation(validation) => ErrorBody {
                message: validation.to_string(),
                errors: validation.errors.clone(),
            },
            AppError::UpstreamStatus(_) => ErrorBody::new(UPSTREAM_UNAVAILABLE),
            AppError::Connectivity(_) => ErrorBody::new(UPSTREAM_UNREACHABLE),
            AppError::InternalError(_) => ErrorBody::new(INTERNAL_ERROR),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Prediction request failed: {self}");
        } else {
            warn!("Prediction request rejected: {self}");
        }

        (status, Json(self.body())).into_response()
    }
}
