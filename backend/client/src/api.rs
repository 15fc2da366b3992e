use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode};
use schema::{ErrorBody, PredictionPayload, PredictionResult, ValidationError};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to connect to the prediction service. Please check your API endpoint and try again.";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A prediction is already in progress")]
    InFlight,

    #[error("{status}: {message}")]
    Service { status: StatusCode, message: String },

    #[error("Could not reach prediction endpoint: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("Unexpected prediction response: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SubmitError {
    /// Text shown in the error view.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            SubmitError::Invalid(_) | SubmitError::InFlight => self.to_string(),
            _ => CONNECTIVITY_MESSAGE.to_string(),
        }
    }
}

/// Remote half of a submission.
pub trait Predictor {
    fn predict(
        &self,
        endpoint: &Url,
        payload: PredictionPayload,
    ) -> impl Future<Output = Result<PredictionResult, SubmitError>> + Send;
}

pub struct HttpPredictor {
    client: Client,
}

impl HttpPredictor {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

impl Predictor for HttpPredictor {
    fn predict(
        &self,
        endpoint: &Url,
        payload: PredictionPayload,
    ) -> impl Future<Output = Result<PredictionResult, SubmitError>> + Send {
        debug!("Submitting {payload:?} to {endpoint}");
        let request = self.client.post(endpoint.clone()).json(&payload);

        async move {
            let response = request.send().await.map_err(SubmitError::Connect)?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&text)
                    .map(|body| body.message)
                    .unwrap_or_else(|_| text.trim().to_string());

                return Err(SubmitError::Service { status, message });
            }

            response
                .json()
                .await
                .map_err(|e| SubmitError::Decode(Box::new(e)))
        }
    }
}
