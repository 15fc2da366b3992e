//! # Result Lifecycle
//!
//! ```text
//!  Empty ──submit──▶ Loading ──ok──▶ Success
//!    ▲                  │              │
//!    │                  └──err──▶ Error│
//!    └──────reset───────────────────┴──┘
//! ```
//!
//! - Invalid input never leaves the current state, the field errors are kept for inline display
//! - Submitting while `Loading` is refused, one request per controller at a time
//! - `Success` only moves on reset or on the next submission (straight to `Loading`)
use schema::{PredictionPayload, PredictionResult, ValidationError};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    api::{Predictor, SubmitError},
    form::FormFields,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultState {
    #[default]
    Empty,
    Loading,
    Success(PredictionResult),
    Error(String),
}

impl ResultState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResultState::Loading)
    }
}

/// Request prepared by [`Controller::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub endpoint: Url,
    pub payload: PredictionPayload,
}

pub struct Controller<P> {
    predictor: P,
    default_endpoint: Url,
    form: FormFields,
    state: ResultState,
    field_errors: Option<ValidationError>,
}

impl<P: Predictor> Controller<P> {
    pub fn new(predictor: P, default_endpoint: Url) -> Self {
        Self {
            predictor,
            default_endpoint,
            form: FormFields::default(),
            state: ResultState::Empty,
            field_errors: None,
        }
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn default_endpoint(&self) -> &Url {
        &self.default_endpoint
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormFields {
        &mut self.form
    }

    pub fn field_errors(&self) -> Option<&ValidationError> {
        self.field_errors.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    /// Validates the form and moves to `Loading`.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.can_submit() {
            return Err(SubmitError::InFlight);
        }

        let input = self.form.validate().map_err(|e| {
            debug!("Form rejected: {e}");
            self.field_errors = Some(e.clone());
            SubmitError::Invalid(e)
        })?;

        self.field_errors = None;
        self.state = ResultState::Loading;

        Ok(Submission {
            endpoint: input
                .api_url
                .clone()
                .unwrap_or_else(|| self.default_endpoint.clone()),
            payload: input.payload(),
        })
    }

    /// Settles a `Loading` state; outcomes arriving in any other state are dropped.
    pub fn complete(&mut self, outcome: Result<PredictionResult, SubmitError>) -> &ResultState {
        if !self.state.is_loading() {
            debug!("Dropping prediction outcome, nothing in flight");
            return &self.state;
        }

        self.state = match outcome {
            Ok(result) => {
                info!("Prediction received: {}", result.prediction);
                ResultState::Success(result)
            }
            Err(e) => {
                warn!("Prediction failed: {e}");
                ResultState::Error(e.user_message())
            }
        };

        &self.state
    }

    pub async fn send(&mut self, submission: Submission) -> &ResultState {
        let outcome = self
            .predictor
            .predict(&submission.endpoint, submission.payload)
            .await;

        self.complete(outcome)
    }

    pub async fn submit(&mut self) -> Result<&ResultState, SubmitError> {
        let submission = self.begin_submit()?;

        Ok(self.send(submission).await)
    }

    pub fn reset(&mut self) {
        self.state = ResultState::Empty;
        self.field_errors = None;
        self.form.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        future::{Future, ready},
        sync::Mutex,
    };

    use reqwest::StatusCode;
    use schema::{AGE_TOO_HIGH, Field, SALARY_NOT_POSITIVE};

    use super::*;
    use crate::api::CONNECTIVITY_MESSAGE;

    enum Reply {
        Label(&'static str),
        Status(StatusCode, &'static str),
        Garbled,
    }

    struct Scripted {
        reply: Reply,
        calls: Mutex<Vec<Submission>>,
    }

    impl Scripted {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl Predictor for Scripted {
        fn predict(
            &self,
            endpoint: &Url,
            payload: PredictionPayload,
        ) -> impl Future<Output = Result<PredictionResult, SubmitError>> + Send {
            self.calls.lock().unwrap().push(Submission {
                endpoint: endpoint.clone(),
                payload,
            });

            ready(match self.reply {
                Reply::Label(label) => Ok(PredictionResult {
                    prediction: label.to_string(),
                }),
                Reply::Status(status, message) => Err(SubmitError::Service {
                    status,
                    message: message.to_string(),
                }),
                Reply::Garbled => Err(SubmitError::Decode("missing field `prediction`".into())),
            })
        }
    }

    fn default_endpoint() -> Url {
        Url::parse("http://127.0.0.1:5000/api/predict").unwrap()
    }

    fn controller(reply: Reply) -> Controller<Scripted> {
        let mut controller = Controller::new(Scripted::new(reply), default_endpoint());
        controller.form_mut().set_age("25");
        controller.form_mut().set_salary("50,000");
        controller
    }

    #[tokio::test]
    async fn test_empty_loading_success() {
        let mut controller = controller(Reply::Label("High engagement likelihood"));
        assert_eq!(controller.state(), &ResultState::Empty);

        let submission = controller.begin_submit().unwrap();
        assert_eq!(controller.state(), &ResultState::Loading);
        assert!(!controller.can_submit());

        let state = controller.send(submission).await;
        assert_eq!(
            state,
            &ResultState::Success(PredictionResult {
                prediction: "High engagement likelihood".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_loading_error() {
        let mut controller = controller(Reply::Status(
            StatusCode::BAD_GATEWAY,
            "Prediction service unavailable. Please check your prediction backend.",
        ));

        let submission = controller.begin_submit().unwrap();
        assert!(controller.state().is_loading());

        let state = controller.send(submission).await;

        assert_eq!(
            state,
            &ResultState::Error(
                "Prediction service unavailable. Please check your prediction backend."
                    .to_string()
            )
        );
        assert_eq!(controller.predictor.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_reply_falls_back_to_connectivity() {
        let mut controller = controller(Reply::Garbled);

        let state = controller.submit().await.unwrap();

        assert_eq!(state, &ResultState::Error(CONNECTIVITY_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_blank_service_message_falls_back_to_connectivity() {
        let mut controller = controller(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR, "  "));

        let state = controller.submit().await.unwrap();

        assert_eq!(state, &ResultState::Error(CONNECTIVITY_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_submit_sends_only_age_and_salary() {
        let mut controller = controller(Reply::Label("Most likely will Purchase"));

        controller.submit().await.unwrap();

        let calls = controller.predictor.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[Submission {
                endpoint: default_endpoint(),
                payload: PredictionPayload {
                    age: 25,
                    salary: 50000.0
                },
            }]
        );
    }

    #[tokio::test]
    async fn test_endpoint_override() {
        let mut controller = controller(Reply::Label("Most likely will Purchase"));
        controller
            .form_mut()
            .set_api_url("http://localhost:8000/api/predict");

        let submission = controller.begin_submit().unwrap();
        assert_eq!(
            submission.endpoint.as_str(),
            "http://localhost:8000/api/predict"
        );
        assert_eq!(controller.default_endpoint(), &default_endpoint());
    }

    #[tokio::test]
    async fn test_invalid_input_blocks_submission() {
        let mut controller = controller(Reply::Label("unused"));
        controller.form_mut().set_age("101");
        controller.form_mut().set_salary("0");

        let error = controller.submit().await.unwrap_err();

        assert!(matches!(error, SubmitError::Invalid(_)));
        assert_eq!(controller.state(), &ResultState::Empty);
        assert!(controller.predictor.calls.lock().unwrap().is_empty());

        let field_errors = controller.field_errors().unwrap();
        assert_eq!(field_errors.message_for(Field::Age), Some(AGE_TOO_HIGH));
        assert_eq!(
            field_errors.message_for(Field::Salary),
            Some(SALARY_NOT_POSITIVE)
        );
    }

    #[tokio::test]
    async fn test_field_errors_cleared_on_valid_submit() {
        let mut controller = controller(Reply::Label("ok"));
        controller.form_mut().set_age("0");
        assert!(controller.submit().await.is_err());
        assert!(controller.field_errors().is_some());

        controller.form_mut().set_age("30");
        controller.submit().await.unwrap();
        assert!(controller.field_errors().is_none());
    }

    #[tokio::test]
    async fn test_submit_refused_while_loading() {
        let mut controller = controller(Reply::Label("ok"));

        controller.begin_submit().unwrap();
        assert!(matches!(
            controller.begin_submit(),
            Err(SubmitError::InFlight)
        ));
        assert!(controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_resubmit_from_success() {
        let mut controller = controller(Reply::Label("Most likely will Purchase"));
        controller.submit().await.unwrap();

        controller.begin_submit().unwrap();
        assert_eq!(controller.state(), &ResultState::Loading);
    }

    #[tokio::test]
    async fn test_reset_from_error() {
        let mut controller = controller(Reply::Status(StatusCode::BAD_GATEWAY, "down"));
        controller.submit().await.unwrap();
        assert_eq!(controller.state(), &ResultState::Error("down".to_string()));

        controller.reset();

        assert_eq!(controller.state(), &ResultState::Empty);
        assert!(controller.field_errors().is_none());
        assert_eq!(controller.form(), &FormFields::default());
    }

    #[tokio::test]
    async fn test_reset_from_success() {
        let mut controller = controller(Reply::Label("Most likely will Purchase"));
        controller.submit().await.unwrap();

        controller.reset();

        assert_eq!(controller.state(), &ResultState::Empty);
        assert_eq!(controller.form().age(), "");
        assert_eq!(controller.form().salary(), "");
    }

    #[test]
    fn test_late_outcome_dropped() {
        let mut controller = controller(Reply::Label("unused"));

        let state = controller.complete(Ok(PredictionResult {
            prediction: "stale".to_string(),
        }));

        assert_eq!(state, &ResultState::Empty);
    }
}
