//! # Prediction Form
//!
//! Terminal front end for the purchase predictor.
//!
//! ## Flow
//! - User fills age, salary and optionally an endpoint override
//! - Fields are checked with the shared `schema` rules before anything is sent
//! - `{ age, salary }` is posted to the proxy (or to the override endpoint)
//! - The result view switches between empty, loading, success and error
//!
//! ## Endpoint
//! The override only picks where the request goes. It is never part of the
//! body, so the prediction service sees the same payload either way.
//!
//! ## Timeouts
//! Client default is 15s, longer than the proxy's 10s outbound timeout, so a
//! hung model surfaces as the proxy's 502 message rather than a client timeout.

pub mod api;
pub mod controller;
pub mod form;
pub mod render;

pub use api::{CONNECTIVITY_MESSAGE, HttpPredictor, Predictor, SubmitError};
pub use controller::{Controller, ResultState, Submission};
pub use form::{FormFields, format_salary};
pub use render::FormView;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/predict";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
