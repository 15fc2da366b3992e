//! # Prediction Schema
//!
//! Shared shape and constraints of a prediction request.
//!
//! Both the terminal form (`client`) and the proxy route (`server`) validate
//! through [`validate`], so a hint shown next to a field and the proxy's 400
//! response can never disagree.
//!
//! ## Rules
//! - age: whole number in `[1, 100]`, numeric strings accepted, fractions truncated
//! - salary: number strictly greater than 0, grouping commas accepted in strings
//! - apiUrl: optional, empty means "use the configured endpoint", otherwise an absolute http(s) URL,
//!   other schemes get their own message
//!
//! ## Payloads
//! - To proxy/upstream: `{ "age": 25, "salary": 50000.0 }`
//! - From upstream/proxy: `{ "prediction": "Most likely will Purchase" }`
//! - Errors from proxy: `{ "message": "...", "errors": [{ "field": "age", "message": "..." }] }`

pub mod input;
pub mod numeric;
pub mod payloads;

pub use input::{
    AGE_NOT_A_NUMBER, AGE_TOO_HIGH, AGE_TOO_LOW, Field, FieldError, INVALID_URL, PredictionInput,
    SALARY_NOT_A_NUMBER, SALARY_NOT_POSITIVE, UNSUPPORTED_URL_SCHEME, ValidationError, validate,
};
pub use payloads::{ErrorBody, PredictionPayload, PredictionResult};
