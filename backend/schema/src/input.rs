use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::{numeric::parse_number, payloads::PredictionPayload};

pub const AGE_NOT_A_NUMBER: &str = "Age must be a number";
pub const AGE_TOO_LOW: &str = "Age must be at least 1";
pub const AGE_TOO_HIGH: &str = "Age must be less than or equal to 100";
pub const SALARY_NOT_A_NUMBER: &str = "Salary must be a number";
pub const SALARY_NOT_POSITIVE: &str = "Salary must be greater than 0";
pub const INVALID_URL: &str = "Please enter a valid URL";
pub const UNSUPPORTED_URL_SCHEME: &str = "URL must start with http:// or https://";

const MIN_AGE: f64 = 1.0;
const MAX_AGE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Age,
    Salary,
    ApiUrl,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Salary => "salary",
            Field::ApiUrl => "apiUrl",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// One message per invalid field, in age, salary, apiUrl order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    pub age: u8,
    pub salary: f64,
    /// `None` selects the configured endpoint.
    pub api_url: Option<Url>,
}

impl PredictionInput {
    pub fn payload(&self) -> PredictionPayload {
        PredictionPayload {
            age: self.age,
            salary: self.salary,
        }
    }
}

/// Validates an arbitrary JSON value into a [`PredictionInput`].
pub fn validate(value: &Value) -> Result<PredictionInput, ValidationError> {
    let mut errors = Vec::new();

    let age = collect(&mut errors, Field::Age, check_age(value.get("age")));
    let salary = collect(&mut errors, Field::Salary, check_salary(value.get("salary")));
    let api_url = collect(&mut errors, Field::ApiUrl, check_api_url(value.get("apiUrl")));

    match (age, salary, api_url) {
        (Some(age), Some(salary), Some(api_url)) => Ok(PredictionInput {
            age,
            salary,
            api_url,
        }),
        _ => Err(ValidationError { errors }),
    }
}

fn collect<T>(
    errors: &mut Vec<FieldError>,
    field: Field,
    result: Result<T, &'static str>,
) -> Option<T> {
    result
        .map_err(|message| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        })
        .ok()
}

fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    };

    number.filter(|number| number.is_finite())
}

fn check_age(value: Option<&Value>) -> Result<u8, &'static str> {
    let age = coerce_number(value).ok_or(AGE_NOT_A_NUMBER)?.trunc();

    if age < MIN_AGE {
        return Err(AGE_TOO_LOW);
    }
    if age > MAX_AGE {
        return Err(AGE_TOO_HIGH);
    }

    Ok(age as u8)
}

fn check_salary(value: Option<&Value>) -> Result<f64, &'static str> {
    let salary = coerce_number(value).ok_or(SALARY_NOT_A_NUMBER)?;

    if salary <= 0.0 {
        return Err(SALARY_NOT_POSITIVE);
    }

    Ok(salary)
}

fn check_api_url(value: Option<&Value>) -> Result<Option<Url>, &'static str> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => text.trim(),
        Some(_) => return Err(INVALID_URL),
    };

    if text.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(text).map_err(|_| INVALID_URL)?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(Some(url)),
        "http" | "https" => Err(INVALID_URL),
        _ => Err(UNSUPPORTED_URL_SCHEME),
    }
}
