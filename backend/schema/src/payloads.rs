use serde::{Deserialize, Serialize};

use crate::input::FieldError;

/// Body sent to the proxy and forwarded upstream as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub age: u8,
    pub salary: f64,
}

/// Opaque label produced by the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::input::Field;

    #[test]
    fn test_payload_carries_only_age_and_salary() {
        let payload = PredictionPayload {
            age: 25,
            salary: 50000.0,
        };

        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({ "age": 25, "salary": 50000.0 })
        );
    }

    #[test]
    fn test_error_body_omits_empty_errors() {
        let body = ErrorBody::new("Internal server error");

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "message": "Internal server error" })
        );
    }

    #[test]
    fn test_error_body_reads_field_errors() {
        let body: ErrorBody = serde_json::from_value(json!({
            "message": "Age must be at least 1",
            "errors": [{ "field": "age", "message": "Age must be at least 1" }]
        }))
        .unwrap();

        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].field, Field::Age);
    }

    #[test]
    fn test_result_ignores_extra_fields() {
        let result: PredictionResult = serde_json::from_value(json!({
            "prediction": "Most likely will Purchase",
            "confidence": 0.8
        }))
        .unwrap();

        assert_eq!(result.prediction, "Most likely will Purchase");
    }
}
