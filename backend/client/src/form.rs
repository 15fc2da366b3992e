use schema::{
    PredictionInput, ValidationError,
    numeric::{is_numeric, leading_integer, strip_separators},
    validate,
};
use serde_json::{Value, json};

/// Raw text of the three form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    age: String,
    salary: String,
    api_url: String,
}

impl FormFields {
    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Keeps the integer typed so far, anything else empties the field.
    pub fn set_age(&mut self, input: &str) {
        self.age = leading_integer(input)
            .map(|age| age.to_string())
            .unwrap_or_default();
    }

    /// Stores the salary without grouping separators, non-numeric text empties the field.
    pub fn set_salary(&mut self, input: &str) {
        self.salary = Some(strip_separators(input.trim()))
            .filter(|salary| is_numeric(salary))
            .unwrap_or_default();
    }

    pub fn set_api_url(&mut self, input: &str) {
        self.api_url = input.trim().to_string();
    }

    pub fn salary_display(&self) -> String {
        format_salary(&self.salary)
    }

    pub fn validate(&self) -> Result<PredictionInput, ValidationError> {
        validate(&json!({
            "age": text_or_null(&self.age),
            "salary": text_or_null(&self.salary),
            "apiUrl": self.api_url,
        }))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn text_or_null(text: &str) -> Value {
    if text.is_empty() {
        Value::Null
    } else {
        Value::String(text.to_string())
    }
}

/// Groups the integer digits of a numeric string by thousands.
///
/// Text that is not numeric once separators are stripped is returned as is,
/// so `strip_separators(&format_salary(s)) == s` for any plain numeric `s`.
pub fn format_salary(input: &str) -> String {
    let stripped = strip_separators(input);

    if !is_numeric(&stripped) {
        return input.to_string();
    }

    let (sign, unsigned) = match stripped.strip_prefix(['-', '+']) {
        Some(rest) => (&stripped[..1], rest),
        None => ("", stripped.as_str()),
    };
    let (digits, fraction) = match unsigned.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(stripped.len() + digits.len() / 3);
    grouped.push_str(sign);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}
