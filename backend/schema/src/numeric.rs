use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap());
static LEADING_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Removes thousands grouping separators.
pub fn strip_separators(input: &str) -> String {
    input.replace(',', "")
}

/// Plain decimal text: optional sign, digits, optional fraction.
pub fn is_numeric(input: &str) -> bool {
    NUMERIC.is_match(input)
}

/// Integer prefix of typed text, `"25.7"` and `"25 years"` both give `25`.
pub fn leading_integer(input: &str) -> Option<i64> {
    LEADING_INTEGER
        .captures(input)
        .and_then(|captures| captures[1].parse().ok())
}

/// Parses decimal text once separators and surrounding whitespace are removed.
pub fn parse_number(input: &str) -> Option<f64> {
    let stripped = strip_separators(input.trim());

    if !is_numeric(&stripped) {
        return None;
    }

    stripped.parse().ok()
}
