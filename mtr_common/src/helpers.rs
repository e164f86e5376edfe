use chrono::Duration;
use thiserror::Error;

/// Parse a boolean flag from a string value, or return the given default value otherwise.
pub fn parse_boolean_flag(value: Option<String>, default: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return default,
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

#[derive(Debug, Clone, Error)]
#[error("'{value}' is not a valid number of {unit}")]
pub struct ParseDurationError {
    pub value: String,
    pub unit: &'static str,
}

/// Parses a non-negative whole number of minutes, e.g. `"115"`.
pub fn parse_minutes(value: &str) -> Result<Duration, ParseDurationError> {
    parse_whole_number(value, "minutes").map(Duration::minutes)
}

/// Parses a non-negative whole number of seconds, e.g. `"10"`.
pub fn parse_seconds(value: &str) -> Result<Duration, ParseDurationError> {
    parse_whole_number(value, "seconds").map(Duration::seconds)
}

fn parse_whole_number(value: &str, unit: &'static str) -> Result<i64, ParseDurationError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(ParseDurationError { value: value.to_string(), unit }),
    }
}
