mod helpers;
mod secret;

pub use helpers::{parse_boolean_flag, parse_minutes, parse_seconds, ParseDurationError};
pub use secret::Secret;
