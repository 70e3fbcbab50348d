use thiserror::Error;

/// A formatting parameter was given an out-of-range value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{option}' must not be negative (got {value})")]
    NegativeValue { option: &'static str, value: i32 },

    #[error("'textheight' must be positive (got {0})")]
    NonPositiveHeight(i32),
}
