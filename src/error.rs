use thiserror::Error;

/// Marker shown on the display after a division by zero or an overflow.
pub const INFINITY_MARKER: &str = "∞";
/// Marker shown on the display after an operand fails to parse.
pub const ERROR_MARKER: &str = "ERROR";

/// Conditions raised while applying the pending operator.
///
/// None of these are faults: the engine resets itself after surfacing one,
/// and the caller only uses the variant to pick a message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid operand '{text}'")]
    InvalidInput { text: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFiniteResult,
}

impl CalcError {
    /// The text the display shows while this error is active.
    pub fn marker(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => ERROR_MARKER,
            CalcError::DivisionByZero | CalcError::NonFiniteResult => INFINITY_MARKER,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_per_variant() {
        assert_eq!(CalcError::DivisionByZero.marker(), "∞");
        assert_eq!(CalcError::NonFiniteResult.marker(), "∞");
        let invalid = CalcError::InvalidInput { text: "-".into() };
        assert_eq!(invalid.marker(), "ERROR");
    }

    #[test]
    fn test_display_messages() {
        let invalid = CalcError::InvalidInput { text: "1.2.3".into() };
        assert_eq!(invalid.to_string(), "invalid operand '1.2.3'");
        let err = ConfigError::Invalid {
            field: "max_digits",
            reason: "must be at least 1",
        };
        assert_eq!(err.to_string(), "invalid config: max_digits must be at least 1");
    }
}
