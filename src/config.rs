use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Engine limits. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum characters in a typed operand.
    pub max_digits: usize,
    /// Decimal places results are rounded to.
    pub decimal_places: u32,
    /// Completed calculations kept in history.
    pub history_limit: usize,
    /// Longest operand shown verbatim before the display shortens it.
    pub display_max_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_digits: 12,
            decimal_places: 8,
            history_limit: 50,
            display_max_chars: 12,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let at_least_one = "must be at least 1";
        if self.max_digits == 0 {
            return Err(ConfigError::Invalid {
                field: "max_digits",
                reason: at_least_one,
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "history_limit",
                reason: at_least_one,
            });
        }
        if self.display_max_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "display_max_chars",
                reason: at_least_one,
            });
        }
        // f64 carries about 15 significant decimal digits.
        if self.decimal_places > 15 {
            return Err(ConfigError::Invalid {
                field: "decimal_places",
                reason: "must be at most 15",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_json(r#"{"history_limit": 5}"#).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.max_digits, 12);
    }

    #[test]
    fn test_rejects_zero_limits() {
        let err = EngineConfig::from_json(r#"{"max_digits": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_digits", .. }));
        let err = EngineConfig::from_json(r#"{"decimal_places": 20}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "decimal_places", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EngineConfig::from_json(r#"{"max_digits": "twelve"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
