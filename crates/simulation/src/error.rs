// ---------------------------------------------------------------------------
// ConversionError: error taxonomy for the conversion core
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors surfaced by parameter lookups, conversions, and time-series runs.
///
/// None of these are transient: a missing table entry or a bad input will fail
/// the same way on every retry, so callers should report them, not loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The parameter table is missing an entry or holds an out-of-range coefficient.
    Configuration { what: String },
    /// Caller-supplied value is out of range (non-positive mass, zero days, bad jitter...).
    InvalidInput(String),
    /// A configuration document could not be parsed.
    Config(String),
}

impl ConversionError {
    pub(crate) fn missing(key: impl Into<String>) -> Self {
        ConversionError::Configuration {
            what: format!("no entry for {} in parameter table", key.into()),
        }
    }

    pub(crate) fn bad_param(what: impl Into<String>) -> Self {
        ConversionError::Configuration { what: what.into() }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ConversionError::InvalidInput(msg.into())
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Configuration { what } => write!(f, "Configuration error: {what}"),
            ConversionError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            ConversionError::Config(msg) => write!(f, "Config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<serde_json::Error> for ConversionError {
    fn from(e: serde_json::Error) -> Self {
        ConversionError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_configuration() {
        let err = ConversionError::missing("Metal / Pyrolysis");
        let msg = format!("{err}");
        assert!(msg.contains("Configuration error"), "got: {msg}");
        assert!(msg.contains("Metal / Pyrolysis"), "got: {msg}");
    }

    #[test]
    fn test_display_bad_param() {
        let err = ConversionError::bad_param("Metal / Pyrolysis: efficiency 1.5 outside [0, 1]");
        assert_eq!(
            err.to_string(),
            "Configuration error: Metal / Pyrolysis: efficiency 1.5 outside [0, 1]"
        );
    }

    #[test]
    fn test_display_invalid_input() {
        let err = ConversionError::invalid("mass must be > 0");
        let msg = format!("{err}");
        assert!(msg.starts_with("Invalid input"), "got: {msg}");
        assert!(msg.contains("mass must be > 0"), "got: {msg}");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("should fail to parse");
        let err: ConversionError = parse_err.into();
        assert!(matches!(err, ConversionError::Config(_)));
    }

    #[test]
    fn test_is_error_trait() {
        let err = ConversionError::invalid("x");
        assert!(std::error::Error::source(&err).is_none());
    }
}
