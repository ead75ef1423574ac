//! Error types for the fitquiz_core library.
//!
//! The size engine and the quiz state machine are total and never fail;
//! these errors only come from the edges (config files, reference tables,
//! parsing user-supplied keys).

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitquiz_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference data validation error
    #[error("Reference data error: {0}")]
    Reference(String),

    /// A key such as `male` or `flatter` did not name a known variant
    #[error("Unknown {kind}: '{value}'")]
    UnknownKey { kind: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Config("default age 5 lies outside [16, 100]".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: default age 5 lies outside [16, 100]"
        );

        let err = Error::UnknownKey {
            kind: "product type",
            value: "scarf".into(),
        };
        assert_eq!(err.to_string(), "Unknown product type: 'scarf'");
    }

    #[test]
    fn test_io_errors_convert() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/fitquiz/config.toml")?)
        }
        assert!(matches!(read_missing(), Err(Error::Io(_))));
    }
}
