//! Error types for termchat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for termchat operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, provider dispatch, and history persistence.
#[derive(Error, Debug)]
pub enum TermchatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Missing credentials for a provider; names the environment
    /// variable that was expected to hold the credential
    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(String),

    /// Chat history persistence errors
    #[error("History error: {0}")]
    History(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for termchat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = TermchatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = TermchatError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = TermchatError::Authentication("token expired".to_string());
        assert_eq!(error.to_string(), "Authentication error: token expired");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = TermchatError::MissingCredentials("OPENAI_API_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credentials: OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn test_history_error_display() {
        let error = TermchatError::History("write failed".to_string());
        assert_eq!(error.to_string(), "History error: write failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: TermchatError = io_error.into();
        assert!(matches!(error, TermchatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: TermchatError = json_error.into();
        assert!(matches!(error, TermchatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: TermchatError = yaml_error.into();
        assert!(matches!(error, TermchatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TermchatError>();
    }
}
