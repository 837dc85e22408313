//! Relay Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay errors
///
/// None of the payloads are meant for the caller. Handlers return
/// [`RelayError::user_message`] and log the rest.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Server-side configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered 2xx with a body that is not JSON
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl RelayError {
    /// Get the message that is safe to hand back to a caller
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Server configuration error",
            Self::Transport(_) | Self::MalformedResponse(_) => "Failed to create invoice",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_detail() {
        let err = RelayError::Transport("connection refused (os error 111)".into());
        assert_eq!(err.user_message(), "Failed to create invoice");
        assert!(err.to_string().contains("os error 111"));
    }

    #[test]
    fn test_config_user_message() {
        let err = RelayError::Config("BITPAY_API_TOKEN not set".into());
        assert_eq!(err.user_message(), "Server configuration error");
    }
}
