use thiserror::Error;

/// Unified error type for the devmock library
#[derive(Debug, Error)]
pub enum DevmockError {
    /// The caller tried to register a payload type the registry refuses to store
    #[error("Forbidden override payload {type_name}: {reason}")]
    ForbiddenPayload {
        type_name: &'static str,
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },
}

impl DevmockError {
    /// Create a forbidden-payload error for the given type name
    pub fn forbidden_payload<S: Into<String>>(type_name: &'static str, reason: S) -> Self {
        Self::ForbiddenPayload {
            type_name,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error naming the offending field
    pub fn configuration_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Result type alias for devmock operations
pub type Result<T> = std::result::Result<T, DevmockError>;
