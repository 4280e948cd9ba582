//! Error taxonomy for the login flow
//!
//! Callers need to tell "never reached the PDU" apart from "the PDU said no",
//! so every failure mode gets its own variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoginError {
    /// A credential field was rejected before any request was made
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Connection refused, DNS failure, TLS handshake failure, timeout
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The device answered with something that is not a login response object
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The device answered, but with a non-zero result code
    #[error("PDU returned a non-zero result code {result_code}: {message}")]
    Authentication {
        message: String,
        result_code: i64,
        session_id: String,
    },
}

impl LoginError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Network(_) => "network",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Authentication { .. } => "authentication",
        }
    }
}

pub type Result<T> = std::result::Result<T, LoginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_display_carries_code_and_message() {
        let err = LoginError::Authentication {
            message: "Invalid user".to_string(),
            result_code: 1,
            session_id: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "PDU returned a non-zero result code 1: Invalid user"
        );
        assert_eq!(err.kind(), "authentication");
    }

    #[test]
    fn test_validation_display_names_field() {
        let err = LoginError::Validation {
            field: "username",
            reason: "must not be empty",
        };
        assert_eq!(err.to_string(), "invalid username: must not be empty");
        assert_eq!(err.kind(), "validation");
    }
}
