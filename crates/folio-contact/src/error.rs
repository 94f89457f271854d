//! Handler errors
//!
//! Every failure maps to a status code and a message that is safe to show
//! the visitor. Detail stays in the logs.

use crate::mail::MailError;
use crate::verify::VerifyError;

const GENERIC_FAILURE: &str = "Failed to send message. Please try again later.";

/// Which of the two emails failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    Notification,
    Confirmation,
}

impl std::fmt::Display for EmailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Notification => "notification",
            Self::Confirmation => "confirmation",
        })
    }
}

/// Contact handler errors
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("invalid submission: {0}")]
    Validation(String),

    #[error("captcha rejected (success: {success}, score: {score:?})")]
    VerificationFailed { success: bool, score: Option<f64> },

    #[error("malformed request body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Verification(#[from] VerifyError),

    #[error("failed to send {kind} email: {source}")]
    Dispatch {
        kind: EmailKind,
        #[source]
        source: MailError,
    },
}

impl ContactError {
    /// HTTP status for the response
    pub fn status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed(_) => 405,
            Self::Validation(_) | Self::VerificationFailed { .. } => 400,
            Self::Parse(_) | Self::Verification(_) | Self::Dispatch { .. } => 500,
        }
    }

    /// Message shown to the visitor
    pub fn public_message(&self) -> String {
        match self {
            Self::MethodNotAllowed(_) => "Method not allowed".to_string(),
            Self::Validation(message) => message.clone(),
            Self::VerificationFailed { .. } => "reCAPTCHA verification failed. Please try again.".to_string(),
            Self::Parse(_) | Self::Verification(_) | Self::Dispatch { .. } => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ContactError::MethodNotAllowed("GET".into()).status(), 405);
        assert_eq!(ContactError::Validation("Missing required fields".into()).status(), 400);
        assert_eq!(ContactError::VerificationFailed { success: true, score: Some(0.1) }.status(), 400);

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ContactError::from(parse);
        assert_eq!(err.status(), 500);
        assert!(err.is_server_error());
        assert_eq!(err.public_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = ContactError::Verification(VerifyError::Status(502));
        assert!(err.to_string().contains("502"));
        assert!(!err.public_message().contains("502"));
    }
}
