//! reCAPTCHA token verification

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::Secret;

pub const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Verification transport errors
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("verification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("verification service answered HTTP {0}")]
    Status(u16),

    #[error("invalid verification endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Verdict from the verification service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Verification {
    pub success: bool,
    /// v3 score; absent for v2 tokens
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl Verification {
    /// Accepted when successful and not scored below `min_score`. Unscored
    /// (v2) verdicts pass on `success` alone.
    pub fn passes(&self, min_score: f64) -> bool {
        self.success && self.score.is_none_or(|s| s >= min_score)
    }
}

/// Checks a client token with the verification service
pub trait Verifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Verification, VerifyError>;
}

/// Google reCAPTCHA `siteverify` client
pub struct RecaptchaVerifier {
    client: reqwest::blocking::Client,
    endpoint: Url,
    secret: Secret,
}

impl RecaptchaVerifier {
    pub fn new(secret: Secret) -> Result<Self, VerifyError> {
        Self::with_endpoint(secret, Url::parse(SITEVERIFY_URL)?)
    }

    pub fn with_endpoint(secret: Secret, endpoint: Url) -> Result<Self, VerifyError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("folio-contact/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, endpoint, secret })
    }
}

impl Verifier for RecaptchaVerifier {
    fn verify(&self, token: &str) -> Result<Verification, VerifyError> {
        tracing::debug!(endpoint = %self.endpoint, "verifying captcha token");
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("secret", self.secret.expose()), ("response", token)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::Status(status.as_u16()));
        }
        Ok(response.json::<Verification>()?)
    }
}

impl std::fmt::Debug for RecaptchaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaVerifier")
            .field("endpoint", &self.endpoint.as_str())
            .field("secret", &self.secret)
            .finish()
    }
}
