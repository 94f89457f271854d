//! Contact form handler
//!
//! Pipeline per request: method check, parse and sanitize, presence and
//! address checks, captcha verification, then the notification and the
//! confirmation emails in that order. `handle` is the only place an error
//! turns into a response.

use std::sync::Arc;

use crate::compose;
use crate::config::ContactConfig;
use crate::error::{ContactError, EmailKind};
use crate::mail::{Email, MailTransport};
use crate::request::{ContactRequest, ContactResponse, ContactSubmission};
use crate::sanitize::is_valid_email;
use crate::verify::{Verification, Verifier};

/// Handles contact form submissions
#[derive(Clone)]
pub struct ContactHandler {
    config: Arc<ContactConfig>,
    verifier: Arc<dyn Verifier>,
    transport: Arc<dyn MailTransport>,
}

impl ContactHandler {
    pub fn new(config: ContactConfig, verifier: Arc<dyn Verifier>, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config: Arc::new(config),
            verifier,
            transport,
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Handle one request. Never fails: every error becomes a response.
    pub async fn handle(&self, request: ContactRequest) -> ContactResponse {
        match self.process(&request).await {
            Ok(()) => {
                tracing::info!("contact message sent");
                ContactResponse::success()
            }
            Err(err) => {
                if err.is_server_error() {
                    tracing::error!(error = %err, "contact form failed");
                } else {
                    tracing::warn!(status = err.status(), error = %err, "contact form rejected");
                }
                ContactResponse::from(&err)
            }
        }
    }

    async fn process(&self, request: &ContactRequest) -> Result<(), ContactError> {
        if request.http_method != "POST" {
            return Err(ContactError::MethodNotAllowed(request.http_method.clone()));
        }

        let submission = ContactSubmission::parse(request.body.as_deref().unwrap_or_default())?;
        if !is_valid_email(&submission.email) {
            return Err(ContactError::Validation("Please enter a valid email address".to_string()));
        }

        let verification = self.verify(&submission.captcha_token).await?;
        if !verification.passes(self.config.min_score) {
            return Err(ContactError::VerificationFailed {
                success: verification.success,
                score: verification.score,
            });
        }
        tracing::debug!(score = ?verification.score, "captcha accepted");

        let notification = compose::notification(&self.config, &submission, verification.score);
        self.send(EmailKind::Notification, notification).await?;

        let confirmation = compose::confirmation(&self.config, &submission);
        self.send(EmailKind::Confirmation, confirmation).await
    }

    async fn verify(&self, token: &str) -> Result<Verification, ContactError> {
        let verifier = Arc::clone(&self.verifier);
        let token = token.to_string();
        Ok(smol::unblock(move || verifier.verify(&token)).await?)
    }

    async fn send(&self, kind: EmailKind, email: Email) -> Result<(), ContactError> {
        let transport = Arc::clone(&self.transport);
        smol::unblock(move || transport.send(&email))
            .await
            .map_err(|source| ContactError::Dispatch { kind, source })?;
        tracing::debug!(%kind, "email sent");
        Ok(())
    }
}

impl std::fmt::Debug for ContactHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactHandler").field("config", &self.config).finish_non_exhaustive()
    }
}
