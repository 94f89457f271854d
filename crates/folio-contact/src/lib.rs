//! Folio contact form backend
//!
//! Validates a submission, checks its reCAPTCHA token, emails the site owner
//! and sends the visitor a confirmation.
//!
//! # Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use folio_contact::{ContactConfig, ContactHandler, ContactRequest, RecaptchaVerifier, SmtpTransport};
//!
//! let config = ContactConfig::from_env()?;
//! let verifier = RecaptchaVerifier::new(config.recaptcha_secret.clone())?;
//! let transport = SmtpTransport::from_config(&config)?;
//! let handler = ContactHandler::new(config, Arc::new(verifier), Arc::new(transport));
//!
//! let response = smol::block_on(handler.handle(ContactRequest::post(body)));
//! ```

mod compose;
mod config;
mod error;
mod handler;
mod mail;
mod request;
mod sanitize;
mod verify;

pub use compose::{confirmation, notification};
pub use config::{ConfigError, ContactConfig, Secret, DEFAULT_MIN_SCORE, DEFAULT_SMTP_HOST};
pub use error::{ContactError, EmailKind};
pub use handler::ContactHandler;
pub use mail::{Address, Email, MailError, MailTransport, SmtpTransport};
pub use request::{ContactRequest, ContactResponse, ContactSubmission};
pub use sanitize::{is_valid_email, sanitize, MAX_FIELD_UNITS};
pub use verify::{RecaptchaVerifier, Verification, Verifier, VerifyError, SITEVERIFY_URL};
