//! Outbound email
//!
//! [`Email`] is a plain value; [`MailTransport`] delivers it. The SMTP
//! transport speaks to Gmail's relay with an app password.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, Transport};

use crate::config::ContactConfig;

/// Mail errors
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sender or recipient with an optional display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub name: Option<String>,
    pub email: String,
}

impl Address {
    pub fn new(email: impl Into<String>) -> Self {
        Self { name: None, email: email.into() }
    }

    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    fn to_mailbox(&self) -> Result<Mailbox, MailError> {
        let email = self.email.parse().map_err(|source| MailError::InvalidAddress {
            address: self.email.clone(),
            source,
        })?;
        Ok(Mailbox::new(self.name.clone(), email))
    }
}

/// An HTML email
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub from: Address,
    pub to: Address,
    pub reply_to: Option<Address>,
    pub subject: String,
    pub html: String,
}

impl Email {
    /// Convert to a lettre message
    pub fn to_message(&self) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.to_mailbox()?)
            .to(self.to.to_mailbox()?)
            .subject(&self.subject)
            .header(ContentType::TEXT_HTML);
        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.to_mailbox()?);
        }
        Ok(builder.body(self.html.clone())?)
    }
}

/// Delivers emails
pub trait MailTransport: Send + Sync {
    fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// Authenticated SMTP relay (implicit TLS)
pub struct SmtpTransport {
    inner: lettre::SmtpTransport,
    host: String,
}

impl SmtpTransport {
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, MailError> {
        let inner = lettre::SmtpTransport::relay(host)?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();
        Ok(Self { inner, host: host.to_string() })
    }

    /// Gmail relay for the configured mailbox
    pub fn from_config(config: &ContactConfig) -> Result<Self, MailError> {
        Self::new(&config.smtp_host, &config.gmail_user, config.gmail_app_password.expose())
    }
}

impl MailTransport for SmtpTransport {
    fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = email.to_message()?;
        let response = self.inner.send(&message)?;
        tracing::debug!(host = %self.host, code = %response.code(), "smtp accepted message");
        Ok(())
    }
}

impl std::fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpTransport").field("host", &self.host).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            from: Address::named("Contact Form", "owner@example.com"),
            to: Address::new("owner@example.com"),
            reply_to: Some(Address::new("ada@example.com")),
            subject: "New Contact: Hello - from Ada".into(),
            html: "<p>Hi</p>".into(),
        }
    }

    #[test]
    fn test_message_headers() {
        let message = email().to_message().unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        let header = |name: &str| raw.lines().find(|l| l.starts_with(name)).unwrap_or_default().to_string();
        assert!(header("From:").contains("Contact Form"));
        assert!(header("From:").contains("<owner@example.com>"));
        assert!(header("Reply-To:").contains("ada@example.com"));
        assert!(raw.contains("Subject: New Contact: Hello - from Ada"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
    }

    #[test]
    fn test_invalid_address() {
        let mut bad = email();
        bad.to = Address::new("not an address");
        let err = bad.to_message().unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress { ref address, .. } if address == "not an address"));
    }
}
