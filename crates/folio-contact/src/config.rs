//! Handler configuration
//!
//! Read from the environment once at startup.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `RECAPTCHA_SECRET_KEY` | yes | |
//! | `GMAIL_USER` | yes | |
//! | `GMAIL_APP_PASSWORD` | yes | |
//! | `RECAPTCHA_MIN_SCORE` | no | `0.5` |
//! | `SMTP_HOST` | no | `smtp.gmail.com` |
//! | `CONTACT_SITE_NAME` | no | `the website` |
//! | `CONTACT_OWNER_NAME` | no | `Folio` |
//! | `CONTACT_SITE_URL` | no | none (confirmation mail omits links) |

use std::fmt;

use url::Url;

/// Lowest accepted reCAPTCHA v3 score
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// A credential that never shows up in logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Contact handler configuration
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub recaptcha_secret: Secret,
    /// Mailbox that sends both emails and receives notifications
    pub gmail_user: String,
    pub gmail_app_password: Secret,
    pub min_score: f64,
    pub smtp_host: String,
    /// Shown in the notification footer
    pub site_name: String,
    /// Display name on the confirmation email
    pub owner_name: String,
    /// Base for links in the confirmation email
    pub site_url: Option<Url>,
}

impl ContactConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read through `lookup`; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let required = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let min_score = match get("RECAPTCHA_MIN_SCORE") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|s| (0.0..=1.0).contains(s))
                .ok_or(ConfigError::Invalid { var: "RECAPTCHA_MIN_SCORE", value })?,
            None => DEFAULT_MIN_SCORE,
        };
        let site_url = match get("CONTACT_SITE_URL") {
            Some(value) => Some(
                Url::parse(value.trim()).map_err(|_| ConfigError::Invalid { var: "CONTACT_SITE_URL", value })?,
            ),
            None => None,
        };

        Ok(Self {
            recaptcha_secret: Secret::new(required("RECAPTCHA_SECRET_KEY")?),
            gmail_user: required("GMAIL_USER")?,
            gmail_app_password: Secret::new(required("GMAIL_APP_PASSWORD")?),
            min_score,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            site_name: get("CONTACT_SITE_NAME").unwrap_or_else(|| "the website".to_string()),
            owner_name: get("CONTACT_OWNER_NAME").unwrap_or_else(|| "Folio".to_string()),
            site_url,
        })
    }
}
