//! Run the contact handler on one function event.
//!
//! Usage: `folio-contact [EVENT_FILE]`
//!
//! Reads the event JSON from `EVENT_FILE` (or stdin), prints the response
//! JSON to stdout. Logs go to stderr; `RUST_LOG` controls the level.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use folio_contact::{ContactConfig, ContactHandler, ContactRequest, RecaptchaVerifier, SmtpTransport};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading event from {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading event from stdin")?;
            buf
        }
    };
    let request: ContactRequest = serde_json::from_str(&input).context("parsing function event")?;

    let config = ContactConfig::from_env().context("loading configuration")?;
    let verifier = RecaptchaVerifier::new(config.recaptcha_secret.clone()).context("creating verifier")?;
    let transport = SmtpTransport::from_config(&config).context("creating SMTP transport")?;
    let handler = ContactHandler::new(config, Arc::new(verifier), Arc::new(transport));

    let response = smol::block_on(handler.handle(request));
    tracing::info!(status = response.status_code, "request handled");
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
