//! Notification and confirmation emails

use crate::config::ContactConfig;
use crate::mail::{Address, Email};
use crate::request::ContactSubmission;

const NO_SUBJECT: &str = "No Subject";
const NOT_SPECIFIED: &str = "Not specified";

/// Email to the site owner with the full submission and its score
pub fn notification(config: &ContactConfig, submission: &ContactSubmission, score: Option<f64>) -> Email {
    let subject_line = submission.subject.as_deref().unwrap_or(NO_SUBJECT);
    let score = score.map_or_else(|| "n/a".to_string(), |s| s.to_string());

    let html = format!(
        r#"<h2>New Contact Form Submission</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Subject:</strong> {subject}</p>
<p><strong>Message:</strong></p>
<p style="white-space: pre-wrap;">{message}</p>
<hr>
<p style="color: #666; font-size: 12px;">reCAPTCHA Score: {score} | Sent from {site} contact form</p>
"#,
        name = submission.name,
        email = submission.email,
        subject = submission.subject.as_deref().unwrap_or(NOT_SPECIFIED),
        message = submission.message,
        site = config.site_name,
    );

    Email {
        from: Address::named("Contact Form", &config.gmail_user),
        to: Address::new(&config.gmail_user),
        reply_to: Some(Address::new(&submission.email)),
        subject: format!("New Contact: {subject_line} - from {}", submission.name),
        html,
    }
}

/// Thank-you email to the submitter echoing what they sent
pub fn confirmation(config: &ContactConfig, submission: &ContactSubmission) -> Email {
    let mut html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<h2 style="color: #7c3aed;">Thank you for reaching out, {name}!</h2>
<p>I've received your message and will get back to you as soon as possible, typically within 24-48 hours.</p>
<div style="background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
<h3 style="margin-top: 0;">Your message:</h3>
<p><strong>Subject:</strong> {subject}</p>
<p style="white-space: pre-wrap;">{message}</p>
</div>
"#,
        name = submission.name,
        subject = submission.subject.as_deref().unwrap_or(NOT_SPECIFIED),
        message = submission.message,
    );

    if let Some(site) = &config.site_url {
        let links = [("projects.html", "projects"), ("services.html", "services")];
        html.push_str("<p>In the meantime, feel free to check out my ");
        let parts: Vec<String> = links
            .iter()
            .filter_map(|(path, label)| site.join(path).ok().map(|url| format!(r#"<a href="{url}">{label}</a>"#)))
            .collect();
        html.push_str(&parts.join(" or "));
        html.push_str(".</p>\n");
    }

    html.push_str(&format!(
        "<p>Best regards,<br>\n<strong>{owner}</strong></p>\n\
         <hr style=\"border: none; border-top: 1px solid #eee; margin: 30px 0;\">\n\
         <p style=\"color: #999; font-size: 12px;\">This is an automated confirmation email. Please do not reply directly to this email.</p>\n\
         </div>\n",
        owner = config.owner_name,
    ));

    Email {
        from: Address::named(&config.owner_name, &config.gmail_user),
        to: Address::new(&submission.email),
        reply_to: None,
        subject: "Thank you for contacting me!".to_string(),
        html,
    }
}
