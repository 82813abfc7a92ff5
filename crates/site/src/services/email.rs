//! Email service for contact form notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use brand_mappers_core::Email;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// Display name on outgoing notifications.
const SENDER_NAME: &str = "Brand Mappers Contact";

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub business_name: Option<String>,
    pub message: String,
}

impl Inquiry {
    /// Submitter's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Message split into lines for HTML rendering.
    #[must_use]
    pub fn message_lines(&self) -> Vec<&str> {
        self.message.lines().collect()
    }

    /// Subject line of the notification.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("New Project Inquiry from {}", self.full_name())
    }
}

/// HTML template for the inquiry notification.
#[derive(Template)]
#[template(path = "email/inquiry.html")]
struct InquiryEmailHtml<'a> {
    inquiry: &'a Inquiry,
}

/// Plain text template for the inquiry notification.
#[derive(Template)]
#[template(path = "email/inquiry.txt")]
struct InquiryEmailText<'a> {
    inquiry: &'a Inquiry,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending inquiry notifications.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Notify the company inbox of a new inquiry. Replies go to the submitter.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built, rendered, or sent.
    pub async fn send_inquiry(&self, inbox: &Email, inquiry: &Inquiry) -> Result<(), EmailError> {
        let message = build_inquiry_message(&self.from_address, inbox, inquiry)?;
        self.mailer.send(message).await?;

        tracing::info!(to = %inbox, reply_to = %inquiry.email, "Inquiry notification sent");
        Ok(())
    }
}

/// Build the multipart notification without sending it.
fn build_inquiry_message(
    from_address: &str,
    inbox: &Email,
    inquiry: &Inquiry,
) -> Result<Message, EmailError> {
    let html = InquiryEmailHtml { inquiry }.render()?;
    let text = InquiryEmailText { inquiry }.render()?;

    let from: Mailbox = format!("{SENDER_NAME} <{from_address}>")
        .parse()
        .map_err(|_| EmailError::InvalidAddress(from_address.to_string()))?;
    let to: Mailbox = inbox
        .as_str()
        .parse()
        .map_err(|_| EmailError::InvalidAddress(inbox.to_string()))?;
    let reply_to: Mailbox = inquiry
        .email
        .as_str()
        .parse()
        .map_err(|_| EmailError::InvalidAddress(inquiry.email.to_string()))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .reply_to(reply_to)
        .subject(inquiry.subject())
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html),
                ),
        )?;
    Ok(message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inquiry() -> Inquiry {
        Inquiry {
            first_name: "Nour".to_string(),
            last_name: "Hassan".to_string(),
            email: "nour@client.co".parse().unwrap(),
            phone: None,
            business_name: Some("Client Co".to_string()),
            message: "Booth for Cairo ICT.\nThree days.".to_string(),
        }
    }

    #[test]
    fn test_subject_names_submitter() {
        assert_eq!(inquiry().subject(), "New Project Inquiry from Nour Hassan");
    }

    #[test]
    fn test_html_breaks_message_lines_and_skips_missing_phone() {
        let inquiry = inquiry();
        let html = InquiryEmailHtml { inquiry: &inquiry }.render().unwrap();
        assert!(html.contains("Booth for Cairo ICT.<br"));
        assert!(html.contains("Client Co"));
        assert!(!html.contains("Phone:"));
    }

    #[test]
    fn test_html_escapes_submitted_text() {
        let mut inquiry = inquiry();
        inquiry.message = "<script>alert(1)</script>".to_string();
        let html = InquiryEmailHtml { inquiry: &inquiry }.render().unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_message_sets_reply_to_submitter() {
        let inbox: Email = "info@brand-mappers.com".parse().unwrap();
        let message = build_inquiry_message("site@brand-mappers.com", &inbox, &inquiry()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Reply-To: nour@client.co"));
        assert!(raw.contains("To: info@brand-mappers.com"));
    }

    #[test]
    fn test_bad_sender_address_is_reported() {
        let inbox: Email = "info@brand-mappers.com".parse().unwrap();
        let err = build_inquiry_message("not an address", &inbox, &inquiry()).unwrap_err();
        assert!(matches!(err, EmailError::InvalidAddress(_)));
    }
}
