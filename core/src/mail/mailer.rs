//! Mailer trait and SMTP implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Email, MailError};
use crate::config::{EmailConfig, TlsMode};

/// Async email sending trait.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email.
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// SMTP-based mailer using lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    pub fn from_config(config: &EmailConfig) -> Result<Self, MailError> {
        let mut builder = match config.tls {
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            TlsMode::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
        };

        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: Arc::new(builder.build()),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

/// Build a lettre [`Message`] from our [`Email`] type.
///
/// Emails with attachments become `multipart/mixed`, the HTML body first and
/// one part per attachment after it.
pub fn build_message(email: &Email) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(mailbox(&email.from)?)
        .subject(&email.subject);

    for to in &email.to {
        builder = builder.to(mailbox(to)?);
    }

    for bcc in &email.bcc {
        builder = builder.bcc(mailbox(bcc)?);
    }

    let message = if email.attachments.is_empty() {
        builder.singlepart(SinglePart::html(email.html.clone()))
    } else {
        let mut mixed = MultiPart::mixed().singlepart(SinglePart::html(email.html.clone()));

        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(format!("{}: {e}", attachment.content_type)))?;
            mixed = mixed.singlepart(
                lettre::message::Attachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }

        builder.multipart(mixed)
    };

    message.map_err(|e| MailError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Attachment;

    fn email() -> crate::mail::EmailBuilder {
        Email::builder()
            .from("Team <team@example.com>")
            .to("speaker@example.com")
            .bcc("archive@example.com")
            .subject("Your sessions")
            .html("<p>See you soon</p>")
    }

    #[test]
    fn html_only_message() {
        let message = build_message(&email().build().unwrap()).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("To: speaker@example.com"));
        assert!(formatted.contains("Subject: Your sessions"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(!formatted.contains("multipart/mixed"));
    }

    #[test]
    fn attachments_make_mixed_multipart() {
        let email = email()
            .attachment(Attachment::png("Rust QR code.png", vec![137, 80, 78, 71]))
            .attachment(Attachment::calendar("Rust.ics", "BEGIN:VCALENDAR"))
            .build()
            .unwrap();

        let formatted = String::from_utf8(build_message(&email).unwrap().formatted()).unwrap();

        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("Content-Type: image/png"));
        assert!(formatted.contains("Content-Type: text/calendar"));
        assert!(formatted.contains("Content-Disposition: attachment"));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let email = Email::builder()
            .from("team@example.com")
            .to("")
            .subject("Hi")
            .html("<p>Hi</p>")
            .build()
            .unwrap();

        assert!(matches!(
            build_message(&email),
            Err(MailError::InvalidAddress(address)) if address.is_empty()
        ));
    }
}
