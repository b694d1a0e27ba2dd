//! Email message types and builder.

use std::fmt;

use super::MailError;

/// A file attached to an email.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Attachment {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    pub fn png(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(filename, "image/png", content)
    }

    pub fn calendar(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(filename, "text/calendar; charset=utf-8; method=PUBLISH", content)
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.content.len())
            .finish()
    }
}

/// A complete email message ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Sender address.
    pub from: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Blind carbon copy recipients.
    pub bcc: Vec<String>,
    /// Email subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Attachments, in the order they appear in the message.
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Create a new email builder.
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }
}

/// Builder for constructing [`Email`] instances.
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from: Option<String>,
    to: Vec<String>,
    bcc: Vec<String>,
    subject: Option<String>,
    html: Option<String>,
    attachments: Vec<Attachment>,
}

impl EmailBuilder {
    /// Set the sender address (required).
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set HTML body content.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    /// Build the email, validating required fields.
    ///
    /// Addresses are only checked for presence here; they are parsed when the
    /// message is sent.
    pub fn build(self) -> Result<Email, MailError> {
        if self.to.is_empty() {
            return Err(MailError::Build("at least one recipient required".into()));
        }

        let from = self
            .from
            .ok_or_else(|| MailError::Build("from address required".into()))?;

        let subject = self
            .subject
            .ok_or_else(|| MailError::Build("subject required".into()))?;

        let html = self
            .html
            .ok_or_else(|| MailError::Build("html body required".into()))?;

        Ok(Email {
            from,
            to: self.to,
            bcc: self.bcc,
            subject,
            html,
            attachments: self.attachments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_html_email_with_attachments() {
        let email = Email::builder()
            .from("team@example.com")
            .to("speaker@example.com")
            .subject("Your sessions")
            .html("<p>Hi</p>")
            .attachment(Attachment::png("Talk QR code.png", vec![1, 2, 3]))
            .build()
            .unwrap();

        assert_eq!(email.from, "team@example.com");
        assert_eq!(email.to, vec!["speaker@example.com"]);
        assert_eq!(email.html, "<p>Hi</p>");
        assert_eq!(email.attachments.len(), 1);
        assert_eq!(email.attachments[0].content_type, "image/png");
    }

    #[test]
    fn build_requires_from() {
        let result = Email::builder().to("a@b.com").subject("Hi").html("<p>Body</p>").build();
        assert!(result.is_err());
    }

    #[test]
    fn build_requires_recipient() {
        let result = Email::builder().from("a@b.com").subject("Hi").html("<p>Body</p>").build();
        assert!(result.is_err());
    }

    #[test]
    fn build_requires_body() {
        let result = Email::builder().from("a@b.com").to("a@b.com").subject("Hi").build();
        assert!(result.is_err());
    }

    #[test]
    fn attachment_debug_hides_content() {
        let attachment = Attachment::png("qr.png", vec![0u8; 2048]);
        let debug = format!("{attachment:?}");
        assert!(debug.contains("len: 2048"));
        assert!(!debug.contains("0, 0"));
    }
}
