//! Email delivery.
//!
//! A thin abstraction over [lettre](https://lettre.rs). [`SmtpMailer`] relays
//! through the configured SMTP server; [`DirMailer`] writes `.eml` files for a
//! dry run.
//!
//! ```ignore
//! let mailer = SmtpMailer::from_config(&settings.email)?;
//!
//! let email = Email::builder()
//!     .from("team@example.com")
//!     .to("speaker@example.com")
//!     .subject("Your sessions")
//!     .html("<p>See you soon</p>")
//!     .attachment(Attachment::png("Talk QR code.png", png))
//!     .build()?;
//! mailer.send(&email).await?;
//! ```

mod dir;
mod mailer;
mod message;

pub use dir::DirMailer;
pub use mailer::{build_message, Mailer, SmtpMailer};
pub use message::{Attachment, Email, EmailBuilder};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("failed to write message: {0}")]
    Io(#[from] std::io::Error),
}
