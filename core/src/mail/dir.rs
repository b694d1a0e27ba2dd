use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{build_message, Email, Mailer, MailError};

/// Writes each message to `<dir>/<n>-<recipient>.eml` instead of sending it.
///
/// Messages go through the same builder as [`SmtpMailer`](super::SmtpMailer),
/// so address and attachment errors surface exactly as they would on a real run.
pub struct DirMailer {
    dir: PathBuf,
    written: AtomicUsize,
}

impl DirMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirMailer {
            dir: dir.into(),
            written: AtomicUsize::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Mailer for DirMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = build_message(email)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let n = self.written.fetch_add(1, Ordering::SeqCst) + 1;
        let recipient = email.to.first().map(String::as_str).unwrap_or("unknown");
        let path = self.dir.join(format!("{n:03}-{}.eml", file_safe(recipient)));

        tokio::fs::write(&path, message.formatted()).await?;
        tracing::info!(path = %path.display(), "wrote email");
        Ok(())
    }
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '@' | '.' | '-' | '_' | '+' => c,
            _ => '_',
        })
        .collect()
}
