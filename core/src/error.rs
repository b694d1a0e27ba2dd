use std::path::PathBuf;

use crate::config::ConfigError;
use crate::mail::MailError;

/// Every failure aborts the run; nothing is recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {what} JSON: {source}")]
    Deserialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch schedule: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("speaker not found: {uid}")]
    SpeakerNotFound { uid: String },

    #[error("no session found for talk `{title}`")]
    SessionNotFound { title: String },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("date formatting error: {0}")]
    Format(#[from] time::error::Format),

    #[error("QR code error: {0}")]
    QrCode(String),

    #[error(transparent)]
    Mail(#[from] MailError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
