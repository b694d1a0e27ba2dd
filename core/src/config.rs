//! Run configuration.
//!
//! Settings are read once at process entry from an optional config file and
//! the environment, then passed by reference to each component. Nested keys
//! use `__` in environment variable names:
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `SPEAKER_NOTIFY_INPUT__EVENT_PATH` | Yes | Path to the event JSON file |
//! | `SPEAKER_NOTIFY_INPUT__SCHEDULE_URL` | Yes | URL of the schedule JSON |
//! | `SPEAKER_NOTIFY_EMAIL__TEMPLATE_PATH` | Yes | Path to the email body template |
//! | `SPEAKER_NOTIFY_EMAIL__HOST` | Yes | SMTP server hostname |
//! | `SPEAKER_NOTIFY_EMAIL__PORT` | No | Port (default: 587) |
//! | `SPEAKER_NOTIFY_EMAIL__USERNAME` | No | Username for authentication |
//! | `SPEAKER_NOTIFY_EMAIL__PASSWORD` | No | Password for authentication |
//! | `SPEAKER_NOTIFY_EMAIL__FROM` | Yes | Sender address |
//! | `SPEAKER_NOTIFY_EMAIL__TO` | No | Recipient address |
//! | `SPEAKER_NOTIFY_EMAIL__SUBJECT` | Yes | Subject line |
//! | `SPEAKER_NOTIFY_EMAIL__BCC` | No | Blind copy of every email |
//! | `SPEAKER_NOTIFY_EMAIL__OPEN_FEEDBACK_URL` | Yes | Base URL of the feedback form |
//! | `SPEAKER_NOTIFY_EMAIL__TLS` | No | `starttls` (default), `tls` or `none` |
//! | `SPEAKER_NOTIFY_EMAIL__TIMEOUT` | No | SMTP timeout in seconds (default: 10) |
//! | `SPEAKER_NOTIFY_EMAIL__BATCH_LIMIT` | No | Emails sent per run (default: 5) |
//! | `SPEAKER_NOTIFY_EMAIL__INVITES` | No | Attach `.ics` invites (default: false) |
//! | `SPEAKER_NOTIFY_QR_CODE__WIDTH` | No | QR code width in pixels (default: 250) |
//! | `SPEAKER_NOTIFY_QR_CODE__HEIGHT` | No | QR code height in pixels (default: 250) |

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use config::ConfigError;

/// Prefix of every environment variable read by [`Settings::load`].
pub const ENV_PREFIX: &str = "SPEAKER_NOTIFY";

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "speaker-notify";

pub trait EnvConfig: Sized {
    fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError>;
    fn from_file_and_env(path: Option<&Path>, prefix: &str) -> Result<Self, ConfigError>;
}

impl<D> EnvConfig for D
where
    D: DeserializeOwned,
{
    fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(environment(prefix))
            .build()?
            .try_deserialize()
    }

    /// An explicit `path` must exist; otherwise `speaker-notify.{toml,yaml,json}`
    /// is used when present. Environment variables override file values.
    fn from_file_and_env(path: Option<&Path>, prefix: &str) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(environment(prefix))
            .build()?
            .try_deserialize()
    }
}

fn environment(prefix: &str) -> config::Environment {
    config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub email: EmailConfig,
    #[serde(default, alias = "qr-code")]
    pub qr_code: QrCodeConfig,
}

impl Settings {
    /// Load settings from `path` (or the default config file) and `SPEAKER_NOTIFY_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_file_and_env(path, ENV_PREFIX)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub event_path: PathBuf,
    pub schedule_url: String,
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    Starttls,
    Tls,
    None,
}

#[derive(Clone, Deserialize)]
pub struct EmailConfig {
    pub template_path: PathBuf,

    /// SMTP server hostname.
    pub host: String,

    /// SMTP server port (default: 587).
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    pub from: String,

    /// Recipient of every email. May be blank.
    #[serde(default)]
    pub to: String,

    /// Copy of every email, e.g. the organizing team.
    #[serde(default)]
    pub bcc: Option<String>,

    pub subject: String,

    pub open_feedback_url: String,

    #[serde(default)]
    pub tls: TlsMode,

    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum number of emails sent per run (default: 5).
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,

    /// Attach an iCalendar invite for each session.
    #[serde(default)]
    pub invites: bool,
}

// Keeps the SMTP password out of logs.
impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("template_path", &self.template_path)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("to", &self.to)
            .field("bcc", &self.bcc)
            .field("subject", &self.subject)
            .field("open_feedback_url", &self.open_feedback_url)
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .field("batch_limit", &self.batch_limit)
            .field("invites", &self.invites)
            .finish()
    }
}

fn default_port() -> u16 {
    587
}

fn default_timeout() -> u64 {
    10
}

fn default_batch_limit() -> usize {
    5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QrCodeConfig {
    #[serde(default = "default_qr_size")]
    pub width: u32,
    #[serde(default = "default_qr_size")]
    pub height: u32,
}

impl Default for QrCodeConfig {
    fn default() -> Self {
        QrCodeConfig {
            width: default_qr_size(),
            height: default_qr_size(),
        }
    }
}

fn default_qr_size() -> u32 {
    250
}
