//! Email each confirmed conference speaker their session schedule.
//!
//! ```text
//! event file ─┐
//!             ├─> speaker_schedules ─> EmailComposer ─> dispatch ─> Mailer
//! schedule  ──┘
//! ```

pub mod composer;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod invite;
pub mod mail;
pub mod pipeline;
pub mod qr_code;
pub mod schedule;
pub mod speaker_schedule;
pub mod timestamp;

pub use config::{EnvConfig, Settings};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
