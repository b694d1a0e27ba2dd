//! Rendering one email per speaker.
//!
//! The body template is a [minijinja](https://docs.rs/minijinja) template read
//! from disk once per batch. It receives:
//!
//! ```text
//! displayName          the speaker's display name ("" when unknown)
//! sessions[]
//!     title            session title
//!     startDate        e.g. "15 November 2019"   (Europe/Paris)
//!     startTime        e.g. "09h30"              (Europe/Paris)
//!     endTime          e.g. "10h20"              (Europe/Paris)
//!     room             the session's track title
//! ```
//!
//! HTML auto-escaping is on.

use minijinja::{Environment, Template};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::EmailConfig;
use crate::invite::session_invite;
use crate::mail::{Attachment, Email};
use crate::qr_code::QrCodeGenerator;
use crate::schedule::Session;
use crate::speaker_schedule::SpeakerSchedule;
use crate::{timestamp, Error, Result};

const TEMPLATE_NAME: &str = "email.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContext {
    pub display_name: String,
    pub sessions: Vec<SessionContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub title: String,
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

impl EmailContext {
    pub fn new(schedule: &SpeakerSchedule) -> Result<Self> {
        let sessions = schedule
            .sessions
            .iter()
            .map(SessionContext::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(EmailContext {
            display_name: schedule.speaker.display_name.clone().unwrap_or_default(),
            sessions,
        })
    }
}

impl SessionContext {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(SessionContext {
            title: session.title.clone(),
            start_date: timestamp::format_date(session.start_time)?,
            start_time: timestamp::format_time(session.start_time)?,
            end_time: timestamp::format_time(session.end_time)?,
            room: session.track_title.clone(),
        })
    }
}

/// `<base>/<yyyy-MM-dd>/<session id>`, the date taken in Europe/Paris.
pub fn feedback_url(base: &str, session: &Session) -> Result<String> {
    Ok(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        timestamp::format_url_date(session.start_time)?,
        session.id
    ))
}

pub struct EmailComposer {
    config: EmailConfig,
    qr_codes: QrCodeGenerator,
}

impl EmailComposer {
    pub fn new(config: EmailConfig, qr_codes: QrCodeGenerator) -> Self {
        EmailComposer { config, qr_codes }
    }

    /// Read the template and compose one email per schedule, in order.
    pub fn compose_all(&self, schedules: &[SpeakerSchedule]) -> Result<Vec<Email>> {
        let path = &self.config.template_path;
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, &source)?;
        let template = env.get_template(TEMPLATE_NAME)?;

        schedules
            .iter()
            .map(|schedule| self.compose(schedule, &template))
            .collect()
    }

    pub fn compose(&self, schedule: &SpeakerSchedule, template: &Template) -> Result<Email> {
        let body = template.render(EmailContext::new(schedule)?)?;

        // Every email goes to the configured recipient. The speaker's own
        // address is only reported.
        let recipient = if self.config.to.trim().is_empty() {
            schedule.speaker.email.as_deref().unwrap_or_default()
        } else {
            self.config.to.as_str()
        };
        if self.config.to.trim().is_empty() {
            tracing::warn!(
                uid = %schedule.speaker.uid,
                speaker_email = recipient,
                "no recipient configured, speaker address is not used"
            );
        }
        tracing::debug!(
            uid = %schedule.speaker.uid,
            recipient,
            sessions = schedule.sessions.len(),
            "composed email"
        );

        let mut builder = Email::builder()
            .from(&self.config.from)
            .to(&self.config.to)
            .subject(&self.config.subject)
            .html(body)
            .attachments(self.attachments(&schedule.sessions)?);
        if let Some(bcc) = &self.config.bcc {
            builder = builder.bcc(bcc);
        }

        Ok(builder.build()?)
    }

    fn attachments(&self, sessions: &[Session]) -> Result<Vec<Attachment>> {
        let mut attachments = Vec::with_capacity(sessions.len());

        for session in sessions {
            let url = feedback_url(&self.config.open_feedback_url, session)?;
            attachments.push(Attachment::png(
                format!("{} QR code.png", session.title.trim()),
                self.qr_codes.generate(&url)?,
            ));
        }

        if self.config.invites {
            let stamp = OffsetDateTime::now_utc();
            for session in sessions {
                let ics = session_invite(session, &self.config.from, Uuid::new_v4(), stamp)?;
                attachments.push(Attachment::calendar(
                    format!("{}.ics", session.title.trim()),
                    ics,
                ));
            }
        }

        Ok(attachments)
    }
}
