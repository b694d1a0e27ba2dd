//! Joining the event roster against the published schedule.

use std::path::PathBuf;

use crate::config::InputConfig;
use crate::event::{Event, Speaker};
use crate::schedule::{Schedule, Session};
use crate::{Error, Result};

/// A confirmed speaker with the sessions of their confirmed talks, in talk order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerSchedule {
    pub speaker: Speaker,
    pub sessions: Vec<Session>,
}

/// One [`SpeakerSchedule`] per confirmed speaker.
///
/// Fails on the first unknown speaker uid or unmatched talk title; no partial
/// result is returned.
pub fn speaker_schedules(event: &Event, schedule: &Schedule) -> Result<Vec<SpeakerSchedule>> {
    event
        .confirmed_speakers_with_confirmed_talks()?
        .into_iter()
        .map(|speaker_with_talks| {
            let sessions = speaker_with_talks
                .talks
                .iter()
                .map(|talk| talk.session(schedule.sessions()).cloned())
                .collect::<Result<Vec<_>>>()?;

            Ok(SpeakerSchedule {
                speaker: speaker_with_talks.speaker.clone(),
                sessions,
            })
        })
        .collect()
}

/// Loads the event file, fetches the schedule and joins them.
pub struct SpeakerSchedulesRetriever {
    client: reqwest::Client,
    event_path: PathBuf,
    schedule_url: String,
}

impl SpeakerSchedulesRetriever {
    pub fn new(config: &InputConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &InputConfig, client: reqwest::Client) -> Self {
        SpeakerSchedulesRetriever {
            client,
            event_path: config.event_path.clone(),
            schedule_url: config.schedule_url.clone(),
        }
    }

    pub async fn load_event(&self) -> Result<Event> {
        let json = tokio::fs::read_to_string(&self.event_path)
            .await
            .map_err(|source| Error::Io {
                path: self.event_path.clone(),
                source,
            })?;
        Event::from_json(&json)
    }

    /// GET the schedule document. Non-2xx responses are errors.
    pub async fn fetch_schedule(&self) -> Result<Schedule> {
        tracing::debug!(url = %self.schedule_url, "fetching schedule");
        let json = self
            .client
            .get(&self.schedule_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Schedule::from_json(&json)
    }

    pub async fn speaker_schedules(&self) -> Result<Vec<SpeakerSchedule>> {
        let event = self.load_event().await?;
        let schedule = self.fetch_schedule().await?;
        tracing::info!(
            event = %event.name,
            talks = event.talks.len(),
            sessions = schedule.len(),
            "loaded event and schedule"
        );

        speaker_schedules(&event, &schedule)
    }
}
