//! The event roster: talks, speakers and confirmation states.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::schedule::Session;
use crate::{Error, Result};

/// Opaque speaker identifier referenced from talks.
pub type Uid = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    pub conference_dates: ConferenceDates,
    pub talks: Vec<Talk>,
    pub speakers: Vec<Speaker>,
}

impl Event {
    /// Decode an event document. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Event> {
        serde_json::from_str(json).map_err(|source| Error::Deserialize {
            what: "event",
            source,
        })
    }

    /// Talks with state [`TalkState::Confirmed`], in roster order.
    pub fn confirmed_talks(&self) -> Vec<&Talk> {
        self.talks.iter().filter(|talk| talk.is_confirmed()).collect()
    }

    /// Every speaker named by a confirmed talk, once, in first-encountered order.
    ///
    /// Fails with [`Error::SpeakerNotFound`] if a confirmed talk names a uid
    /// missing from the roster.
    pub fn confirmed_speakers(&self) -> Result<Vec<&Speaker>> {
        let mut seen = HashSet::new();
        let mut speakers = Vec::new();

        for uid in self
            .confirmed_talks()
            .into_iter()
            .flat_map(|talk| &talk.speaker_ids)
        {
            if seen.insert(uid.as_str()) {
                speakers.push(self.speaker(uid)?);
            }
        }

        Ok(speakers)
    }

    /// Each confirmed speaker paired with the confirmed talks naming them.
    pub fn confirmed_speakers_with_confirmed_talks(&self) -> Result<Vec<SpeakerWithTalks<'_>>> {
        let confirmed_talks = self.confirmed_talks();

        let speakers = self
            .confirmed_speakers()?
            .into_iter()
            .map(|speaker| SpeakerWithTalks {
                speaker,
                talks: confirmed_talks
                    .iter()
                    .copied()
                    .filter(|talk| talk.speaker_ids.contains(&speaker.uid))
                    .collect(),
            })
            .collect();

        Ok(speakers)
    }

    pub fn speaker(&self, uid: &str) -> Result<&Speaker> {
        self.speakers
            .iter()
            .find(|speaker| speaker.uid == uid)
            .ok_or_else(|| Error::SpeakerNotFound {
                uid: uid.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceDates {
    #[serde(with = "crate::timestamp")]
    pub start: OffsetDateTime,
    #[serde(with = "crate::timestamp")]
    pub end: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    pub title: String,
    pub state: TalkState,
    #[serde(rename = "speakers")]
    pub speaker_ids: Vec<Uid>,
}

impl Talk {
    pub fn is_confirmed(&self) -> bool {
        self.state == TalkState::Confirmed
    }

    /// The session whose trimmed title equals this talk's trimmed title.
    ///
    /// Matching is case-sensitive. When several sessions share the title the
    /// first one wins and a warning is logged.
    pub fn session<'s>(
        &self,
        sessions: impl IntoIterator<Item = &'s Session>,
    ) -> Result<&'s Session> {
        let title = self.title.trim();
        let mut matches = sessions
            .into_iter()
            .filter(|session| session.title.trim() == title);

        let session = matches.next().ok_or_else(|| Error::SessionNotFound {
            title: self.title.clone(),
        })?;

        let duplicates = matches.count();
        if duplicates > 0 {
            tracing::warn!(
                title,
                session_id = %session.id,
                duplicates,
                "several sessions share this title, using the first"
            );
        }

        Ok(session)
    }
}

/// Review state of a talk. Decoded case-insensitively, written upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TalkState {
    Submitted,
    Rejected,
    Confirmed,
    Declined,
}

impl TalkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TalkState::Submitted => "SUBMITTED",
            TalkState::Rejected => "REJECTED",
            TalkState::Confirmed => "CONFIRMED",
            TalkState::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for TalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TalkState {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [
            TalkState::Submitted,
            TalkState::Rejected,
            TalkState::Confirmed,
            TalkState::Declined,
        ]
        .into_iter()
        .find(|state| state.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown talk state `{value}`"))
    }
}

impl<'de> Deserialize<'de> for TalkState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TalkStateVisitor;

        impl<'de> Visitor<'de> for TalkStateVisitor {
            type Value = TalkState;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("one of SUBMITTED, REJECTED, CONFIRMED, DECLINED")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(TalkStateVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub uid: Uid,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// A confirmed speaker and the confirmed talks naming them, in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerWithTalks<'a> {
    pub speaker: &'a Speaker,
    pub talks: Vec<&'a Talk>,
}
