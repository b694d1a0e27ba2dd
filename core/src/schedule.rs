//! The published session schedule.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::{Error, Result};

/// Sessions keyed by their external session key.
///
/// Kept in key order so that title lookups see sessions in a stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub sessions: BTreeMap<String, Session>,
}

impl Schedule {
    /// Decode a schedule document. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Schedule> {
        serde_json::from_str(json).map_err(|source| Error::Deserialize {
            what: "schedule",
            source,
        })
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(deserialize_with = "deserialize_session_id")]
    pub id: String,
    pub title: String,
    #[serde(with = "crate::timestamp")]
    pub start_time: OffsetDateTime,
    #[serde(with = "crate::timestamp")]
    pub end_time: OffsetDateTime,
    pub track_title: String,
}

// Schedules in the wild carry numeric or string ids.
fn deserialize_session_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct SessionIdVisitor;

    impl<'de> Visitor<'de> for SessionIdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a session id as a string or an integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(SessionIdVisitor)
}
