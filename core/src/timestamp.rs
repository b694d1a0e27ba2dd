//! Instant parsing and the Europe/Paris display calendar.
//!
//! Use with serde's `with` attribute on [`OffsetDateTime`] fields. Instants are
//! written as RFC 3339. On input an RFC 3339 instant is preferred; a bare local
//! date-time (`2022-12-02T09:00:00`, as exported by OpenFeedback) is read as
//! Paris wall-clock time.

use serde::de::{self, Visitor};
use serde::ser;
use serde::{Deserializer, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use time_tz::timezones::db::europe::PARIS;
use time_tz::OffsetDateTimeExt;

const LOCAL_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// `2 December 2022`
const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[day padding:none] [month repr:long] [year]");

/// `09h30`
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]h[minute]");

/// `2022-12-02`, the date segment of feedback URLs.
const URL_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Instants closer than this to either end of the calendar are rejected. Wider
/// than any UTC offset.
const RANGE_MARGIN: Duration = Duration::days(2);

pub fn parse(value: &str) -> Result<OffsetDateTime, String> {
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
        let in_range = instant.checked_add(RANGE_MARGIN).is_some()
            && instant.checked_sub(RANGE_MARGIN).is_some();
        return if in_range {
            Ok(instant)
        } else {
            Err(out_of_range(value))
        };
    }

    let local = PrimitiveDateTime::parse(value, LOCAL_FORMAT)
        .map_err(|e| format!("invalid timestamp `{value}`: {e}"))?;
    if local.checked_add(RANGE_MARGIN).is_none() || local.checked_sub(RANGE_MARGIN).is_none() {
        return Err(out_of_range(value));
    }
    Ok(assume_paris(local))
}

fn out_of_range(value: &str) -> String {
    format!("timestamp `{value}` is out of range")
}

/// Attach the Paris offset in force at `local`. Times skipped by a DST jump
/// resolve to the offset after the transition.
fn assume_paris(local: PrimitiveDateTime) -> OffsetDateTime {
    let guess = local.assume_utc().to_timezone(PARIS).offset();
    let offset = local.assume_offset(guess).to_timezone(PARIS).offset();
    local.assume_offset(offset)
}

pub fn to_paris(instant: OffsetDateTime) -> OffsetDateTime {
    instant.to_timezone(PARIS)
}

pub fn format_date(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    to_paris(instant).format(DATE_FORMAT)
}

pub fn format_time(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    to_paris(instant).format(TIME_FORMAT)
}

pub fn format_url_date(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    to_paris(instant).format(URL_DATE_FORMAT)
}

pub fn serialize<S>(instant: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = instant.format(&Rfc3339).map_err(ser::Error::custom)?;
    serializer.serialize_str(&value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    struct InstantVisitor;

    impl<'de> Visitor<'de> for InstantVisitor {
        type Value = OffsetDateTime;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an ISO-8601 date-time")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse(value).map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_str(InstantVisitor)
}
