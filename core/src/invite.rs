//! iCalendar invites for scheduled sessions.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::schedule::Session;
use crate::Result;

const PRODID: &str = "-//speaker-notify//EN";

/// Content lines longer than this many octets are folded.
const MAX_LINE_OCTETS: usize = 75;

const ICS_FORMAT: &[FormatItem<'static>] =
    format_description!("[year][month][day]T[hour][minute][second]Z");

/// Render a single-event `VCALENDAR` for `session`.
///
/// `organizer` may be a bare address or `Name <address>`.
pub fn session_invite(
    session: &Session,
    organizer: &str,
    uid: Uuid,
    stamp: OffsetDateTime,
) -> Result<String> {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{}", utc(stamp)?),
        format!("DTSTART:{}", utc(session.start_time)?),
        format!("DTEND:{}", utc(session.end_time)?),
        format!("SUMMARY:{}", escape(session.title.trim())),
        format!("LOCATION:{}", escape(&session.track_title)),
        format!("ORGANIZER:MAILTO:{}", address(organizer)),
        "STATUS:CONFIRMED".to_string(),
        "TRANSP:OPAQUE".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut ics = lines.iter().map(|line| fold(line)).collect::<Vec<_>>().join("\r\n");
    ics.push_str("\r\n");
    Ok(ics)
}

fn utc(instant: OffsetDateTime) -> Result<String> {
    Ok(instant.to_offset(UtcOffset::UTC).format(ICS_FORMAT)?)
}

fn address(mailbox: &str) -> &str {
    match (mailbox.rfind('<'), mailbox.rfind('>')) {
        (Some(start), Some(end)) if start < end => &mailbox[start + 1..end],
        _ => mailbox.trim(),
    }
}

/// Break `line` on char boundaries, each continuation starting with a space.
fn fold(line: &str) -> String {
    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for c in line.chars() {
        if width + c.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            width = 1;
        }
        folded.push(c);
        width += c.len_utf8();
    }
    folded
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | ';' | ',' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}
