use speaker_notify::event::{Event, Talk, TalkState};
use speaker_notify::schedule::Session;
use speaker_notify::Error;
use time::macros::datetime;

const EVENT_JSON: &str = include_str!("fixtures/event.json");

fn event() -> Event {
    Event::from_json(EVENT_JSON).unwrap()
}

fn session(id: &str, title: &str, room: &str) -> Session {
    Session {
        id: id.to_string(),
        title: title.to_string(),
        start_time: datetime!(2019-11-15 08:30 UTC),
        end_time: datetime!(2019-11-15 09:20 UTC),
        track_title: room.to_string(),
    }
}

#[test]
fn loads_event_from_json() {
    let event = event();

    assert_eq!(event.name, "BDX I/O");
    assert_eq!(event.talks.len(), 5);
    assert_eq!(event.speakers.len(), 1);
    assert_eq!(event.conference_dates.start, datetime!(2019-11-15 07:00 UTC));
    assert_eq!(event.speakers[0].display_name.as_deref(), Some("Jane Doe"));
}

#[test]
fn confirmed_talks_keep_roster_order() {
    let event = event();

    let titles: Vec<_> = event
        .confirmed_talks()
        .iter()
        .map(|talk| talk.title.as_str())
        .collect();

    assert_eq!(
        titles,
        ["Une super présentation", "Une autre super présentation "]
    );
}

#[test]
fn confirmed_speakers_are_deduplicated() {
    let event = event();

    let speakers = event.confirmed_speakers().unwrap();

    assert_eq!(speakers.len(), 1);
    assert_eq!(speakers[0].uid, "AuGy2aVGsBRaD6RYzbSN8PIsuHI2");
}

#[test]
fn confirmed_speakers_with_confirmed_talks() {
    let event = event();

    let speakers_with_talks = event.confirmed_speakers_with_confirmed_talks().unwrap();

    assert_eq!(speakers_with_talks.len(), 1);
    let talks = &speakers_with_talks[0].talks;
    assert_eq!(talks.len(), 2);
    assert_eq!(talks.first().unwrap().title, "Une super présentation");
    assert_eq!(talks.last().unwrap().title, "Une autre super présentation ");
}

#[test]
fn session_for_talk_is_exact_title_match() {
    let talk = Talk {
        title: "Title".to_string(),
        state: TalkState::Confirmed,
        speaker_ids: vec!["uid".to_string()],
    };
    let sessions = vec![
        session("0", "Another Title", "Room 1"),
        session("1", "Title", "Room 2"),
    ];

    let session = talk.session(&sessions).unwrap();

    assert_eq!(session.title, "Title");
    assert_eq!(session.track_title, "Room 2");
}

#[test]
fn session_for_talk_fails_without_match() {
    let talk = Talk {
        title: "Missing talk".to_string(),
        state: TalkState::Confirmed,
        speaker_ids: vec![],
    };
    let sessions = vec![session("0", "Another Title", "Room 1")];

    let err = talk.session(&sessions).unwrap_err();

    assert!(matches!(err, Error::SessionNotFound { ref title } if title == "Missing talk"));
    assert!(err.to_string().contains("Missing talk"));
}

#[test]
fn lowercase_states_are_accepted() {
    let json = EVENT_JSON.replace("\"CONFIRMED\"", "\"confirmed\"");

    let event = Event::from_json(&json).unwrap();

    assert_eq!(event.confirmed_talks().len(), 2);
}

#[test]
fn missing_field_is_reported() {
    let err = Event::from_json(r#"{"name": "BDX I/O", "talks": [], "speakers": []}"#).unwrap_err();

    assert!(matches!(err, Error::Deserialize { what: "event", .. }));
    assert!(err.to_string().contains("conferenceDates"));
}

#[test]
fn json_roundtrip_is_lossless() {
    let event = event();

    let json = serde_json::to_string(&event).unwrap();
    let decoded = Event::from_json(&json).unwrap();

    assert_eq!(decoded, event);
    assert!(json.contains("\"state\":\"CONFIRMED\""));
    assert!(json.contains("\"displayName\":\"Jane Doe\""));
}
