use speaker_notify::event::Event;
use speaker_notify::schedule::Schedule;
use speaker_notify::speaker_schedule::speaker_schedules;
use time::macros::datetime;

const SCHEDULE_JSON: &str = include_str!("fixtures/schedule.json");
const EVENT_JSON: &str = include_str!("fixtures/event.json");

#[test]
fn loads_schedule_from_json() {
    let schedule = Schedule::from_json(SCHEDULE_JSON).unwrap();

    assert_eq!(schedule.len(), 2);
    let session = &schedule.sessions["-LqIm7ny1Zq1Nd5PCi1P"];
    assert_eq!(session.id, "12");
    assert_eq!(session.track_title, "Amphi A");
    assert_eq!(session.start_time, datetime!(2019-11-15 13:30 UTC));
}

#[test]
fn json_roundtrip_is_lossless() {
    let schedule = Schedule::from_json(SCHEDULE_JSON).unwrap();

    let json = serde_json::to_string(&schedule).unwrap();

    assert_eq!(Schedule::from_json(&json).unwrap(), schedule);
}

#[test]
fn local_timestamps_are_paris_time() {
    let schedule = Schedule::from_json(
        r#"{"sessions": {"a": {
            "id": "a", "title": "Keynote",
            "startTime": "2022-12-02T09:00:00", "endTime": "2022-12-02T09:45:00",
            "trackTitle": "Amphi A"
        }}}"#,
    )
    .unwrap();

    let session = schedule.sessions().next().unwrap();
    assert_eq!(session.start_time, datetime!(2022-12-02 08:00 UTC));
    assert_eq!(session.end_time, datetime!(2022-12-02 08:45 UTC));
}

#[test]
fn speakers_get_sessions_in_talk_order() {
    let event = Event::from_json(EVENT_JSON).unwrap();
    let schedule = Schedule::from_json(SCHEDULE_JSON).unwrap();

    let schedules = speaker_schedules(&event, &schedule).unwrap();

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].speaker.display_name.as_deref(), Some("Jane Doe"));
    let ids: Vec<_> = schedules[0].sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["7", "12"]);
}
