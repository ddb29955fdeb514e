use chrono::{NaiveDate, NaiveDateTime};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::events::index::EventSummary;

/// Build a calendar from the event index. Entries without a parsable start
/// timestamp are skipped; a missing end collapses onto the start.
pub fn build_calendar(events: &[EventSummary]) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name("Raid events");

    for event in events {
        let Some(start) = event.start.as_deref().and_then(parse_local) else {
            continue;
        };
        let end = event.end.as_deref().and_then(parse_local).unwrap_or(start);

        let mut entry = Event::new();
        entry.summary(&event.name);
        if !event.heading.is_empty() {
            entry.description(&event.heading);
        }
        entry.starts(start);
        entry.ends(end);
        entry.add_property("URL", &event.link);
        calendar.push(entry.done());
    }

    calendar
}

/// Listing timestamps are local, without zone info: full date-times or bare
/// dates.
fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
