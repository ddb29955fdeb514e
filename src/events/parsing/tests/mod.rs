use std::fs;
use std::path::PathBuf;

use scraper::Html;

use super::extract_event_details;
use super::types::Tier;

pub fn get_test_file_path(filename: &str) -> PathBuf {
    PathBuf::from("src/events/parsing/tests/data").join(filename)
}

pub fn read_test_file(filename: &str) -> String {
    fs::read_to_string(get_test_file_path(filename))
        .unwrap_or_else(|e| panic!("Failed to read test file {}: {}", filename, e))
}

#[test]
fn section_based_page_extracts_schedule_and_static_roster() {
    let document = Html::parse_document(&read_test_file("raid_weekend.html"));
    let details = extract_event_details(&document);

    assert_eq!(details.raid_schedule.len(), 2);

    let saturday = &details.raid_schedule[0];
    assert_eq!(saturday.date, "Saturday, March 14");
    assert_eq!(saturday.bosses.len(), 2);
    assert_eq!(saturday.bosses[0].name, "Kyogre");
    assert!(saturday.bosses[0].can_be_shiny);
    assert_eq!(saturday.bosses[0].raid_type, Some(Tier::Tier5));

    let sunday = &details.raid_schedule[1];
    assert_eq!(sunday.date, "Sunday, March 15");
    assert_eq!(sunday.bosses[0].name, "Groudon");

    // The mega roster sits under a context-only heading: static, not dated.
    assert_eq!(details.raid_battles.len(), 1);
    assert_eq!(details.raid_battles[0].name, "Mega Swampert");
    assert_eq!(details.raid_battles[0].raid_type, Some(Tier::Mega));
}

#[test]
fn raid_hour_paragraph_distributes_to_empty_days() {
    let document = Html::parse_document(&read_test_file("raid_weekend.html"));
    let details = extract_event_details(&document);

    for day in &details.raid_schedule {
        assert_eq!(day.raid_hours.len(), 1, "day {} missing window", day.date);
        let window = &day.raid_hours[0];
        assert_eq!(window.time, "6:00 p.m. to 7:00 p.m.");
        // Windows only ever hold bosses from their own day.
        for boss in &window.bosses {
            assert!(day.bosses.iter().any(|b| b.name == boss.name));
            assert_eq!(boss.raid_type, Some(Tier::Tier5));
        }
    }
}

#[test]
fn bonus_note_lands_on_days_naming_its_bosses() {
    let document = Html::parse_document(&read_test_file("raid_weekend.html"));
    let details = extract_event_details(&document);

    let saturday = &details.raid_schedule[0];
    assert_eq!(saturday.bonuses.len(), 1);
    assert!(saturday.bonuses[0].contains("Primal Energy"));
    // Sunday's Groudon is also named in the note.
    assert_eq!(details.raid_schedule[1].bonuses.len(), 1);
}

#[test]
fn day_based_page_builds_windows_inline() {
    let document = Html::parse_document(&read_test_file("day_sections.html"));
    let details = extract_event_details(&document);

    assert_eq!(details.raid_schedule.len(), 2);

    let friday = &details.raid_schedule[0];
    assert_eq!(friday.date, "Friday, February 27");
    assert_eq!(friday.bosses.len(), 1);
    assert_eq!(friday.bosses[0].name, "Black Kyurem");
    assert_eq!(friday.raid_hours.len(), 1);
    assert_eq!(friday.raid_hours[0].bosses[0].name, "Black Kyurem");

    let saturday = &details.raid_schedule[1];
    assert_eq!(saturday.date, "Saturday, February 28");
    assert_eq!(saturday.bosses[0].name, "White Kyurem");
    // No raid-hour sub-heading for this day and no global announcement.
    assert!(saturday.raid_hours.is_empty());
}

#[test]
fn unparsable_page_degrades_to_empty_record() {
    let document = Html::parse_document("<html><body><p>Nothing here.</p></body></html>");
    let details = extract_event_details(&document);
    assert!(details.raid_schedule.is_empty());
    assert!(details.raid_battles.is_empty());
}
