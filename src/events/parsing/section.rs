use once_cell::sync::Lazy;
use regex::Regex;

use super::header::{classify_header, raid_type_update, HeaderOutcome};
use super::roster::{append_unique, parse_roster};
use super::schedule::ScheduleAggregator;
use super::text;
use super::types::{Node, RaidHourWindow, ScheduleDay, SectionAnchor};

const WEEKDAY: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const MONTH: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

/// "Friday, February 27: Unova (Black Kyurem)" — the date label is everything
/// before the colon.
static DAY_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^((?:{WEEKDAY})\s*,?\s+(?:{MONTH})\s+\d{{1,2}})\s*:"
    ))
    .unwrap()
});

static RAID_HOUR_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)raid\s+hour").unwrap());

/// The sibling nodes owned by the heading at `heading_idx`: everything after
/// it up to the next heading of the same or a higher level.
pub fn section_nodes(nodes: &[Node], heading_idx: usize) -> &[Node] {
    let Some(level) = nodes.get(heading_idx).and_then(Node::heading_level) else {
        return &[];
    };
    let start = heading_idx + 1;
    let end = nodes[start..]
        .iter()
        .position(|node| matches!(node.heading_level(), Some(l) if l <= level))
        .map(|offset| start + offset)
        .unwrap_or(nodes.len());
    &nodes[start..end]
}

/// Is this heading one of the two known section anchors? Matched on the
/// heading's id attribute when present, else on its slugified text.
pub fn anchor_of(node: &Node) -> Option<SectionAnchor> {
    let Node::Heading { id, text, .. } = node else {
        return None;
    };
    if let Some(anchor) = id.as_deref().and_then(SectionAnchor::from_id) {
        return Some(anchor);
    }
    SectionAnchor::from_id(&slugify(text))
}

/// The date label of a day-based section heading, if it is one.
pub fn day_section_date(node: &Node) -> Option<String> {
    let Node::Heading { text, .. } = node else {
        return None;
    };
    DAY_SECTION
        .captures(text.trim())
        .map(|caps| caps[1].to_string())
}

pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Walk the content of a known anchor section. Headings drive the
/// date/raid-type cursor, rosters land on the current day or on the static
/// roster, prose feeds the parse context.
pub fn collect_known_section(agg: &mut ScheduleAggregator, anchor: SectionAnchor, nodes: &[Node]) {
    let mut current_type: Option<String> = None;
    let mut current_date: Option<String> = None;

    for node in nodes {
        match node {
            Node::Heading { text, .. } => {
                match classify_header(text, current_type.as_deref()) {
                    HeaderOutcome::Date(header) => {
                        agg.day_entry(&header.date);
                        current_date = Some(header.date);
                        current_type = Some(header.raid_type);
                    }
                    HeaderOutcome::RaidTypeContext(update) => {
                        current_date = None;
                        current_type = Some(update);
                    }
                    HeaderOutcome::NoMatch => {
                        current_date = None;
                        current_type = None;
                    }
                }
            }
            Node::Roster(items) => {
                let bosses = parse_roster(items, current_type.as_deref());
                match &current_date {
                    Some(date) => agg.add_day_bosses(date, bosses),
                    None => agg.add_static_bosses(bosses),
                }
            }
            Node::Paragraph(prose) => {
                if text::is_raid_hour_note(prose) {
                    if let Some(time) = text::time_window(prose) {
                        agg.ctx.raid_hour_time = Some(time);
                        agg.ctx.raid_hour_section = Some(anchor);
                    }
                    for keyword in text::tier_keywords(prose) {
                        agg.ctx.raid_types_with_raid_hour.insert(keyword);
                    }
                } else if text::is_bonus_note(prose) {
                    agg.ctx.push_note(prose);
                }
            }
            Node::Other => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DayState {
    None,
    RaidType(String),
    RaidHour,
}

/// Walk one weekday-titled section. Sub-headings move the state machine;
/// rosters are only consumed under a raid-type context, raid-hour prose only
/// inside the raid-hour sub-section.
pub fn collect_day_section(day: &mut ScheduleDay, nodes: &[Node]) {
    let mut state = DayState::None;

    for node in nodes {
        match node {
            Node::Heading { text, .. } => {
                if RAID_HOUR_HEADING.is_match(text) {
                    state = DayState::RaidHour;
                } else if let Some(update) = raid_type_update(text) {
                    state = DayState::RaidType(update);
                } else {
                    state = DayState::None;
                }
            }
            Node::Roster(items) => {
                if let DayState::RaidType(raid_type) = &state {
                    let bosses = parse_roster(items, Some(raid_type));
                    append_unique(&mut day.bosses, bosses);
                }
            }
            Node::Paragraph(prose) => {
                if state != DayState::RaidHour {
                    continue;
                }
                let Some(time) = text::time_window(prose) else {
                    continue;
                };
                let names = text::featured_names(prose);
                let featured = text::resolve_featured(&names, &day.bosses);
                if !featured.is_empty() {
                    day.raid_hours.push(RaidHourWindow {
                        time,
                        bosses: featured,
                    });
                }
            }
            Node::Other => {}
        }
    }
}
