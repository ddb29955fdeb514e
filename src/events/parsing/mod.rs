pub mod dom;
pub mod header;
pub mod roster;
pub mod schedule;
pub mod section;
pub mod text;
pub mod types;

#[cfg(test)]
mod tests;

use scraper::Html;

use schedule::ScheduleAggregator;
use types::Node;

pub use types::{Boss, EventDetails, RaidHourWindow, ScheduleDay, Tier};

/// Extract the raid schedule and static rosters from an event page. Missing
/// or unrecognized structure shrinks the result; it never fails.
pub fn extract_event_details(document: &Html) -> EventDetails {
    let nodes = dom::content_nodes(document);
    extract_from_nodes(&nodes)
}

/// Engine entry over the typed node sequence: dispatch every known anchor and
/// every weekday-titled heading to its traversal strategy, then run the
/// distribution passes.
pub fn extract_from_nodes(nodes: &[Node]) -> EventDetails {
    let mut agg = ScheduleAggregator::new();

    for (idx, node) in nodes.iter().enumerate() {
        if node.heading_level().is_none() {
            continue;
        }
        if let Some(anchor) = section::anchor_of(node) {
            section::collect_known_section(&mut agg, anchor, section::section_nodes(nodes, idx));
        } else if let Some(date) = section::day_section_date(node) {
            let section = section::section_nodes(nodes, idx);
            section::collect_day_section(agg.day_entry(&date), section);
        }
    }

    agg.finish()
}
