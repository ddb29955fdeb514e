use super::header::classify_tier;
use super::types::{Boss, RosterItem};

/// Build one roster entry from a single list item. Items missing either the
/// name or the image sub-element are not bosses; the caller drops them.
pub fn parse_entry(item: &RosterItem, raid_type: Option<&str>) -> Option<Boss> {
    let name = item.name.as_deref()?.trim();
    let image = item.image.as_deref()?.trim();
    if name.is_empty() || image.is_empty() {
        return None;
    }
    Some(Boss {
        name: name.to_string(),
        image: image.to_string(),
        can_be_shiny: item.shiny,
        raid_type: raid_type.and_then(classify_tier),
    })
}

/// Parse every qualifying child of a roster container, deduplicating by name
/// and preserving encounter order.
pub fn parse_roster(items: &[RosterItem], raid_type: Option<&str>) -> Vec<Boss> {
    let mut bosses: Vec<Boss> = Vec::new();
    for item in items {
        if let Some(boss) = parse_entry(item, raid_type) {
            if !bosses.iter().any(|b| b.name == boss.name) {
                bosses.push(boss);
            }
        }
    }
    bosses
}

/// Append bosses to a day or static roster, keeping names unique. The first
/// occurrence of a name wins.
pub fn append_unique(list: &mut Vec<Boss>, bosses: Vec<Boss>) {
    for boss in bosses {
        if !list.iter().any(|b| b.name == boss.name) {
            list.push(boss);
        }
    }
}
