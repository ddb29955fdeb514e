use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Tier;

const WEEKDAY: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const MONTH: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

/// "Tuesday, November 11" — weekday plus month/day, anchored at the start.
static DATE_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(?:{WEEKDAY})\s*,?\s+(?:{MONTH})\s+\d{{1,2}}")).unwrap()
});

/// "Appearing in 5-Star Raids (Saturday)" — tier phrase plus a bare weekday.
static APPEARING_WITH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)appearing\s+in\s+(?P<tier>.*?raids?)\s*\(\s*(?P<day>{WEEKDAY})\s*\)"
    ))
    .unwrap()
});

static APPEARING_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)appearing\s+in\s+(?P<tier>.*?raids?)\b").unwrap());

static STAR_RAIDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\w+[-\s]star(?:\s+shadow)?\s+raids?\b").unwrap());

static PRIMAL_RAIDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bprimal\s+raids?\b").unwrap());

static MEGA_RAIDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmega\s+raids?\b").unwrap());

static SHADOW_RAIDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bshadow\s+raids?\b").unwrap());

/// A heading recognized as opening a dated sub-schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct DateHeader {
    pub raid_type: String,
    pub date: String,
}

/// What a section heading means. Exactly one of: a dated sub-schedule, an
/// update to the tracked raid-type context, or nothing the engine recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderOutcome {
    Date(DateHeader),
    RaidTypeContext(String),
    NoMatch,
}

/// Classify a section heading. Pure over the heading text plus the currently
/// tracked raid-type context; patterns are tried in fixed priority order and
/// the first match wins.
pub fn classify_header(text: &str, context: Option<&str>) -> HeaderOutcome {
    let text = text.trim();

    // "<type>: <date>" — the portion after the colon is the date, verbatim.
    if let Some((head, tail)) = text.split_once(':') {
        let head = head.trim();
        let tail = tail.trim();
        if !head.is_empty() && DATE_START.is_match(tail) {
            return HeaderOutcome::Date(DateHeader {
                raid_type: head.to_string(),
                date: tail.to_string(),
            });
        }
    }

    // Bare "<weekday>, <month> <day>…" inherits the contextual raid type.
    if let Some(ctx) = context {
        if let Some(found) = DATE_START.find(text) {
            return HeaderOutcome::Date(DateHeader {
                raid_type: ctx.to_string(),
                date: found.as_str().to_string(),
            });
        }
    }

    // "appearing in <tier> raids (<weekday>)" — the weekday alone is the date.
    if let Some(caps) = APPEARING_WITH_DAY.captures(text) {
        return HeaderOutcome::Date(DateHeader {
            raid_type: caps["tier"].trim().to_string(),
            date: caps["day"].to_string(),
        });
    }

    match raid_type_update(text) {
        Some(update) => HeaderOutcome::RaidTypeContext(update),
        None => HeaderOutcome::NoMatch,
    }
}

/// Match a heading against the known raid-type phrasings, in priority order.
/// Plain "Shadow Raids" only counts when "star" is absent, so it cannot steal
/// five-star-shadow headings.
pub fn raid_type_update(text: &str) -> Option<String> {
    if let Some(caps) = APPEARING_IN.captures(text) {
        return Some(caps["tier"].trim().to_string());
    }
    if let Some(found) = STAR_RAIDS.find(text) {
        return Some(found.as_str().to_string());
    }
    if let Some(found) = PRIMAL_RAIDS.find(text) {
        return Some(found.as_str().to_string());
    }
    if let Some(found) = MEGA_RAIDS.find(text) {
        return Some(found.as_str().to_string());
    }
    if !text.to_lowercase().contains("star") {
        if let Some(found) = SHADOW_RAIDS.find(text) {
            return Some(found.as_str().to_string());
        }
    }
    None
}

/// Map a free-text raid-type phrase onto the closed tier enumeration. Star
/// tiers win over "shadow", so "Five-Star Shadow Raids" classifies as five
/// star rather than shadow.
pub fn classify_tier(label: &str) -> Option<Tier> {
    let label = label.to_lowercase();
    if label.contains("one-star") || label.contains("1-star") {
        Some(Tier::Tier1)
    } else if label.contains("three-star") || label.contains("3-star") {
        Some(Tier::Tier3)
    } else if label.contains("five-star") || label.contains("5-star") {
        Some(Tier::Tier5)
    } else if label.contains("six-star") || label.contains("6-star") {
        Some(Tier::Tier6)
    } else if label.contains("mega") {
        Some(Tier::Mega)
    } else if label.contains("primal") {
        Some(Tier::Primal)
    } else if label.contains("shadow") && !label.contains("star") {
        Some(Tier::Shadow)
    } else {
        None
    }
}
