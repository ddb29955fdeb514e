use once_cell::sync::Lazy;
use regex::Regex;

use super::header::classify_tier;
use super::types::Boss;

/// "from 6:00 p.m. to 7:00 p.m. local time"
static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)from\s+(?P<start>\d{1,2}(?::\d{2})?\s*[ap]\.?m\.?)\s+to\s+(?P<end>\d{1,2}(?::\d{2})?\s*[ap]\.?m\.?)\s+local\s+time",
    )
    .unwrap()
});

static FEATURING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)featuring\s+(?P<names>[^.!]+)").unwrap());

/// Tier keywords as they appear in prose announcements.
static TIER_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(?:one|three|five|six|\d)[-\s]star|mega|primal|shadow)\b").unwrap()
});

static BONUS_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)fusion\s+energy|mega\s+energy|primal\s+energy|adventure\s+effect\s+move")
        .unwrap()
});

/// Notes shorter than this carry no distributable information.
const MIN_NOTE_LEN: usize = 40;

pub fn is_raid_hour_note(text: &str) -> bool {
    text.to_lowercase().contains("raid hour")
}

/// Extract the announced time window, rendered as "<start> to <end>".
pub fn time_window(text: &str) -> Option<String> {
    let caps = TIME_RANGE.captures(text)?;
    Some(format!("{} to {}", caps["start"].trim(), caps["end"].trim()))
}

/// Names from a "featuring <names>" clause, split on commas and "and".
pub fn featured_names(text: &str) -> Vec<String> {
    let Some(caps) = FEATURING.captures(text) else {
        return Vec::new();
    };
    caps["names"]
        .split(',')
        .flat_map(|part| part.split(" and "))
        .map(|name| name.trim().trim_matches(|c: char| c == '.' || c == '!'))
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve featured names against already-collected bosses by case-insensitive
/// substring match in either direction. Unresolved names contribute nothing.
pub fn resolve_featured(names: &[String], bosses: &[Boss]) -> Vec<Boss> {
    let mut resolved: Vec<Boss> = Vec::new();
    for name in names {
        let needle = name.to_lowercase();
        for boss in bosses {
            let boss_name = boss.name.to_lowercase();
            if !(boss_name.contains(&needle) || needle.contains(&boss_name)) {
                continue;
            }
            if !resolved.iter().any(|b| b.name == boss.name) {
                resolved.push(boss.clone());
            }
        }
    }
    resolved
}

/// Tier keywords mentioned in a paragraph, canonicalized through the tier
/// classifier so "Five-Star" and "5-star" record the same keyword.
pub fn tier_keywords(text: &str) -> Vec<String> {
    TIER_KEYWORD
        .find_iter(text)
        .map(|found| {
            let raw = found.as_str().replace(' ', "-").to_lowercase();
            match classify_tier(&raw) {
                Some(tier) => tier.to_string(),
                None => raw,
            }
        })
        .collect()
}

pub fn is_bonus_note(text: &str) -> bool {
    text.len() > MIN_NOTE_LEN && BONUS_KEYWORD.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::parsing::types::Tier;

    fn boss(name: &str) -> Boss {
        Boss {
            name: name.to_string(),
            image: format!("{}.png", name.to_lowercase()),
            can_be_shiny: false,
            raid_type: Some(Tier::Tier5),
        }
    }

    #[test]
    fn time_window_requires_local_time_phrasing() {
        assert_eq!(
            time_window("Raid Hour runs from 6:00 p.m. to 7:00 p.m. local time."),
            Some("6:00 p.m. to 7:00 p.m.".to_string())
        );
        assert_eq!(time_window("Raid Hour runs from 6 to 7."), None);
    }

    #[test]
    fn featured_names_split_on_commas_and_and() {
        let names = featured_names("A Raid Hour featuring Kyogre, Groudon and Rayquaza!");
        assert_eq!(names, vec!["Kyogre", "Groudon", "Rayquaza"]);
    }

    #[test]
    fn featured_resolution_is_substring_case_insensitive() {
        let bosses = vec![boss("Black Kyurem"), boss("Rayquaza")];
        let resolved = resolve_featured(&["kyurem".to_string()], &bosses);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Black Kyurem");
        assert!(resolve_featured(&["Zekrom".to_string()], &bosses).is_empty());
    }

    #[test]
    fn trailing_verb_phrase_still_resolves() {
        // The clause capture runs to the end of the sentence; the substring
        // match against collected bosses absorbs the leftover words.
        let names = featured_names("a Raid Hour featuring Rayquaza will take place");
        assert_eq!(names, vec!["Rayquaza will take place"]);
        let bosses = vec![boss("Rayquaza")];
        let resolved = resolve_featured(&names, &bosses);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Rayquaza");
    }

    #[test]
    fn tier_keywords_are_canonicalized() {
        let keywords =
            tier_keywords("Raid Hour featuring Five-Star and Mega raid bosses every Wednesday");
        assert!(keywords.contains(&"5-star".to_string()));
        assert!(keywords.contains(&"mega".to_string()));
    }

    #[test]
    fn bonus_notes_need_keyword_and_length() {
        assert!(is_bonus_note(
            "Defeat Mega Charizard in Mega Raids to earn extra Mega Energy during the event."
        ));
        assert!(!is_bonus_note("Mega Energy!"));
        assert!(!is_bonus_note(
            "Trainers will find plenty of surprises waiting for them in the wild this weekend."
        ));
    }
}
