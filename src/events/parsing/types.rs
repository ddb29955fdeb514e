use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Closed raid tier classification. The serialized label of each tier is a
/// phrase the tier classifier maps back to the same tier, so labels survive a
/// classify round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Tier {
    #[serde(rename = "1-star")]
    #[strum(serialize = "1-star")]
    Tier1,
    #[serde(rename = "3-star")]
    #[strum(serialize = "3-star")]
    Tier3,
    #[serde(rename = "5-star")]
    #[strum(serialize = "5-star")]
    Tier5,
    #[serde(rename = "6-star")]
    #[strum(serialize = "6-star")]
    Tier6,
    #[serde(rename = "mega")]
    #[strum(serialize = "mega")]
    Mega,
    #[serde(rename = "primal")]
    #[strum(serialize = "primal")]
    Primal,
    #[serde(rename = "shadow")]
    #[strum(serialize = "shadow")]
    Shadow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub name: String,
    pub image: String,
    #[serde(rename = "canBeShiny")]
    pub can_be_shiny: bool,
    #[serde(rename = "raidType")]
    pub raid_type: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidHourWindow {
    pub time: String,
    pub bosses: Vec<Boss>,
}

/// One entry per distinct date label; the label is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: String,
    #[serde(default)]
    pub bosses: Vec<Boss>,
    #[serde(rename = "raidHours", default)]
    pub raid_hours: Vec<RaidHourWindow>,
    #[serde(default)]
    pub bonuses: Vec<String>,
}

impl ScheduleDay {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            bosses: Vec::new(),
            raid_hours: Vec::new(),
            bonuses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(rename = "raidSchedule", default)]
    pub raid_schedule: Vec<ScheduleDay>,
    #[serde(rename = "raidbattles", default)]
    pub raid_battles: Vec<Boss>,
}

/// The two fixed headings that open a roster/schedule area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAnchor {
    Raids,
    FiveStarRaids,
}

impl SectionAnchor {
    pub fn id(self) -> &'static str {
        match self {
            SectionAnchor::Raids => "raids",
            SectionAnchor::FiveStarRaids => "appearing-in-5-star-raids",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "raids" => Some(SectionAnchor::Raids),
            "appearing-in-5-star-raids" => Some(SectionAnchor::FiveStarRaids),
            _ => None,
        }
    }
}

/// Transient state accumulated while walking one document. Created fresh per
/// extraction call and consumed by the post-processing passes; nothing here
/// outlives the call.
#[derive(Debug, Default)]
pub struct ParseContext {
    pub raid_hour_time: Option<String>,
    pub raid_hour_section: Option<SectionAnchor>,
    pub raid_types_with_raid_hour: HashSet<String>,
    pub special_notes: Vec<String>,
}

impl ParseContext {
    pub fn push_note(&mut self, note: &str) {
        if !self.special_notes.iter().any(|n| n == note) {
            self.special_notes.push(note.to_string());
        }
    }
}

/// An event page flattened to an ordered sequence of typed nodes. The engine
/// only ever sees this sequence; the concrete document API stays behind
/// `dom::content_nodes`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading {
        level: u8,
        id: Option<String>,
        text: String,
    },
    Roster(Vec<RosterItem>),
    Paragraph(String),
    Other,
}

impl Node {
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Node::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }
}

/// Raw sub-element data mined from one roster list item. Validation (name and
/// image both present) happens in the entry parser, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterItem {
    pub name: Option<String>,
    pub image: Option<String>,
    pub shiny: bool,
}
