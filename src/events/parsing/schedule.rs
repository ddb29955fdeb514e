use std::collections::HashSet;

use super::roster::append_unique;
use super::types::{
    Boss, EventDetails, ParseContext, RaidHourWindow, ScheduleDay, SectionAnchor,
};

/// Owns the evolving per-day schedule and the transient parse context for one
/// document. Traversal feeds it; `finish` runs the post-processing passes and
/// yields the final record.
#[derive(Debug, Default)]
pub struct ScheduleAggregator {
    pub record: EventDetails,
    pub ctx: ParseContext,
}

impl ScheduleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup-or-create by date label; the label is the natural key.
    pub fn day_entry(&mut self, date: &str) -> &mut ScheduleDay {
        let schedule = &mut self.record.raid_schedule;
        match schedule.iter().position(|day| day.date == date) {
            Some(idx) => &mut schedule[idx],
            None => {
                schedule.push(ScheduleDay::new(date));
                schedule.last_mut().unwrap()
            }
        }
    }

    pub fn add_day_bosses(&mut self, date: &str, bosses: Vec<Boss>) {
        append_unique(&mut self.day_entry(date).bosses, bosses);
    }

    /// Bosses found outside any day-scoped schedule.
    pub fn add_static_bosses(&mut self, bosses: Vec<Boss>) {
        append_unique(&mut self.record.raid_battles, bosses);
    }

    pub fn finish(mut self) -> EventDetails {
        self.distribute_five_star_raid_hour();
        self.distribute_general_raid_hour();
        self.distribute_bonuses();
        self.record
    }

    /// Raid-hour time announced inside the five-star section: give every day
    /// that has no window yet one window over its matching bosses.
    fn distribute_five_star_raid_hour(&mut self) {
        if self.ctx.raid_hour_section != Some(SectionAnchor::FiveStarRaids) {
            return;
        }
        if let Some(time) = self.ctx.raid_hour_time.clone() {
            attach_windows(
                &mut self.record.raid_schedule,
                &time,
                &self.ctx.raid_types_with_raid_hour,
            );
        }
    }

    /// The general variant for the plain raids section, using the full
    /// recorded keyword set. Days that already carry a window are left alone.
    fn distribute_general_raid_hour(&mut self) {
        if self.ctx.raid_hour_section != Some(SectionAnchor::Raids) {
            return;
        }
        if let Some(time) = self.ctx.raid_hour_time.clone() {
            attach_windows(
                &mut self.record.raid_schedule,
                &time,
                &self.ctx.raid_types_with_raid_hour,
            );
        }
    }

    /// Attach each recorded note to every day naming one of its bosses.
    fn distribute_bonuses(&mut self) {
        for note in &self.ctx.special_notes {
            let note_lower = note.to_lowercase();
            for day in &mut self.record.raid_schedule {
                let mentioned = day.bosses.iter().any(|boss| {
                    let name = boss.name.to_lowercase();
                    note_lower.contains(&name)
                        || note_lower.contains(strip_parenthetical(&name))
                });
                if mentioned && !day.bonuses.iter().any(|n| n == note) {
                    day.bonuses.push(note.clone());
                }
            }
        }
    }
}

fn attach_windows(schedule: &mut [ScheduleDay], time: &str, keywords: &HashSet<String>) {
    for day in schedule {
        if !day.raid_hours.is_empty() {
            continue;
        }
        let featured: Vec<Boss> = day
            .bosses
            .iter()
            .filter(|boss| tier_matches_keywords(boss, keywords))
            .cloned()
            .collect();
        if !featured.is_empty() {
            day.raid_hours.push(RaidHourWindow {
                time: time.to_string(),
                bosses: featured,
            });
        }
    }
}

fn tier_matches_keywords(boss: &Boss, keywords: &HashSet<String>) -> bool {
    let Some(tier) = boss.raid_type else {
        return false;
    };
    let label = tier.to_string();
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        label.contains(&keyword) || keyword.contains(&label)
    })
}

/// "mega charizard (y)" -> "mega charizard"
fn strip_parenthetical(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => name[..idx].trim_end(),
        None => name,
    }
}
