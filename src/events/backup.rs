use serde::{Deserialize, Serialize};

/// A previously-produced event summary as read back from a prior run's
/// archive, carrying whatever detail payload that run managed to attach.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchivedEvent {
    #[serde(rename = "eventID", alias = "id")]
    pub event_id: String,
    #[serde(rename = "extraData", default)]
    pub extra_data: Option<BackupExtraData>,
}

/// The two archive shapes in the wild: older runs nested the detail record
/// under an "event" key, newer runs write the fields at the top level. The
/// "event" key is the discriminator; the nested variant must be tried first.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BackupExtraData {
    Nested { event: BackupFields },
    Flattened(BackupFields),
}

impl BackupExtraData {
    pub fn into_fields(self) -> BackupFields {
        match self {
            BackupExtraData::Nested { event } => event,
            BackupExtraData::Flattened(fields) => fields,
        }
    }
}

/// Recovered detail fields. Absent fields stay absent in the re-emitted
/// JSON rather than becoming empty arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupFields {
    #[serde(rename = "raidSchedule", skip_serializing_if = "Option::is_none")]
    pub raid_schedule: Option<serde_json::Value>,
    #[serde(rename = "raidbattles", skip_serializing_if = "Option::is_none")]
    pub raid_battles: Option<serde_json::Value>,
}

impl BackupFields {
    pub fn is_empty(&self) -> bool {
        self.raid_schedule.is_none() && self.raid_battles.is_none()
    }
}

/// Best-effort recovery for an event whose page could not be fetched. Returns
/// None when no archived entry matches or the entry carries nothing usable.
pub fn recover_from_backup(event_id: &str, backups: &[ArchivedEvent]) -> Option<BackupFields> {
    let entry = backups.iter().find(|e| e.event_id == event_id)?;
    let fields = entry.extra_data.clone()?.into_fields();
    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}
