use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::events::backup::ArchivedEvent;
use crate::events::index::EventSummary;
use crate::events::{ArtifactData, EventArtifact};

/// An index entry with its detail payload attached, as written to the run
/// archive. The next run reads these back as its backup array.
#[derive(Serialize)]
struct MergedEvent<'a> {
    #[serde(flatten)]
    summary: &'a EventSummary,
    #[serde(rename = "extraData", skip_serializing_if = "Option::is_none")]
    extra_data: Option<&'a ArtifactData>,
}

/// Persist one run: a JSON file per detail record plus the merged archive.
pub fn write_run(
    data_dir: &Path,
    events: &[EventSummary],
    artifacts: &[EventArtifact],
) -> Result<()> {
    fs::create_dir_all(data_dir)?;

    for artifact in artifacts {
        let path = data_dir.join(format!("{}.json", safe_filename(&artifact.id)));
        fs::write(&path, serde_json::to_string_pretty(artifact)?)?;
    }

    let merged: Vec<MergedEvent> = events
        .iter()
        .map(|summary| MergedEvent {
            summary,
            extra_data: artifacts
                .iter()
                .find(|a| a.id == summary.event_id)
                .map(|a| &a.data),
        })
        .collect();

    let archive_path = data_dir.join("events.json");
    fs::write(&archive_path, serde_json::to_string_pretty(&merged)?)?;
    log::info!(
        "Wrote {} detail records and {} index entries to {:?}",
        artifacts.len(),
        events.len(),
        data_dir
    );
    Ok(())
}

/// Load the previous run's archive as the backup array. A missing or broken
/// archive is an empty backup, not an error.
pub fn load_backup(data_dir: &Path) -> Vec<ArchivedEvent> {
    let path = data_dir.join("events.json");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&content) {
        Ok(backups) => backups,
        Err(e) => {
            log::warn!("Ignoring unreadable archive {:?}: {}", path, e);
            Vec::new()
        }
    }
}

fn safe_filename(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
