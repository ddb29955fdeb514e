pub mod backup;
pub mod images;
pub mod index;
pub mod parsing;

use anyhow::Result;
use reqwest::Client;
use scraper::Html;
use serde::Serialize;
use url::Url;

use backup::{recover_from_backup, ArchivedEvent, BackupFields};
use index::EventSummary;
use parsing::EventDetails;

/// One persisted detail record, keyed by the event identifier.
#[derive(Debug, Clone, Serialize)]
pub struct EventArtifact {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ArtifactData,
}

/// Either a freshly extracted record or fields recovered from a previous
/// run's archive. Both serialize flat.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ArtifactData {
    Extracted(EventDetails),
    Recovered(BackupFields),
}

impl EventArtifact {
    fn new(id: &str, data: ArtifactData) -> Self {
        Self {
            id: id.to_string(),
            kind: "event".to_string(),
            data,
        }
    }
}

/// Fetch one event page and extract its detail record. A failed fetch falls
/// back to the archived payload when one is usable; the error never crosses
/// this boundary.
pub async fn process_event(
    client: &Client,
    event: &EventSummary,
    backups: &[ArchivedEvent],
) -> Option<EventArtifact> {
    match fetch_event_details(client, &event.link).await {
        Ok(details) => {
            log::info!("Extracted details for {}", event.event_id);
            Some(EventArtifact::new(
                &event.event_id,
                ArtifactData::Extracted(details),
            ))
        }
        Err(e) => {
            log::warn!(
                "Fetch failed for {} ({}); trying archived data",
                event.event_id,
                e
            );
            match recover_from_backup(&event.event_id, backups) {
                Some(fields) => Some(EventArtifact::new(
                    &event.event_id,
                    ArtifactData::Recovered(fields),
                )),
                None => {
                    log::warn!("No usable archived data for {}", event.event_id);
                    None
                }
            }
        }
    }
}

/// Extract a single already-located event page.
pub async fn fetch_event_details(client: &Client, link: &str) -> Result<EventDetails> {
    let url = Url::parse(link)?;
    let body = crate::fetch::fetch_page(client, &url).await?;
    let document = Html::parse_document(&body);
    Ok(parsing::extract_event_details(&document))
}

/// Process the whole index concurrently. Each event owns its fetch, parse
/// context and record; results arrive in completion order.
pub async fn process_events(
    client: &Client,
    events: &[EventSummary],
    backups: &[ArchivedEvent],
) -> Vec<EventArtifact> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    let mut handles = Vec::new();

    for event in events {
        let tx = tx.clone();
        let client = client.clone();
        let event = event.clone();
        let backups = backups.to_vec();

        let handle = tokio::spawn(async move {
            let artifact = process_event(&client, &event, &backups).await;
            let _ = tx.send(artifact).await;
        });
        handles.push(handle);
    }

    drop(tx);

    let mut artifacts = Vec::new();
    while let Some(result) = rx.recv().await {
        if let Some(artifact) = result {
            artifacts.push(artifact);
        }
    }

    for handle in handles {
        if let Err(e) = handle.await {
            log::error!("Task join error: {}", e);
        }
    }

    artifacts
}
