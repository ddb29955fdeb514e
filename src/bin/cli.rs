use anyhow::{anyhow, Result};
use colored::*;
use scraper::Html;
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;
use url::Url;

use raidwatch::{
    artifacts, calendar,
    core::config::RaidwatchConfig,
    events::{self, index},
    fetch,
};

#[derive(StructOpt)]
#[structopt(
    name = "raidwatch",
    about = "Scrape raid event announcements into schedule data"
)]
struct Opt {
    /// Override the artifact output directory
    #[structopt(long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Full pipeline: listing, per-event details, artifacts and calendar
    Scrape,
    /// Fetch the listing and print the event index as JSON
    Index,
    /// Extract a single event page (by id or full URL) and print the record
    Event { target: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let opt = Opt::from_args();
    let mut config = RaidwatchConfig::from_env()?;
    if let Some(dir) = opt.data_dir {
        config.data_dir = dir;
    }

    match opt.command {
        Command::Scrape => scrape(&config).await,
        Command::Index => print_index(&config).await,
        Command::Event { target } => print_event(&config, &target).await,
    }
}

async fn scrape(config: &RaidwatchConfig) -> Result<()> {
    let client = fetch::build_client()?;
    let events = fetch_index(&client, config).await?;
    let backups = artifacts::load_backup(&config.data_dir);

    let records = events::process_events(&client, &events, &backups).await;
    artifacts::write_run(&config.data_dir, &events, &records)?;

    let ics = calendar::build_calendar(&events).to_string();
    fs::write(config.data_dir.join("events.ics"), ics)?;

    println!(
        "{} {} events, {} detail records, archive at {}",
        "done:".green().bold(),
        events.len(),
        records.len(),
        config.data_dir.display()
    );
    Ok(())
}

async fn print_index(config: &RaidwatchConfig) -> Result<()> {
    let client = fetch::build_client()?;
    let events = fetch_index(&client, config).await?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

async fn print_event(config: &RaidwatchConfig, target: &str) -> Result<()> {
    let link = if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        config
            .events_url()?
            .join(&format!("{}/", target.trim_matches('/')))
            .map_err(|e| anyhow!("Cannot build event URL for {}: {}", target, e))?
            .to_string()
    };

    let client = fetch::build_client()?;
    let details = events::fetch_event_details(&client, &link).await?;
    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}

async fn fetch_index(
    client: &reqwest::Client,
    config: &RaidwatchConfig,
) -> Result<Vec<index::EventSummary>> {
    let url: Url = config.events_url()?;
    let body = fetch::fetch_page(client, &url).await?;
    let document = Html::parse_document(&body);
    Ok(index::parse_event_index(&document, &config.base_url))
}
