use anyhow::{anyhow, Result};
use std::path::PathBuf;
use url::Url;

#[derive(Clone, Debug)]
pub struct RaidwatchConfig {
    pub base_url: Url,
    pub events_path: String,
    pub data_dir: PathBuf,
}

impl RaidwatchConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("RAIDWATCH_BASE_URL")
            .unwrap_or_else(|_| "https://leekduck.com".to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| anyhow!("RAIDWATCH_BASE_URL is not a valid URL: {}", e))?;

        let events_path =
            std::env::var("RAIDWATCH_EVENTS_PATH").unwrap_or_else(|_| "/events/".to_string());

        let data_dir = PathBuf::from(
            std::env::var("RAIDWATCH_DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        );

        Ok(Self {
            base_url,
            events_path,
            data_dir,
        })
    }

    pub fn events_url(&self) -> Result<Url> {
        self.base_url
            .join(&self.events_path)
            .map_err(|e| anyhow!("Failed to build events URL: {}", e))
    }
}
