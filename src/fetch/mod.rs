use anyhow::{anyhow, Result};
use reqwest::Client;
use url::Url;

pub const USER_AGENT: &str = "raidwatch/0.1 (schedule archiver)";

pub fn build_client() -> Result<Client> {
    let client = Client::builder().gzip(true).build()?;
    Ok(client)
}

/// Fetch a page body. Non-success statuses are errors; the caller decides
/// whether to fall back.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    log::debug!("Fetching URL: {}", url);

    let response = client
        .get(url.as_str())
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?;

    log::debug!("Response status: {}", response.status());

    if !response.status().is_success() {
        return Err(anyhow!(
            "HTTP request failed with status: {}",
            response.status()
        ));
    }

    let content = response.text().await?;
    log::debug!("Received content length: {}", content.len());

    Ok(content)
}
