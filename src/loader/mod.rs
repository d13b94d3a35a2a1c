use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::championship::Championship;

/// Where the season file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` strings are URLs, anything else is a path
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// The season file could not be fetched or parsed. Not retried.
#[derive(Debug)]
pub struct DataUnavailable {
    pub source: String,
    pub reason: String,
}

impl fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data unavailable from {}: {}", self.source, self.reason)
    }
}

impl std::error::Error for DataUnavailable {}

/// A parsed season together with where and when it was loaded
#[derive(Debug, Clone)]
pub struct LoadedChampionship {
    pub championship: Championship,
    pub source: DataSource,
    pub loaded_at: DateTime<Utc>,
}

/// Parse a season file
pub fn parse_championship(content: &str) -> Result<Championship> {
    serde_json::from_str(content).context("Failed to parse season file: invalid JSON")
}

async fn read_source(source: &DataSource, timeout: Duration) -> Result<String> {
    match source {
        DataSource::Path(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        DataSource::Url(url) => {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to create HTTP client")?;
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Request to {} failed", url))?
                .error_for_status()
                .with_context(|| format!("Server rejected request to {}", url))?;
            response
                .text()
                .await
                .context("Failed to read response body")
        }
    }
}

/// Load the season once. Any failure is reported as [`DataUnavailable`].
pub async fn load_championship(
    source: &DataSource,
    timeout: Duration,
) -> Result<LoadedChampionship, DataUnavailable> {
    let unavailable = |e: anyhow::Error| DataUnavailable {
        source: source.to_string(),
        reason: format!("{:#}", e),
    };

    let content = read_source(source, timeout).await.map_err(unavailable)?;
    let championship = parse_championship(&content).map_err(unavailable)?;

    Ok(LoadedChampionship {
        championship,
        source: source.clone(),
        loaded_at: Utc::now(),
    })
}
