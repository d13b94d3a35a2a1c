use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::standings::StandingsConfig;

pub const DEFAULT_DATA_SOURCE: &str = "data/championship.json";
pub const DEFAULT_FETCH_TIMEOUT: &str = "10s";

/// Contents of `~/.config/paddock/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// data: "https://example.org/data/championship.json"
/// fetch_timeout: "15s"
/// standings:
///   constructors_count_former: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Season file: a local path or an http(s) URL
    #[serde(default = "default_data")]
    pub data: String,

    /// How long a remote fetch may take, e.g. "10s", "1m"
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: String,

    #[serde(default)]
    pub standings: Option<StandingsConfig>,
}

fn default_data() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

fn default_fetch_timeout() -> String {
    DEFAULT_FETCH_TIMEOUT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: default_data(),
            fetch_timeout: default_fetch_timeout(),
            standings: None,
        }
    }
}

impl Config {
    pub fn fetch_timeout(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.fetch_timeout)
    }

    /// Standings rules from the file, or the defaults when the section is absent
    pub fn effective_standings(&self) -> StandingsConfig {
        self.standings.clone().unwrap_or_default()
    }
}
