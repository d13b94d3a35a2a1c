mod schema;
pub mod init;

pub use schema::{Config, DEFAULT_DATA_SOURCE, DEFAULT_FETCH_TIMEOUT};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/paddock/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("paddock"))
}

/// Get the default config file path (~/.config/paddock/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With no explicit path, a missing default config file is not an error: the
/// built-in defaults are used instead. An explicit path must exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - The fetch timeout is not a valid duration
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Invalid config in {}", config_path.display()))
}

/// Parse and sanity-check config YAML
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config =
        serde_saphyr::from_str(content).context("Failed to parse config: invalid YAML")?;

    config
        .fetch_timeout()
        .with_context(|| format!("fetch_timeout: invalid duration '{}'", config.fetch_timeout))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data, "data/championship.json");
        assert_eq!(config.fetch_timeout().unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
data: "https://example.org/championship.json"
fetch_timeout: "1m 30s"
standings:
  fastest_lap_cutoff: 8
  constructors_count_former: false
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.data, "https://example.org/championship.json");
        assert_eq!(config.fetch_timeout().unwrap(), Duration::from_secs(90));

        let standings = config.effective_standings();
        assert_eq!(standings.fastest_lap_cutoff, Some(8));
        assert_eq!(standings.constructors_count_former, Some(false));
    }

    #[test]
    fn test_invalid_fetch_timeout() {
        let err = parse_config("fetch_timeout: \"soon\"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("fetch_timeout"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config("queries: []\n").is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let path = std::env::temp_dir().join("paddock_test_missing_config.yaml");
        let _ = std::fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join("paddock_test_config.yaml");
        std::fs::write(&path, "data: \"season.json\"\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.data, "season.json");
        assert!(config.standings.is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            standings: Some(crate::standings::StandingsConfig::default()),
            ..Config::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        assert_eq!(parse_config(&yaml).unwrap(), config);
    }
}
