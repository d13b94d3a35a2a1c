use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, DEFAULT_DATA_SOURCE, DEFAULT_FETCH_TIMEOUT};
use crate::standings::{StandingsConfig, DEFAULT_FASTEST_LAP_CUTOFF};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt with a default shown in brackets. Empty input picks the default.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Write a config file atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Ask where the season file lives and how to score it, then write the config.
///
/// If `default_path` is Some, it is offered as the save location.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("paddock configuration");
    println!("=====================");
    println!();

    println!("The season file is a JSON document with teams, drivers, events and results.");
    println!("It can be a local path or an http(s) URL.");
    let data = prompt_with_default("Season file", DEFAULT_DATA_SOURCE)?;

    let fetch_timeout = if data.starts_with("http://") || data.starts_with("https://") {
        loop {
            let input = prompt_with_default("Fetch timeout", DEFAULT_FETCH_TIMEOUT)?;
            match humantime::parse_duration(&input) {
                Ok(_) => break input,
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        }
    } else {
        DEFAULT_FETCH_TIMEOUT.to_string()
    };

    println!();
    println!("Points tables come from the season file. The rules below decide who they go to.");
    let fastest_lap_cutoff: usize = loop {
        let input = prompt_with_default(
            "Fastest lap bonus only for finishers in the top",
            &DEFAULT_FASTEST_LAP_CUTOFF.to_string(),
        )?;
        match input.parse::<usize>() {
            Ok(v) if v >= 1 => break v,
            _ => println!("  Invalid: must be a whole number of at least 1. Try again."),
        }
    };
    let constructors_count_former = prompt_yes_no(
        "Should results of drivers who left the grid still count for their team?",
        true,
    )?;

    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        data,
        fetch_timeout,
        standings: Some(StandingsConfig {
            fastest_lap_cutoff: Some(fastest_lap_cutoff),
            constructors_count_former: Some(constructors_count_former),
            ..StandingsConfig::default()
        }),
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `paddock` to see the standings.");

    Ok(())
}
