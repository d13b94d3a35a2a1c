use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use paddock::loader::DataSource;
use paddock::standings::{
    compute_constructor_standings, compute_driver_standings, StandingsRules, Summary,
};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_DATA: i32 = 1;
const EXIT_DATA_UNAVAILABLE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Driver championship standings
    Drivers {
        /// Only show the top of the table
        #[arg(long)]
        compact: bool,
    },
    /// Constructor championship standings
    Constructors {
        /// Only show the top of the table
        #[arg(long)]
        compact: bool,
        /// List each team's principal and drivers
        #[arg(long)]
        expand: bool,
    },
    /// Season calendar, or one round's results with --round
    Calendar {
        /// Round id to show qualifying and race results for
        #[arg(long)]
        round: Option<u32>,
    },
    /// Season overview (default if no subcommand)
    Summary,
    /// Check the season file for inconsistent references
    Check,
    /// Interactive standings browser
    Tui {
        /// Color theme
        #[arg(long, value_enum, default_value_t = paddock::tui::Theme::Auto)]
        theme: paddock::tui::Theme,
    },
    /// Write a config file interactively
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "paddock")]
#[command(about = "Driver and constructor championship standings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/paddock/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Season file path or URL (overrides the config)
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_INVALID_DATA);
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+). Already
    // installed is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Summary);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = paddock::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match paddock::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate standings rules at startup
    let standings_config = config.effective_standings();
    if let Err(errors) = paddock::standings::validate_standings(&standings_config) {
        eprintln!("Standings config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let timeout = match config.fetch_timeout() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Config error: fetch_timeout: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let source = DataSource::parse(cli.data.as_deref().unwrap_or(&config.data));

    if cli.verbose {
        eprintln!("Loading season from {} (timeout {:?})", source, timeout);
    }

    let loaded = match paddock::loader::load_championship(&source, timeout).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_DATA_UNAVAILABLE);
        }
    };
    let championship = &loaded.championship;

    if cli.verbose {
        eprintln!(
            "Loaded {} {}: {} teams, {} drivers, {} rounds, {} results in {:?} (at {})",
            championship.championship.name,
            championship.championship.season,
            championship.teams.len(),
            championship.drivers.len(),
            championship.grand_prix.len(),
            championship.results.len(),
            start_time.elapsed(),
            loaded.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }

    let problems = paddock::standings::validate_championship(championship)
        .err()
        .unwrap_or_default();

    if let Commands::Check = command {
        if problems.is_empty() {
            println!(
                "{}: {} teams, {} drivers, {} rounds. No problems found.",
                source,
                championship.teams.len(),
                championship.drivers.len(),
                championship.grand_prix.len()
            );
            std::process::exit(EXIT_SUCCESS);
        }
        println!("{} problem(s) in {}:", problems.len(), source);
        for problem in &problems {
            println!("  - {}", problem);
        }
        std::process::exit(EXIT_INVALID_DATA);
    }

    // The TUI replays held warnings once it restores the terminal
    if let Commands::Tui { .. } = command {
        paddock::diagnostics::hold();
    }

    // Inconsistent references never block the standings
    if cli.verbose {
        paddock::diagnostics::warn_all("Season file problems:", &problems);
    }

    let rules = StandingsRules::resolve(championship, &standings_config);
    let placeholders = standings_config.placeholder_names();
    if cli.verbose {
        paddock::diag!(
            "Rules: fastest lap cutoff {}, former drivers count for constructors: {}",
            rules.fastest_lap_cutoff, rules.constructors_count_former
        );
    }

    let use_colors = paddock::output::should_use_colors();

    match command {
        Commands::Drivers { compact } => {
            let standings = compute_driver_standings(championship, &rules);
            match cli.format {
                Format::Table => println!(
                    "{}",
                    paddock::output::format_driver_table(&standings, compact, use_colors)
                ),
                Format::Tsv => println!("{}", paddock::output::format_drivers_tsv(&standings)),
                Format::Json => print_json(&standings),
            }
        }
        Commands::Constructors { compact, expand } => {
            let standings = compute_constructor_standings(championship, &rules);
            match cli.format {
                Format::Table => println!(
                    "{}",
                    paddock::output::format_constructor_table(
                        &standings,
                        championship,
                        compact,
                        expand,
                        use_colors
                    )
                ),
                Format::Tsv => {
                    println!("{}", paddock::output::format_constructors_tsv(&standings))
                }
                Format::Json => print_json(&standings),
            }
        }
        Commands::Calendar { round } => match round {
            Some(id) => {
                let Some(gp) = championship.grand_prix.iter().find(|gp| gp.id == id) else {
                    eprintln!("No round {} in the calendar", id);
                    std::process::exit(EXIT_INVALID_DATA);
                };
                match cli.format {
                    Format::Json => print_json(&championship.result_for(gp)),
                    _ => println!(
                        "{}",
                        paddock::output::format_race_card(championship, &rules, gp, use_colors)
                    ),
                }
            }
            None => match cli.format {
                Format::Json => print_json(&championship.grand_prix),
                _ => println!("{}", paddock::output::format_calendar(championship, use_colors)),
            },
        },
        Commands::Summary => {
            let drivers = compute_driver_standings(championship, &rules);
            let constructors = compute_constructor_standings(championship, &rules);
            let summary = Summary::build(championship, &drivers, &constructors, &placeholders);
            match cli.format {
                Format::Json => print_json(&summary),
                _ => println!("{}", paddock::output::format_summary(&summary, use_colors)),
            }
        }
        Commands::Tui { theme } => {
            let colors = paddock::tui::resolve_theme(theme);
            let app = paddock::tui::App::new(loaded.clone(), rules, &placeholders, colors);
            if let Err(e) = paddock::tui::run_tui(app).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_INVALID_DATA);
            }
        }
        Commands::Check | Commands::Init => {}
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
