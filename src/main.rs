//! dental-chart - Dental defect selection chart for the terminal
//!
//! Mark missing teeth on a 4 x 8 chart and see how many distinct missing-tooth
//! patterns of that size exist in the 28-tooth dentition.

mod combinatorics;
mod config;
mod core;
mod data;
mod frontend;
mod locale;

use anyhow::Result;
use clap::{Parser as ClapParser, Subcommand};
use frontend::{Frontend, FrontendEvent};
use locale::NumberLocale;
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "dental-chart")]
#[command(about = "Dental defect selection chart", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.dental-chart)
    /// Can also be set via DENTAL_CHART_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of ways to choose K missing teeth
    Combinations {
        /// Number of missing teeth
        #[arg(allow_negative_numbers = true)]
        missing: i64,

        /// Number of teeth to choose from
        #[arg(long, default_value_t = combinatorics::DENTITION_SIZE)]
        total: i64,
    },
    /// Print C(total, k) for every k from 0 to total
    Table {
        /// Number of teeth to choose from
        #[arg(long, default_value_t = combinatorics::DENTITION_SIZE)]
        total: i64,
    },
    /// Validate a config file (defaults to the one in the data directory)
    ValidateConfig {
        /// Config file to validate
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("dental-chart.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var("DENTAL_CHART_DIR", data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var("DENTAL_CHART_DIR") {
        tracing::info!("Using data directory from DENTAL_CHART_DIR: {}", env_dir);
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        match command {
            Commands::Combinations { missing, total } => {
                print_combinations(missing, total);
            }
            Commands::Table { total } => {
                print_table(total);
            }
            Commands::ValidateConfig { file } => {
                let path = match file {
                    Some(path) => path,
                    None => config::Config::config_path()?,
                };
                if !validate_config_file(&path) {
                    std::process::exit(1);
                }
            }
        }
        return Ok(());
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()?
    };

    run_tui(config)
}

fn print_combinations(missing: i64, total: i64) {
    let value = combinatorics::combination(total, missing);
    println!(
        "C({}, {}) = {}",
        total,
        missing,
        locale::format_grouped(value, NumberLocale::EnUs)
    );
    println!(
        "  {}: {}",
        NumberLocale::JaJp.tag(),
        locale::format_grouped(value, NumberLocale::JaJp)
    );
    println!(
        "  {}: {}",
        NumberLocale::EnUs.tag(),
        locale::format_grouped(value, NumberLocale::EnUs)
    );

    if let Ok(missing) = usize::try_from(missing) {
        println!();
        println!("{}", locale::pattern_sentence_ja(missing, total));
        println!("{}", locale::pattern_sentence_en(missing, total, value));
    }
}

fn print_table(total: i64) {
    if total < 0 {
        eprintln!("✗ Total must not be negative (got {})", total);
        std::process::exit(1);
    }
    println!("{:>4}  {:>30}", "k", format!("C({}, k)", total));
    for k in 0..=total {
        let value = combinatorics::combination(total, k);
        println!(
            "{:>4}  {:>30}",
            k,
            locale::format_grouped(value, NumberLocale::EnUs)
        );
    }
}

/// Report problems in a config file; returns false if it cannot be used as-is
fn validate_config_file(path: &std::path::Path) -> bool {
    println!("Validating config file: {:?}", path);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("✗ Failed to read config: {}", e);
            return false;
        }
    };
    let config = match config::Config::parse(&contents) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to parse config: {}", e);
            return false;
        }
    };
    println!("✓ Config parsed successfully");

    let validation = config::keybind_validator::validate_keybinds(&config.keybinds);
    for error in validation.errors() {
        eprintln!("✗ Error: {}", error.message());
    }
    for warning in validation.warnings() {
        println!("⚠ Warning: {}", warning.message());
    }

    if validation.issues.is_empty() {
        println!("✓ Config is valid with no issues");
    } else {
        if validation.has_errors() {
            eprintln!("\n✗ Found {} error(s)", validation.errors().len());
        }
        if validation.has_warnings() {
            println!("⚠ Found {} warning(s)", validation.warnings().len());
        }
    }

    validation.is_valid()
}

/// Run TUI frontend
fn run_tui(config: config::Config) -> Result<()> {
    let mut frontend = frontend::TuiFrontend::new(&config)?;
    let mut chart = core::ChartCore::new(config);

    let (width, height) = frontend.size();
    tracing::info!("Dental chart started ({}x{})", width, height);
    let result = event_loop(&mut frontend, &mut chart);

    frontend.cleanup()?;
    if chart.state().is_empty() {
        tracing::info!("Dental chart closed, no missing teeth");
    } else {
        let missing: Vec<String> = chart
            .state()
            .iter_missing()
            .map(|position| position.fdi_code().to_string())
            .collect();
        tracing::info!(
            missing = chart.summary().missing_count,
            "Dental chart closed, missing teeth: [{}]",
            missing.join(", ")
        );
    }
    result
}

/// Apply every pending event, then render once if anything changed
fn event_loop(frontend: &mut dyn Frontend, chart: &mut core::ChartCore) -> Result<()> {
    while chart.running {
        if chart.needs_render {
            frontend.render(chart)?;
            chart.needs_render = false;
        }

        for event in frontend.poll_events()? {
            dispatch_event(frontend, chart, event)?;
            if !chart.running {
                break;
            }
        }
    }

    Ok(())
}

fn dispatch_event(
    frontend: &mut dyn Frontend,
    chart: &mut core::ChartCore,
    event: FrontendEvent,
) -> Result<()> {
    match event {
        FrontendEvent::Key { code, modifiers } => {
            chart.handle_key(crossterm::event::KeyEvent::new(code, modifiers));
        }
        FrontendEvent::Mouse { kind, x, y, .. } => {
            let target = frontend.hit_test(x, y);
            chart.handle_mouse(kind, target);
        }
        FrontendEvent::Resize { width, height } => {
            tracing::debug!("Terminal resized to {}x{}", width, height);
            // Later mouse events in this batch must hit-test the new layout
            frontend.render(chart)?;
            chart.needs_render = false;
        }
        FrontendEvent::Quit => {
            chart.running = false;
        }
    }

    Ok(())
}
