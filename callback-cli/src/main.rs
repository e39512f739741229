//! Callback Registry CLI Application
//!
//! Command-line demonstrations built on the callback-registry library:
//! - Multicast logging to screen and file
//! - Callbacks passed as parameters and returned from functions
//! - Result covariance and parameter contravariance over payment kinds
//! - Func / Action / Predicate processing of a student roster

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

mod callbacks;
mod config;
mod payments;
mod sinks;
mod students;

use config::{AppConfig, OutputFormat};
use sinks::{ConsoleSink, LineSink};

/// Callback Registry - delegate-style callback demonstrations
#[derive(Parser, Debug)]
#[command(name = "callback-cli")]
#[command(about = "Demonstrate multicast callbacks, variance and Func/Action/Predicate", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory for log files (overrides the config file)
    #[arg(long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    /// Output format for the student report (overrides the config file)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Multicast logging to screen and file
    Basic {
        /// Text to log (prompted for when omitted)
        text: Option<String>,
    },
    /// Callbacks passed as parameters and returned from functions
    Callbacks,
    /// Covariant payment factories and a contravariant payment logger
    Variance {
        /// Credit-card user
        #[arg(default_value = "Aryan")]
        card_user: String,
        /// UPI user
        #[arg(default_value = "Rahul")]
        upi_user: String,
    },
    /// Func / Action / Predicate over the student roster
    Students,
    /// Run every demonstration in order
    All,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Callback Registry CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using registry library v{}", callback_registry::VERSION);

    let config = load_effective_config(&args)?;
    if writes_log_files(&args.command) {
        ensure_output_dir(&config)?;
    }
    let console: Arc<dyn LineSink> = Arc::new(ConsoleSink);

    match &args.command {
        Some(Command::Basic { text }) => {
            let text = match text {
                Some(text) => text.clone(),
                None => prompt("Enter your name: ")?,
            };
            callbacks::run_basic(&config, console, &text)?;
        }
        Some(Command::Callbacks) => callbacks::run_callbacks(console)?,
        Some(Command::Variance { card_user, upi_user }) => {
            payments::run_variance(&config, console, card_user, upi_user)?;
        }
        Some(Command::Students) => {
            students::run(&config, config.output.format, console)?;
        }
        Some(Command::All) => run_all(&config, console)?,
        None => {
            println!("Callback Registry - No demonstration selected");
            println!("\nQuick Start:");
            println!("  callback-cli basic \"Aryan\"");
            println!("  callback-cli variance Aryan Rahul");
            println!("  callback-cli students --format json");
            println!("\nUse --help for more options");
        }
    }

    Ok(())
}

/// Config file (if any) with command-line overrides applied
fn load_effective_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            let config = config::load_config(path)?;
            log::debug!("Configuration loaded successfully");
            config
        }
        None => AppConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.logging.output_dir = Some(dir.clone());
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    Ok(config)
}

/// Only the logging and payment demonstrations append to files
fn writes_log_files(command: &Option<Command>) -> bool {
    matches!(
        command,
        Some(Command::Basic { .. } | Command::Variance { .. } | Command::All)
    )
}

fn ensure_output_dir(config: &AppConfig) -> Result<()> {
    if let Some(dir) = &config.logging.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }
    Ok(())
}

fn run_all(config: &AppConfig, console: Arc<dyn LineSink>) -> Result<()> {
    banner(console.as_ref(), "Basic Delegates")?;
    callbacks::run_basic(config, Arc::clone(&console), "Guest")?;

    banner(console.as_ref(), "Callbacks")?;
    callbacks::run_callbacks(Arc::clone(&console))?;

    banner(console.as_ref(), "Covariance & Contravariance")?;
    payments::run_variance(config, Arc::clone(&console), "Aryan", "Rahul")?;

    banner(console.as_ref(), "Func / Action / Predicate")?;
    students::run(config, config.output.format, console)?;

    Ok(())
}

fn banner(console: &dyn LineSink, title: &str) -> Result<()> {
    console.write_line("═══════════════════════════════════════════════")?;
    console.write_line(&format!("  {}", title))?;
    console.write_line("═══════════════════════════════════════════════")
}

/// Ask for one line on stdin
fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
