//! # co2vent
//!
//! Log CO2 readings while airing a room and see when the level reaches the target.
//!
//! ```bash
//! # Interactive logging
//! co2vent log
//!
//! # One-shot projection
//! co2vent project 21:00=1000 21:10=800
//!
//! # Simulated session
//! co2vent demo --readings 12 --seed 7
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use co2vent_core::demo::DemoSimulator;
use co2vent_core::session::Session;
use co2vent_core::settings::Settings;
use co2vent_core::time::WallClock;

/// Demo readings are at most 6 minutes apart, so 240 of them stay under 24 hours
const MAX_DEMO_READINGS: u64 = 240;

mod render;
mod repl;

/// co2vent - CO2 ventilation tracker
#[derive(Parser)]
#[command(name = "co2vent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, env = "CO2VENT_CONFIG")]
    config: Option<PathBuf>,

    /// Target concentration in ppm, overriding the settings file
    #[arg(long, global = true)]
    target: Option<f64>,

    /// Print the chart series as JSON instead of the table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter readings interactively
    Log,
    /// Project from readings given as HH:MM=PPM
    Project {
        #[arg(value_name = "HH:MM=PPM", required = true)]
        readings: Vec<String>,
    },
    /// Run a simulated ventilation session
    Demo {
        /// Number of readings to generate; the whole run stays within one day
        #[arg(
            short,
            long,
            default_value_t = 12,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_DEMO_READINGS)
        )]
        readings: usize,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Wall clock of the first reading
        #[arg(long, default_value = "19:00")]
        start: String,
    },
    /// Show or initialise the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings
    Show,
    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings_path = match &cli.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };
    let mut settings = Settings::load(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    if let Some(target) = cli.target {
        settings.target_ppm = target;
        settings.validate()?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Log => {
            let mut session = Session::from_settings(&settings);
            let stdin = io::stdin();
            repl::run(&mut session, stdin.lock(), &mut out, cli.json)?;
        }
        Commands::Project { readings } => {
            let mut session = Session::from_settings(&settings);
            for entry in &readings {
                let (clock, ppm) = entry
                    .split_once('=')
                    .with_context(|| format!("Expected HH:MM=PPM, got '{entry}'"))?;
                session
                    .submit_reading(clock, ppm)
                    .with_context(|| format!("Rejected reading '{entry}'"))?;
            }
            render::report(&session, &mut out, cli.json)?;
        }
        Commands::Demo {
            readings,
            seed,
            start,
        } => {
            let start = WallClock::parse(&start)?;
            let mut sim = match seed {
                Some(seed) => DemoSimulator::with_seed(seed, start),
                None => DemoSimulator::new(start),
            };
            let mut session = Session::from_settings(&settings);
            sim.fill(&mut session, readings)?;
            info!("Generated {} demo readings", session.len());
            render::report(&session, &mut out, cli.json)?;
        }
        Commands::Config(ConfigCommands::Show) => {
            writeln!(out, "# {}", settings_path.display())?;
            serde_json::to_writer_pretty(&mut out, &settings)?;
            writeln!(out)?;
        }
        Commands::Config(ConfigCommands::Init { force }) => {
            if settings_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    settings_path.display()
                );
            }
            settings.save(&settings_path)?;
            writeln!(out, "Wrote {}", settings_path.display())?;
        }
    }

    out.flush()?;
    Ok(())
}
