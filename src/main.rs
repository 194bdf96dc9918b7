mod cli;
mod config;
mod error;
mod logic;
mod models;
mod sources;
mod store;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, SimulationParams};
use dialoguer::Input;
use error::{Result, SimError};
use logic::{JitterSource, RecommendationEngine, SimulationRun, UniformJitter};
use models::{PlantCatalog, ReferenceTable};
use std::io::{self, BufRead, Write};
use store::{write_blocks, DateLine, SimulationLog};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let paths = config.resolved_paths(cli.data_dir.as_deref());

    let catalog = sources::load_catalog(&paths.plants)?;
    let reference = sources::load_reference(&paths.reference)?;
    if catalog.is_empty() {
        tracing::warn!(path = %paths.plants.display(), "Plant catalog is empty");
    }
    if reference.is_empty() {
        tracing::warn!(
            path = %paths.reference.display(),
            "No reference temperatures, every slot uses the default"
        );
    }

    let log = SimulationLog::new(paths.log.clone());
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Check) => check(&config.simulation, &catalog, &reference, &log, today),
        None => {
            let days = match cli.days {
                Some(d) => d,
                None => prompt_days()?,
            };
            simulate(cli, &config, &catalog, &reference, &log, days as usize, today)
        }
    }
}

const DAYS_PROMPT: &str = "How many days do you want to simulate? (whole number)";

fn prompt_days() -> Result<u32> {
    if console::Term::stderr().is_term() {
        return Input::<u32>::new()
            .with_prompt(DAYS_PROMPT)
            .interact_text()
            .map_err(|e| SimError::InvalidInput(format!("Failed to read day count: {}", e)));
    }

    // Piped or scripted input
    eprint!("{} ", DAYS_PROMPT);
    read_days(io::stdin().lock())
}

/// Read the first whitespace-separated token and parse it as a day count.
/// Blank lines before it are skipped.
fn read_days<R: BufRead>(mut reader: R) -> Result<u32> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(SimError::InvalidInput(
                "No day count given before end of input".into(),
            ));
        }
        if let Some(token) = line.split_whitespace().next() {
            return token.parse::<u32>().map_err(|e| {
                SimError::InvalidInput(format!("'{}' is not a whole number of days: {}", token, e))
            });
        }
    }
}

fn simulate(
    cli: &Cli,
    config: &Config,
    catalog: &PlantCatalog,
    reference: &ReferenceTable,
    log: &SimulationLog,
    days: usize,
    today: chrono::NaiveDate,
) -> Result<()> {
    let mut jitter: Box<dyn JitterSource> = match cli.seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded jitter");
            Box::new(UniformJitter::seeded(seed))
        }
        None => Box::new(UniformJitter::from_entropy()),
    };

    let run = SimulationRun::new(&config.simulation, catalog, reference, log);
    let outcome = run.execute(days, jitter.as_mut(), today)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_blocks(&mut out, &outcome, DateLine::Split)?;
    if let Some(last) = outcome.last_date() {
        writeln!(
            out,
            "Simulation saved to: {} ({} to {})",
            log.path().display(),
            outcome.start_date,
            last
        )?;
    }
    out.flush()?;
    Ok(())
}

fn check(
    params: &SimulationParams,
    catalog: &PlantCatalog,
    reference: &ReferenceTable,
    log: &SimulationLog,
    today: chrono::NaiveDate,
) -> Result<()> {
    println!("Plants:               {}", catalog.len());
    println!("Reference entries:    {}", reference.len());

    let missing = reference.missing_slots();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
        println!("Slots using default:  {}", labels.join(", "));
    }

    let (low, high) = RecommendationEngine::new(params).bounds();
    println!("Humidity tiers:       low < {:.1}, high > {:.1}", low, high);

    println!("Log:                  {}", log.path().display());
    println!("Next start date:      {}", log.next_start_date(today));
    Ok(())
}
