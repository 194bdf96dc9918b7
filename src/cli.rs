use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plantsim",
    version,
    about = "Simulate plant-care conditions for the coming days"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Number of days to simulate (prompted for when omitted)
    #[arg(short = 'n', long)]
    pub days: Option<u32>,

    /// Seed for the temperature jitter, for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory that relative source and log paths are resolved against
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the sources and report the next start date without simulating
    Check,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
