//! Aula CLI - room-acoustic parameters from impulse responses.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aula")]
#[command(author, version, about = "ISO 3382 room-acoustic parameter estimation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate EDT, T10, T20, T30, C80 and D50 per octave band
    Analyze(commands::analyze::AnalyzeArgs),

    /// Export the decay curves and fitted lines of one band
    Curves(commands::curves::CurvesArgs),

    /// Write a synthetic impulse response with known decay times
    Synth(commands::synth::SynthArgs),

    /// Show the octave-band filters for a sample rate
    Bands(commands::bands::BandsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Curves(args) => commands::curves::run(args),
        Commands::Synth(args) => commands::synth::run(args),
        Commands::Bands(args) => commands::bands::run(args),
    }
}
