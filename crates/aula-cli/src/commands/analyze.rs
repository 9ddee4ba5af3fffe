//! Per-band parameter estimation.

use super::common::{AnalysisOptions, estimator, format_cell};
use aula_analysis::{BandParameterAggregator, Parameter, ParameterTable};
use aula_io::{export_table_csv, export_table_json, read_signal, read_wav_info};
use clap::Args;
use std::path::PathBuf;

/// Estimate room-acoustic parameters for every octave band.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Impulse response WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    options: AnalysisOptions,

    /// Leave out the broadband column
    #[arg(long)]
    no_broadband: bool,

    /// Write the table as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write the table as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Store the effective settings as the user's configuration file
    #[arg(long)]
    save_config: bool,
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = args.options.resolve()?;
    if args.no_broadband {
        config.include_broadband = false;
    }
    let include_broadband = config.include_broadband;

    let info = read_wav_info(&args.input)?;
    let signal = read_signal(&args.input)?;
    println!("Analyzing {}...", args.input.display());
    println!(
        "  {} channel(s), {} Hz, {:.3}s, integration limit {:.3}s",
        info.channels, info.sample_rate, info.duration_secs, config.integration_limit_secs
    );

    let aggregator = BandParameterAggregator::new(estimator(&config)?);
    let table =
        aggregator.analyze_signal(&signal, config.integration_limit_secs, include_broadband)?;

    println!();
    print_table(&table);

    let failures: Vec<_> = table.failures().collect();
    if !failures.is_empty() {
        println!();
        println!("Failed bands:");
        for (band, err) in failures {
            println!("  {:>10}: {}", band.to_string(), err);
        }
    }

    if let Some(path) = &args.csv {
        export_table_csv(&table, path)?;
        println!("\nTable written to {}", path.display());
    }
    if let Some(path) = &args.json {
        export_table_json(&table, path)?;
        println!("\nTable written to {}", path.display());
    }
    if args.save_config {
        let path = config.save_default()?;
        println!("\nConfiguration saved to {}", path.display());
    }

    Ok(())
}

fn print_table(table: &ParameterTable) {
    print!("{:<10}", "");
    for band in table.bands() {
        print!("{:>11}", band.to_string());
    }
    println!();

    for parameter in Parameter::ALL {
        let label = if parameter.unit().is_empty() {
            parameter.label().to_string()
        } else {
            format!("{} [{}]", parameter.label(), parameter.unit())
        };
        print!("{:<10}", label);
        for value in table.row(parameter) {
            print!("{:>11}", format_cell(value, 3));
        }
        println!();
    }
}
