//! Decay curve export for external plotting.

use super::common::{AnalysisOptions, estimator, parse_band};
use aula_analysis::{BandId, DecayWindow, OctaveBandFilter};
use aula_io::{export_curves_csv, read_signal};
use clap::Args;
use std::path::PathBuf;

/// Export the intermediate curves of one band.
#[derive(Args)]
pub struct CurvesArgs {
    /// Impulse response WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Band to export: `broadband` or a nominal center frequency
    #[arg(short, long, default_value = "broadband", value_parser = parse_band)]
    band: BandId,

    /// Output CSV file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    options: AnalysisOptions,
}

/// Run the curves command.
pub fn run(args: CurvesArgs) -> anyhow::Result<()> {
    let config = args.options.resolve()?;
    let signal = read_signal(&args.input)?;

    let band_signal = match args.band {
        BandId::Broadband => signal,
        BandId::Octave(center) => {
            OctaveBandFilter::new(signal.sample_rate())?
                .band(&signal, center)?
                .signal
        }
    };

    let analysis = estimator(&config)?.analyze(&band_signal, config.integration_limit_secs)?;
    export_curves_csv(&analysis, &args.output)?;

    println!("{} band:", args.band);
    for window in DecayWindow::ALL {
        let fit = analysis.fits.get(window);
        println!(
            "  {:<4} {:>8.3} s  (slope {:.2} dB/s over samples {}..{})",
            window.label(),
            fit.decay_time,
            fit.line.slope,
            fit.range.start,
            fit.range.end
        );
    }
    println!("Curves written to {}", args.output.display());

    Ok(())
}
