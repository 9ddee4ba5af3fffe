//! Synthetic impulse response generation.

use aula_analysis::octave::NOMINAL_CENTERS_HZ;
use aula_analysis::synth::{
    DEFAULT_DURATION_SECS, DEFAULT_SAMPLE_RATE, DEFAULT_T60_SECS, synthetic_impulse_response,
};
use aula_io::write_signal;
use clap::Args;
use std::path::PathBuf;

/// Write a synthetic impulse response built from per-band decay times.
#[derive(Args)]
pub struct SynthArgs {
    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Band centers in Hz, comma separated (default: nominal octave centers)
    #[arg(long, value_delimiter = ',')]
    centers: Vec<f64>,

    /// T60 per band in seconds, comma separated (default: built-in room)
    #[arg(long, value_delimiter = ',')]
    t60: Vec<f64>,

    /// Duration in seconds
    #[arg(short, long, default_value_t = DEFAULT_DURATION_SECS)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Bit depth (16, 24 or 32 float)
    #[arg(long, default_value_t = 32)]
    bits: u16,
}

/// Run the synth command.
pub fn run(args: SynthArgs) -> anyhow::Result<()> {
    let centers = if args.centers.is_empty() {
        NOMINAL_CENTERS_HZ.to_vec()
    } else {
        args.centers
    };
    let t60 = if args.t60.is_empty() {
        DEFAULT_T60_SECS.to_vec()
    } else {
        args.t60
    };

    let signal = synthetic_impulse_response(&centers, &t60, args.duration, args.sample_rate)?;
    write_signal(&args.output, &signal, args.bits)?;

    println!(
        "Wrote {} ({} bands, {:.2}s at {} Hz)",
        args.output.display(),
        centers.len(),
        signal.duration_secs(),
        signal.sample_rate()
    );
    Ok(())
}
