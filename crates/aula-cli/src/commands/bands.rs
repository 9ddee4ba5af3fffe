//! Octave-band filter listing.

use aula_analysis::OctaveBandFilter;
use aula_analysis::octave::FILTER_ORDER;
use clap::Args;

/// Show the octave-band filters designed for a sample rate.
#[derive(Args)]
pub struct BandsArgs {
    /// Sample rate in Hz
    #[arg(short, long, default_value_t = 44100)]
    sample_rate: u32,
}

/// Run the bands command.
pub fn run(args: BandsArgs) -> anyhow::Result<()> {
    let filter = OctaveBandFilter::new(args.sample_rate)?;

    println!(
        "Octave bands at {} Hz (Butterworth order {}):",
        args.sample_rate, FILTER_ORDER
    );
    println!(
        "  {:>8}  {:>10}  {:>10}  {:>12}",
        "center", "lower", "upper", "gain@center"
    );

    for (center, edges) in filter.edges() {
        match edges {
            Ok(edges) => {
                let gain_db = 20.0 * filter.design(center)?.magnitude_at(center).log10();
                println!(
                    "  {:>8}  {:>10.1}  {:>10.1}  {:>9.2} dB",
                    center, edges.lower_hz, edges.upper_hz, gain_db
                );
            }
            Err(err) => println!("  {:>8}  unavailable: {}", center, err),
        }
    }

    Ok(())
}
