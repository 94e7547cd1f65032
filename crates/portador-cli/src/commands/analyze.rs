//! Carrier estimate and spectral peak listing.

use super::common::parse_window;
use clap::Args;
use portador_analysis::export::export_spectrum_csv;
use portador_analysis::{CarrierEstimator, Window};
use portador_core::linear_to_db;
use portador_io::read_signal;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Show top N bins
    #[arg(long, default_value = "10")]
    peaks: usize,

    /// Window function (rectangular, hann, hamming, blackman)
    #[arg(long, default_value = "hann", value_parser = parse_window)]
    window: Window,

    /// Output spectrum CSV file (dB)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    println!("Analyzing spectrum of {}...", args.input.display());

    let signal = read_signal(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        signal.len(),
        signal.sample_rate(),
        signal.duration_secs()
    );

    let estimator = CarrierEstimator::new().with_window(args.window);
    let (spectrum, estimate) = estimator.estimate_with_spectrum(&signal)?;

    println!("\nCarrier estimate: {:.2} Hz", estimate.frequency_hz);
    println!(
        "  from peaks at {:.2} Hz and {:.2} Hz ({:.2} Hz apart)",
        estimate.lower().frequency_hz,
        estimate.upper().frequency_hz,
        estimate.spread_hz()
    );

    println!("\nTop {} frequency peaks ({} window):", args.peaks, args.window.name());
    println!("  {:>10}  {:>10}", "Freq (Hz)", "Level (dB)");
    println!("  {:>10}  {:>10}", "---------", "----------");
    for peak in spectrum.peak_frequencies(args.peaks) {
        println!(
            "  {:>10.1}  {:>10.1}",
            peak.frequency_hz,
            linear_to_db(peak.magnitude)
        );
    }

    if let Some(path) = args.output {
        export_spectrum_csv(&spectrum, &path, true)?;
        println!("\nWrote spectrum to {}", path.display());
    }

    Ok(())
}
