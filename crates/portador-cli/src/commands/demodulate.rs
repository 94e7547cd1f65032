//! Batch AM demodulation command.

use super::common::{ParamArgs, format_db};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use portador_analysis::export::{DEFAULT_EXCERPT_LEN, export_signal_csv, export_spectrum_csv};
use portador_analysis::{CarrierEstimate, Spectrum};
use portador_core::{Signal, peak, rms};
use portador_io::{BitDepth, read_signal, write_signal};
use portador_receiver::{Pipeline, Stage, StageObserver};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct DemodulateArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "16")]
    bit_depth: u16,

    /// Write a CSV excerpt of every intermediate signal into this directory
    #[arg(long, value_name = "DIR")]
    dump_dir: Option<PathBuf>,

    /// Write the input spectrum (dB) as CSV
    #[arg(long, value_name = "FILE")]
    spectrum_csv: Option<PathBuf>,
}

/// Drives the progress bar and writes the requested diagnostics.
///
/// Observer callbacks cannot fail, so the first I/O error is kept and
/// reported once the run returns.
struct Diagnostics<'a> {
    progress: ProgressBar,
    dump_dir: Option<&'a Path>,
    spectrum_csv: Option<&'a Path>,
    error: Option<anyhow::Error>,
}

impl Diagnostics<'_> {
    fn record(&mut self, result: std::io::Result<()>, path: &Path) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = result {
            self.error = Some(anyhow::anyhow!("failed to write {}: {e}", path.display()));
        }
    }
}

impl StageObserver for Diagnostics<'_> {
    fn on_spectrum(&mut self, spectrum: &Spectrum, _estimate: &CarrierEstimate) {
        self.progress.inc(1);
        if let Some(path) = self.spectrum_csv {
            let result = export_spectrum_csv(spectrum, path, true);
            self.record(result, path);
        }
    }

    fn on_stage(&mut self, stage: Stage, signal: &Signal) {
        self.progress.set_message(stage.name());
        self.progress.inc(1);
        if let Some(dir) = self.dump_dir {
            let path = dir.join(format!("{stage}.csv"));
            let result = export_signal_csv(signal, &path, DEFAULT_EXCERPT_LEN);
            self.record(result, &path);
        }
    }
}

pub fn run(args: DemodulateArgs) -> anyhow::Result<()> {
    let params = args.params.resolve()?;
    let depth = BitDepth::from_bits(args.bit_depth)?;

    println!("Reading {}...", args.input.display());
    let input = read_signal(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        input.len(),
        input.sample_rate(),
        input.duration_secs()
    );

    if let Some(dir) = &args.dump_dir {
        std::fs::create_dir_all(dir)?;
    }

    let progress = ProgressBar::new(Stage::ALL.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    let mut diagnostics = Diagnostics {
        progress,
        dump_dir: args.dump_dir.as_deref(),
        spectrum_csv: args.spectrum_csv.as_deref(),
        error: None,
    };

    let result = Pipeline::new(params).run_with(&input, &mut diagnostics);
    diagnostics.progress.finish_and_clear();
    let recovery = result?;
    if let Some(err) = diagnostics.error {
        return Err(err);
    }

    let carrier = &recovery.carrier;
    println!("\nCarrier:");
    println!("  Estimate: {:.2} Hz", carrier.frequency_hz);
    println!(
        "  Peaks:    {:.2} Hz, {:.2} Hz (bin width {:.3} Hz)",
        carrier.lower().frequency_hz,
        carrier.upper().frequency_hz,
        carrier.bin_width_hz
    );

    let audio = &recovery.audio;
    println!("\nStats:");
    println!(
        "  Input:  RMS {}, Peak {}",
        format_db(rms(input.samples())),
        format_db(peak(input.samples()))
    );
    println!(
        "  Output: RMS {}, Peak {}",
        format_db(rms(audio.samples())),
        format_db(peak(audio.samples()))
    );

    println!("\nWriting {}...", args.output.display());
    write_signal(&args.output, audio, depth)?;
    if let Some(dir) = &args.dump_dir {
        println!("Stage excerpts in {}", dir.display());
    }
    if let Some(path) = &args.spectrum_csv {
        println!("Input spectrum in {}", path.display());
    }
    println!("Done!");

    Ok(())
}
