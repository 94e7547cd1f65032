//! CSV export of spectra and signal excerpts for external plotting.
//!
//! - Spectrum: `frequency_hz,magnitude` (or `magnitude_db`)
//! - Signal: `time_s,amplitude`, optionally limited to the first N samples

use crate::spectrum::Spectrum;
use portador_core::{Signal, linear_to_db};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default number of samples written by signal excerpts.
pub const DEFAULT_EXCERPT_LEN: usize = 5000;

/// Write a spectrum as CSV to any writer.
pub fn write_spectrum_csv<W: Write>(
    spectrum: &Spectrum,
    mut out: W,
    db_scale: bool,
) -> std::io::Result<()> {
    if db_scale {
        writeln!(out, "frequency_hz,magnitude_db")?;
    } else {
        writeln!(out, "frequency_hz,magnitude")?;
    }

    for (&freq, &mag) in spectrum.frequencies().iter().zip(spectrum.magnitudes()) {
        let value = if db_scale { linear_to_db(mag) } else { mag };
        writeln!(out, "{freq:.4},{value:.6}")?;
    }
    out.flush()
}

/// Export a spectrum to a CSV file.
///
/// # Example
///
/// ```rust,ignore
/// use portador_analysis::{Spectrum, Window, export::export_spectrum_csv};
///
/// let spectrum = Spectrum::from_signal(&signal, Window::Hann);
/// export_spectrum_csv(&spectrum, "input_spectrum.csv", true)?;
/// ```
pub fn export_spectrum_csv(
    spectrum: &Spectrum,
    path: impl AsRef<Path>,
    db_scale: bool,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_spectrum_csv(spectrum, BufWriter::new(file), db_scale)
}

/// Write the first `max_samples` samples of a signal as CSV to any writer.
pub fn write_signal_csv<W: Write>(
    signal: &Signal,
    mut out: W,
    max_samples: usize,
) -> std::io::Result<()> {
    writeln!(out, "time_s,amplitude")?;
    for (t, &x) in signal.times().zip(signal.samples()).take(max_samples) {
        writeln!(out, "{t:.6},{x:.8}")?;
    }
    out.flush()
}

/// Export the first `max_samples` samples of a signal to a CSV file.
pub fn export_signal_csv(
    signal: &Signal,
    path: impl AsRef<Path>,
    max_samples: usize,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_signal_csv(signal, BufWriter::new(file), max_samples)
}
