//! One-sided magnitude spectra of whole signals.

use crate::fft::{Fft, Window};
use portador_core::{Signal, linear_to_db};

/// A spectral line: bin frequency and magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Bin frequency in Hz.
    pub frequency_hz: f64,
    /// Unnormalized DFT magnitude.
    pub magnitude: f64,
}

/// Magnitude spectrum over the non-negative frequency bins `0..N/2` of an
/// `N`-point transform of the whole windowed signal.
///
/// `frequencies[k] = k · fs / N`, ascending. The bin at `N/2` (Nyquist for
/// even `N`) is not included.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
    sample_rate: u32,
    fft_size: usize,
}

impl Spectrum {
    /// Windows `signal` with `window` and transforms it with an FFT the size of
    /// the signal.
    pub fn from_signal(signal: &Signal, window: Window) -> Self {
        let n = signal.len();
        let mut windowed = signal.samples().to_vec();
        window.apply(&mut windowed);

        let bins = Fft::new(n).forward(&windowed);
        let half = n / 2;
        let fs = f64::from(signal.sample_rate());

        let frequencies = (0..half).map(|k| k as f64 * fs / n as f64).collect();
        let magnitudes = bins[..half].iter().map(|c| c.norm()).collect();

        Self {
            frequencies,
            magnitudes,
            sample_rate: signal.sample_rate(),
            fft_size: n,
        }
    }

    /// Builds a spectrum from precomputed bins.
    pub(crate) fn from_parts(
        frequencies: Vec<f64>,
        magnitudes: Vec<f64>,
        sample_rate: u32,
        fft_size: usize,
    ) -> Self {
        debug_assert_eq!(frequencies.len(), magnitudes.len());
        Self {
            frequencies,
            magnitudes,
            sample_rate,
            fft_size,
        }
    }

    /// Bin frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Bin magnitudes.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Bin magnitudes in dB.
    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.magnitudes.iter().map(|&m| linear_to_db(m)).collect()
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True when the transform was too short to yield any bin.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Sample rate of the analysed signal.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Transform length (the signal length).
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Bin spacing in Hz.
    pub fn bin_width(&self) -> f64 {
        f64::from(self.sample_rate) / self.fft_size as f64
    }

    /// Indices of the `n` largest-magnitude bins, largest first.
    ///
    /// Equal magnitudes keep ascending index order, so the result is
    /// deterministic.
    pub fn strongest_bins(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.magnitudes.len()).collect();
        // stable sort keeps lower indices first among ties
        order.sort_by(|&i, &j| self.magnitudes[j].total_cmp(&self.magnitudes[i]));
        order.truncate(n);
        order
    }

    /// The `n` strongest bins as peaks, largest first.
    pub fn peak_frequencies(&self, n: usize) -> Vec<Peak> {
        self.strongest_bins(n)
            .into_iter()
            .map(|k| self.peak_at(k))
            .collect()
    }

    /// Peak for bin `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of range.
    pub fn peak_at(&self, k: usize) -> Peak {
        Peak {
            frequency_hz: self.frequencies[k],
            magnitude: self.magnitudes[k],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, fs: u32, len: usize) -> Signal {
        Signal::from_fn(fs, len, |t| (2.0 * PI * freq * t).cos()).unwrap()
    }

    #[test]
    fn bins_cover_half_the_transform() {
        let spectrum = Spectrum::from_signal(&tone(100.0, 1000, 101), Window::Hann);
        assert_eq!(spectrum.len(), 50);
        assert_eq!(spectrum.fft_size(), 101);
        assert_eq!(spectrum.frequencies()[0], 0.0);
        assert!((spectrum.bin_width() - 1000.0 / 101.0).abs() < 1e-12);
        assert!((spectrum.frequencies()[49] - 49.0 * 1000.0 / 101.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_signals_have_few_bins() {
        let one = Signal::new(vec![1.0], 8000).unwrap();
        assert!(Spectrum::from_signal(&one, Window::Hann).is_empty());

        let three = Signal::new(vec![1.0, 0.0, -1.0], 8000).unwrap();
        assert_eq!(Spectrum::from_signal(&three, Window::Hann).len(), 1);
    }

    #[test]
    fn rectangular_bin_aligned_tone_has_single_line() {
        // 125 Hz at 8000 Hz over 512 samples lands exactly on bin 8
        let spectrum = Spectrum::from_signal(&tone(125.0, 8000, 512), Window::Rectangular);
        let top = spectrum.strongest_bins(1);
        assert_eq!(top, vec![8]);
        assert!((spectrum.magnitudes()[8] - 256.0).abs() < 1e-9);
    }

    #[test]
    fn strongest_bins_break_ties_by_lower_index() {
        let spectrum =
            Spectrum::from_parts(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 5.0, 2.0, 5.0], 8, 8);
        assert_eq!(spectrum.strongest_bins(3), vec![1, 3, 2]);
    }

    #[test]
    fn peak_frequencies_are_largest_first() {
        let fs = 8000;
        let signal = Signal::from_fn(fs, 8000, |t| {
            (2.0 * PI * 500.0 * t).cos() + 0.5 * (2.0 * PI * 1500.0 * t).cos()
        })
        .unwrap();
        let peaks = Spectrum::from_signal(&signal, Window::Rectangular).peak_frequencies(2);
        assert_eq!(peaks[0].frequency_hz, 500.0);
        assert_eq!(peaks[1].frequency_hz, 1500.0);
        assert!(peaks[0].magnitude > peaks[1].magnitude);
    }
}
