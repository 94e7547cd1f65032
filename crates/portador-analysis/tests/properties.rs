//! Property tests for the carrier estimator.

use std::f64::consts::PI;

use portador_analysis::{CarrierEstimator, Window};
use portador_core::Signal;
use proptest::prelude::*;

const FS: u32 = 8000;
const LEN: usize = 4096;

fn window() -> impl Strategy<Value = Window> {
    prop_oneof![Just(Window::Hann), Just(Window::Hamming), Just(Window::Blackman)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A lone tone pulls both picked bins onto its main lobe.
    #[test]
    fn pure_tone_within_one_bin(
        freq in 200.0f64..3800.0,
        phase in 0.0f64..(2.0 * PI),
        window in window(),
    ) {
        let signal = Signal::from_fn(FS, LEN, |t| (2.0 * PI * freq * t + phase).cos()).unwrap();
        let estimate = CarrierEstimator::new().with_window(window).estimate(&signal).unwrap();

        prop_assert!(
            (estimate.frequency_hz - freq).abs() <= estimate.bin_width_hz,
            "estimate {} for {} Hz",
            estimate.frequency_hz,
            freq
        );
        prop_assert!(estimate.lower().frequency_hz <= estimate.upper().frequency_hz);
    }

    /// Estimates depend only on the samples.
    #[test]
    fn estimate_is_deterministic(freq in 200.0f64..3800.0) {
        let signal = Signal::from_fn(FS, LEN, |t| (2.0 * PI * freq * t).sin()).unwrap();
        let estimator = CarrierEstimator::new();
        prop_assert_eq!(estimator.estimate(&signal).unwrap(), estimator.estimate(&signal).unwrap());
    }
}
