//! Property tests for pipeline output invariants.

use std::f64::consts::PI;

use portador_config::PipelineParams;
use portador_core::{Signal, mean};
use portador_receiver::Pipeline;
use proptest::prelude::*;

const FS: u32 = 16000;
const LEN: usize = 8000;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Any DSB-SC tone whose sidebands land on exact bins is recovered to a
    /// zero-mean, unit-peak signal of the input length.
    #[test]
    fn output_is_normalized(
        carrier in (65u32..300).prop_map(|k| f64::from(k) * 10.0),
        tone in (30u32..50).prop_map(|k| f64::from(k) * 10.0),
    ) {
        let input = Signal::from_fn(FS, LEN, |t| {
            (2.0 * PI * tone * t).cos() * (2.0 * PI * carrier * t).cos()
        })
        .unwrap();
        let recovery = Pipeline::new(PipelineParams::default()).run(&input).unwrap();

        prop_assert_eq!(recovery.carrier.frequency_hz, carrier);
        prop_assert_eq!(recovery.audio.len(), LEN);
        let samples = recovery.audio.samples();
        let peak = samples.iter().fold(0.0f64, |m, x| m.max(x.abs()));
        prop_assert_eq!(peak, 1.0);
        prop_assert!(mean(samples).abs() < 1e-9);
    }
}
