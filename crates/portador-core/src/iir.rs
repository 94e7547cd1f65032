//! Arbitrary-order IIR filter in transposed direct form II.
//!
//! ```text
//! y[n]      = b[0]·x[n] + z[0]
//! z[i]      = b[i+1]·x[n] + z[i+1] - a[i+1]·y[n]     (0 ≤ i < N-1)
//! z[N-1]    = b[N]·x[n] - a[N]·y[n]
//! ```
//!
//! where `N` is the filter order and `z` the state vector. The state can be
//! seeded with [`steady_state`] values so that a step input produces no
//! start-up transient, which zero-phase filtering relies on.

use crate::filter::FilterCoefficients;

/// Stateful IIR filter built from [`FilterCoefficients`].
///
/// Coefficient sequences are zero-padded to a common length `n`; the state
/// holds `n - 1` values.
#[derive(Debug, Clone)]
pub struct IirFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}

impl IirFilter {
    /// Creates a filter with cleared state.
    pub fn new(coeffs: &FilterCoefficients) -> Self {
        let n = coeffs.len();
        let mut b = coeffs.feedforward().to_vec();
        let mut a = coeffs.feedback().to_vec();
        b.resize(n, 0.0);
        a.resize(n, 0.0);

        Self {
            b,
            a,
            state: vec![0.0; n - 1],
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let n = self.b.len();
        let output = self.b[0] * input + self.state.first().copied().unwrap_or(0.0);

        for i in 1..n {
            let next = if i < n - 1 { self.state[i] } else { 0.0 };
            self.state[i - 1] = self.b[i] * input + next - self.a[i] * output;
        }

        output
    }

    /// Filters `buffer` in place.
    pub fn process_in_place(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Sets the state to the steady-state response to a constant input of
    /// value `level`.
    pub fn prime(&mut self, zi: &[f64], level: f64) {
        debug_assert_eq!(zi.len(), self.state.len());
        for (s, &z) in self.state.iter_mut().zip(zi) {
            *s = z * level;
        }
    }

    /// Clears the filter state.
    pub fn clear(&mut self) {
        self.state.fill(0.0);
    }

    /// Current state vector.
    pub fn state(&self) -> &[f64] {
        &self.state
    }
}

/// Steady-state filter state for a unit step input.
///
/// Solves `zi = A·zi + B` for the transposed direct form II state update,
/// where `A` is the transposed companion matrix of `a` and
/// `B = b[1..] - a[1..]·b[0]`. The companion structure allows an explicit
/// solution without a general linear solver.
pub fn steady_state(coeffs: &FilterCoefficients) -> Vec<f64> {
    let n = coeffs.len();
    if n < 2 {
        return Vec::new();
    }

    let mut b = coeffs.feedforward().to_vec();
    let mut a = coeffs.feedback().to_vec();
    b.resize(n, 0.0);
    a.resize(n, 0.0);

    let rhs: Vec<f64> = (1..n).map(|k| b[k] - a[k] * b[0]).collect();
    let a_sum: f64 = a.iter().sum();

    let mut zi = vec![0.0; n - 1];
    zi[0] = rhs.iter().sum::<f64>() / a_sum;

    let mut asum = 1.0;
    let mut csum = 0.0;
    for k in 1..n - 1 {
        asum += a[k];
        csum += rhs[k - 1];
        zi[k] = asum * zi[0] - csum;
    }

    zi
}
