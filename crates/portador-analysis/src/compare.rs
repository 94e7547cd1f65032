//! Correlation of recovered audio against a reference.

/// Pearson correlation coefficient over the common length of two signals.
///
/// Returns 0.0 if either signal has zero variance over that length or the
/// common length is below two.
pub fn pearson_correlation(signal_a: &[f64], signal_b: &[f64]) -> f64 {
    let len = signal_a.len().min(signal_b.len());
    if len < 2 {
        return 0.0;
    }
    let a = &signal_a[..len];
    let b = &signal_b[..len];

    let mean_a = portador_core::mean(a);
    let mean_b = portador_core::mean(b);

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 { cov / denom } else { 0.0 }
}
