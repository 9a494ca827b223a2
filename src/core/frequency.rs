use crate::types::FrequencyAxis;
use ndarray::Array1;

/// Sample frequencies of an `n`-point DFT with sampling interval `dt`.
///
/// Bins `0..(n - 1) / 2 + 1` hold the non-negative frequencies in increasing
/// order, the remaining bins hold `-n / 2 .. -1` multiples of the bin spacing.
/// For even `n` the Nyquist bin is reported as negative.
pub fn fftfreq(dt: f64, n: usize) -> FrequencyAxis {
    let mut freq = Array1::zeros(n);
    if n == 0 {
        return freq;
    }

    let scale = 1.0 / (n as f64 * dt);
    let n_mid = (n - 1) / 2 + 1;

    for i in 0..n_mid {
        freq[i] = scale * i as f64;
    }

    let n_neg = (n / 2) as i64;
    for (offset, k) in (-n_neg..0).enumerate() {
        freq[n_mid + offset] = scale * k as f64;
    }

    freq
}

/// Bin index of frequency `f` in an `n`-point spectrum sampled every `dt`.
///
/// Negative frequencies wrap to the upper half of the spectrum; the offset by
/// `n` is applied before rounding so half-bin edges round symmetrically about
/// DC. The result is not range-checked: bands wider than the sampled bandwidth resolve to
/// indices below 0 or above `n`.
pub fn index_of_frequency(dt: f64, n: usize, f: f64) -> i64 {
    let df = bin_spacing(dt, n);
    if f < 0.0 {
        (f / df + n as f64).round() as i64
    } else {
        (f / df).round() as i64
    }
}

/// Frequency spacing between adjacent bins
pub fn bin_spacing(dt: f64, n: usize) -> f64 {
    1.0 / (dt * n as f64)
}
