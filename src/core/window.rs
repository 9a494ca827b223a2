//! One-dimensional passband shapes evaluated on an FFT frequency axis.
//!
//! Gains are real and lie in `[0, 1]`; callers turn them into complex masks
//! and apply normalization.

use crate::core::frequency::index_of_frequency;
use crate::core::params::BandCombination;
use ndarray::Array1;
use std::f64::consts::PI;

/// Set unit gain over every sub-band with hard edges.
///
/// A band whose lower edge is negative and upper edge non-negative straddles
/// DC and is written as two runs, `[indL, n)` and `[0, indH)`. Bands only add
/// gain; bins outside every band keep their previous value.
pub fn boxcar_bandpass(
    center_frequencies: &[f64],
    bandwidths: &[f64],
    dt: f64,
    gains: &mut Array1<f64>,
) {
    let n = gains.len();

    for (band, (&center, &bandwidth)) in center_frequencies.iter().zip(bandwidths).enumerate() {
        let f_low = center - bandwidth / 2.0;
        let f_high = center + bandwidth / 2.0;

        let ind_low = clamp_bin(index_of_frequency(dt, n, f_low), n);
        let ind_high = clamp_bin(index_of_frequency(dt, n, f_high), n);

        log::debug!(
            "Boxcar band {}: fL = {:.3}, fH = {:.3}, indL = {}, indH = {}",
            band, f_low, f_high, ind_low, ind_high
        );

        if f_low < 0.0 && f_high >= 0.0 {
            fill_run(gains, ind_low, n);
            fill_run(gains, 0, ind_high);
        } else {
            fill_run(gains, ind_low, ind_high);
        }
    }
}

/// Raised-cosine gain at distance `freq` (Hz, non-negative) from a band center.
///
/// Returns `None` in the stopband so callers can leave the bin untouched.
pub fn raised_cosine_gain(freq: f64, bandwidth: f64, beta: f64) -> Option<f64> {
    let df = 0.5 * bandwidth * beta;

    if freq <= 0.5 * bandwidth - df {
        Some(1.0)
    } else if freq <= 0.5 * bandwidth + df {
        let phase = PI / (bandwidth * beta) * (freq - 0.5 * (1.0 - beta) * bandwidth);
        Some(0.5 * (1.0 + phase.cos()))
    } else {
        None
    }
}

/// Set raised-cosine gain for every sub-band over `frequency`.
///
/// `combine` decides what happens where two bands both reach a bin.
pub fn cosine_bandpass(
    center_frequencies: &[f64],
    bandwidths: &[f64],
    frequency: &Array1<f64>,
    beta: f64,
    combine: BandCombination,
    gains: &mut Array1<f64>,
) {
    for (&center, &bandwidth) in center_frequencies.iter().zip(bandwidths) {
        for (gain, &f) in gains.iter_mut().zip(frequency.iter()) {
            if let Some(g) = raised_cosine_gain((f - center).abs(), bandwidth, beta) {
                *gain = match combine {
                    BandCombination::LastWriter => g,
                    BandCombination::MaxGain => gain.max(g),
                };
            }
        }
    }
}

/// Clamp a bin index into `[0, n]` for use as a run bound
fn clamp_bin(index: i64, n: usize) -> usize {
    if index < 0 {
        log::warn!("Frequency index {} below spectrum start, clamped to 0", index);
        0
    } else if index as usize > n {
        log::warn!("Frequency index {} beyond spectrum length {}, clamped", index, n);
        n
    } else {
        index as usize
    }
}

fn fill_run(gains: &mut Array1<f64>, start: usize, end: usize) {
    if start < end {
        gains.slice_mut(ndarray::s![start..end]).fill(1.0);
    }
}
