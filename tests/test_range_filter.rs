use approx::assert_relative_eq;
use ndarray::Array2;
use num_complex::Complex;
use sarband::core::frequency::fftfreq;
use sarband::types::SarError;
use sarband::{Filter, FilterShape, RangeBandpassParams};
use std::f64::consts::PI;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic noise-like block
fn pseudo_random_block(nrows: usize, ncols: usize) -> Array2<Complex<f64>> {
    Array2::from_shape_fn((nrows, ncols), |(i, j)| {
        let x = (i * ncols + j) as f64;
        Complex::new((x * 12.9898).sin() * 43.758, (x * 78.233).cos() * 17.31)
    })
}

fn range_tone(nrows: usize, ncols: usize, freq: f64, fs: f64) -> Array2<Complex<f64>> {
    Array2::from_shape_fn((nrows, ncols), |(_, j)| {
        let phase = 2.0 * PI * freq * j as f64 / fs;
        Complex::new(phase.cos(), phase.sin())
    })
}

#[test]
fn test_all_pass_filter_reproduces_input() {
    init_logging();

    let (nrows, ncols) = (16, 50);
    let fs = 50.0;
    // Wider than the sampled bandwidth: every bin passes
    let params = RangeBandpassParams::new(fs, vec![0.0], vec![2.0 * fs], FilterShape::Boxcar);

    let mut filter = Filter::<f64>::new();
    filter.construct_range_bandpass_filter(&params, ncols, nrows).unwrap();
    let norm = (nrows * ncols) as f64;
    assert!(filter.mask().unwrap().iter().all(|v| (v.re * norm - 1.0).abs() < 1e-12));

    let input = pseudo_random_block(nrows, ncols);
    let mut signal = input.clone();
    let mut spectrum = Array2::zeros((nrows, ncols));
    filter.filter(&mut signal, &mut spectrum).unwrap();

    for (out, inp) in signal.iter().zip(input.iter()) {
        assert_relative_eq!(out.re, inp.re, epsilon = 1e-9);
        assert_relative_eq!(out.im, inp.im, epsilon = 1e-9);
    }
}

#[test]
fn test_construct_and_apply_keeps_broadcast_mask() {
    init_logging();

    let (nrows, ncols) = (8, 64);
    let params = RangeBandpassParams::new(
        64.0,
        vec![-12.0, 5.0, 20.0],
        vec![6.0, 4.0, 10.0],
        FilterShape::cosine(),
    );

    let input = pseudo_random_block(nrows, ncols);
    let mut signal = input.clone();
    let mut spectrum = Array2::zeros((nrows, ncols));

    let mut filter = Filter::<f64>::new();
    filter
        .construct_and_apply_range_bandpass_filter(&params, &mut signal, &mut spectrum)
        .unwrap();

    let mask = filter.mask().unwrap();
    assert_eq!(mask.dim(), (nrows, ncols));
    let first = mask.row(0);
    for row in mask.rows() {
        for (a, b) in row.iter().zip(first.iter()) {
            assert_eq!(a.re.to_bits(), b.re.to_bits());
            assert_eq!(a.im.to_bits(), b.im.to_bits());
        }
    }

    // Construction only round-trips the data through the unnormalized range FFT
    for (out, inp) in signal.iter().zip(input.iter()) {
        assert_relative_eq!(out.re, inp.re * ncols as f64, epsilon = 1e-8);
        assert_relative_eq!(out.im, inp.im * ncols as f64, epsilon = 1e-8);
    }
}

#[test]
fn test_boxcar_wraparound_runs() {
    let (nrows, ncols) = (2, 100);
    let fs = 100.0;
    let nyquist = fs / 2.0;
    // fL = -91 Hz, fH = 1 Hz
    let params = RangeBandpassParams::new(fs, vec![-0.9 * nyquist], vec![92.0], FilterShape::Boxcar);

    let mut filter = Filter::<f64>::new();
    filter.construct_range_bandpass_filter(&params, ncols, nrows).unwrap();
    let row = filter.mask().unwrap().row(0).to_owned();

    for (i, v) in row.iter().enumerate() {
        let passes = i >= 9 || i < 1;
        assert_eq!(v.re > 0.0, passes, "unexpected gain at bin {}", i);
    }
}

#[test]
fn test_boxcar_passband_exactness() {
    let (nrows, ncols) = (1, 128);
    let fs = 128.0;
    let bandwidth = 32.0;
    let params = RangeBandpassParams::new(fs, vec![0.0], vec![bandwidth], FilterShape::Boxcar);

    let mut filter = Filter::<f32>::new();
    filter.construct_range_bandpass_filter(&params, ncols, nrows).unwrap();
    let mask = filter.mask().unwrap();
    let freq = fftfreq(1.0 / fs, ncols);

    for (v, f) in mask.row(0).iter().zip(freq.iter()) {
        if f.abs() < bandwidth / 2.0 {
            assert_relative_eq!(v.re * ncols as f32, 1.0);
        } else if f.abs() > bandwidth / 2.0 {
            assert_eq!(v.re, 0.0);
        }
    }
}

#[test]
fn test_lowpass_removes_out_of_band_tone() {
    init_logging();

    let (nrows, ncols) = (4, 100);
    let fs = 100.0;
    let wanted = range_tone(nrows, ncols, 5.0, fs);
    let unwanted = range_tone(nrows, ncols, 30.0, fs);
    let mut signal = &wanted + &unwanted;
    let mut spectrum = Array2::zeros((nrows, ncols));

    let params = RangeBandpassParams::new(fs, vec![0.0], vec![20.0], FilterShape::Boxcar);
    let mut filter = Filter::<f64>::new();
    filter.construct_range_bandpass_filter(&params, ncols, nrows).unwrap();
    filter.filter(&mut signal, &mut spectrum).unwrap();

    for (out, expected) in signal.iter().zip(wanted.iter()) {
        assert_relative_eq!(out.re, expected.re, epsilon = 1e-9);
        assert_relative_eq!(out.im, expected.im, epsilon = 1e-9);
    }
}

#[test]
fn test_unsupported_shape_is_rejected() {
    let shape: Result<FilterShape, _> = "hamming".parse();
    assert!(matches!(shape, Err(SarError::UnsupportedFilterShape(_))));
}

#[test]
fn test_mismatched_band_lists_allocate_nothing() {
    let params = RangeBandpassParams::new(100.0, vec![0.0, 10.0], vec![5.0], FilterShape::Boxcar);
    let mut filter = Filter::<f64>::new();
    let err = filter.construct_range_bandpass_filter(&params, 64, 4).unwrap_err();
    assert!(matches!(err, SarError::InvalidParameter(_)));
    assert!(filter.mask().is_none());
}
