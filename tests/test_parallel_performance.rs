use sarband::core::frequency::fftfreq;
use sarband::core::window::raised_cosine_gain;
use sarband::{CommonBandParams, DopplerModel, Filter, Lut1d};
use std::time::Instant;

#[test]
fn test_commonband_construction_matches_reference() {
    // Initialize logging to see timing output
    let _ = env_logger::builder().is_test(true).try_init();

    let (nrows, ncols) = (1024, 512);
    let prf = 1717.0;
    let reference = Lut1d::new(vec![0.0, 255.0, 511.0], vec![-120.0, 35.0, 210.0]).unwrap();
    let secondary = Lut1d::new(vec![0.0, 511.0], vec![80.0, -60.0]).unwrap();
    let params = CommonBandParams::new(900.0, prf, 0.3);

    let start_time = Instant::now();
    let mut filter = Filter::<f32>::new();
    filter
        .construct_azimuth_commonband_filter(&reference, &secondary, &params, ncols, nrows)
        .expect("Failed to construct common-band filter");
    let elapsed = start_time.elapsed();

    let total_pixels = nrows * ncols;
    println!("Common-band mask construction:");
    println!("  - Block size: {} x {} = {} pixels", nrows, ncols, total_pixels);
    println!("  - Time: {:.3} seconds", elapsed.as_secs_f64());
    println!("  - Pixel rate: {:.0} pixels/s", total_pixels as f64 / elapsed.as_secs_f64());

    // Column-by-column sequential reference
    let mask = filter.mask().unwrap();
    let frequency = fftfreq(1.0 / prf, nrows);
    let norm = total_pixels as f64;
    let mut mismatches = 0;

    for col in (0..ncols).step_by(37) {
        let x = col as f64;
        let fmid = 0.5 * (reference.eval(x) + secondary.eval(x));
        for row in 0..nrows {
            let expected = raised_cosine_gain((frequency[row] - fmid).abs(), params.bandwidth, params.beta)
                .unwrap_or(0.0)
                / norm;
            if mask[[row, col]].re != expected as f32 || mask[[row, col]].im != 0.0 {
                mismatches += 1;
            }
        }
    }

    assert_eq!(mismatches, 0, "mask differs from sequential reference");
}
