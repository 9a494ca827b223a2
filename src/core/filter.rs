use crate::core::doppler::DopplerModel;
use crate::core::frequency::fftfreq;
use crate::core::params::{CommonBandParams, FilterShape, RangeBandpassParams};
use crate::core::signal::{FftSignal, SpectralTransform};
use crate::core::window::{boxcar_bandpass, cosine_bandpass, raised_cosine_gain};
use crate::types::{ensure_dim, FilterMask, SarError, SarResult};
use ndarray::{Array1, Array2, ArrayViewMut1, Axis, Zip};
use num_complex::Complex;
use rustfft::FftNum;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Frequency-domain filter for 2D SAR blocks.
///
/// Blocks are `(nrows, ncols)` arrays: rows are azimuth lines, columns are
/// range samples. The filter owns the most recently constructed mask and
/// reuses it for every [`Filter::filter`] call until the next construction.
/// Masks are pre-divided by `nrows * ncols` to undo the unnormalized 2D FFT
/// pair used by [`Filter::filter`].
pub struct Filter<T: FftNum, S: SpectralTransform<T> = FftSignal<T>> {
    signal: S,
    mask: Option<FilterMask<T>>,
}

impl<T: FftNum> Filter<T> {
    /// Create a filter backed by the `rustfft` transform
    pub fn new() -> Self {
        Self::with_transform(FftSignal::new())
    }
}

impl<T: FftNum> Default for Filter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FftNum, S: SpectralTransform<T>> Filter<T, S> {
    /// Create a filter backed by a caller-provided transform
    pub fn with_transform(signal: S) -> Self {
        Self { signal, mask: None }
    }

    /// Current mask, if one has been constructed
    pub fn mask(&self) -> Option<&FilterMask<T>> {
        self.mask.as_ref()
    }

    /// Forward and inverse range FFT with no masking
    pub fn initiate_range_filter(
        &mut self,
        signal: &mut Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.signal.forward_range_fft(signal, spectrum)?;
        self.signal.inverse_range_fft(spectrum, signal)
    }

    /// Forward and inverse azimuth FFT with no masking
    pub fn initiate_azimuth_filter(
        &mut self,
        signal: &mut Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.signal.forward_azimuth_fft(signal, spectrum)?;
        self.signal.inverse_azimuth_fft(spectrum, signal)
    }

    /// Build a range bandpass mask of `nrows x ncols` from sub-band definitions.
    ///
    /// The 1D range response is replicated over every line. On error the
    /// previous mask is kept.
    pub fn construct_range_bandpass_filter(
        &mut self,
        params: &RangeBandpassParams,
        ncols: usize,
        nrows: usize,
    ) -> SarResult<()> {
        log::info!(
            "Constructing {} range bandpass filter with {} sub-bands",
            params.shape,
            params.center_frequencies.len()
        );
        params.validate()?;
        validate_block(ncols, nrows)?;

        let dt = 1.0 / params.sampling_frequency;
        let mut gains = Array1::zeros(ncols);

        match params.shape {
            FilterShape::Boxcar => {
                boxcar_bandpass(&params.center_frequencies, &params.bandwidths, dt, &mut gains);
            }
            FilterShape::Cosine { beta, combine } => {
                let frequency = fftfreq(dt, ncols);
                cosine_bandpass(
                    &params.center_frequencies,
                    &params.bandwidths,
                    &frequency,
                    beta,
                    combine,
                    &mut gains,
                );
            }
        }

        let norm = (ncols * nrows) as f64;
        let line: Array1<Complex<T>> = gains.mapv(|g| gain_to_complex(g / norm));
        let mask = Array2::from_shape_fn((nrows, ncols), |(_, col)| line[col]);

        log::debug!("Range filter mask: {} x {}", nrows, ncols);
        self.mask = Some(mask);
        Ok(())
    }

    /// Build the range bandpass mask for `signal`, then run a range FFT round trip.
    ///
    /// The spectrum is not multiplied by the mask here; call [`Filter::filter`]
    /// to apply it.
    pub fn construct_and_apply_range_bandpass_filter(
        &mut self,
        params: &RangeBandpassParams,
        signal: &mut Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        let (nrows, ncols) = signal.dim();
        ensure_dim(spectrum, (nrows, ncols))?;

        self.construct_range_bandpass_filter(params, ncols, nrows)?;
        self.initiate_range_filter(signal, spectrum)
    }

    /// Build an azimuth common-band mask of `nrows x ncols`.
    ///
    /// Column `j` is a raised-cosine passband of `params.bandwidth` centered on
    /// the mean of both Doppler centroids at `j`.
    pub fn construct_azimuth_commonband_filter<R, D>(
        &mut self,
        reference_doppler: &R,
        secondary_doppler: &D,
        params: &CommonBandParams,
        ncols: usize,
        nrows: usize,
    ) -> SarResult<()>
    where
        R: DopplerModel + Sync,
        D: DopplerModel + Sync,
    {
        log::info!(
            "Constructing azimuth common-band filter: bandwidth {:.2} Hz, PRF {:.2} Hz, beta {}",
            params.bandwidth,
            params.prf,
            params.beta
        );
        params.validate()?;
        validate_block(ncols, nrows)?;

        let frequency = fftfreq(1.0 / params.prf, nrows);
        let norm = (ncols * nrows) as f64;
        let mut gains = Array2::<f64>::zeros((nrows, ncols));

        let fill_column = |(col, mut column): (usize, ArrayViewMut1<f64>)| {
            let x = col as f64;
            let fmid = 0.5 * (reference_doppler.eval(x) + secondary_doppler.eval(x));
            for (gain, &f) in column.iter_mut().zip(frequency.iter()) {
                *gain = raised_cosine_gain((f - fmid).abs(), params.bandwidth, params.beta)
                    .unwrap_or(0.0)
                    / norm;
            }
        };

        #[cfg(feature = "parallel")]
        gains
            .axis_iter_mut(Axis(1))
            .into_par_iter()
            .enumerate()
            .for_each(fill_column);

        #[cfg(not(feature = "parallel"))]
        gains
            .axis_iter_mut(Axis(1))
            .enumerate()
            .for_each(fill_column);

        log::debug!("Common-band filter mask: {} x {}", nrows, ncols);
        self.mask = Some(gains.mapv(gain_to_complex));
        Ok(())
    }

    /// Build the common-band mask for `signal`, then run an azimuth FFT round trip.
    ///
    /// As with the range variant, filtering itself happens in [`Filter::filter`].
    pub fn construct_and_apply_azimuth_commonband_filter<R, D>(
        &mut self,
        reference_doppler: &R,
        secondary_doppler: &D,
        params: &CommonBandParams,
        signal: &mut Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()>
    where
        R: DopplerModel + Sync,
        D: DopplerModel + Sync,
    {
        let (nrows, ncols) = signal.dim();
        ensure_dim(spectrum, (nrows, ncols))?;

        self.construct_azimuth_commonband_filter(
            reference_doppler,
            secondary_doppler,
            params,
            ncols,
            nrows,
        )?;
        self.initiate_azimuth_filter(signal, spectrum)
    }

    /// Filter `signal` in place with the current mask.
    ///
    /// `spectrum` is scratch space for the 2D spectrum. Both blocks must
    /// match the mask dimensions; nothing is modified otherwise.
    pub fn filter(
        &mut self,
        signal: &mut Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        let mask = self.mask.as_ref().ok_or(SarError::MaskNotBuilt)?;
        ensure_dim(signal, mask.dim())?;
        ensure_dim(spectrum, mask.dim())?;

        log::debug!("Filtering {} x {} block", mask.nrows(), mask.ncols());

        self.signal.forward(signal, spectrum)?;
        Zip::from(&mut *spectrum)
            .and(mask)
            .for_each(|s, &m| *s = *s * m);
        self.signal.inverse(spectrum, signal)
    }

    /// Write the current mask as a single-band complex ENVI raster
    #[cfg(feature = "raster")]
    pub fn write_mask<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        ncols: usize,
        nrows: usize,
    ) -> SarResult<()>
    where
        T: num_traits::Float,
    {
        let mask = self.mask.as_ref().ok_or(SarError::MaskNotBuilt)?;
        ensure_dim(mask, (nrows, ncols))?;
        crate::io::raster::write_complex_raster(path, mask)
    }
}

fn validate_block(ncols: usize, nrows: usize) -> SarResult<()> {
    if ncols == 0 || nrows == 0 {
        return Err(SarError::InvalidParameter(format!(
            "Block dimensions must be non-zero, got {} x {}",
            nrows, ncols
        )));
    }
    Ok(())
}

fn gain_to_complex<T: FftNum>(gain: f64) -> Complex<T> {
    Complex::new(T::from_f64(gain).unwrap_or_else(T::zero), T::zero())
}
