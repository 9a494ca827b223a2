use crate::types::{ensure_dim, SarResult};
use ndarray::{Array2, Axis};
use num_complex::Complex;
use num_traits::Zero;
use rustfft::{Fft, FftNum, FftPlanner};
use std::sync::Arc;

/// Forward and inverse FFTs over 2D blocks laid out as (azimuth lines, range samples).
///
/// Transforms are unnormalized: a forward followed by an inverse along one
/// axis scales the data by that axis length.
pub trait SpectralTransform<T> {
    /// FFT of every line along range (row-wise)
    fn forward_range_fft(
        &mut self,
        signal: &Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()>;

    fn inverse_range_fft(
        &mut self,
        spectrum: &Array2<Complex<T>>,
        signal: &mut Array2<Complex<T>>,
    ) -> SarResult<()>;

    /// FFT of every range column along azimuth (column-wise)
    fn forward_azimuth_fft(
        &mut self,
        signal: &Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()>;

    fn inverse_azimuth_fft(
        &mut self,
        spectrum: &Array2<Complex<T>>,
        signal: &mut Array2<Complex<T>>,
    ) -> SarResult<()>;

    /// Full 2D FFT
    fn forward(
        &mut self,
        signal: &Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()>;

    fn inverse(
        &mut self,
        spectrum: &Array2<Complex<T>>,
        signal: &mut Array2<Complex<T>>,
    ) -> SarResult<()>;
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Inverse,
}

/// `rustfft`-backed transform; plans are cached by the planner per length.
pub struct FftSignal<T: FftNum> {
    planner: FftPlanner<T>,
}

impl<T: FftNum> FftSignal<T> {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    fn plan(&mut self, len: usize, direction: Direction) -> Arc<dyn Fft<T>> {
        match direction {
            Direction::Forward => self.planner.plan_fft_forward(len),
            Direction::Inverse => self.planner.plan_fft_inverse(len),
        }
    }

    /// Copy `input` into `output` and transform `output` in place along `axis`
    fn transform(
        &mut self,
        input: &Array2<Complex<T>>,
        output: &mut Array2<Complex<T>>,
        axis: Axis,
        direction: Direction,
    ) -> SarResult<()> {
        ensure_dim(output, input.dim())?;
        output.assign(input);
        self.transform_in_place(output, axis, direction);
        Ok(())
    }

    fn transform_in_place(&mut self, data: &mut Array2<Complex<T>>, axis: Axis, direction: Direction) {
        let len = data.len_of(axis);
        if len == 0 || data.is_empty() {
            return;
        }

        let fft = self.plan(len, direction);
        let mut scratch = vec![Complex::zero(); fft.get_inplace_scratch_len()];
        let mut buffer = vec![Complex::zero(); len];

        for mut lane in data.lanes_mut(axis) {
            match lane.as_slice_mut() {
                Some(contiguous) => fft.process_with_scratch(contiguous, &mut scratch),
                None => {
                    for (b, v) in buffer.iter_mut().zip(lane.iter()) {
                        *b = *v;
                    }
                    fft.process_with_scratch(&mut buffer, &mut scratch);
                    for (v, b) in lane.iter_mut().zip(buffer.iter()) {
                        *v = *b;
                    }
                }
            }
        }
    }
}

impl<T: FftNum> Default for FftSignal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FftNum> SpectralTransform<T> for FftSignal<T> {
    fn forward_range_fft(
        &mut self,
        signal: &Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.transform(signal, spectrum, Axis(1), Direction::Forward)
    }

    fn inverse_range_fft(
        &mut self,
        spectrum: &Array2<Complex<T>>,
        signal: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.transform(spectrum, signal, Axis(1), Direction::Inverse)
    }

    fn forward_azimuth_fft(
        &mut self,
        signal: &Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.transform(signal, spectrum, Axis(0), Direction::Forward)
    }

    fn inverse_azimuth_fft(
        &mut self,
        spectrum: &Array2<Complex<T>>,
        signal: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.transform(spectrum, signal, Axis(0), Direction::Inverse)
    }

    fn forward(
        &mut self,
        signal: &Array2<Complex<T>>,
        spectrum: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.transform(signal, spectrum, Axis(1), Direction::Forward)?;
        self.transform_in_place(spectrum, Axis(0), Direction::Forward);
        Ok(())
    }

    fn inverse(
        &mut self,
        spectrum: &Array2<Complex<T>>,
        signal: &mut Array2<Complex<T>>,
    ) -> SarResult<()> {
        self.transform(spectrum, signal, Axis(1), Direction::Inverse)?;
        self.transform_in_place(signal, Axis(0), Direction::Inverse);
        Ok(())
    }
}
