use crate::types::{SarError, SarResult};
use serde::{Deserialize, Serialize};

/// Doppler centroid as a function of range column
pub trait DopplerModel {
    /// Doppler centroid in Hz at column `x`
    fn eval(&self, x: f64) -> f64;
}

impl<F> DopplerModel for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// One-dimensional lookup table with linear interpolation.
///
/// Evaluation outside the coordinate range returns the nearest edge value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lut1d {
    coords: Vec<f64>,
    values: Vec<f64>,
}

impl Lut1d {
    /// Build a table from strictly increasing coordinates and matching values
    pub fn new(coords: Vec<f64>, values: Vec<f64>) -> SarResult<Self> {
        if coords.is_empty() {
            return Err(SarError::InvalidParameter(
                "Doppler LUT needs at least one coordinate".to_string(),
            ));
        }
        if coords.len() != values.len() {
            return Err(SarError::InvalidParameter(format!(
                "Doppler LUT has {} coordinates but {} values",
                coords.len(),
                values.len()
            )));
        }
        if coords.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SarError::InvalidParameter(
                "Doppler LUT coordinates must be strictly increasing".to_string(),
            ));
        }

        Ok(Self { coords, values })
    }

    /// Table that evaluates to `value` everywhere
    pub fn constant(value: f64) -> Self {
        Self {
            coords: vec![0.0],
            values: vec![value],
        }
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl DopplerModel for Lut1d {
    fn eval(&self, x: f64) -> f64 {
        let n = self.coords.len();
        if n == 1 || x <= self.coords[0] {
            return self.values[0];
        }
        if x >= self.coords[n - 1] {
            return self.values[n - 1];
        }

        // first coordinate strictly greater than x
        let upper = self.coords.partition_point(|&c| c <= x);
        let lower = upper - 1;

        let (x0, x1) = (self.coords[lower], self.coords[upper]);
        let (y0, y1) = (self.values[lower], self.values[upper]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}
