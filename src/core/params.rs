use crate::types::{SarError, SarResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roll-off used when a cosine range filter is selected by name
pub const DEFAULT_COSINE_BETA: f64 = 0.25;

/// How overlapping sub-bands of a cosine filter are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandCombination {
    /// Each band overwrites the gain of every bin it touches
    #[default]
    LastWriter,
    /// Each bin keeps the largest gain of all bands
    MaxGain,
}

/// Frequency-domain shape of a bandpass filter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterShape {
    /// Hard-edged passband
    #[default]
    Boxcar,
    /// Raised-cosine transition of relative width `beta` (0 <= beta <= 1)
    Cosine {
        beta: f64,
        #[serde(default)]
        combine: BandCombination,
    },
}

impl FilterShape {
    /// Cosine shape with the default roll-off and overlap policy
    pub fn cosine() -> Self {
        FilterShape::Cosine {
            beta: DEFAULT_COSINE_BETA,
            combine: BandCombination::default(),
        }
    }

    pub fn validate(&self) -> SarResult<()> {
        if let FilterShape::Cosine { beta, .. } = self {
            validate_beta(*beta)?;
        }
        Ok(())
    }
}

impl fmt::Display for FilterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterShape::Boxcar => write!(f, "boxcar"),
            FilterShape::Cosine { beta, combine } => {
                write!(f, "cosine(beta={}, {:?})", beta, combine)
            }
        }
    }
}

impl FromStr for FilterShape {
    type Err = SarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boxcar" => Ok(FilterShape::Boxcar),
            "cosine" => Ok(FilterShape::cosine()),
            _ => Err(SarError::UnsupportedFilterShape(format!(
                "'{}' filter has not been implemented",
                s
            ))),
        }
    }
}

/// Range bandpass filter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBandpassParams {
    /// Range sampling frequency in Hz
    pub sampling_frequency: f64,
    /// Center frequency of each sub-band in Hz (signed)
    pub center_frequencies: Vec<f64>,
    /// Bandwidth of each sub-band in Hz
    pub bandwidths: Vec<f64>,
    /// Passband shape
    #[serde(default)]
    pub shape: FilterShape,
}

impl RangeBandpassParams {
    pub fn new(
        sampling_frequency: f64,
        center_frequencies: Vec<f64>,
        bandwidths: Vec<f64>,
        shape: FilterShape,
    ) -> Self {
        Self {
            sampling_frequency,
            center_frequencies,
            bandwidths,
            shape,
        }
    }

    /// Reject parameter sets that cannot produce a mask
    pub fn validate(&self) -> SarResult<()> {
        validate_rate("range sampling frequency", self.sampling_frequency)?;

        if self.center_frequencies.len() != self.bandwidths.len() {
            return Err(SarError::InvalidParameter(format!(
                "{} sub-band center frequencies but {} bandwidths",
                self.center_frequencies.len(),
                self.bandwidths.len()
            )));
        }

        for (i, (&center, &bandwidth)) in self
            .center_frequencies
            .iter()
            .zip(self.bandwidths.iter())
            .enumerate()
        {
            if !center.is_finite() {
                return Err(SarError::InvalidParameter(format!(
                    "Sub-band {} center frequency is not finite",
                    i
                )));
            }
            if !bandwidth.is_finite() || bandwidth <= 0.0 {
                return Err(SarError::InvalidParameter(format!(
                    "Sub-band {} bandwidth must be positive, got {}",
                    i, bandwidth
                )));
            }
        }

        self.shape.validate()
    }
}

/// Azimuth common-band filter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonBandParams {
    /// Common azimuth bandwidth in Hz
    pub bandwidth: f64,
    /// Pulse repetition frequency in Hz (azimuth sampling rate)
    pub prf: f64,
    /// Raised-cosine roll-off (0 <= beta <= 1)
    pub beta: f64,
}

impl Default for CommonBandParams {
    fn default() -> Self {
        Self {
            bandwidth: 1000.0,
            prf: 1700.0,
            beta: DEFAULT_COSINE_BETA,
        }
    }
}

impl CommonBandParams {
    pub fn new(bandwidth: f64, prf: f64, beta: f64) -> Self {
        Self { bandwidth, prf, beta }
    }

    pub fn validate(&self) -> SarResult<()> {
        validate_rate("common bandwidth", self.bandwidth)?;
        validate_rate("PRF", self.prf)?;
        validate_beta(self.beta)
    }
}

fn validate_rate(name: &str, value: f64) -> SarResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SarError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_beta(beta: f64) -> SarResult<()> {
    if !(0.0..=1.0).contains(&beta) {
        return Err(SarError::InvalidParameter(format!(
            "Raised-cosine beta must lie in [0, 1], got {}",
            beta
        )));
    }
    Ok(())
}
