//! sarband: frequency-domain bandpass filtering for SAR signal blocks
//!
//! Builds range bandpass masks (boxcar or raised cosine, one or more
//! sub-bands) and Doppler-aware azimuth common-band masks, and applies them
//! to complex 2D blocks through forward/inverse FFTs. Common-band filtering
//! keeps only the azimuth spectrum shared by two acquisitions before
//! interferometric combination.

pub mod types;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{FilterMask, FrequencyAxis, SarComplex, SarError, SarImage, SarResult};

pub use crate::core::{
    BandCombination, CommonBandParams, DopplerModel, FftSignal, Filter, FilterShape, Lut1d,
    RangeBandpassParams, SpectralTransform,
};
