//! Core filter construction and application modules

pub mod doppler;
pub mod filter;
pub mod frequency;
pub mod params;
pub mod signal;
pub mod window;

// Re-export main types
pub use doppler::{DopplerModel, Lut1d};
pub use filter::Filter;
pub use frequency::{bin_spacing, fftfreq, index_of_frequency};
pub use params::{BandCombination, CommonBandParams, FilterShape, RangeBandpassParams, DEFAULT_COSINE_BETA};
pub use signal::{FftSignal, SpectralTransform};
pub use window::{boxcar_bandpass, cosine_bandpass, raised_cosine_gain};
