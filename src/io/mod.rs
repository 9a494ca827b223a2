//! Raster persistence for filter masks

#[cfg(feature = "raster")]
pub mod raster;

#[cfg(feature = "raster")]
pub use raster::write_complex_raster;
