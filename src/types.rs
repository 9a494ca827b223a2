use ndarray::{Array1, Array2};
use num_complex::Complex;

/// Complex-valued SAR sample (I + jQ), single precision
pub type SarComplex = Complex<f32>;

/// 2D complex SAR block (azimuth lines x range samples)
pub type SarImage = Array2<SarComplex>;

/// Frequency-domain filter mask with the same layout as the block it filters
pub type FilterMask<T> = Array2<Complex<T>>;

/// Frequency axis in Hz, one value per FFT bin
pub type FrequencyAxis = Array1<f64>;

/// Error types for SAR filtering
#[derive(Debug, thiserror::Error)]
pub enum SarError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported filter shape: {0}")]
    UnsupportedFilterShape(String),

    #[error("Dimension mismatch: expected {expected:?} (rows, cols), found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("No filter mask has been constructed")]
    MaskNotBuilt,

    #[error("Processing error: {0}")]
    Processing(String),

    #[cfg(feature = "raster")]
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

/// Result type for SAR filtering operations
pub type SarResult<T> = Result<T, SarError>;

/// Check that a block has the expected `(rows, cols)` shape
pub(crate) fn ensure_dim<T>(block: &Array2<T>, expected: (usize, usize)) -> SarResult<()> {
    let found = block.dim();
    if found != expected {
        return Err(SarError::DimensionMismatch { expected, found });
    }
    Ok(())
}
