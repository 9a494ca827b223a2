use crate::types::{FilterMask, SarError, SarResult};
use gdal::{Driver, DriverManager};
use gdal_sys::{CPLErr, GDALDataType, GDALRWFlag};
use num_traits::Float;
use rustfft::FftNum;
use std::ffi::CString;
use std::os::raw::{c_int, c_void};
use std::path::Path;

/// Driver used for mask output
const MASK_DRIVER: &str = "ENVI";

/// Write a complex array as a single-band CFloat32 ENVI raster.
///
/// The raster is `ncols` pixels wide and `nrows` lines tall. The `gdal`
/// crate has no complex buffer type, so the band is written through
/// `gdal_sys` from interleaved (re, im) pairs.
pub fn write_complex_raster<T, P>(path: P, data: &FilterMask<T>) -> SarResult<()>
where
    T: FftNum + Float,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::info!("Writing complex raster: {}", path.display());

    let (height, width) = data.dim();
    let driver = DriverManager::get_driver_by_name(MASK_DRIVER)?;

    let mut interleaved: Vec<f32> = Vec::with_capacity(2 * width * height);
    for value in data.iter() {
        interleaved.push(value.re.to_f32().unwrap_or(0.0));
        interleaved.push(value.im.to_f32().unwrap_or(0.0));
    }

    let c_path = CString::new(path.to_string_lossy().as_bytes())
        .map_err(|e| SarError::Processing(format!("Invalid raster path: {}", e)))?;

    let status = unsafe {
        let dataset = gdal_sys::GDALCreate(
            driver.c_driver(),
            c_path.as_ptr(),
            width as c_int,
            height as c_int,
            1,
            GDALDataType::GDT_CFloat32,
            std::ptr::null_mut(),
        );
        if dataset.is_null() {
            return Err(SarError::Processing(format!(
                "GDAL could not create {}",
                path.display()
            )));
        }

        let band = gdal_sys::GDALGetRasterBand(dataset, 1);
        let status = gdal_sys::GDALRasterIO(
            band,
            GDALRWFlag::GF_Write,
            0,
            0,
            width as c_int,
            height as c_int,
            interleaved.as_mut_ptr() as *mut c_void,
            width as c_int,
            height as c_int,
            GDALDataType::GDT_CFloat32,
            0,
            0,
        );
        gdal_sys::GDALClose(dataset);
        status
    };

    if status != CPLErr::CE_None {
        discard_partial_output(&driver, &c_path);
        return Err(SarError::Processing(format!(
            "GDAL failed to write {} x {} complex band to {}",
            height,
            width,
            path.display()
        )));
    }

    log::info!("Complex raster saved: {} x {}", height, width);
    Ok(())
}

/// Remove a dataset and its sidecar files after a failed write
fn discard_partial_output(driver: &Driver, c_path: &CString) {
    let status = unsafe { gdal_sys::GDALDeleteDataset(driver.c_driver(), c_path.as_ptr()) };
    if status != CPLErr::CE_None {
        log::warn!(
            "Could not remove incomplete raster {}",
            c_path.to_string_lossy()
        );
    }
}
