//! SPICE ephemeris queries and kernel management built on top of the CSPICE toolkit.
//!
//! CSPICE is consumed as a black box: kernel files provide the data, and every
//! query drains the toolkit's failure state so errors surface as typed Rust
//! values instead of aborting the process.

use std::ffi::{CStr, CString};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use cspice_sys::{
    SpiceBoolean, SpiceDouble, SpiceInt, bodvcd_c, convrt_c, erract_c, et2utc_c, failed_c,
    furnsh_c, getmsg_c, kclear_c, reset_c, spkezr_c, str2et_c,
};
use thiserror::Error;

pub mod kernels;

use kernels::{KERNEL_CATALOG, KernelDescriptor};

/// Basic metadata describing a local SPICE kernel.
#[derive(Debug)]
pub struct KernelSummary {
    pub descriptor: &'static KernelDescriptor,
    pub path: PathBuf,
    pub file_size_bytes: u64,
}

/// Position, velocity, and light-time returned from SPICE.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
    pub light_time_seconds: f64,
}

/// Errors surfaced while loading kernels or querying the SPICE toolkit.
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("kernel `{name}` is missing at {path}")]
    MissingKernel { name: &'static str, path: PathBuf },
    #[error("kernel `{name}` path contains invalid UTF-8: {path}")]
    InvalidKernelPath { name: &'static str, path: PathBuf },
    #[error("failed to read metadata for kernel `{name}`: {source}")]
    Io {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to convert epoch `{epoch}` to ephemeris time: {message}")]
    TimeConversion { epoch: String, message: String },
    #[error("no ephemeris state for `{target}` seen from `{observer}`: {message}")]
    StateUnavailable {
        target: String,
        observer: String,
        message: String,
    },
    #[error("constant `{item}` for body {body_id} is unavailable: {message}")]
    ConstantUnavailable {
        body_id: i32,
        item: String,
        message: String,
    },
    #[error("SPICE kernel call failed: {message}")]
    Spice { message: String },
}

static INITIALIZED: OnceLock<()> = OnceLock::new();
static INITIALIZE_LOCK: Mutex<()> = Mutex::new(());

/// Ensure the CSPICE runtime has all required kernels loaded.
///
/// Idempotent and cheap after the first successful call; intended to run once
/// at process startup before any query.
pub fn load_default_kernels() -> Result<(), EphemerisError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    let _lock = INITIALIZE_LOCK.lock().unwrap();
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    initialize_spice()?;
    INITIALIZED
        .set(())
        .expect("INITIALIZED OnceLock set exactly once");
    Ok(())
}

/// Reports whether the kernel set has been loaded in this process.
pub fn is_ready() -> bool {
    INITIALIZED.get().is_some()
}

/// Summarize the local kernel set with file sizes and descriptions.
pub fn kernel_summaries() -> Result<Vec<KernelSummary>, EphemerisError> {
    validate_kernel_paths()?;
    KERNEL_CATALOG
        .iter()
        .map(|descriptor| {
            let path = descriptor.local_path();
            let metadata = fs::metadata(&path).map_err(|source| EphemerisError::Io {
                name: descriptor.filename,
                source,
            })?;
            Ok(KernelSummary {
                descriptor,
                path,
                file_size_bytes: metadata.len(),
            })
        })
        .collect()
}

/// Convert a time string understood by SPICE into ephemeris seconds past J2000.
pub fn epoch_seconds(epoch: &str) -> Result<f64, EphemerisError> {
    load_default_kernels()?;
    let epoch_c = CString::new(epoch).map_err(|_| EphemerisError::TimeConversion {
        epoch: epoch.to_string(),
        message: "epoch string contains an interior NUL".to_string(),
    })?;
    let mut et: SpiceDouble = 0.0;
    unsafe {
        str2et_c(epoch_c.as_ptr() as *mut i8, &mut et);
    }
    if let Some(message) = spice_failure() {
        return Err(EphemerisError::TimeConversion {
            epoch: epoch.to_string(),
            message,
        });
    }
    Ok(et)
}

/// Query the state vector of a target relative to an observer at a string epoch.
pub fn state_vector(
    target: &str,
    observer: &str,
    reference_frame: &str,
    aberration_correction: &str,
    epoch: &str,
) -> Result<StateVector, EphemerisError> {
    let et = epoch_seconds(epoch)?;
    state_vector_et(target, observer, reference_frame, aberration_correction, et)
}

/// Query the state vector by supplying ephemeris seconds past J2000 directly.
pub fn state_vector_et(
    target: &str,
    observer: &str,
    reference_frame: &str,
    aberration_correction: &str,
    ephemeris_time: f64,
) -> Result<StateVector, EphemerisError> {
    load_default_kernels()?;

    let target_c = CString::new(target).unwrap();
    let observer_c = CString::new(observer).unwrap();
    let reference_frame_c = CString::new(reference_frame).unwrap();
    let aberration_c = CString::new(aberration_correction).unwrap();

    let mut state: [SpiceDouble; 6] = [0.0; 6];
    let mut light_time: SpiceDouble = 0.0;
    unsafe {
        spkezr_c(
            target_c.as_ptr() as *mut i8,
            ephemeris_time,
            reference_frame_c.as_ptr() as *mut i8,
            aberration_c.as_ptr() as *mut i8,
            observer_c.as_ptr() as *mut i8,
            state.as_mut_ptr(),
            &mut light_time,
        );
    }
    if let Some(message) = spice_failure() {
        return Err(EphemerisError::StateUnavailable {
            target: target.to_string(),
            observer: observer.to_string(),
            message,
        });
    }

    Ok(StateVector {
        position_km: [state[0], state[1], state[2]],
        velocity_km_s: [state[3], state[4], state[5]],
        light_time_seconds: light_time,
    })
}

/// Look up a scalar constant for a body from the loaded kernel pool.
///
/// `item` names the kernel-pool variable, e.g. `"GM"` for the gravitational
/// parameter in km³/s².
pub fn body_constant(body_id: i32, item: &str) -> Result<f64, EphemerisError> {
    load_default_kernels()?;
    let item_c = CString::new(item).map_err(|_| EphemerisError::ConstantUnavailable {
        body_id,
        item: item.to_string(),
        message: "item name contains an interior NUL".to_string(),
    })?;
    let mut dim: SpiceInt = 0;
    let mut values: [SpiceDouble; 1] = [0.0];
    unsafe {
        bodvcd_c(
            body_id as SpiceInt,
            item_c.as_ptr() as *mut i8,
            values.len() as SpiceInt,
            &mut dim,
            values.as_mut_ptr(),
        );
    }
    if let Some(message) = spice_failure() {
        return Err(EphemerisError::ConstantUnavailable {
            body_id,
            item: item.to_string(),
            message,
        });
    }
    if dim < 1 {
        return Err(EphemerisError::ConstantUnavailable {
            body_id,
            item: item.to_string(),
            message: "kernel pool returned no values".to_string(),
        });
    }
    Ok(values[0])
}

/// Convert a value between units known to SPICE (e.g. `"km"` to `"au"`).
pub fn convert_units(value: f64, from: &str, to: &str) -> Result<f64, EphemerisError> {
    load_default_kernels()?;
    let from_c = CString::new(from).unwrap();
    let to_c = CString::new(to).unwrap();
    let mut converted: SpiceDouble = 0.0;
    unsafe {
        convrt_c(
            value,
            from_c.as_ptr() as *mut i8,
            to_c.as_ptr() as *mut i8,
            &mut converted,
        );
    }
    check_for_spice_error()?;
    Ok(converted)
}

/// Format an ephemeris time (seconds past J2000) into a UTC calendar string.
pub fn format_epoch(et: f64) -> Result<String, EphemerisError> {
    load_default_kernels()?;
    let mut buffer = vec![0i8; 64];
    let fmt = CString::new("C").unwrap();
    unsafe {
        et2utc_c(
            et,
            fmt.as_ptr() as *mut i8,
            3,
            buffer.len() as SpiceInt,
            buffer.as_mut_ptr(),
        );
    }
    check_for_spice_error()?;
    let c_str = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    Ok(c_str.to_string_lossy().trim().to_string())
}

fn initialize_spice() -> Result<(), EphemerisError> {
    validate_kernel_paths()?;
    unsafe {
        kclear_c();
    }
    configure_error_handling();
    for descriptor in KERNEL_CATALOG {
        let c_path = path_to_cstring(descriptor)?;
        unsafe {
            furnsh_c(c_path.as_ptr() as *mut i8);
        }
        check_for_spice_error()?;
    }
    Ok(())
}

fn validate_kernel_paths() -> Result<(), EphemerisError> {
    for descriptor in KERNEL_CATALOG {
        let path = descriptor.local_path();
        if !path.exists() {
            return Err(EphemerisError::MissingKernel {
                name: descriptor.filename,
                path,
            });
        }
        if path.to_str().is_none() {
            return Err(EphemerisError::InvalidKernelPath {
                name: descriptor.filename,
                path,
            });
        }
    }
    Ok(())
}

fn path_to_cstring(descriptor: &KernelDescriptor) -> Result<CString, EphemerisError> {
    let path = descriptor.local_path();
    let path_str = path
        .to_str()
        .ok_or_else(|| EphemerisError::InvalidKernelPath {
            name: descriptor.filename,
            path: path.clone(),
        })?;
    CString::new(path_str).map_err(|_| EphemerisError::InvalidKernelPath {
        name: descriptor.filename,
        path,
    })
}

fn configure_error_handling() {
    const SET: &[u8] = b"SET\0";
    const RETURN_MODE: &[u8] = b"RETURN\0";
    unsafe {
        erract_c(
            SET.as_ptr() as *mut i8,
            0 as SpiceInt,
            RETURN_MODE.as_ptr() as *mut i8,
        );
    }
}

/// Drain the toolkit's failure state, returning the long message if one is set.
fn spice_failure() -> Option<String> {
    unsafe {
        if failed_c() != 0 as SpiceBoolean {
            const LONG: &[u8] = b"LONG\0";
            let mut buffer = vec![0i8; 1024];
            getmsg_c(
                LONG.as_ptr() as *mut i8,
                buffer.len() as SpiceInt,
                buffer.as_mut_ptr(),
            );
            reset_c();
            let message = CStr::from_ptr(buffer.as_ptr())
                .to_string_lossy()
                .trim()
                .to_string();
            return Some(message);
        }
    }
    None
}

fn check_for_spice_error() -> Result<(), EphemerisError> {
    match spice_failure() {
        Some(message) => Err(EphemerisError::Spice { message }),
        None => Ok(()),
    }
}
