//! SPICE kernel download utilities.

use std::fs::{self, File};
use std::io::copy;
use std::path::{Path, PathBuf};

use almanac_ephem_spice::kernels::{KernelDescriptor, LOCAL_SPICE_DIR};
use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of attempting to download a kernel.
#[derive(Debug)]
pub enum KernelStatus {
    Downloaded(PathBuf),
    Refreshed(PathBuf),
    AlreadyPresent(PathBuf),
}

impl KernelStatus {
    /// The local path this status refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded(path) | Self::Refreshed(path) | Self::AlreadyPresent(path) => path,
        }
    }
}

/// Download every kernel in the descriptor set into the local SPICE directory.
///
/// Kernels already on disk are skipped unless `force` is set, in which case
/// they are fetched again (useful after a truncated download).
pub fn download_kernels(
    descriptors: &[KernelDescriptor],
    force: bool,
) -> Result<Vec<KernelStatus>, ImportError> {
    fs::create_dir_all(LOCAL_SPICE_DIR)?;
    let client = Client::builder().build()?;
    let mut statuses = Vec::new();

    for descriptor in descriptors {
        let dest = descriptor.local_path();
        let present = dest.exists();
        if present && !force {
            statuses.push(KernelStatus::AlreadyPresent(dest));
            continue;
        }
        fetch_kernel(&client, descriptor, &dest)?;
        statuses.push(if present {
            KernelStatus::Refreshed(dest)
        } else {
            KernelStatus::Downloaded(dest)
        });
    }

    Ok(statuses)
}

fn fetch_kernel(
    client: &Client,
    descriptor: &KernelDescriptor,
    dest: &Path,
) -> Result<(), ImportError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut response = client.get(descriptor.url).send()?.error_for_status()?;
    let mut file = File::create(dest)?;
    copy(&mut response, &mut file)?;
    Ok(())
}
