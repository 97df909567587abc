//! Observation manifest models and loaders for the Earth Almanac.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Which body is observed, from where, and in which reference frame.
///
/// The reference frame must match the frame the vernal-equinox reference
/// direction is expressed in; the default manifest keeps both in ECLIPJ2000.
#[derive(Debug, Deserialize, Clone)]
pub struct ObservationConfig {
    /// SPICE name of the target body.
    pub target: String,
    /// SPICE name of the observer body.
    pub observer: String,
    /// NAIF integer id of the observer, used for kernel-pool constant lookups.
    pub observer_naif_id: i32,
    /// SPICE reference frame for the returned state vector.
    pub reference_frame: String,
    /// Aberration correction passed to the state lookup; geometric when absent.
    #[serde(default)]
    pub aberration_correction: Option<String>,
}

impl ObservationConfig {
    /// Aberration correction flag handed to SPICE.
    pub fn aberration_correction(&self) -> &str {
        self.aberration_correction.as_deref().unwrap_or("NONE")
    }
}

impl Default for ObservationConfig {
    /// Earth observed from the Sun in the ecliptic J2000 frame, geometric states.
    fn default() -> Self {
        Self {
            target: "EARTH".to_string(),
            observer: "SUN".to_string(),
            observer_naif_id: 10,
            reference_frame: "ECLIPJ2000".to_string(),
            aberration_correction: None,
        }
    }
}

/// Errors that can occur while loading an observation manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load an observation manifest from a TOML or YAML file, dispatching on extension.
pub fn load_observation<P: AsRef<Path>>(path: P) -> Result<ObservationConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}
