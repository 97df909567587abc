//! Single-shot observation pipeline: normalize the epoch, query the ephemeris
//! source once, derive the report metrics, and assemble the immutable record.

pub mod metrics;

use almanac_config::ObservationConfig;
use almanac_core::time::seconds_to_minutes;
use almanac_core::units::round3;
use almanac_core::vector;
use almanac_ephem_spice::{self as ephemeris, EphemerisError, StateVector};
use thiserror::Error;

use self::metrics::SpeedCheck;
use crate::epoch;

/// One day's observation of the target body, as rendered in reports.
///
/// Scalars carry the 3-decimal reporting precision; the raw state vector and
/// the speed cross-check stay at full precision. The record is never mutated
/// after assembly.
#[derive(Debug, Clone)]
pub struct DailyObservation {
    /// Normalized calendar epoch of the query (midnight UTC).
    pub epoch_utc: String,
    /// Ephemeris seconds past J2000 corresponding to `epoch_utc`.
    pub ephemeris_time: f64,
    /// Raw state of the target relative to the observer.
    pub state: StateVector,
    /// Observer-to-target distance (km).
    pub distance_km: f64,
    /// Observer-to-target distance (astronomical units).
    pub distance_au: f64,
    /// One-way light travel time (s).
    pub light_time_s: f64,
    /// One-way light travel time (min).
    pub light_time_min: f64,
    /// Orbital speed of the target (km/s).
    pub orbital_speed_km_s: f64,
    /// Angle swept since the vernal equinox direction (deg).
    pub angular_distance_deg: f64,
    /// Diagnostic agreement between measured speed and `sqrt(GM/r)`.
    pub speed_check: SpeedCheck,
}

/// Errors surfaced by the observation pipeline.
#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("ephemeris lookup failed: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("state vector position is degenerate (|r| = {norm_km} km)")]
    DegeneratePosition { norm_km: f64 },
}

/// Observe the configured target at midnight of the current date.
///
/// This is the single operation the presentation shell calls, once per
/// inbound request.
pub fn daily_observation(config: &ObservationConfig) -> Result<DailyObservation, ObservationError> {
    observation_at(config, &epoch::midnight_today())
}

/// Observe the configured target at an explicit epoch string.
pub fn observation_at(
    config: &ObservationConfig,
    epoch_utc: &str,
) -> Result<DailyObservation, ObservationError> {
    ephemeris::load_default_kernels()?;

    let ephemeris_time = ephemeris::epoch_seconds(epoch_utc)?;
    let state = ephemeris::state_vector_et(
        &config.target,
        &config.observer,
        &config.reference_frame,
        config.aberration_correction(),
        ephemeris_time,
    )?;

    let distance_km = vector::norm(&state.position_km);
    let distance_au = ephemeris::convert_units(distance_km, "km", "au")?;
    let gm_observer = ephemeris::body_constant(config.observer_naif_id, "GM")?;

    DailyObservation::from_raw(
        epoch_utc.to_string(),
        ephemeris_time,
        state,
        gm_observer,
        distance_au,
    )
}

impl DailyObservation {
    /// Assemble the report record from a raw state lookup.
    ///
    /// All derivation happens here at full precision; rounding to the
    /// reporting precision is applied to the final fields only. `distance_au`
    /// comes from the ephemeris source's unit conversion so its authoritative
    /// km-per-au constant is tracked instead of a local one.
    pub fn from_raw(
        epoch_utc: String,
        ephemeris_time: f64,
        state: StateVector,
        gm_observer_km3_s2: f64,
        distance_au: f64,
    ) -> Result<Self, ObservationError> {
        let distance_km = vector::norm(&state.position_km);
        if distance_km <= 0.0 {
            return Err(ObservationError::DegeneratePosition {
                norm_km: distance_km,
            });
        }

        let orbital_speed = metrics::orbital_speed_km_s(&state.velocity_km_s);
        let speed_check =
            metrics::verify_orbital_speed(orbital_speed, gm_observer_km3_s2, distance_km);
        let angular_distance = metrics::angular_from_equinox_deg(&state.position_km, distance_km);

        Ok(Self {
            epoch_utc,
            ephemeris_time,
            state,
            distance_km: round3(distance_km),
            distance_au: round3(distance_au),
            light_time_s: round3(state.light_time_seconds),
            light_time_min: round3(seconds_to_minutes(state.light_time_seconds)),
            orbital_speed_km_s: round3(orbital_speed),
            angular_distance_deg: round3(angular_distance),
            speed_check,
        })
    }
}
