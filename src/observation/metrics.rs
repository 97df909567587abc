//! Derived orbital metrics computed from a raw ephemeris state vector.

use almanac_core::vector::{self, Vector3};

/// Normalized position of the target at the vernal equinox, in the query frame.
///
/// Serves as the zero-angle reference for orbital angular progress; fixed, not
/// derived per call.
pub const VERNAL_EQUINOX_DIRECTION: Vector3 = [1.0, 0.0, 0.0];

/// Maximum relative disagreement tolerated between the measured orbital speed
/// and the `sqrt(GM/r)` estimate before the cross-check is flagged.
pub const SPEED_CHECK_TOLERANCE: f64 = 0.01;

/// Outcome of verifying the measured orbital speed against `sqrt(GM/r)`.
///
/// Diagnostic only: a disagreement is surfaced, never turned into a pipeline
/// failure. Values stay at full precision.
#[derive(Debug, Clone, Copy)]
pub struct SpeedCheck {
    /// Norm of the velocity sub-vector (km/s).
    pub measured_km_s: f64,
    /// Circular-orbit speed `sqrt(GM/r)` at the measured distance (km/s).
    pub expected_km_s: f64,
    /// `|measured - expected| / expected`.
    pub relative_error: f64,
    /// Whether the relative error is within [`SPEED_CHECK_TOLERANCE`].
    pub agrees: bool,
}

/// Orbital speed as the Euclidean norm of the velocity sub-vector.
pub fn orbital_speed_km_s(velocity_km_s: &Vector3) -> f64 {
    vector::norm(velocity_km_s)
}

/// Verify a measured orbital speed against the two-body estimate `sqrt(GM/r)`.
pub fn verify_orbital_speed(
    measured_km_s: f64,
    gm_km3_s2: f64,
    distance_km: f64,
) -> SpeedCheck {
    let expected_km_s = (gm_km3_s2 / distance_km).sqrt();
    let relative_error = ((measured_km_s - expected_km_s) / expected_km_s).abs();
    SpeedCheck {
        measured_km_s,
        expected_km_s,
        relative_error,
        agrees: relative_error <= SPEED_CHECK_TOLERANCE,
    }
}

/// Angle in degrees between the target's position and the vernal equinox
/// direction.
///
/// `distance_km` must be the norm of `position_km`; the caller guards against
/// a degenerate (zero-length) position before calling.
pub fn angular_from_equinox_deg(position_km: &Vector3, distance_km: f64) -> f64 {
    let unit = vector::scale(position_km, 1.0 / distance_km);
    // Floating-point noise can push the dot product marginally outside
    // [-1, 1], where acos returns NaN.
    let cos_angle = vector::dot(&unit, &VERNAL_EQUINOX_DIRECTION).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
