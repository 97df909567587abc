//! Integration tests against real SPICE kernels.
//!
//! These run only when the kernel set is present under `data/spice/`; fetch it
//! with `cargo run -p almanac_cli --bin fetch_spice` first.

use std::sync::{Mutex, OnceLock};

use almanac_config::ObservationConfig;
use almanac_core::constants::{AU_KM, SPEED_OF_LIGHT_KM_S};
use earth_almanac::ephemeris;
use earth_almanac::ephemeris::EphemerisError;
use earth_almanac::ephemeris::kernels::KERNEL_CATALOG;
use earth_almanac::observation;

fn guard() -> &'static Mutex<()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}

fn ensure_kernels_or_skip() -> Option<()> {
    match ephemeris::load_default_kernels() {
        Ok(()) => Some(()),
        Err(EphemerisError::MissingKernel { path, .. }) => {
            eprintln!(
                "Skipping ephemeris tests: missing kernel at {}. Run `cargo run -p almanac_cli --bin fetch_spice` first.",
                path.display()
            );
            None
        }
        Err(err) => panic!("Unexpected SPICE initialization error: {err}"),
    }
}

#[test]
fn kernel_catalog_is_present_and_indexable() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    assert!(ephemeris::is_ready());

    let summaries = ephemeris::kernel_summaries().expect("kernel summaries should load");
    assert_eq!(
        summaries.len(),
        KERNEL_CATALOG.len(),
        "all catalog kernels should be reported"
    );

    for summary in summaries {
        assert!(
            summary.file_size_bytes > 0,
            "kernel {} should have non-zero size",
            summary.descriptor.filename
        );
    }
}

#[test]
fn earth_heliocentric_state_vector_is_reasonable() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    let state = ephemeris::state_vector(
        "EARTH",
        "SUN",
        "ECLIPJ2000",
        "NONE",
        "2024-01-01T00:00:00",
    )
    .expect("SPICE state vector should resolve");

    let distance = (state.position_km[0].powi(2)
        + state.position_km[1].powi(2)
        + state.position_km[2].powi(2))
    .sqrt();
    assert!(
        (AU_KM * 0.95..=AU_KM * 1.05).contains(&distance),
        "Earth-Sun distance should be ~1 AU (got {distance} km)"
    );

    let speed = (state.velocity_km_s[0].powi(2)
        + state.velocity_km_s[1].powi(2)
        + state.velocity_km_s[2].powi(2))
    .sqrt();
    assert!(
        (25.0..=40.0).contains(&speed),
        "Earth heliocentric speed should be ~30 km/s (got {speed} km/s)"
    );

    let expected_light_time = distance / SPEED_OF_LIGHT_KM_S;
    let light_time_delta = (state.light_time_seconds - expected_light_time).abs();
    assert!(
        light_time_delta < 1.0,
        "Light time should match distance/c within 1s (delta {light_time_delta})"
    );
}

#[test]
fn sun_gm_matches_published_value() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    let gm_sun = ephemeris::body_constant(10, "GM").expect("GM lookup should resolve");
    let published = 1.327_124_400_42e11; // km^3 / s^2, DE431
    assert!(
        ((gm_sun - published) / published).abs() < 1e-6,
        "GM(Sun) = {gm_sun}"
    );
}

#[test]
fn km_to_au_conversion_tracks_iau_constant() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    let one_au = ephemeris::convert_units(AU_KM, "km", "au").expect("convrt should resolve");
    assert!(
        (one_au - 1.0).abs() < 1e-9,
        "one AU of kilometres should convert to 1.0 au (got {one_au})"
    );
}

#[test]
fn missing_body_constant_is_reported() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    let result = ephemeris::body_constant(10, "NO_SUCH_ITEM");
    assert!(matches!(
        result,
        Err(EphemerisError::ConstantUnavailable { .. })
    ));
}

#[test]
fn malformed_epoch_is_reported() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    let result = ephemeris::epoch_seconds("not-a-date");
    assert!(matches!(result, Err(EphemerisError::TimeConversion { .. })));
}

#[test]
fn daily_pipeline_produces_consistent_report() {
    let _lock = guard().lock().unwrap();
    if ensure_kernels_or_skip().is_none() {
        return;
    }

    let config = ObservationConfig::default();
    let report = observation::observation_at(&config, "2024-03-20T00:00:00")
        .expect("pipeline should run against real kernels");

    assert!(report.distance_km > 0.0);
    assert!(
        (0.95..=1.05).contains(&report.distance_au),
        "distance = {} au",
        report.distance_au
    );
    assert!(
        (0.0..=180.0).contains(&report.angular_distance_deg),
        "angle = {} deg",
        report.angular_distance_deg
    );
    assert!(
        (25.0..=40.0).contains(&report.orbital_speed_km_s),
        "speed = {} km/s",
        report.orbital_speed_km_s
    );
    assert!(
        report.speed_check.agrees,
        "speed cross-check diverged: measured {} km/s vs expected {} km/s",
        report.speed_check.measured_km_s, report.speed_check.expected_km_s
    );

    // Minutes field tracks the seconds field through the reporting rounding.
    let expected_minutes = (report.state.light_time_seconds / 60.0 * 1000.0).round() / 1000.0;
    assert_eq!(report.light_time_min, expected_minutes);
}
