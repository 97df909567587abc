//! Daily heliocentric observation pipeline.
//!
//! Given a calendar date, the library queries SPICE for the state of a target
//! body relative to an observer (Earth seen from the Sun by default) and
//! derives distance, light time, orbital speed, a first-principles speed
//! cross-check, and the angle swept since the vernal equinox direction.
//! Keeping this in a library crate lets multiple front-ends share it; the
//! `daily_report` binary in `crates/cli` is the reference consumer.

pub mod epoch;
pub mod observation;

pub use almanac_ephem_spice as ephemeris;
