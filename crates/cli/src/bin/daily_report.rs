use std::path::PathBuf;

use almanac_config::{ObservationConfig, load_observation};
use clap::Parser;
use earth_almanac::ephemeris;
use earth_almanac::observation::{self, DailyObservation};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Daily heliocentric state report for the configured target body"
)]
struct Cli {
    /// Observation manifest (TOML or YAML); defaults to Earth seen from the Sun
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report epoch (UTC string accepted by SPICE); defaults to today at midnight UTC
    #[arg(long)]
    epoch: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_observation(path)?,
        None => ObservationConfig::default(),
    };

    ephemeris::load_default_kernels()?;

    let report = match &cli.epoch {
        Some(epoch) => observation::observation_at(&config, epoch)?,
        None => observation::daily_observation(&config)?,
    };

    print_report(&config, &report);
    Ok(())
}

fn print_report(config: &ObservationConfig, report: &DailyObservation) {
    println!(
        "{} observed from {} [{}]",
        config.target, config.observer, config.reference_frame
    );
    println!("UTC epoch:         {}", report.epoch_utc);
    match ephemeris::format_epoch(report.ephemeris_time) {
        Ok(formatted) => println!(
            "Ephemeris time:    {:.3} s past J2000 ({formatted})",
            report.ephemeris_time
        ),
        Err(_) => println!("Ephemeris time:    {:.3} s past J2000", report.ephemeris_time),
    }
    println!(
        "Position [km]:     [{:.3}, {:.3}, {:.3}]",
        report.state.position_km[0], report.state.position_km[1], report.state.position_km[2]
    );
    println!(
        "Velocity [km/s]:   [{:.6}, {:.6}, {:.6}]",
        report.state.velocity_km_s[0], report.state.velocity_km_s[1], report.state.velocity_km_s[2]
    );
    println!(
        "Distance:          {} km ({} au)",
        report.distance_km, report.distance_au
    );
    println!(
        "Light time:        {} s ({} min)",
        report.light_time_s, report.light_time_min
    );
    println!("Orbital speed:     {} km/s", report.orbital_speed_km_s);
    println!(
        "Angle since vernal equinox: {} deg",
        report.angular_distance_deg
    );

    let check = &report.speed_check;
    if check.agrees {
        println!(
            "Speed cross-check: sqrt(GM/r) = {:.3} km/s (relative error {:.2e})",
            check.expected_km_s, check.relative_error
        );
    } else {
        eprintln!(
            "[warn] orbital speed disagrees with sqrt(GM/r): measured {:.3} km/s, expected {:.3} km/s (relative error {:.2e})",
            check.measured_km_s, check.expected_km_s, check.relative_error
        );
    }
}
