//! Utility binary to download the almanac's SPICE kernels into `data/spice/`.
//!
//! The kernel set is intentionally small (leap seconds, planetary ephemeris,
//! gravitational parameters); extend the catalog in
//! `almanac_ephem_spice::kernels` to manage more.

use almanac_ephem_spice as ephemeris;
use almanac_ephem_spice::kernels::KERNEL_CATALOG;
use almanac_importer::{self as importer, KernelStatus};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Download the SPICE kernel set used by the almanac")]
struct Cli {
    /// Re-download kernels that are already present on disk
    #[arg(long)]
    force: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let statuses = importer::download_kernels(KERNEL_CATALOG, cli.force)?;
    for status in &statuses {
        let label = match status {
            KernelStatus::Downloaded(_) => "downloaded",
            KernelStatus::Refreshed(_) => "refreshed",
            KernelStatus::AlreadyPresent(_) => "skip",
        };
        println!("[{label}] {}", status.path().display());
    }

    match ephemeris::kernel_summaries() {
        Ok(summaries) => {
            println!("\nLocal kernel set:");
            for summary in summaries {
                println!(
                    "  {:<14} {:<22} {}",
                    summary.descriptor.filename,
                    summary.descriptor.kind.label(),
                    format_size(summary.file_size_bytes)
                );
                println!("      {}", summary.descriptor.description);
            }
        }
        Err(err) => eprintln!("[warn] unable to summarize kernels: {err}"),
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit_idx = 0;
    while value >= 1024.0 && unit_idx < UNITS.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }
    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[unit_idx])
    } else {
        format!("{value:.1} {}", UNITS[unit_idx])
    }
}
