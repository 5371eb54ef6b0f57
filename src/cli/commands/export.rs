//! Export command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("export")
        .about("Export all feedback to CSV")
        .arg(super::config_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file; defaults to a timestamped file in the export directory")
                .value_name("FILE"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Exporting feedback");

    let app = utils::create_app(utils::load_config(matches)?)?;
    let exporter = app.exporter();

    let path = match matches.get_one::<String>("output") {
        Some(output) => exporter.export_to_file(&PathBuf::from(output))?,
        None => exporter.export_to_dir(
            &app.config().export_dir(),
            chrono::Local::now().naive_local(),
        )?,
    };

    println!("Data exported to {}", path.display());

    let breakdown = exporter.rating_breakdown()?;
    for component in breakdown.values() {
        println!(
            "  {}: {:.2} average over {} rating(s)",
            component.totals.name,
            component.totals.average(),
            component.totals.count
        );
    }

    Ok(())
}
