//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(super::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let config = utils::load_config(matches)?;

    println!("Configuration file is valid!");
    println!("Version: {}", config.version);
    println!("Data directory: {:?}", config.data_dir());
    println!("Images directory: {:?}", config.images_dir());
    println!("Theme tokens: {:?}", config.theme_config_path());
    println!("Theme output: {:?}", config.theme_output_path());
    println!(
        "Stylesheet: {} (in {:?})",
        config.theme.stylesheet,
        config.stylesheet_dir()
    );
    println!("Exports: {:?}", config.export_dir());
    println!("Reports: {:?}", config.reports_dir());

    Ok(())
}
