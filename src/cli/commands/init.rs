//! Init command implementation

use crate::{AppConfig, ThemeConfig};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".cafeteria.yaml"),
        )
        .arg(
            clap::Arg::new("example")
                .short('e')
                .long("example")
                .help("Also write the default theme tokens and stylesheet presets")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing configuration file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("Missing output path"))?;
    let example = matches.get_flag("example");

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{:?} already exists; pass --force to overwrite it",
            output_path
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    let config = AppConfig::default();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::utils::ensure_directory(parent)?;
    }
    config.save_to_file(&output_path)?;

    info!("Configuration file created: {:?}", output_path);

    if example {
        let theme_path = config.theme_config_path();
        if !theme_path.exists() {
            if let Some(parent) = theme_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                crate::utils::ensure_directory(parent)?;
            }
            ThemeConfig::default().save_to_file(&theme_path)?;
            println!("Theme tokens written to {}", theme_path.display());
        }

        let installed = crate::StylesheetManager::new(config.stylesheet_dir(), None)
            .install_defaults()?;
        println!("Installed {} stylesheet preset(s).", installed.len());
        println!("Example configuration created with the default theme.");
    } else {
        println!("Configuration file created with default settings.");
    }
    println!("Menu and feedback data live in {}", config.data_dir().display());

    Ok(())
}
