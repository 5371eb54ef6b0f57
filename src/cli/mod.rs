//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("cafeteria")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Cafeteria menu, feedback and analytics tools")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::theme::command())
            .subcommand(commands::menu::command())
            .subcommand(commands::feedback::command())
            .subcommand(commands::export::command())
            .subcommand(commands::analytics::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("theme", sub_matches)) => commands::theme::run(sub_matches).await,
            Some(("menu", sub_matches)) => commands::menu::run(sub_matches).await,
            Some(("feedback", sub_matches)) => commands::feedback::run(sub_matches).await,
            Some(("export", sub_matches)) => commands::export::run(sub_matches).await,
            Some(("analytics", sub_matches)) => commands::analytics::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use crate::CafeteriaError;
    use anyhow::Result;
    use std::path::PathBuf;

    /// Configuration files looked up in the working directory, in order
    pub const DEFAULT_CONFIG_FILES: &[&str] = &[
        ".cafeteria.yaml",
        ".cafeteria.yml",
        "cafeteria.yaml",
        "cafeteria.yml",
    ];

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        for name in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(path);
            }
        }

        // Fall back to the per-user configuration
        let user_config = crate::utils::get_config_dir()?.join("config.yaml");
        if user_config.exists() {
            return Ok(user_config);
        }

        Err(CafeteriaError::Config(
            "No configuration file found. Use --config to specify a file or create one with 'cafeteria init'"
                .to_string(),
        )
        .into())
    }

    /// Load configuration from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::AppConfig> {
        let config_path = get_config_path(matches)?;
        crate::AppConfig::from_file(&config_path)
            .map_err(|e| CafeteriaError::Config(format!("{:?}: {:#}", config_path, e)).into())
    }

    /// Create Cafeteria instance
    pub fn create_app(config: crate::AppConfig) -> Result<crate::Cafeteria> {
        crate::Cafeteria::new(config)
    }
}
