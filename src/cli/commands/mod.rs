//! CLI command modules

pub mod analytics;
pub mod export;
pub mod feedback;
pub mod init;
pub mod menu;
pub mod theme;
pub mod validate;

/// `--config` option shared by every command that reads the configuration
pub fn config_arg() -> clap::Arg {
    clap::Arg::new("config")
        .short('c')
        .long("config")
        .help("Configuration file path")
        .value_name("FILE")
        .global(true)
}
