//! Theme command implementation

use crate::cli::utils;
use crate::{CafeteriaError, ThemeContext};
use anyhow::{anyhow, Result};
use cafeteria_theme::css::used_utilities;
use cafeteria_theme::scan::collect_used_classes;
use clap::{ArgMatches, Command};
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("theme")
        .about("Validate, compile and select the front-end theme")
        .arg(super::config_arg())
        .subcommand_required(true)
        .subcommand(Command::new("check").about("Validate the theme tokens"))
        .subcommand(
            Command::new("build")
                .about("Compile the theme tokens into a stylesheet")
                .arg(
                    clap::Arg::new("scan")
                        .short('s')
                        .long("scan")
                        .help("Only emit utilities used by the content files")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    clap::Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Rewrite the stylesheet even when the tokens are unchanged")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("scan").about("List content files and the classes they use"))
        .subcommand(Command::new("presets").about("List the stylesheet presets"))
        .subcommand(
            Command::new("use")
                .about("Select a stylesheet preset")
                .arg(
                    clap::Arg::new("name")
                        .help("Preset file name, e.g. dark.css")
                        .required(true),
                ),
        )
        .subcommand(Command::new("install").about("Write missing stylesheet presets"))
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("check", sub_matches)) => check(sub_matches),
        Some(("build", sub_matches)) => build(sub_matches),
        Some(("scan", sub_matches)) => scan(sub_matches),
        Some(("presets", sub_matches)) => presets(sub_matches),
        Some(("use", sub_matches)) => use_preset(sub_matches),
        Some(("install", sub_matches)) => install(sub_matches),
        _ => Err(anyhow!("Unknown theme subcommand")),
    }
}

fn check(matches: &ArgMatches) -> Result<()> {
    info!("Validating theme tokens");

    let config = utils::load_config(matches)?;
    let theme = ThemeContext::new(&config).load_theme()?;
    let report = theme.validate();

    println!("Theme tokens: {:?}", config.theme_config_path());
    println!("  Content patterns: {}", theme.content.len());
    println!("  Colors: {}", theme.colors().len());
    println!("  Font families: {}", theme.font_families().len());
    println!("  Box shadows: {}", theme.box_shadows().len());
    println!("  Plugins: {}", theme.plugins.len());

    for issue in &report.issues {
        println!("  {}", issue);
    }

    let error_count = report.errors().count();
    if error_count > 0 {
        return Err(CafeteriaError::Theme(format!(
            "{} error(s) found in theme tokens",
            error_count
        ))
        .into());
    }

    println!("Theme is valid!");
    Ok(())
}

fn build(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let result = ThemeContext::new(&config)
        .build_theme(matches.get_flag("scan"), matches.get_flag("force"))?;

    if result.written {
        println!("Stylesheet written to {}", result.output_path.display());
        if result.content_files > 0 {
            println!("  Content files scanned: {}", result.content_files);
        }
    } else {
        println!(
            "Stylesheet {} is up to date",
            result.output_path.display()
        );
    }
    println!("  Fingerprint: {}", result.fingerprint);

    Ok(())
}

fn scan(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let context = ThemeContext::new(&config);
    let theme = context.load_theme()?;
    let scanner = context.scanner();
    let files = scanner.scan(&theme)?;

    if files.is_empty() {
        warn!("No content files matched under {:?}", scanner.root());
        println!("No content files matched.");
        return Ok(());
    }

    println!("Content files ({}):", files.len());
    for file in &files {
        println!("  {}", file.display());
    }

    let used = collect_used_classes(&files);
    let known: Vec<String> = used_utilities(&theme, &used)
        .into_iter()
        .map(|u| u.class)
        .collect();
    println!("Theme utilities in use ({}):", known.len());
    for class in &known {
        println!("  {}", class);
    }

    Ok(())
}

fn presets(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let manager = ThemeContext::new(&config).stylesheets();

    println!("Stylesheets in {}:", manager.dir().display());
    for name in manager.available() {
        let marker = if name == manager.selected() { "*" } else { " " };
        let installed = if manager.dir().join(name).exists() {
            ""
        } else {
            " (not installed)"
        };
        println!("  {} {}{}", marker, name, installed);
    }

    Ok(())
}

fn use_preset(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| anyhow!("Missing preset name"))?;

    let config_path = utils::get_config_path(matches)?;
    let mut config = utils::load_config(matches)?;

    let mut manager = ThemeContext::new(&config).stylesheets();
    manager.select(name)?;
    manager.load()?;

    config.theme.stylesheet = name.clone();
    config.save_to_file(&config_path)?;

    info!("Selected stylesheet {} in {:?}", name, config_path);
    println!("Applied stylesheet: {}", name);
    Ok(())
}

fn install(matches: &ArgMatches) -> Result<()> {
    let config = utils::load_config(matches)?;
    let manager = ThemeContext::new(&config).stylesheets();
    let written = manager.install_defaults()?;

    if written.is_empty() {
        println!("All presets already installed in {}", manager.dir().display());
    } else {
        for path in &written {
            println!("Installed {}", path.display());
        }
    }

    Ok(())
}
