//! Menu command implementation

use crate::cli::utils;
use crate::menu::{default_date, items_for_date, served_dates};
use crate::MenuCard;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{ArgMatches, Command};
use tracing::debug;

pub fn command() -> Command {
    Command::new("menu")
        .about("Show what is being served")
        .arg(super::config_arg())
        .subcommand_required(true)
        .subcommand(Command::new("dates").about("List every date with dishes on the menu"))
        .subcommand(
            Command::new("show").about("Show the dishes served on a day").arg(
                clap::Arg::new("date")
                    .short('d')
                    .long("date")
                    .help("Day to show (YYYY-MM-DD); defaults to today or the first served day")
                    .value_name("DATE"),
            ),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(utils::load_config(matches)?)?;
    let items = app.database().all_menu_items()?;
    let dates = served_dates(&items);

    match matches.subcommand() {
        Some(("dates", _)) => {
            if dates.is_empty() {
                println!("No dates available");
                return Ok(());
            }
            for date in &dates {
                println!("{}", date);
            }
            Ok(())
        }
        Some(("show", sub_matches)) => {
            let date = match sub_matches.get_one::<String>("date") {
                Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
                None => default_date(&dates, chrono::Local::now().date_naive()),
            };
            debug!("Showing menu for {}", date);

            let served = items_for_date(&items, date);
            println!("Menu for {}", date);
            if served.is_empty() {
                println!("No items available for this date");
                return Ok(());
            }

            let images_dir = app.config().images_dir();
            for item in served {
                println!("{}", MenuCard::from_item(item, &images_dir).render());
            }
            Ok(())
        }
        _ => Err(anyhow!("Unknown menu subcommand")),
    }
}
