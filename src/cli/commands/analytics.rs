//! Analytics command implementation

use crate::analytics::{heatmap_rows, histogram_rows, summary_rows, trend_rows};
use crate::cli::utils;
use crate::export::component_names;
use crate::utils::render_table;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("analytics")
        .about("Rating statistics across all feedback")
        .arg(super::config_arg())
        .subcommand_required(true)
        .subcommand(Command::new("summary").about("Per-component statistics"))
        .subcommand(Command::new("trends").about("Daily average per component"))
        .subcommand(Command::new("histogram").about("Distribution of ratings"))
        .subcommand(Command::new("heatmap").about("Average rating per dish and component"))
        .subcommand(
            Command::new("report").about("Write every table as CSV to the reports directory"),
        )
}

fn print_rows(rows: Vec<Vec<String>>) {
    let mut rows = rows.into_iter();
    let headers = rows.next().unwrap_or_default();
    let body: Vec<Vec<String>> = rows.collect();
    println!("{}", render_table(&headers, &body));
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(utils::load_config(matches)?)?;
    let analytics = app.analytics();

    if app.database().all_feedback()?.is_empty() {
        println!("No feedback data available for analysis");
        return Ok(());
    }

    match matches.subcommand() {
        Some(("summary", _)) => print_rows(summary_rows(&analytics.component_stats()?)),
        Some(("trends", _)) => {
            let names = component_names(&app.database().all_menu_items()?);
            print_rows(trend_rows(&analytics.daily_trends()?, &names));
        }
        Some(("histogram", _)) => {
            let hist = analytics.histogram()?;
            print_rows(histogram_rows(&hist));
            println!("Total ratings: {}", hist.total());
        }
        Some(("heatmap", _)) => print_rows(heatmap_rows(&analytics.heatmap()?)),
        Some(("report", _)) => {
            let prefix = analytics.save_report(
                &app.config().reports_dir(),
                chrono::Local::now().naive_local(),
            )?;
            println!("Report exported to {}_*.csv", prefix.display());
        }
        _ => return Err(anyhow!("Unknown analytics subcommand")),
    }

    Ok(())
}
