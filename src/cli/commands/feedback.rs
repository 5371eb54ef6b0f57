//! Feedback command implementation

use crate::cli::utils;
use crate::export::{component_label, component_names};
use crate::feedback::summarize_by_item;
use crate::utils::render_table;
use crate::{CafeteriaError, FeedbackForm, Rating};
use anyhow::{anyhow, Result};
use cafeteria_store::types::TIMESTAMP_FORMAT;
use clap::{value_parser, ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("feedback")
        .about("Submit and review dish feedback")
        .arg(super::config_arg())
        .subcommand_required(true)
        .subcommand(
            Command::new("submit")
                .about("Rate every component of a dish")
                .arg(
                    clap::Arg::new("item")
                        .short('i')
                        .long("item")
                        .help("Menu item id")
                        .value_name("ID")
                        .value_parser(value_parser!(u32))
                        .required(true),
                )
                .arg(
                    clap::Arg::new("rating")
                        .short('r')
                        .long("rating")
                        .help("Component rating as COMPONENT_ID=RATING (1-5); repeat per component")
                        .value_name("CID=R")
                        .action(clap::ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("list").about("List stored feedback").arg(
                clap::Arg::new("item")
                    .short('i')
                    .long("item")
                    .help("Only show feedback for this menu item")
                    .value_name("ID")
                    .value_parser(value_parser!(u32)),
            ),
        )
        .subcommand(Command::new("summary").about("Average component ratings per dish"))
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(utils::load_config(matches)?)?;

    match matches.subcommand() {
        Some(("submit", sub_matches)) => submit(&app, sub_matches),
        Some(("list", sub_matches)) => list(&app, sub_matches),
        Some(("summary", _)) => summary(&app),
        _ => Err(anyhow!("Unknown feedback subcommand")),
    }
}

/// Split `CID=R` into a component id and rating
pub fn parse_rating_arg(arg: &str) -> Result<(u32, Rating)> {
    let (id, rating) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected COMPONENT_ID=RATING, got '{}'", arg))?;
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid component id in '{}'", arg))?;
    Ok((id, rating.parse()?))
}

fn submit(app: &crate::Cafeteria, matches: &ArgMatches) -> Result<()> {
    let item_id = *matches
        .get_one::<u32>("item")
        .ok_or_else(|| anyhow!("Missing menu item id"))?;
    let item = app
        .database()
        .menu_item(item_id)?
        .ok_or(CafeteriaError::UnknownMenuItem(item_id))?;

    let mut form = FeedbackForm::new(&item);
    for raw in matches
        .get_many::<String>("rating")
        .into_iter()
        .flatten()
    {
        let (component_id, rating) = parse_rating_arg(raw)?;
        form.rate(component_id, rating)?;
    }

    let saved = app.database().add_feedback(form.submit()?)?;
    info!("Stored feedback for item {}", saved.item_id);

    println!("Feedback submitted successfully!");
    for component in &item.components {
        if let Some(rating) = form.rating(component.id) {
            println!("  {}: {}", component.name, rating);
        }
    }
    Ok(())
}

fn list(app: &crate::Cafeteria, matches: &ArgMatches) -> Result<()> {
    let feedback = match matches.get_one::<u32>("item") {
        Some(item_id) => app.database().feedback_for_item(*item_id)?,
        None => app.database().all_feedback()?,
    };
    if feedback.is_empty() {
        println!("No feedback found");
        return Ok(());
    }

    let names = component_names(&app.database().all_menu_items()?);
    let headers = vec![
        "Timestamp".to_string(),
        "Item".to_string(),
        "Ratings".to_string(),
    ];
    let rows: Vec<Vec<String>> = feedback
        .iter()
        .map(|fb| {
            let ratings: Vec<String> = fb
                .ratings
                .iter()
                .map(|(id, rating)| format!("{}={}", component_label(&names, *id), rating))
                .collect();
            vec![
                fb.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                format!("[{}] {}", fb.item_id, fb.item_name),
                ratings.join(", "),
            ]
        })
        .collect();

    println!("{}", render_table(&headers, &rows));
    Ok(())
}

fn summary(app: &crate::Cafeteria) -> Result<()> {
    let feedback = app.database().all_feedback()?;
    let summaries = summarize_by_item(&feedback, &app.database().all_menu_items()?);
    if summaries.is_empty() {
        println!("No feedback found");
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{} ({} feedback entries)",
            summary.item_name, summary.feedback_count
        );
        for component in &summary.components {
            println!(
                "  {}: {:.2} from {} rating(s)",
                component.name, component.average, component.count
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_arg() {
        let (id, rating) = parse_rating_arg("3=4").unwrap();
        assert_eq!(id, 3);
        assert_eq!(rating.value(), 4);

        assert!(parse_rating_arg("3").is_err());
        assert!(parse_rating_arg("x=4").is_err());
        assert!(parse_rating_arg("3=6").is_err());
    }

    #[test]
    fn test_submit_requires_item() {
        let result = command().try_get_matches_from(["feedback", "submit", "-r", "1=4"]);
        assert!(result.is_err());
    }
}
