//! Menu and feedback database backed by two JSON files

use crate::seed::default_menu;
use crate::types::{Feedback, FeedbackDocument, MenuDocument, MenuItem, NewFeedback};
use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed menu and feedback store
#[derive(Debug, Clone)]
pub struct Database {
    menu_file: PathBuf,
    feedback_file: PathBuf,
}

impl Database {
    pub const MENU_FILE: &'static str = "menu.json";
    pub const FEEDBACK_FILE: &'static str = "feedback.json";

    /// Open the database in `data_dir`, seeding any missing files
    pub fn open(data_dir: &Path) -> Result<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)
                .with_context(|| format!("Failed to create data directory {data_dir:?}"))?;
        } else if !data_dir.is_dir() {
            return Err(anyhow!("Data path is not a directory: {:?}", data_dir));
        }

        let db = Self {
            menu_file: data_dir.join(Self::MENU_FILE),
            feedback_file: data_dir.join(Self::FEEDBACK_FILE),
        };
        db.init_files()?;
        Ok(db)
    }

    fn init_files(&self) -> Result<()> {
        if !self.menu_file.exists() {
            info!("Seeding menu file {:?}", self.menu_file);
            write_json(&self.menu_file, &default_menu())?;
        }

        if !self.feedback_file.exists() {
            info!("Creating empty feedback file {:?}", self.feedback_file);
            write_json(&self.feedback_file, &FeedbackDocument::default())?;
        }

        Ok(())
    }

    /// Path of the menu file
    pub fn menu_path(&self) -> &Path {
        &self.menu_file
    }

    /// Path of the feedback file
    pub fn feedback_path(&self) -> &Path {
        &self.feedback_file
    }

    /// All menu items, in file order
    pub fn all_menu_items(&self) -> Result<Vec<MenuItem>> {
        let doc: MenuDocument = read_json(&self.menu_file)?;
        Ok(doc.menu_items)
    }

    /// A single menu item by id
    pub fn menu_item(&self, item_id: u32) -> Result<Option<MenuItem>> {
        Ok(self
            .all_menu_items()?
            .into_iter()
            .find(|item| item.id == item_id))
    }

    /// Record feedback stamped with the current local time
    pub fn add_feedback(&self, submission: NewFeedback) -> Result<Feedback> {
        self.add_feedback_at(submission, Local::now().naive_local())
    }

    /// Record feedback stamped with the given time
    pub fn add_feedback_at(
        &self,
        submission: NewFeedback,
        timestamp: NaiveDateTime,
    ) -> Result<Feedback> {
        let mut doc: FeedbackDocument = read_json(&self.feedback_file)?;
        let entry = Feedback::from_submission(submission, timestamp);
        doc.feedback.push(entry.clone());
        write_json(&self.feedback_file, &doc)?;

        debug!(
            "Stored feedback for item {} ({} ratings)",
            entry.item_id,
            entry.ratings.len()
        );
        Ok(entry)
    }

    /// All feedback, oldest first
    pub fn all_feedback(&self) -> Result<Vec<Feedback>> {
        let doc: FeedbackDocument = read_json(&self.feedback_file)?;
        Ok(doc.feedback)
    }

    /// Feedback recorded for one menu item
    pub fn feedback_for_item(&self, item_id: u32) -> Result<Vec<Feedback>> {
        Ok(self
            .all_feedback()?
            .into_iter()
            .filter(|fb| fb.item_id == item_id)
            .collect())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {path:?}"))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    // Write next to the target and rename so readers never see a partial file
    let tmp = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&tmp, &buf) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to write {tmp:?}"));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to replace {path:?}"));
    }
    Ok(())
}
