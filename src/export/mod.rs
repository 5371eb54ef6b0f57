//! Feedback export to CSV and the per-component rating breakdown

use crate::utils::{ensure_directory, file_timestamp};
use crate::CafeteriaError;
use anyhow::Result;
use cafeteria_store::{Database, Feedback, MenuItem};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod csv;

/// Component id to display name across the whole menu
pub fn component_names(items: &[MenuItem]) -> BTreeMap<u32, String> {
    items
        .iter()
        .flat_map(|item| item.components.iter())
        .map(|c| (c.id, c.name.clone()))
        .collect()
}

/// Column header for a component id
pub fn component_label(names: &BTreeMap<u32, String>, component_id: u32) -> String {
    names
        .get(&component_id)
        .cloned()
        .unwrap_or_else(|| format!("Component {component_id}"))
}

/// Writes stored feedback out as CSV
pub struct FeedbackExporter<'a> {
    db: &'a Database,
}

impl<'a> FeedbackExporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Header plus one row per feedback entry
    pub fn rows(&self) -> Result<Vec<Vec<String>>> {
        let feedback = self.db.all_feedback()?;
        if feedback.is_empty() {
            return Err(CafeteriaError::NoFeedback.into());
        }
        let names = component_names(&self.db.all_menu_items()?);
        Ok(build_rows(&feedback, &names))
    }

    pub fn to_csv_string(&self) -> Result<String> {
        Ok(csv::to_string(&self.rows()?))
    }

    /// Export to an explicit path, creating parent directories
    pub fn export_to_file(&self, path: &Path) -> Result<PathBuf> {
        let content = self.to_csv_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_directory(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Feedback data exported to {:?}", path);
        Ok(path.to_path_buf())
    }

    /// Export to `feedback_export_<timestamp>.csv` inside `dir`
    pub fn export_to_dir(&self, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
        let path = dir.join(format!("feedback_export_{}.csv", file_timestamp(now)));
        self.export_to_file(&path)
    }

    /// Totals and averages per component, broken down by item
    pub fn rating_breakdown(&self) -> Result<BTreeMap<u32, ComponentBreakdown>> {
        let feedback = self.db.all_feedback()?;
        let names = component_names(&self.db.all_menu_items()?);
        Ok(breakdown(&feedback, &names))
    }
}

fn build_rows(feedback: &[Feedback], names: &BTreeMap<u32, String>) -> Vec<Vec<String>> {
    let component_ids: BTreeSet<u32> = feedback
        .iter()
        .flat_map(|fb| fb.ratings.keys().copied())
        .collect();

    let mut header = vec![
        "Timestamp".to_string(),
        "Item ID".to_string(),
        "Item Name".to_string(),
    ];
    header.extend(component_ids.iter().map(|id| component_label(names, *id)));

    let mut rows = vec![header];
    for fb in feedback {
        let mut row = vec![
            fb.timestamp
                .format(cafeteria_store::types::TIMESTAMP_FORMAT)
                .to_string(),
            fb.item_id.to_string(),
            fb.item_name.clone(),
        ];
        row.extend(
            component_ids
                .iter()
                .map(|id| fb.rating(*id).map(|r| r.to_string()).unwrap_or_default()),
        );
        rows.push(row);
    }
    rows
}

/// Running totals for one component, or one item within a component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTotals {
    pub name: String,
    pub total_rating: u32,
    pub count: usize,
}

impl RatingTotals {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            f64::from(self.total_rating) / self.count as f64
        }
    }

    fn add(&mut self, rating: u8) {
        self.total_rating += u32::from(rating);
        self.count += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentBreakdown {
    pub totals: RatingTotals,
    /// Item id to totals for this component within that item
    pub items: BTreeMap<u32, RatingTotals>,
}

fn breakdown(
    feedback: &[Feedback],
    names: &BTreeMap<u32, String>,
) -> BTreeMap<u32, ComponentBreakdown> {
    let mut summary: BTreeMap<u32, ComponentBreakdown> = BTreeMap::new();

    for fb in feedback {
        let item_name = if fb.item_name.is_empty() {
            "Unknown Item"
        } else {
            fb.item_name.as_str()
        };

        for (&component_id, &rating) in &fb.ratings {
            let entry = summary.entry(component_id).or_insert_with(|| ComponentBreakdown {
                totals: RatingTotals {
                    name: component_label(names, component_id),
                    ..Default::default()
                },
                items: BTreeMap::new(),
            });
            entry.totals.add(rating);
            entry
                .items
                .entry(fb.item_id)
                .or_insert_with(|| RatingTotals {
                    name: item_name.to_string(),
                    ..Default::default()
                })
                .add(rating);
        }
    }

    summary
}
