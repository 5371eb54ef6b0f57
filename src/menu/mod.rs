//! Menu queries: served dates and per-day dish cards

use cafeteria_store::MenuItem;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Every date any item is served on, ascending and without duplicates
pub fn served_dates(items: &[MenuItem]) -> Vec<NaiveDate> {
    items
        .iter()
        .flat_map(|item| item.dates_served.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Date shown by default: today when it is served, otherwise the first
/// served date, otherwise today
pub fn default_date(dates: &[NaiveDate], today: NaiveDate) -> NaiveDate {
    if dates.contains(&today) {
        today
    } else {
        dates.first().copied().unwrap_or(today)
    }
}

/// Items served on the given date, in menu order
pub fn items_for_date(items: &[MenuItem], date: NaiveDate) -> Vec<&MenuItem> {
    items.iter().filter(|item| item.is_served_on(date)).collect()
}

/// Display data for one dish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCard {
    pub item_id: u32,
    pub name: String,
    /// `Components: a, b, c`, absent when the item has no components
    pub components_line: Option<String>,
    pub image_path: PathBuf,
    pub has_image: bool,
}

impl MenuCard {
    pub fn from_item(item: &MenuItem, images_dir: &Path) -> Self {
        let name = if item.name.trim().is_empty() {
            "Unnamed Item".to_string()
        } else {
            item.name.clone()
        };

        let components_line = (!item.components.is_empty()).then(|| {
            let names: Vec<&str> = item.components.iter().map(|c| c.name.as_str()).collect();
            format!("Components: {}", names.join(", "))
        });

        let image = if item.image.is_empty() {
            "default.jpg"
        } else {
            item.image.as_str()
        };
        let image_path = images_dir.join(image);
        let has_image = image_path.is_file();

        Self {
            item_id: item.id,
            name,
            components_line,
            image_path,
            has_image,
        }
    }

    /// Plain-text rendering used by the CLI
    pub fn render(&self) -> String {
        let mut out = format!("[{}] {}", self.item_id, self.name);
        if let Some(line) = &self.components_line {
            out.push_str("\n    ");
            out.push_str(line);
        }
        out.push_str("\n    Image: ");
        if self.has_image {
            out.push_str(&self.image_path.display().to_string());
        } else {
            out.push_str("No Image");
        }
        out
    }
}
