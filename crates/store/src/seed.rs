//! Initial menu written to a fresh data directory

use crate::types::{Component, MenuDocument, MenuItem};
use chrono::NaiveDate;

fn dates(days: &[(i32, u32, u32)]) -> Vec<NaiveDate> {
    days.iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

/// The starter menu
pub fn default_menu() -> MenuDocument {
    MenuDocument {
        menu_items: vec![
            MenuItem {
                id: 1,
                name: "Curry Chawal".to_string(),
                image: "curry_chawal.jpg".to_string(),
                components: vec![
                    Component::new(1, "Curry"),
                    Component::new(2, "Rice"),
                    Component::new(3, "Pakoda"),
                ],
                dates_served: dates(&[(2023, 6, 1), (2023, 6, 8), (2023, 6, 15)]),
            },
            MenuItem {
                id: 2,
                name: "Dal Khichdi".to_string(),
                image: "dal_khichdi.jpg".to_string(),
                components: vec![
                    Component::new(4, "Dal"),
                    Component::new(5, "Rice"),
                    Component::new(6, "Ghee"),
                ],
                dates_served: dates(&[(2023, 6, 2), (2023, 6, 9), (2023, 6, 16)]),
            },
        ],
    }
}
