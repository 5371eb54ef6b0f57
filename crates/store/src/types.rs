//! Menu and feedback record types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format used for feedback timestamps on disk
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A rateable part of a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: u32,
    pub name: String,
}

impl Component {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Menu item identifier
    pub id: u32,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Image file name, relative to the images directory
    #[serde(default)]
    pub image: String,

    /// Components that can be rated individually
    #[serde(default)]
    pub components: Vec<Component>,

    /// Days on which the dish is served
    #[serde(default)]
    pub dates_served: Vec<NaiveDate>,
}

impl MenuItem {
    /// Look up a component of this item by id
    pub fn component(&self, component_id: u32) -> Option<&Component> {
        self.components.iter().find(|c| c.id == component_id)
    }

    /// Whether the dish is served on the given day
    pub fn is_served_on(&self, date: NaiveDate) -> bool {
        self.dates_served.contains(&date)
    }
}

/// Feedback as submitted, before the store stamps it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub item_id: u32,
    pub item_name: String,
    pub ratings: BTreeMap<u32, u8>,
}

/// A stored feedback entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Rated menu item
    pub item_id: u32,

    /// Item name at the time of rating
    #[serde(default)]
    pub item_name: String,

    /// Component id to rating
    #[serde(default)]
    pub ratings: BTreeMap<u32, u8>,

    /// When the feedback was recorded
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl Feedback {
    /// Stamp a submission with the given time
    pub fn from_submission(submission: NewFeedback, timestamp: NaiveDateTime) -> Self {
        Self {
            item_id: submission.item_id,
            item_name: submission.item_name,
            ratings: submission.ratings,
            timestamp,
        }
    }

    /// Rating for a component, if one was given
    pub fn rating(&self, component_id: u32) -> Option<u8> {
        self.ratings.get(&component_id).copied()
    }

    /// Day the feedback was recorded
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// On-disk layout of `menu.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
}

/// On-disk layout of `feedback.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackDocument {
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_json_shape() {
        let json = r#"{
            "item_id": 1,
            "item_name": "Curry Chawal",
            "ratings": {"1": 4, "2": 5},
            "timestamp": "2023-06-01 12:30:00"
        }"#;

        let feedback: Feedback = serde_json::from_str(json).unwrap();
        assert_eq!(feedback.item_id, 1);
        assert_eq!(feedback.rating(2), Some(5));
        assert_eq!(feedback.rating(3), None);
        assert_eq!(
            feedback.date(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
        );

        let value = serde_json::to_value(&feedback).unwrap();
        assert_eq!(value["timestamp"], "2023-06-01 12:30:00");
        assert_eq!(value["ratings"]["1"], 4);
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let json = r#"{"item_id": 1, "ratings": {}, "timestamp": "yesterday"}"#;
        assert!(serde_json::from_str::<Feedback>(json).is_err());
    }

    #[test]
    fn test_menu_item_lookup() {
        let item = MenuItem {
            id: 1,
            name: "Dal Khichdi".to_string(),
            image: String::new(),
            components: vec![Component::new(4, "Dal"), Component::new(5, "Rice")],
            dates_served: vec![NaiveDate::from_ymd_opt(2023, 6, 2).unwrap()],
        };

        assert_eq!(item.component(5).map(|c| c.name.as_str()), Some("Rice"));
        assert!(item.component(9).is_none());
        assert!(item.is_served_on(NaiveDate::from_ymd_opt(2023, 6, 2).unwrap()));
        assert!(!item.is_served_on(NaiveDate::from_ymd_opt(2023, 6, 3).unwrap()));
    }
}
