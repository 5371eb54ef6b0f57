//! Feedback collection: ratings, the rating form and per-item summaries

use crate::CafeteriaError;
use cafeteria_store::{Feedback, MenuItem, NewFeedback};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A rating from 1 (Very Poor) to 5 (Excellent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    const LABELS: [&'static str; 5] = ["Very Poor", "Poor", "Average", "Good", "Excellent"];

    pub fn new(value: u8) -> Result<Self, CafeteriaError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CafeteriaError::InvalidRating(value.to_string()))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[usize::from(self.0 - 1)]
    }
}

impl FromStr for Rating {
    type Err = CafeteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| CafeteriaError::InvalidRating(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

/// Ratings being collected for one menu item
#[derive(Debug, Clone)]
pub struct FeedbackForm {
    item: MenuItem,
    ratings: BTreeMap<u32, Option<Rating>>,
}

impl FeedbackForm {
    /// Start a form with every component unrated
    pub fn new(item: &MenuItem) -> Self {
        Self {
            item: item.clone(),
            ratings: item.components.iter().map(|c| (c.id, None)).collect(),
        }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    /// Rate one component; rating again replaces the previous value
    pub fn rate(&mut self, component_id: u32, rating: Rating) -> Result<(), CafeteriaError> {
        match self.ratings.get_mut(&component_id) {
            Some(slot) => {
                *slot = Some(rating);
                Ok(())
            }
            None => Err(CafeteriaError::UnknownComponent {
                item_id: self.item.id,
                component_id,
            }),
        }
    }

    pub fn rating(&self, component_id: u32) -> Option<Rating> {
        self.ratings.get(&component_id).copied().flatten()
    }

    /// Names of components still unrated, in menu order
    pub fn unrated(&self) -> Vec<String> {
        self.item
            .components
            .iter()
            .filter(|c| self.rating(c.id).is_none())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Turn the form into a submission once every component is rated
    pub fn submit(&self) -> Result<NewFeedback, CafeteriaError> {
        if self.item.components.is_empty() {
            return Err(CafeteriaError::NoComponents(self.item.id));
        }
        let unrated = self.unrated();
        if !unrated.is_empty() {
            return Err(CafeteriaError::IncompleteFeedback { unrated });
        }

        let ratings = self
            .ratings
            .iter()
            .filter_map(|(id, rating)| rating.map(|r| (*id, r.value())))
            .collect();

        Ok(NewFeedback {
            item_id: self.item.id,
            item_name: self.item.name.clone(),
            ratings,
        })
    }
}

/// Average rating of one component of one item
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentAverage {
    pub component_id: u32,
    pub name: String,
    pub average: f64,
    pub count: usize,
}

/// Feedback summary for one menu item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub item_id: u32,
    pub item_name: String,
    pub feedback_count: usize,
    pub components: Vec<ComponentAverage>,
}

/// Group feedback by item and average each component's ratings
///
/// Items appear in the order their first feedback was recorded. The name
/// comes from that first feedback entry. Feedback for items no longer on
/// the menu is skipped, as are zero ratings and components nobody rated.
pub fn summarize_by_item(feedback: &[Feedback], items: &[MenuItem]) -> Vec<ItemSummary> {
    let mut order: Vec<u32> = Vec::new();
    let mut grouped: BTreeMap<u32, Vec<&Feedback>> = BTreeMap::new();
    for fb in feedback {
        let entries = grouped.entry(fb.item_id).or_default();
        if entries.is_empty() {
            order.push(fb.item_id);
        }
        entries.push(fb);
    }

    let mut summaries = Vec::new();
    for item_id in order {
        let entries = &grouped[&item_id];
        let Some(menu_item) = items.iter().find(|item| item.id == item_id) else {
            continue;
        };

        let item_name = match entries[0].item_name.as_str() {
            "" => format!("Item {item_id}"),
            name => name.to_string(),
        };

        let components = menu_item
            .components
            .iter()
            .filter_map(|component| {
                let ratings: Vec<u8> = entries
                    .iter()
                    .filter_map(|fb| fb.rating(component.id))
                    .filter(|r| *r > 0)
                    .collect();
                if ratings.is_empty() {
                    return None;
                }
                let total: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
                Some(ComponentAverage {
                    component_id: component.id,
                    name: component.name.clone(),
                    average: f64::from(total) / ratings.len() as f64,
                    count: ratings.len(),
                })
            })
            .collect();

        summaries.push(ItemSummary {
            item_id,
            item_name,
            feedback_count: entries.len(),
            components,
        });
    }

    summaries
}
