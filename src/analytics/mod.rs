//! Rating analytics: component statistics, daily trends, distribution and
//! the item-by-component heatmap

use crate::export::{component_label, component_names, csv};
use crate::utils::{ensure_directory, file_timestamp, format_optional};
use anyhow::Result;
use cafeteria_store::{Database, Feedback, MenuItem};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod stats;

/// Summary statistics for one component's ratings
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    pub component_id: u32,
    pub component: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; absent with fewer than two ratings
    pub std_dev: Option<f64>,
    pub min: u8,
    pub max: u8,
}

/// Mean rating per component on one day; `None` where nothing was rated
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub means: BTreeMap<u32, Option<f64>>,
}

/// Count of ratings for each value from 1 to 5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Histogram {
    pub counts: [usize; 5],
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn count(&self, rating: u8) -> usize {
        match rating {
            1..=5 => self.counts[usize::from(rating - 1)],
            _ => 0,
        }
    }
}

/// Mean rating for each (item, component) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heatmap {
    /// Item names, sorted
    pub items: Vec<String>,
    /// Component ids and labels, sorted by id
    pub components: Vec<(u32, String)>,
    /// `cells[item][component]`
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() || self.components.is_empty()
    }
}

fn rated_component_ids(feedback: &[Feedback]) -> BTreeSet<u32> {
    feedback
        .iter()
        .flat_map(|fb| fb.ratings.keys().copied())
        .collect()
}

/// Per-component statistics, ascending by component id
pub fn component_stats(feedback: &[Feedback], items: &[MenuItem]) -> Vec<ComponentStats> {
    let names = component_names(items);
    let mut by_component: BTreeMap<u32, Vec<u8>> = BTreeMap::new();
    for fb in feedback {
        for (&id, &rating) in &fb.ratings {
            by_component.entry(id).or_default().push(rating);
        }
    }

    by_component
        .into_iter()
        .filter(|(_, ratings)| !ratings.is_empty())
        .map(|(id, ratings)| {
            let values: Vec<f64> = ratings.iter().map(|r| f64::from(*r)).collect();
            ComponentStats {
                component_id: id,
                component: component_label(&names, id),
                count: values.len(),
                mean: stats::mean(&values),
                median: stats::median(&values),
                std_dev: stats::sample_std_dev(&values),
                min: ratings.iter().copied().min().unwrap_or_default(),
                max: ratings.iter().copied().max().unwrap_or_default(),
            }
        })
        .collect()
}

/// Daily mean per component
///
/// With more than one distinct day, every day between the first and the
/// last gets a row; days without feedback have all values empty.
pub fn daily_trends(feedback: &[Feedback]) -> Vec<TrendRow> {
    let component_ids = rated_component_ids(feedback);
    let mut by_day: BTreeMap<NaiveDate, BTreeMap<u32, Vec<f64>>> = BTreeMap::new();
    for fb in feedback {
        let day = by_day.entry(fb.date()).or_default();
        for (&id, &rating) in &fb.ratings {
            day.entry(id).or_default().push(f64::from(rating));
        }
    }

    let (Some(first), Some(last)) = (
        by_day.keys().next().copied(),
        by_day.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| {
            let day = by_day.get(&date);
            let means = component_ids
                .iter()
                .map(|id| {
                    let mean = day
                        .and_then(|d| d.get(id))
                        .filter(|values| !values.is_empty())
                        .map(|values| stats::mean(values));
                    (*id, mean)
                })
                .collect();
            TrendRow { date, means }
        })
        .collect()
}

/// Distribution of every rating given; values outside 1..=5 are ignored
pub fn histogram(feedback: &[Feedback]) -> Histogram {
    let mut hist = Histogram::default();
    for rating in feedback.iter().flat_map(|fb| fb.ratings.values()) {
        if (1..=5).contains(rating) {
            hist.counts[usize::from(*rating - 1)] += 1;
        }
    }
    hist
}

/// Mean rating grouped by item name and component
pub fn heatmap(feedback: &[Feedback], items: &[MenuItem]) -> Heatmap {
    let names = component_names(items);
    let component_ids: Vec<u32> = rated_component_ids(feedback).into_iter().collect();

    let mut grouped: BTreeMap<&str, BTreeMap<u32, Vec<f64>>> = BTreeMap::new();
    for fb in feedback {
        let row = grouped.entry(fb.item_name.as_str()).or_default();
        for (&id, &rating) in &fb.ratings {
            row.entry(id).or_default().push(f64::from(rating));
        }
    }

    let cells = grouped
        .values()
        .map(|row| {
            component_ids
                .iter()
                .map(|id| row.get(id).map(|values| stats::mean(values)))
                .collect()
        })
        .collect();

    Heatmap {
        items: grouped.keys().map(|name| name.to_string()).collect(),
        components: component_ids
            .iter()
            .map(|id| (*id, component_label(&names, *id)))
            .collect(),
        cells,
    }
}

/// Analytics over the feedback in a database
pub struct FeedbackAnalytics<'a> {
    db: &'a Database,
}

impl<'a> FeedbackAnalytics<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn load(&self) -> Result<(Vec<Feedback>, Vec<MenuItem>)> {
        let feedback = self.db.all_feedback()?;
        let items = self.db.all_menu_items()?;
        debug!("Loaded {} feedback entries for analysis", feedback.len());
        Ok((feedback, items))
    }

    pub fn component_stats(&self) -> Result<Vec<ComponentStats>> {
        let (feedback, items) = self.load()?;
        Ok(component_stats(&feedback, &items))
    }

    pub fn daily_trends(&self) -> Result<Vec<TrendRow>> {
        Ok(daily_trends(&self.db.all_feedback()?))
    }

    pub fn histogram(&self) -> Result<Histogram> {
        Ok(histogram(&self.db.all_feedback()?))
    }

    pub fn heatmap(&self) -> Result<Heatmap> {
        let (feedback, items) = self.load()?;
        Ok(heatmap(&feedback, &items))
    }

    /// Write report CSVs to `dir` and return the shared file prefix
    ///
    /// Files are `<prefix>_summary.csv`, `_trends.csv`, `_histogram.csv`
    /// and `_heatmap.csv`; a file is skipped when it would have no data.
    pub fn save_report(&self, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
        ensure_directory(dir)?;
        let prefix = dir.join(format!("feedback_report_{}", file_timestamp(now)));
        let (feedback, items) = self.load()?;
        let names = component_names(&items);

        let write = |suffix: &str, rows: Vec<Vec<String>>| -> Result<()> {
            let path = PathBuf::from(format!("{}_{}.csv", prefix.display(), suffix));
            std::fs::write(&path, csv::to_string(&rows))?;
            debug!("Wrote report file {:?}", path);
            Ok(())
        };

        let summary = component_stats(&feedback, &items);
        if !summary.is_empty() {
            write("summary", summary_rows(&summary))?;
        }

        let trends = daily_trends(&feedback);
        if !trends.is_empty() {
            write("trends", trend_rows(&trends, &names))?;
        }

        let hist = histogram(&feedback);
        if hist.total() > 0 {
            write("histogram", histogram_rows(&hist))?;
        }

        let map = heatmap(&feedback, &items);
        if !map.is_empty() {
            write("heatmap", heatmap_rows(&map))?;
        }

        info!("Report exported to {:?}", prefix);
        Ok(prefix)
    }
}

/// Header and rows for the component statistics table
pub fn summary_rows(summary: &[ComponentStats]) -> Vec<Vec<String>> {
    let mut rows = vec![["Component", "Count", "Mean", "Median", "Std Dev", "Min", "Max"]
        .iter()
        .map(|s| s.to_string())
        .collect()];
    for s in summary {
        rows.push(vec![
            s.component.clone(),
            s.count.to_string(),
            format!("{:.2}", s.mean),
            format!("{:.2}", s.median),
            format_optional(s.std_dev),
            s.min.to_string(),
            s.max.to_string(),
        ]);
    }
    rows
}

/// Header and rows for the daily trend table
pub fn trend_rows(trends: &[TrendRow], names: &BTreeMap<u32, String>) -> Vec<Vec<String>> {
    let ids: Vec<u32> = trends
        .first()
        .map(|row| row.means.keys().copied().collect())
        .unwrap_or_default();

    let mut header = vec!["Date".to_string()];
    header.extend(ids.iter().map(|id| component_label(names, *id)));

    let mut rows = vec![header];
    for row in trends {
        let mut line = vec![row.date.to_string()];
        line.extend(
            ids.iter()
                .map(|id| match row.means.get(id).copied().flatten() {
                    Some(mean) => format!("{mean:.2}"),
                    None => String::new(),
                }),
        );
        rows.push(line);
    }
    rows
}

/// Header and rows for the rating distribution
pub fn histogram_rows(hist: &Histogram) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["Rating".to_string(), "Count".to_string()]];
    for rating in 1..=5u8 {
        rows.push(vec![rating.to_string(), hist.count(rating).to_string()]);
    }
    rows
}

/// Header and rows for the heatmap, one row per item
pub fn heatmap_rows(map: &Heatmap) -> Vec<Vec<String>> {
    let mut header = vec!["Item".to_string()];
    header.extend(map.components.iter().map(|(_, name)| name.clone()));

    let mut rows = vec![header];
    for (item, cells) in map.items.iter().zip(&map.cells) {
        let mut line = vec![item.clone()];
        line.extend(cells.iter().map(|cell| match cell {
            Some(mean) => format!("{mean:.2}"),
            None => String::new(),
        }));
        rows.push(line);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafeteria_store::seed::default_menu;

    fn feedback(item_id: u32, name: &str, ratings: &[(u32, u8)], day: u32) -> Feedback {
        Feedback {
            item_id,
            item_name: name.to_string(),
            ratings: ratings.iter().copied().collect(),
            timestamp: NaiveDate::from_ymd_opt(2023, 6, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn sample() -> Vec<Feedback> {
        vec![
            feedback(1, "Curry Chawal", &[(1, 4), (2, 5)], 1),
            feedback(1, "Curry Chawal", &[(1, 2), (2, 3)], 1),
            feedback(2, "Dal Khichdi", &[(4, 5), (5, 1)], 4),
        ]
    }

    #[test]
    fn test_component_stats() {
        let stats = component_stats(&sample(), &default_menu().menu_items);

        assert_eq!(stats.len(), 4);
        let curry = &stats[0];
        assert_eq!(curry.component, "Curry");
        assert_eq!(curry.count, 2);
        assert!((curry.mean - 3.0).abs() < 1e-9);
        assert!((curry.median - 3.0).abs() < 1e-9);
        assert!((curry.std_dev.unwrap() - 2f64.sqrt()).abs() < 1e-9);
        assert_eq!((curry.min, curry.max), (2, 4));

        // single rating has no sample deviation
        assert_eq!(stats[2].component, "Dal");
        assert!(stats[2].std_dev.is_none());
    }

    #[test]
    fn test_daily_trends_fill_gaps() {
        let trends = daily_trends(&sample());

        assert_eq!(trends.len(), 4);
        assert_eq!(trends[0].date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(trends[0].means[&1], Some(3.0));
        assert_eq!(trends[0].means[&4], None);
        assert!(trends[1].means.values().all(Option::is_none));
        assert_eq!(trends[3].means[&5], Some(1.0));
    }

    #[test]
    fn test_daily_trends_single_day() {
        let single = vec![feedback(1, "Curry Chawal", &[(1, 4)], 8)];
        assert_eq!(daily_trends(&single).len(), 1);
        assert!(daily_trends(&[]).is_empty());
    }

    #[test]
    fn test_histogram() {
        let mut entries = sample();
        entries.push(feedback(1, "Curry Chawal", &[(3, 0), (1, 9)], 2));

        let hist = histogram(&entries);
        assert_eq!(hist.counts, [1, 1, 1, 1, 2]);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.count(0), 0);
    }

    #[test]
    fn test_heatmap() {
        let map = heatmap(&sample(), &default_menu().menu_items);

        assert_eq!(map.items, vec!["Curry Chawal", "Dal Khichdi"]);
        let labels: Vec<&str> = map.components.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(labels, vec!["Curry", "Rice", "Dal", "Rice"]);
        assert_eq!(map.cells[0], vec![Some(3.0), Some(4.0), None, None]);
        assert_eq!(map.cells[1], vec![None, None, Some(5.0), Some(1.0)]);
    }

    #[test]
    fn test_report_rows() {
        let stats = component_stats(&sample(), &default_menu().menu_items);
        let rows = summary_rows(&stats);
        assert_eq!(rows[0][4], "Std Dev");
        assert_eq!(rows[3], vec!["Dal", "1", "5.00", "5.00", "-", "5", "5"]);

        let names = component_names(&default_menu().menu_items);
        let trends = trend_rows(&daily_trends(&sample()), &names);
        assert_eq!(trends[0], vec!["Date", "Curry", "Rice", "Dal", "Rice"]);
        assert_eq!(trends[2], vec!["2023-06-02", "", "", "", ""]);
    }
}
