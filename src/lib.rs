//! Cafeteria Management Library
//!
//! Menu display, per-component feedback, CSV export and rating analytics for
//! a cafeteria, plus the design-token theme of its web front-end.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod export;
pub mod feedback;
pub mod menu;
pub mod theme;
pub mod utils;

pub use analytics::{ComponentStats, FeedbackAnalytics, Heatmap, Histogram, TrendRow};
pub use cafeteria_store::{Component, Database, Feedback, MenuItem, NewFeedback};
pub use cafeteria_theme::{StylesheetManager, ThemeConfig, ValidationReport};
pub use config::AppConfig;
pub use export::FeedbackExporter;
pub use feedback::{FeedbackForm, ItemSummary, Rating};
pub use menu::MenuCard;
pub use theme::{ThemeBuild, ThemeContext};

use anyhow::Result;
use tracing::debug;

/// Main application context that ties configuration to the store and theme
pub struct Cafeteria {
    config: AppConfig,
    database: Database,
}

impl Cafeteria {
    /// Open the store described by the configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let database = Database::open(&config.data_dir())?;
        debug!("Opened data store in {:?}", config.data_dir());
        Ok(Self { config, database })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Theme operations for this configuration
    pub fn theme(&self) -> ThemeContext<'_> {
        ThemeContext::new(&self.config)
    }

    pub fn exporter(&self) -> FeedbackExporter<'_> {
        FeedbackExporter::new(&self.database)
    }

    pub fn analytics(&self) -> FeedbackAnalytics<'_> {
        FeedbackAnalytics::new(&self.database)
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum CafeteriaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Menu item {0} does not exist")]
    UnknownMenuItem(u32),

    #[error("Menu item {item_id} has no component {component_id}")]
    UnknownComponent { item_id: u32, component_id: u32 },

    #[error("Invalid rating '{0}': ratings run from 1 to 5")]
    InvalidRating(String),

    #[error("No components found for menu item {0}")]
    NoComponents(u32),

    #[error("Please rate the following components: {}", .unrated.join(", "))]
    IncompleteFeedback { unrated: Vec<String> },

    #[error("No feedback data to export")]
    NoFeedback,

    #[error("Theme error: {0}")]
    Theme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the main application
pub type CafeteriaResult<T> = Result<T, CafeteriaError>;
