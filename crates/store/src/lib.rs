//! JSON-file storage for menu items and feedback

pub mod database;
pub mod seed;
pub mod types;

pub use database::Database;
pub use types::{Component, Feedback, MenuItem, NewFeedback};
