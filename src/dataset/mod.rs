//! Workout session dataset supplied to the analytics pipeline.

pub mod simulated;
pub mod types;

pub use simulated::simulated_watch_download;
pub use types::{DatasetError, Session, SessionDataset};
