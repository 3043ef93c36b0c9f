pub mod anomaly;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod files;
pub mod hours;
pub mod progress;
pub mod rules;
pub mod store;
