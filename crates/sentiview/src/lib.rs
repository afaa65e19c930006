//! Application logic for the SentiView sentiment dashboard.

pub mod app;
pub mod completion;
pub mod config;
pub mod errors;
pub mod presenter;
pub mod version;
