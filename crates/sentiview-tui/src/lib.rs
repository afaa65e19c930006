//! # sentiview-tui
//!
//! Interactive sentiment dashboard using ratatui with Elm architecture.

pub mod donut;
pub mod footer;
pub mod gauge;
pub mod header;
pub mod heatmap;
pub mod input;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod styles;
pub mod tiles;

pub use keymap::{map_key, Focus, KeyAction};
pub use logs::LogScrollState;
pub use messages::AppMessage;
pub use model::DashApp;
