// src/commands/mod.rs
//
// Commands module - provides Tauri IPC command handlers organized by feature.

mod dtos;
pub mod heatmap;
pub mod widgets;

pub use dtos::*;
pub use heatmap::*;
pub use widgets::*;
