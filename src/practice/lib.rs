pub mod api;
pub(crate) mod config;
pub mod credential;
pub mod editor;
pub mod error;
pub mod format;
pub mod language;
pub mod render;
pub mod schema;
pub mod settings;
pub mod workbench;

pub use config::{editor::PLACEHOLDER, problem::LIST_LIMIT};
