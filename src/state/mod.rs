//! State management module
//!
//! This module handles all application state, including:
//! - The parsed sprite manifest (manifest.rs)
//! - Category/subcategory/file selection and thumbnails (selection.rs)
//! - Tint slider values and their readouts (tint.rs)
//! - The controller tying them to the loader and canvas (app.rs)

pub mod app;
pub mod manifest;
pub mod selection;
pub mod tint;

pub use app::{AppState, Effect};
