//! Shared types, error model, and configuration for stepdoc.
//!
//! This crate is the foundation depended on by all other stepdoc crates.
//! It provides:
//! - [`StepdocError`] — the unified error type
//! - Domain types ([`StepId`], [`StepDoc`], [`Overview`], [`Document`], [`NavLink`])
//! - Configuration ([`AppConfig`], [`ResourceLayout`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, ResourceLayout, config_dir, load_config, load_config_from,
    render_config, resolve_config_path,
};
pub use error::{Result, StepdocError};
pub use types::{
    Document, INDEX_FILENAME, NavLink, Overview, StepDoc, StepId, step_output_filename,
};
