//! Shared error model and configuration for Pressroom.
//!
//! This crate is the foundation depended on by all other Pressroom crates.
//! It provides:
//! - [`PressroomError`] — the unified error type
//! - Configuration ([`AppConfig`], [`LayoutConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, LayoutConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{PressroomError, Result};
