//! Application-level utilities for the NutriLens CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and store files

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{missing_store_message, resolve_config_path};
