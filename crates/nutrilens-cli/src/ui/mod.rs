//! UI primitives for the NutriLens CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, nutrient colors, symbols
//! - **Render**: Headers, receipts, progress bars, tables, hints
//! - **Format**: Number, time and string utilities
//!
//! # Usage
//!
//! ```ignore
//! let ui = ctx.ui_context(args.json, args.format.as_deref());
//! if ui.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//! println!("{}", header(&ui, "status", Some(&date)));
//! println!("{}", progress_line(&ui, Nutrient::Protein, 68.0, 150.0, 45.0));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::{Badge, Nutrient};

pub use render::{
    badge, blank_line, divider, header, header_with_context, hint, kv, print, print_error,
    progress_line, receipt, simple_table, table, Column,
};
