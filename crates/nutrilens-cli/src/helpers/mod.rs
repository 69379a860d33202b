//! Shared helpers for command handlers.

mod parsing;

pub use parsing::{parse_date_key, parse_datetime, parse_label, parse_timezone};
