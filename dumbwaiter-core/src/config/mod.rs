//! Lift configuration
//!
//! Board-agnostic configuration structures and the reader for the
//! `lift.toml` text the firmware embeds.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
