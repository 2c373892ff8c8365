//! Lift configuration loading
//!
//! The configuration is compiled into the firmware from `lift.toml`. There
//! is no runtime storage; edit the file and rebuild to change it.

use defmt::*;

use dumbwaiter_core::config::{parse_config, LiftConfig};

/// Embedded configuration (validated by build.rs)
const EMBEDDED_CONFIG: &str = include_str!("../../lift.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> LiftConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Loaded lift.toml: {} floors, home {}",
                config.floor_count, config.home_floor
            );
            config
        }
        Err(e) => {
            error!("Invalid lift.toml ({:?}), using defaults", e);
            LiftConfig::default()
        }
    }
}
