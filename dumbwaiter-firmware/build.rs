//! Build script for dumbwaiter-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates lift.toml at compile time

use std::fs;
use std::path::Path;

const MAX_FLOORS: i64 = 8;

fn main() {
    setup_linker();
    validate_config();
}

/// Linker scripts for the binary (memory.x comes from embassy-stm32)
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate lift.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=lift.toml");

    let config_path = Path::new("lift.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lift.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a lift.toml configuration file.             ║\n\
            ║  Please create one in the dumbwaiter-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read lift.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in lift.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_lift(&config, &mut errors);
    validate_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid lift configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=lift.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Floor count and home floor
fn validate_lift(config: &toml::Value, errors: &mut Vec<String>) {
    let floor_count = int(config, "lift", "floor_count").unwrap_or(3);
    let home_floor = int(config, "lift", "home_floor").unwrap_or(1);

    if !(2..=MAX_FLOORS).contains(&floor_count) {
        errors.push(format!("[lift] floor_count must be 2-{}", MAX_FLOORS));
    }
    if home_floor < 1 || home_floor > floor_count {
        errors.push("[lift] home_floor must be between 1 and floor_count".to_string());
    }
}

/// Numeric limits the firmware enforces again at boot
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let settle = int(config, "timing", "settle_ms").unwrap_or(200);
    let timeout = int(config, "timing", "transit_timeout_ms").unwrap_or(15_000);
    if settle <= 0 {
        errors.push("[timing] settle_ms must be positive".to_string());
    }
    if timeout <= settle {
        errors.push("[timing] transit_timeout_ms must exceed settle_ms".to_string());
    }
    if let Some(blink) = int(config, "timing", "blink_ms") {
        if blink <= 0 {
            errors.push("[timing] blink_ms must be positive".to_string());
        }
    }

    if let Some(len) = int(config, "announcements", "countdown_len") {
        if !(1..=10).contains(&len) {
            errors.push("[announcements] countdown_len must be 1-10".to_string());
        }
    }
    if let Some(id) = int(config, "bus", "status_id") {
        if !(0..=0x7FF).contains(&id) {
            errors.push("[bus] status_id must be a standard 11-bit id".to_string());
        }
    }
    if let Some(volume) = int(config, "audio", "volume") {
        if !(0..=30).contains(&volume) {
            errors.push("[audio] volume must be 0-30".to_string());
        }
    }
    if let Some(value) = config.get("motor").and_then(|m| m.get("active_high")) {
        if !value.is_bool() {
            errors.push("[motor] active_high must be true or false".to_string());
        }
    }
}
