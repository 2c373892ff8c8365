//! Configuration type definitions
//!
//! These types describe one installed lift. The firmware builds them from the
//! embedded `lift.toml`; every field has a default matching the reference
//! three-stop installation.

use dumbwaiter_protocol::status::{is_standard_id, DEFAULT_STATUS_ID};

use crate::announce::ClipId;
use crate::floor::{Floor, MAX_FLOORS};
use crate::safety::DEFAULT_TRANSIT_TIMEOUT_MS;
use crate::sensor::DEFAULT_SETTLE_MS;

use super::toml::ParseError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest supported countdown (clips)
pub const MAX_COUNTDOWN: u8 = 10;

/// Highest volume the audio module accepts
pub const MAX_VOLUME: u8 = 30;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Floor count outside 2..=MAX_FLOORS
    InvalidFloorCount,
    /// Home floor not inside the shaft
    InvalidHomeFloor,
    /// A timing value is zero or inconsistent
    InvalidTiming,
    /// Countdown length outside 1..=MAX_COUNTDOWN
    InvalidCountdown,
    /// Status identifier does not fit an 11-bit CAN id
    InvalidStatusId,
    /// Volume above MAX_VOLUME
    InvalidVolume,
    /// The configuration text could not be parsed
    Parse(ParseError),
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Timing of the control cycle helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Settle window after each rising sensor edge (ms)
    pub settle_ms: u32,
    /// Idle display blink half-period (ms)
    pub blink_ms: u32,
    /// Maximum time to reach the next floor marker (ms)
    pub transit_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            blink_ms: 800,
            transit_timeout_ms: DEFAULT_TRANSIT_TIMEOUT_MS,
        }
    }
}

/// Clip numbers and hold times of the arrival announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnouncementConfig {
    /// Added to the floor number to get the arrival clip
    pub arrival_clip_offset: ClipId,
    pub arrival_hold_ms: u32,
    pub door_open_clip: ClipId,
    pub door_open_hold_ms: u32,
    pub accessibility_clip: ClipId,
    pub accessibility_hold_ms: u32,
    /// "Door closing in ten seconds"
    pub closing_soon_clip: ClipId,
    pub closing_soon_hold_ms: u32,
    /// Clip of the highest countdown number; the following numbers use
    /// consecutive clip ids
    pub countdown_first_clip: ClipId,
    pub countdown_len: u8,
    pub countdown_step_ms: u32,
    pub door_closing_clip: ClipId,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            arrival_clip_offset: 0,
            arrival_hold_ms: 1800,
            door_open_clip: 10,
            door_open_hold_ms: 1500,
            accessibility_clip: 40,
            accessibility_hold_ms: 2500,
            closing_soon_clip: 11,
            closing_soon_hold_ms: 2000,
            countdown_first_clip: 20,
            countdown_len: MAX_COUNTDOWN,
            countdown_step_ms: 1000,
            door_closing_clip: 30,
        }
    }
}

/// Status broadcast settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Standard (11-bit) CAN identifier of the floor status frame
    pub status_id: u16,
    /// Longest the transmit task waits for a free mailbox (ms)
    pub send_timeout_ms: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            status_id: DEFAULT_STATUS_ID,
            send_timeout_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AudioConfig {
    /// Volume set at boot (0..=30)
    pub volume: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { volume: 25 }
    }
}

/// Relay board polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Relay coils energise on a high output
    pub active_high: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self { active_high: true }
    }
}

/// Complete lift configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiftConfig {
    /// Number of stops, 2..=MAX_FLOORS
    pub floor_count: u8,
    /// Floor the cabin is assumed to rest at on power-up
    pub home_floor: u8,
    pub timing: TimingConfig,
    pub announcements: AnnouncementConfig,
    pub bus: BusConfig,
    pub audio: AudioConfig,
    pub motor: MotorConfig,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            floor_count: 3,
            home_floor: 1,
            timing: TimingConfig::default(),
            announcements: AnnouncementConfig::default(),
            bus: BusConfig::default(),
            audio: AudioConfig::default(),
            motor: MotorConfig::default(),
        }
    }
}

impl LiftConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_FLOORS).contains(&self.floor_count) {
            return Err(ConfigError::InvalidFloorCount);
        }
        self.home()?;

        let timing = &self.timing;
        if timing.settle_ms == 0
            || timing.blink_ms == 0
            || timing.transit_timeout_ms <= timing.settle_ms
        {
            return Err(ConfigError::InvalidTiming);
        }

        if !(1..=MAX_COUNTDOWN).contains(&self.announcements.countdown_len) {
            return Err(ConfigError::InvalidCountdown);
        }
        if !is_standard_id(self.bus.status_id) {
            return Err(ConfigError::InvalidStatusId);
        }
        if self.audio.volume > MAX_VOLUME {
            return Err(ConfigError::InvalidVolume);
        }
        Ok(())
    }

    /// The home floor as a validated [`Floor`]
    pub fn home(&self) -> Result<Floor, ConfigError> {
        Floor::new(self.home_floor, self.floor_count).map_err(|_| ConfigError::InvalidHomeFloor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LiftConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.home().unwrap().number(), 1);
        assert_eq!(config.bus.status_id, 0x100);
    }

    #[test]
    fn test_floor_count_limits() {
        let mut config = LiftConfig::default();
        config.floor_count = 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFloorCount));
        config.floor_count = MAX_FLOORS + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFloorCount));
        config.floor_count = MAX_FLOORS;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_home_floor_must_be_in_shaft() {
        let mut config = LiftConfig::default();
        config.home_floor = 4;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHomeFloor));
        config.home_floor = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHomeFloor));
    }

    #[test]
    fn test_timing_checks() {
        let mut config = LiftConfig::default();
        config.timing.transit_timeout_ms = config.timing.settle_ms;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));

        let mut config = LiftConfig::default();
        config.timing.blink_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));
    }

    #[test]
    fn test_bus_and_audio_checks() {
        let mut config = LiftConfig::default();
        config.bus.status_id = 0x800;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStatusId));

        let mut config = LiftConfig::default();
        config.audio.volume = 31;
        assert_eq!(config.validate(), Err(ConfigError::InvalidVolume));

        let mut config = LiftConfig::default();
        config.announcements.countdown_len = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCountdown));
    }
}
