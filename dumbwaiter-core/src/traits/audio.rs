//! Voice announcement player trait

use crate::announce::ClipId;

/// Errors that can occur talking to the audio module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// Serial write failed
    Io,
    /// Clip number not addressable by the module
    InvalidClip,
    /// Volume outside the module's range
    InvalidVolume,
}

/// Plays numbered clips
///
/// `play` starts a clip and returns; pacing between clips is the caller's
/// job.
pub trait AudioPlayer {
    fn play(&mut self, clip: ClipId) -> Result<(), AudioError>;

    fn set_volume(&mut self, volume: u8) -> Result<(), AudioError>;
}
