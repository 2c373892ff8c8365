//! DFPlayer Mini MP3 module
//!
//! The module takes fixed 10-byte commands over a 9600 8N1 UART:
//!
//! ```text
//! ┌──────┬─────┬─────┬─────┬──────────┬─────────┬─────────┬─────────┬─────────┬─────┐
//! │ 0x7E │ VER │ LEN │ CMD │ FEEDBACK │ PARAM_H │ PARAM_L │ CHECK_H │ CHECK_L │ 0xEF│
//! │      │ 0xFF│ 0x06│     │ 0x00     │         │         │         │         │     │
//! └──────┴─────┴─────┴─────┴──────────┴─────────┴─────────┴─────────┴─────────┴─────┘
//! ```
//!
//! The checksum is the two's complement of the sum of VER through PARAM_L.
//! Feedback is never requested; the driver only writes.

use dumbwaiter_core::announce::ClipId;
use dumbwaiter_core::config::MAX_VOLUME;
use dumbwaiter_core::traits::{AudioError, AudioPlayer};

/// UART speed the module expects
pub const BAUD_RATE: u32 = 9600;

/// Length of every command frame
pub const FRAME_LEN: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const NO_FEEDBACK: u8 = 0x00;
const END: u8 = 0xEF;

const CMD_PLAY_TRACK: u8 = 0x03;
const CMD_SET_VOLUME: u8 = 0x06;
const CMD_RESET: u8 = 0x0C;
const CMD_STOP: u8 = 0x16;

/// Highest track number the module can address in the root folder
const MAX_TRACK: ClipId = 2999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play track N from the card root
    Play(ClipId),
    /// Volume 0..=30
    SetVolume(u8),
    Stop,
    Reset,
}

impl Command {
    /// Validated play command
    pub fn play(clip: ClipId) -> Result<Self, AudioError> {
        if clip == 0 || clip > MAX_TRACK {
            return Err(AudioError::InvalidClip);
        }
        Ok(Command::Play(clip))
    }

    /// Validated volume command
    pub fn volume(volume: u8) -> Result<Self, AudioError> {
        if volume > MAX_VOLUME {
            return Err(AudioError::InvalidVolume);
        }
        Ok(Command::SetVolume(volume))
    }

    fn code_and_param(&self) -> (u8, u16) {
        match *self {
            Command::Play(clip) => (CMD_PLAY_TRACK, clip),
            Command::SetVolume(volume) => (CMD_SET_VOLUME, volume as u16),
            Command::Stop => (CMD_STOP, 0),
            Command::Reset => (CMD_RESET, 0),
        }
    }

    /// Encode as a complete serial frame
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let (code, param) = self.code_and_param();
        let [param_h, param_l] = param.to_be_bytes();

        let mut frame = [
            START,
            VERSION,
            LENGTH,
            code,
            NO_FEEDBACK,
            param_h,
            param_l,
            0,
            0,
            END,
        ];
        let sum = frame[1..7]
            .iter()
            .fold(0u16, |acc, b| acc.wrapping_add(*b as u16));
        let [check_h, check_l] = 0u16.wrapping_sub(sum).to_be_bytes();
        frame[7] = check_h;
        frame[8] = check_l;
        frame
    }
}

/// Blocking DFPlayer driver over any `embedded-io` writer
pub struct DfPlayer<W> {
    uart: W,
}

impl<W: embedded_io::Write> DfPlayer<W> {
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    pub fn send(&mut self, command: Command) -> Result<(), AudioError> {
        self.uart
            .write_all(&command.encode())
            .map_err(|_| AudioError::Io)?;
        self.uart.flush().map_err(|_| AudioError::Io)
    }

    pub fn stop(&mut self) -> Result<(), AudioError> {
        self.send(Command::Stop)
    }

    pub fn reset(&mut self) -> Result<(), AudioError> {
        self.send(Command::Reset)
    }

    pub fn release(self) -> W {
        self.uart
    }
}

impl<W: embedded_io::Write> AudioPlayer for DfPlayer<W> {
    fn play(&mut self, clip: ClipId) -> Result<(), AudioError> {
        self.send(Command::play(clip)?)
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
        self.send(Command::volume(volume)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Capture {
        bytes: heapless::Vec<u8, 64>,
    }

    impl embedded_io::ErrorType for Capture {
        type Error = Infallible;
    }

    impl embedded_io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let room = self.bytes.capacity() - self.bytes.len();
            let n = buf.len().min(room);
            let _ = self.bytes.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_play_frame() {
        // Reference frame from the module datasheet: play track 1
        assert_eq!(
            Command::Play(1).encode(),
            [0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x01, 0xFE, 0xF7, 0xEF]
        );
    }

    #[test]
    fn test_volume_frame() {
        let frame = Command::SetVolume(25).encode();
        assert_eq!(frame[3], 0x06);
        assert_eq!(frame[6], 25);
        let payload: u16 = frame[1..7].iter().map(|b| *b as u16).sum();
        let check = u16::from_be_bytes([frame[7], frame[8]]);
        assert_eq!(payload.wrapping_add(check), 0);
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(Command::play(0), Err(AudioError::InvalidClip));
        assert_eq!(Command::play(3000), Err(AudioError::InvalidClip));
        assert_eq!(Command::volume(31), Err(AudioError::InvalidVolume));
        assert_eq!(Command::volume(30), Ok(Command::SetVolume(30)));
    }

    #[test]
    fn test_player_writes_frames() {
        let mut player = DfPlayer::new(Capture {
            bytes: heapless::Vec::new(),
        });
        player.set_volume(25).unwrap();
        player.play(40).unwrap();
        assert_eq!(player.play(0), Err(AudioError::InvalidClip));

        let uart = player.release();
        assert_eq!(uart.bytes.len(), 2 * FRAME_LEN);
        assert_eq!(&uart.bytes[FRAME_LEN..], &Command::Play(40).encode());
    }
}
