//! Commands for the floor indicator panel
//!
//! The panel only knows how to draw a big floor digit and a handful of
//! fixed banners. Blink cadence is decided by the controller: the panel is
//! told whether the digit is currently visible.

use crate::frame::{Frame, FrameError};

// Message type IDs: controller → panel
pub const MSG_CLEAR: u8 = 0x10;
pub const MSG_FLOOR: u8 = 0x11;
pub const MSG_BANNER: u8 = 0x12;
pub const MSG_BRIGHTNESS: u8 = 0x13;

/// Fixed banners the panel can show under the floor digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Banner {
    /// Remove any banner
    None = 0,
    /// Landing door open, cabin locked ("PORTA ABERTA - BLOQUEADO")
    DoorBlocked = 1,
    /// Cabin stopped on a fault, service required
    Fault = 2,
}

impl Banner {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Banner::None),
            1 => Some(Banner::DoorBlocked),
            2 => Some(Banner::Fault),
            _ => None,
        }
    }
}

/// Commands sent to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelCommand {
    /// Blank the whole panel
    Clear,
    /// Draw (or hide) the floor digit
    Floor { number: u8, visible: bool },
    /// Show a banner line
    Banner(Banner),
    /// Backlight level, 0-255
    Brightness(u8),
}

impl PanelCommand {
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match *self {
            PanelCommand::Clear => Ok(Frame::empty(MSG_CLEAR)),
            PanelCommand::Floor { number, visible } => {
                Frame::new(MSG_FLOOR, &[number, visible as u8])
            }
            PanelCommand::Banner(banner) => Frame::new(MSG_BANNER, &[banner as u8]),
            PanelCommand::Brightness(level) => Frame::new(MSG_BRIGHTNESS, &[level]),
        }
    }

    /// Decode a received frame; `None` for unknown or malformed messages
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        match (frame.msg_type, frame.payload.as_slice()) {
            (MSG_CLEAR, []) => Some(PanelCommand::Clear),
            (MSG_FLOOR, [number, visible]) => Some(PanelCommand::Floor {
                number: *number,
                visible: *visible != 0,
            }),
            (MSG_BANNER, [banner]) => Banner::from_u8(*banner).map(PanelCommand::Banner),
            (MSG_BRIGHTNESS, [level]) => Some(PanelCommand::Brightness(*level)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameParser;

    #[test]
    fn test_floor_command_over_the_wire() {
        let cmd = PanelCommand::Floor {
            number: 2,
            visible: false,
        };
        let bytes = cmd.to_frame().unwrap().encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&bytes).unwrap().unwrap();
        assert_eq!(PanelCommand::from_frame(&frame), Some(cmd));
    }

    #[test]
    fn test_unknown_banner_is_rejected() {
        let frame = Frame::new(MSG_BANNER, &[9]).unwrap();
        assert_eq!(PanelCommand::from_frame(&frame), None);
    }

    #[test]
    fn test_wrong_payload_length_is_rejected() {
        let frame = Frame::new(MSG_FLOOR, &[1]).unwrap();
        assert_eq!(PanelCommand::from_frame(&frame), None);
    }
}
