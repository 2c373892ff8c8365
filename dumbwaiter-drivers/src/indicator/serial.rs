//! Indicator panel on a serial link
//!
//! Each view becomes a banner command followed by a floor command, framed
//! with the panel protocol and written in one go.

use dumbwaiter_core::presentation::DisplayView;
use dumbwaiter_core::traits::{FloorIndicator, PanelError};
use dumbwaiter_protocol::PanelCommand;

pub struct SerialPanel<W> {
    uart: W,
}

impl<W: embedded_io::Write> SerialPanel<W> {
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    pub fn send(&mut self, command: PanelCommand) -> Result<(), PanelError> {
        let bytes = command.to_frame()?.encode_to_vec()?;
        self.uart.write_all(&bytes).map_err(|_| PanelError::Io)
    }

    pub fn release(self) -> W {
        self.uart
    }
}

impl<W: embedded_io::Write> FloorIndicator for SerialPanel<W> {
    fn show(&mut self, view: DisplayView) -> Result<(), PanelError> {
        for command in view.to_commands() {
            self.send(command)?;
        }
        self.uart.flush().map_err(|_| PanelError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use dumbwaiter_protocol::{Banner, FrameParser};

    struct Capture {
        bytes: heapless::Vec<u8, 64>,
    }

    impl embedded_io::ErrorType for Capture {
        type Error = Infallible;
    }

    impl embedded_io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let _ = self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_view_is_sent_as_two_frames() {
        let mut panel = SerialPanel::new(Capture {
            bytes: heapless::Vec::new(),
        });
        panel.show(DisplayView::DoorBlocked { number: 2 }).unwrap();
        let uart = panel.release();

        let mut parser = FrameParser::new();
        let mut received: heapless::Vec<PanelCommand, 4> = heapless::Vec::new();
        for byte in uart.bytes.iter() {
            if let Ok(Some(frame)) = parser.feed(*byte) {
                let _ = received.push(PanelCommand::from_frame(&frame).unwrap());
            }
        }

        assert_eq!(
            received.as_slice(),
            &[
                PanelCommand::Banner(Banner::DoorBlocked),
                PanelCommand::Floor {
                    number: 2,
                    visible: true
                },
            ]
        );
    }
}
