//! Floor indicator trait

use dumbwaiter_protocol::FrameError;

use crate::presentation::DisplayView;

/// Errors that can occur updating the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Command could not be framed
    Frame(FrameError),
    /// Link write failed
    Io,
}

impl From<FrameError> for PanelError {
    fn from(e: FrameError) -> Self {
        PanelError::Frame(e)
    }
}

/// Anything that can show the cabin position to people at the landings
pub trait FloorIndicator {
    fn show(&mut self, view: DisplayView) -> Result<(), PanelError>;
}
