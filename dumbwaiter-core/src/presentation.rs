//! Floor indicator content
//!
//! Turns cabin state into what the landing indicator should show. The floor
//! digit blinks while the cabin is idle and is steady while moving; an open
//! door or a fault adds a banner. Only changes are reported, so the panel
//! link is not flooded once per control cycle.

use dumbwaiter_protocol::{Banner, PanelCommand};
use heapless::Vec;

use crate::floor::Floor;
use crate::sensor::debouncer::deadline_reached;
use crate::state::{CabinState, FaultKind};

/// Default blink half-period while idle (ms)
pub const DEFAULT_BLINK_MS: u32 = 800;

/// What the indicator should currently show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayView {
    /// Floor digit, possibly in the dark half of the blink
    Floor { number: u8, visible: bool },
    /// Door open banner under the floor digit
    DoorBlocked { number: u8 },
    /// Fault banner under the floor digit
    Fault { number: u8, kind: FaultKind },
}

impl DisplayView {
    /// Panel commands that draw this view
    pub fn to_commands(&self) -> Vec<PanelCommand, 2> {
        let (number, visible, banner) = match *self {
            DisplayView::Floor { number, visible } => (number, visible, Banner::None),
            DisplayView::DoorBlocked { number } => (number, true, Banner::DoorBlocked),
            DisplayView::Fault { number, .. } => (number, true, Banner::Fault),
        };

        let mut commands = Vec::new();
        let _ = commands.push(PanelCommand::Banner(banner));
        let _ = commands.push(PanelCommand::Floor { number, visible });
        commands
    }
}

#[derive(Debug, Clone)]
pub struct Presenter {
    blink_ms: u32,
    visible: bool,
    next_toggle_ms: Option<u32>,
    last: Option<DisplayView>,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_MS)
    }
}

impl Presenter {
    pub fn new(blink_ms: u32) -> Self {
        Self {
            blink_ms,
            visible: true,
            next_toggle_ms: None,
            last: None,
        }
    }

    /// View last reported by [`Presenter::render`]
    pub fn current(&self) -> Option<DisplayView> {
        self.last
    }

    /// Work out the view for this cycle; `Some` only when it changed
    pub fn render(&mut self, state: CabinState, floor: Floor, now_ms: u32) -> Option<DisplayView> {
        let number = floor.number();

        let view = match state {
            CabinState::Idle => {
                self.update_blink(now_ms);
                DisplayView::Floor {
                    number,
                    visible: self.visible,
                }
            }
            CabinState::MovingUp | CabinState::MovingDown => {
                self.stop_blink();
                DisplayView::Floor {
                    number,
                    visible: true,
                }
            }
            CabinState::DoorBlocked => {
                self.stop_blink();
                DisplayView::DoorBlocked { number }
            }
            CabinState::Fault(kind) => {
                self.stop_blink();
                DisplayView::Fault { number, kind }
            }
        };

        if self.last == Some(view) {
            return None;
        }
        self.last = Some(view);
        Some(view)
    }

    fn update_blink(&mut self, now_ms: u32) {
        match self.next_toggle_ms {
            None => {
                self.visible = true;
                self.next_toggle_ms = Some(now_ms.wrapping_add(self.blink_ms));
            }
            Some(deadline) if deadline_reached(now_ms, deadline) => {
                self.visible = !self.visible;
                self.next_toggle_ms = Some(now_ms.wrapping_add(self.blink_ms));
            }
            Some(_) => {}
        }
    }

    fn stop_blink(&mut self) {
        self.visible = true;
        self.next_toggle_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(n: u8) -> Floor {
        Floor::new(n, 3).unwrap()
    }

    #[test]
    fn test_idle_digit_blinks() {
        let mut presenter = Presenter::default();

        assert_eq!(
            presenter.render(CabinState::Idle, floor(1), 0),
            Some(DisplayView::Floor {
                number: 1,
                visible: true
            })
        );
        assert_eq!(presenter.render(CabinState::Idle, floor(1), 400), None);
        assert_eq!(
            presenter.render(CabinState::Idle, floor(1), 800),
            Some(DisplayView::Floor {
                number: 1,
                visible: false
            })
        );
        assert_eq!(
            presenter.render(CabinState::Idle, floor(1), 1600),
            Some(DisplayView::Floor {
                number: 1,
                visible: true
            })
        );
    }

    #[test]
    fn test_moving_digit_is_steady() {
        let mut presenter = Presenter::default();
        presenter.render(CabinState::Idle, floor(1), 0);
        presenter.render(CabinState::Idle, floor(1), 800);

        assert_eq!(
            presenter.render(CabinState::MovingUp, floor(1), 900),
            Some(DisplayView::Floor {
                number: 1,
                visible: true
            })
        );
        assert_eq!(presenter.render(CabinState::MovingUp, floor(1), 5000), None);
        assert_eq!(
            presenter.render(CabinState::MovingUp, floor(2), 5005),
            Some(DisplayView::Floor {
                number: 2,
                visible: true
            })
        );
    }

    #[test]
    fn test_banners() {
        let mut presenter = Presenter::default();
        assert_eq!(
            presenter.render(CabinState::DoorBlocked, floor(2), 0),
            Some(DisplayView::DoorBlocked { number: 2 })
        );

        let fault = CabinState::Fault(FaultKind::TransitTimeout);
        assert_eq!(
            presenter.render(fault, floor(2), 10),
            Some(DisplayView::Fault {
                number: 2,
                kind: FaultKind::TransitTimeout
            })
        );
    }

    #[test]
    fn test_view_to_panel_commands() {
        let commands = DisplayView::DoorBlocked { number: 3 }.to_commands();
        assert_eq!(
            commands.as_slice(),
            &[
                PanelCommand::Banner(Banner::DoorBlocked),
                PanelCommand::Floor {
                    number: 3,
                    visible: true
                },
            ]
        );

        let commands = DisplayView::Floor {
            number: 1,
            visible: false,
        }
        .to_commands();
        assert_eq!(commands[0], PanelCommand::Banner(Banner::None));
    }
}
