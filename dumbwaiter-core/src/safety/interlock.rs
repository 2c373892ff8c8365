//! Door interlock
//!
//! Evaluated first in every control cycle. Also owns the `announced` latch
//! that limits the arrival announcement to one run per door-open interval.

/// Interlock verdict for one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockStatus {
    /// Door closed, motion logic may run
    Clear,
    /// Door closed on this cycle after being open
    JustClosed,
    /// Door open; hoist must be off and motion logic skipped
    Blocked {
        /// First cycle of this open interval: start the announcement
        announce: bool,
    },
}

impl InterlockStatus {
    pub fn is_blocked(&self) -> bool {
        matches!(self, InterlockStatus::Blocked { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DoorInterlock {
    door_open: bool,
    announced: bool,
}

impl DoorInterlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_door_open(&self) -> bool {
        self.door_open
    }

    /// The announcement has been started for the current open interval
    pub fn announced(&self) -> bool {
        self.announced
    }

    /// Evaluate the door/lock switch for this cycle
    pub fn evaluate(&mut self, door_open: bool) -> InterlockStatus {
        let was_open = self.door_open;
        self.door_open = door_open;

        if door_open {
            let announce = !self.announced;
            self.announced = true;
            InterlockStatus::Blocked { announce }
        } else {
            // Falling edge of "open" re-arms the announcement
            self.announced = false;
            if was_open {
                InterlockStatus::JustClosed
            } else {
                InterlockStatus::Clear
            }
        }
    }
}
