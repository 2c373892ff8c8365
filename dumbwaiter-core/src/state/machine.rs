//! State machine definition
//!
//! Hoist outputs are a function of the current state only.

use super::events::Event;
use crate::floor::Travel;

/// Cabin states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CabinState {
    /// Stopped at a floor, accepting requests
    Idle,
    /// Hoist driving the cabin up
    MovingUp,
    /// Hoist driving the cabin down
    MovingDown,
    /// Door/lock open; hoist forced off
    DoorBlocked,
    /// Stopped on a detected fault; hoist off until the door is cycled
    Fault(FaultKind),
}

/// Types of faults that stop the cabin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Floor sensor did not trigger within the transit timeout
    TransitTimeout,
    /// Floor count left the shaft
    FloorOutOfRange,
}

/// The two hoist outputs
///
/// Only built from a [`CabinState`] (or [`MotorOutputs::OFF`]), so
/// `ascend && descend` cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutputs {
    ascend: bool,
    descend: bool,
}

impl MotorOutputs {
    pub const OFF: Self = Self {
        ascend: false,
        descend: false,
    };

    pub fn ascend(&self) -> bool {
        self.ascend
    }

    pub fn descend(&self) -> bool {
        self.descend
    }

    pub fn is_off(&self) -> bool {
        !self.ascend && !self.descend
    }
}

impl CabinState {
    /// Hoist outputs for this state
    pub fn motor_outputs(&self) -> MotorOutputs {
        match self {
            CabinState::MovingUp => MotorOutputs {
                ascend: true,
                descend: false,
            },
            CabinState::MovingDown => MotorOutputs {
                ascend: false,
                descend: true,
            },
            _ => MotorOutputs::OFF,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, CabinState::MovingUp | CabinState::MovingDown)
    }

    /// Direction of travel while moving
    pub fn travel(&self) -> Option<Travel> {
        match self {
            CabinState::MovingUp => Some(Travel::Up),
            CabinState::MovingDown => Some(Travel::Down),
            _ => None,
        }
    }

    /// Only an idle cabin takes floor requests
    pub fn accepts_requests(&self) -> bool {
        matches!(self, CabinState::Idle)
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, CabinState::Fault(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use CabinState::*;
        use Event::*;

        match (self, event) {
            // The door interlock dominates every state
            (_, DoorOpened) => DoorBlocked,
            (DoorBlocked, DoorClosed) => Idle,

            (Idle, StartTravel(Travel::Up)) => MovingUp,
            (Idle, StartTravel(Travel::Down)) => MovingDown,

            (MovingUp | MovingDown, Arrived) => Idle,
            (MovingUp | MovingDown, TransitTimeout) => Fault(FaultKind::TransitTimeout),
            (MovingUp | MovingDown, FloorOutOfRange) => Fault(FaultKind::FloorOutOfRange),

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [CabinState; 6] = [
        CabinState::Idle,
        CabinState::MovingUp,
        CabinState::MovingDown,
        CabinState::DoorBlocked,
        CabinState::Fault(FaultKind::TransitTimeout),
        CabinState::Fault(FaultKind::FloorOutOfRange),
    ];

    #[test]
    fn test_outputs_never_both_on() {
        for state in ALL_STATES {
            let out = state.motor_outputs();
            assert!(!(out.ascend && out.descend), "{:?}", state);
        }
    }

    #[test]
    fn test_outputs_follow_state() {
        assert!(CabinState::MovingUp.motor_outputs().ascend());
        assert!(CabinState::MovingDown.motor_outputs().descend());
        assert!(CabinState::Idle.motor_outputs().is_off());
        assert!(CabinState::DoorBlocked.motor_outputs().is_off());
        assert!(CabinState::Fault(FaultKind::TransitTimeout)
            .motor_outputs()
            .is_off());
    }

    #[test]
    fn test_door_open_from_any_state() {
        for state in ALL_STATES {
            assert_eq!(state.transition(Event::DoorOpened), CabinState::DoorBlocked);
        }
    }

    #[test]
    fn test_door_close_returns_to_idle_only_from_blocked() {
        assert_eq!(
            CabinState::DoorBlocked.transition(Event::DoorClosed),
            CabinState::Idle
        );
        assert_eq!(
            CabinState::MovingUp.transition(Event::DoorClosed),
            CabinState::MovingUp
        );
    }

    #[test]
    fn test_travel_flow() {
        let moving = CabinState::Idle.transition(Event::StartTravel(Travel::Down));
        assert_eq!(moving, CabinState::MovingDown);
        assert_eq!(moving.travel(), Some(Travel::Down));

        assert_eq!(moving.transition(Event::Arrived), CabinState::Idle);
    }

    #[test]
    fn test_start_ignored_unless_idle() {
        assert_eq!(
            CabinState::MovingUp.transition(Event::StartTravel(Travel::Down)),
            CabinState::MovingUp
        );
        assert_eq!(
            CabinState::DoorBlocked.transition(Event::StartTravel(Travel::Up)),
            CabinState::DoorBlocked
        );
        let fault = CabinState::Fault(FaultKind::TransitTimeout);
        assert_eq!(fault.transition(Event::StartTravel(Travel::Up)), fault);
    }

    #[test]
    fn test_faults_only_while_moving() {
        assert_eq!(
            CabinState::MovingUp.transition(Event::TransitTimeout),
            CabinState::Fault(FaultKind::TransitTimeout)
        );
        assert_eq!(
            CabinState::MovingDown.transition(Event::FloorOutOfRange),
            CabinState::Fault(FaultKind::FloorOutOfRange)
        );
        assert_eq!(
            CabinState::Idle.transition(Event::TransitTimeout),
            CabinState::Idle
        );
    }

    #[test]
    fn test_fault_cleared_by_door_cycle() {
        let fault = CabinState::Fault(FaultKind::TransitTimeout);
        let blocked = fault.transition(Event::DoorOpened);
        assert_eq!(blocked.transition(Event::DoorClosed), CabinState::Idle);
    }
}
