//! Motion controller
//!
//! Accepts floor requests while idle, counts crossings while moving and
//! stops the hoist exactly at the destination. All state changes go through
//! [`CabinState::transition`], so the hoist outputs are re-derived on every
//! change.

use crate::floor::{Floor, FloorError, Travel};
use crate::state::{CabinState, Event, MotorOutputs};

/// Result of a floor request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestOutcome {
    /// Travel started toward the requested floor
    Accepted(Travel),
    /// Cabin is already at that floor; nothing happens
    AlreadyThere,
    /// Cabin is not idle; the request is dropped (no queueing)
    Ignored,
}

/// Floor count change produced by a crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FloorUpdate {
    /// Newly counted floor
    pub floor: Floor,
    /// The cabin stopped because this is the destination
    pub arrived: bool,
}

#[derive(Debug, Clone)]
pub struct MotionController {
    state: CabinState,
    current: Floor,
    destination: Option<Floor>,
    floor_count: u8,
}

impl MotionController {
    /// Start idle at `home`, the floor the cabin is assumed to rest at on boot
    pub fn new(home: Floor, floor_count: u8) -> Self {
        Self {
            state: CabinState::Idle,
            current: home,
            destination: None,
            floor_count,
        }
    }

    pub fn state(&self) -> CabinState {
        self.state
    }

    pub fn current_floor(&self) -> Floor {
        self.current
    }

    pub fn destination(&self) -> Option<Floor> {
        self.destination
    }

    pub fn floor_count(&self) -> u8 {
        self.floor_count
    }

    /// Hoist outputs for the current state
    pub fn motor_outputs(&self) -> MotorOutputs {
        self.state.motor_outputs()
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Ask the cabin to go to `target`
    pub fn request_floor(&mut self, target: Floor) -> RequestOutcome {
        if !self.state.accepts_requests() {
            return RequestOutcome::Ignored;
        }

        match self.current.travel_to(target) {
            None => RequestOutcome::AlreadyThere,
            Some(travel) => {
                self.destination = Some(target);
                self.apply(Event::StartTravel(travel));
                RequestOutcome::Accepted(travel)
            }
        }
    }

    /// Count one confirmed crossing
    ///
    /// Returns `Ok(None)` when the cabin is not moving (crossings are only
    /// counted during travel). A crossing that would count past either end
    /// of the shaft faults the cabin and is reported as an error.
    pub fn on_crossing(&mut self) -> Result<Option<FloorUpdate>, FloorError> {
        let Some(travel) = self.state.travel() else {
            return Ok(None);
        };

        let next = match self.current.step(travel, self.floor_count) {
            Ok(floor) => floor,
            Err(e) => {
                self.fault(Event::FloorOutOfRange);
                return Err(e);
            }
        };
        self.current = next;

        let arrived = self.destination == Some(next);
        if arrived {
            self.destination = None;
            self.apply(Event::Arrived);
        }

        Ok(Some(FloorUpdate {
            floor: next,
            arrived,
        }))
    }

    /// Door interlock opened: stop immediately
    ///
    /// The destination is dropped; closing the door does not resume travel.
    pub fn door_opened(&mut self) {
        self.destination = None;
        self.apply(Event::DoorOpened);
    }

    /// Door interlock closed again: back to idle, waiting for a new request
    pub fn door_closed(&mut self) {
        self.apply(Event::DoorClosed);
    }

    /// No crossing arrived in time
    pub fn transit_timeout(&mut self) {
        self.fault(Event::TransitTimeout);
    }

    fn fault(&mut self, event: Event) {
        if self.state.is_moving() {
            self.destination = None;
        }
        self.apply(event);
    }
}
