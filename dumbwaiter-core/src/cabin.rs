//! The control cycle
//!
//! [`Cabin`] owns every piece of cabin state and runs one control cycle per
//! [`Cabin::step`] call. A cycle reads a snapshot of the inputs and the
//! millisecond clock and returns a [`CycleOutput`] describing what the
//! hardware should do. Nothing in a cycle waits: settle windows, clip holds,
//! blink cadence and the transit watchdog are all deadlines.
//!
//! Cycle order:
//!
//! 1. Door interlock. An open door stops the hoist and skips the rest of
//!    the motion logic for this cycle.
//! 2. Floor request (idle only).
//! 3. Sensor sampling and floor counting (moving only), or the transit
//!    watchdog when no crossing was seen.
//! 4. Announcement pacing and indicator content.

use dumbwaiter_protocol::StatusRecord;
use heapless::Vec;

use crate::announce::{build_plan, AnnouncementSequencer, ClipId};
use crate::broadcast::StatusBroadcaster;
use crate::config::{AnnouncementConfig, ConfigError, LiftConfig};
use crate::floor::{Floor, Travel};
use crate::motion::{MotionController, RequestOutcome};
use crate::presentation::{DisplayView, Presenter};
use crate::safety::{DoorInterlock, InterlockStatus, TransitWatchdog};
use crate::sensor::SensorDebouncer;
use crate::state::{CabinState, FaultKind, MotorOutputs};
use crate::traits::{
    AudioError, AudioPlayer, FloorIndicator, HoistMotor, MotorError, PanelError, StatusBus,
};

/// Most notable events one cycle can produce
pub const MAX_CYCLE_EVENTS: usize = 4;

/// Input snapshot for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    /// Floor whose call button is pressed (last one wins)
    pub pressed: Option<Floor>,
    /// Door/lock switch reports open
    pub door_open: bool,
    /// Proximity target in front of the cabin sensor
    pub sensor_active: bool,
}

/// Pick the requested floor from a button scan
///
/// `buttons[i]` is the button of floor `i + 1`. When several are held the
/// highest-numbered one wins, as a top-to-bottom scan that keeps overwriting
/// the request would.
pub fn last_pressed(buttons: &[bool], floor_count: u8) -> Option<Floor> {
    buttons
        .iter()
        .enumerate()
        .filter(|(_, pressed)| **pressed)
        .filter_map(|(i, _)| u8::try_from(i + 1).ok())
        .filter_map(|n| Floor::new(n, floor_count).ok())
        .last()
}

/// Something worth logging that happened during a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// A request started travel
    TravelStarted { to: Floor, travel: Travel },
    /// A crossing moved the counted floor
    FloorReached { floor: Floor, arrived: bool },
    /// The door opened; hoist stopped
    DoorOpened,
    /// The door closed; cabin idle again
    DoorClosed,
    /// The cabin stopped on a fault
    Fault(FaultKind),
}

/// What the hardware should do after a cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleOutput {
    /// Hoist outputs, applied every cycle
    pub motor: MotorOutputs,
    /// Clip to start playing now
    pub clip: Option<ClipId>,
    /// Status record to broadcast
    pub broadcast: Option<StatusRecord>,
    /// New indicator content
    pub view: Option<DisplayView>,
    pub events: Vec<CycleEvent, MAX_CYCLE_EVENTS>,
}

impl CycleOutput {
    fn push(&mut self, event: CycleEvent) {
        // Capacity covers the busiest cycle: door closed, travel started
        let _ = self.events.push(event);
    }
}

/// Error from applying a cycle's output to hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    Motor(MotorError),
    Audio(AudioError),
    Panel(PanelError),
}

impl From<MotorError> for DispatchError {
    fn from(e: MotorError) -> Self {
        DispatchError::Motor(e)
    }
}

impl From<AudioError> for DispatchError {
    fn from(e: AudioError) -> Self {
        DispatchError::Audio(e)
    }
}

impl From<PanelError> for DispatchError {
    fn from(e: PanelError) -> Self {
        DispatchError::Panel(e)
    }
}

pub struct Cabin {
    announcements: AnnouncementConfig,
    motion: MotionController,
    debouncer: SensorDebouncer,
    interlock: DoorInterlock,
    watchdog: TransitWatchdog,
    sequencer: AnnouncementSequencer,
    broadcaster: StatusBroadcaster,
    presenter: Presenter,
}

impl Cabin {
    /// Build a cabin resting at the configured home floor
    pub fn new(config: &LiftConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let home = config.home()?;

        Ok(Self {
            announcements: config.announcements,
            motion: MotionController::new(home, config.floor_count),
            debouncer: SensorDebouncer::new(config.timing.settle_ms),
            interlock: DoorInterlock::new(),
            watchdog: TransitWatchdog::new(config.timing.transit_timeout_ms),
            sequencer: AnnouncementSequencer::new(),
            broadcaster: StatusBroadcaster::new(config.bus.status_id),
            presenter: Presenter::new(config.timing.blink_ms),
        })
    }

    pub fn state(&self) -> CabinState {
        self.motion.state()
    }

    pub fn current_floor(&self) -> Floor {
        self.motion.current_floor()
    }

    pub fn destination(&self) -> Option<Floor> {
        self.motion.destination()
    }

    pub fn floor_count(&self) -> u8 {
        self.motion.floor_count()
    }

    pub fn is_announcing(&self) -> bool {
        self.sequencer.is_running()
    }

    /// The announcement has already run for the current door opening
    pub fn announced(&self) -> bool {
        self.interlock.announced()
    }

    pub fn broadcaster(&self) -> &StatusBroadcaster {
        &self.broadcaster
    }

    /// Mutable access for accounting sends made outside [`Cabin::dispatch`]
    pub fn broadcaster_mut(&mut self) -> &mut StatusBroadcaster {
        &mut self.broadcaster
    }

    /// Run one control cycle
    pub fn step(&mut self, inputs: &Inputs, now_ms: u32) -> CycleOutput {
        let mut out = CycleOutput::default();

        match self.interlock.evaluate(inputs.door_open) {
            InterlockStatus::Blocked { announce } => {
                self.motion.door_opened();
                self.watchdog.disarm();
                if announce {
                    out.push(CycleEvent::DoorOpened);
                    let plan = build_plan(&self.announcements, self.motion.current_floor());
                    self.sequencer.start(plan, now_ms);
                }
            }
            InterlockStatus::JustClosed => {
                // A running announcement plays on to its last clip
                self.motion.door_closed();
                out.push(CycleEvent::DoorClosed);
                self.run_motion(inputs, now_ms, &mut out);
            }
            InterlockStatus::Clear => self.run_motion(inputs, now_ms, &mut out),
        }

        out.clip = self.sequencer.poll(now_ms);
        out.view = self.presenter.render(
            self.motion.state(),
            self.motion.current_floor(),
            now_ms,
        );
        out.motor = self.motion.motor_outputs();
        out
    }

    fn run_motion(&mut self, inputs: &Inputs, now_ms: u32, out: &mut CycleOutput) {
        if self.motion.state().accepts_requests() {
            if let Some(target) = inputs.pressed {
                if let RequestOutcome::Accepted(travel) = self.motion.request_floor(target) {
                    self.debouncer.reset();
                    self.watchdog.feed(now_ms);
                    out.push(CycleEvent::TravelStarted { to: target, travel });
                }
            }
        }

        if !self.motion.state().is_moving() {
            return;
        }

        if self
            .debouncer
            .sample(inputs.sensor_active, now_ms)
            .is_some()
        {
            match self.motion.on_crossing() {
                Ok(Some(update)) => {
                    out.broadcast = Some(self.broadcaster.announce(update.floor));
                    if update.arrived {
                        self.watchdog.disarm();
                    } else {
                        self.watchdog.feed(now_ms);
                    }
                    out.push(CycleEvent::FloorReached {
                        floor: update.floor,
                        arrived: update.arrived,
                    });
                }
                Ok(None) => {}
                Err(_) => {
                    self.watchdog.disarm();
                    out.push(CycleEvent::Fault(FaultKind::FloorOutOfRange));
                }
            }
        } else if self.watchdog.expired(now_ms) {
            self.motion.transit_timeout();
            out.push(CycleEvent::Fault(FaultKind::TransitTimeout));
        }
    }

    /// Apply a cycle's output through blocking collaborators
    ///
    /// The hoist is driven first. Broadcast failures are only counted. Every
    /// collaborator is driven even if an earlier one failed; the first error
    /// is returned.
    pub fn dispatch<M, A, B, I>(
        &mut self,
        output: &CycleOutput,
        motor: &mut M,
        audio: &mut A,
        bus: &mut B,
        indicator: &mut I,
    ) -> Result<(), DispatchError>
    where
        M: HoistMotor,
        A: AudioPlayer,
        B: StatusBus,
        I: FloorIndicator,
    {
        let motor_result = motor.apply(output.motor).map_err(DispatchError::from);

        if let Some(record) = output.broadcast {
            let _ = self.broadcaster.send(bus, record);
        }

        let audio_result = match output.clip {
            Some(clip) => audio.play(clip).map_err(DispatchError::from),
            None => Ok(()),
        };

        let panel_result = match output.view {
            Some(view) => indicator.show(view).map_err(DispatchError::from),
            None => Ok(()),
        };

        motor_result.and(audio_result).and(panel_result)
    }
}
