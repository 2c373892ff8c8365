//! Arrival announcements
//!
//! A stop with the door open plays a fixed, time-paced list of voice clips.
//! [`plan`] builds the list from configuration; [`AnnouncementSequencer`]
//! walks it against the cycle clock without ever blocking.

pub mod plan;
pub mod sequencer;

pub use plan::{build_plan, AnnouncementPlan, AnnouncementStep, ClipId, MAX_STEPS};
pub use sequencer::AnnouncementSequencer;
