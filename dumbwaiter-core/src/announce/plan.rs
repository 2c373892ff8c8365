//! Announcement step lists

use heapless::Vec;

use crate::config::AnnouncementConfig;
use crate::floor::Floor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Audio clip number as stored on the player's SD card
pub type ClipId = u16;

/// Fixed steps around the countdown: arrival, door open, accessibility,
/// closing soon and door closing
const FIXED_STEPS: usize = 5;

/// Capacity of a plan
pub const MAX_STEPS: usize = 16;

/// One clip and the minimum time before the next one starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnouncementStep {
    pub clip: ClipId,
    pub hold_ms: u32,
}

impl AnnouncementStep {
    pub const fn new(clip: ClipId, hold_ms: u32) -> Self {
        Self { clip, hold_ms }
    }
}

pub type AnnouncementPlan = Vec<AnnouncementStep, MAX_STEPS>;

/// Build the announcement for a stop at `floor`
///
/// Order: arrival, door open, accessibility notice, "closing in ten
/// seconds", the countdown, then "door closing" with no hold. A countdown
/// longer than the plan has room for is truncated.
pub fn build_plan(config: &AnnouncementConfig, floor: Floor) -> AnnouncementPlan {
    let mut plan = AnnouncementPlan::new();
    let countdown = (config.countdown_len as usize).min(MAX_STEPS - FIXED_STEPS);

    let head = [
        AnnouncementStep::new(
            config
                .arrival_clip_offset
                .saturating_add(floor.number() as ClipId),
            config.arrival_hold_ms,
        ),
        AnnouncementStep::new(config.door_open_clip, config.door_open_hold_ms),
        AnnouncementStep::new(config.accessibility_clip, config.accessibility_hold_ms),
        AnnouncementStep::new(config.closing_soon_clip, config.closing_soon_hold_ms),
    ];
    let countdown_steps = (0..countdown).map(|i| {
        AnnouncementStep::new(
            config.countdown_first_clip.saturating_add(i as ClipId),
            config.countdown_step_ms,
        )
    });
    let tail = AnnouncementStep::new(config.door_closing_clip, 0);

    // Capacity is guaranteed by the countdown clamp above
    for step in head.into_iter().chain(countdown_steps).chain([tail]) {
        let _ = plan.push(step);
    }
    plan
}
