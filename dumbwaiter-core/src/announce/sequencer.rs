//! Deadline-paced announcement runner
//!
//! Holds the plan of the current stop, the index of the next step and the
//! time it becomes due. The control cycle polls it every pass; a clip is
//! handed out only once its predecessor's hold time has elapsed.

use super::plan::{AnnouncementPlan, ClipId};
use crate::sensor::debouncer::deadline_reached;

#[derive(Debug, Clone, Default)]
pub struct AnnouncementSequencer {
    plan: AnnouncementPlan,
    next: usize,
    due_ms: u32,
}

impl AnnouncementSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run; the first clip is due immediately
    ///
    /// Replaces any run in progress.
    pub fn start(&mut self, plan: AnnouncementPlan, now_ms: u32) {
        self.plan = plan;
        self.next = 0;
        self.due_ms = now_ms;
    }

    pub fn is_running(&self) -> bool {
        self.next < self.plan.len()
    }

    /// Steps not yet handed out
    pub fn remaining(&self) -> usize {
        self.plan.len().saturating_sub(self.next)
    }

    /// Clip to start playing now, if one is due
    pub fn poll(&mut self, now_ms: u32) -> Option<ClipId> {
        if !self.is_running() || !deadline_reached(now_ms, self.due_ms) {
            return None;
        }

        let step = self.plan[self.next];
        self.next += 1;
        self.due_ms = now_ms.wrapping_add(step.hold_ms);
        Some(step.clip)
    }
}
