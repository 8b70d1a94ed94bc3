//! Remaining-distance estimation.

use chrono::Utc;
use navigator_core::{ProgressState, Time};
use serde::Serialize;

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: Time,

    /// Whether a route is being followed
    pub active: bool,

    /// Index of the current step
    pub cursor: usize,

    /// Steps in the route
    pub total_steps: usize,

    /// Distance of the current and all following steps
    pub remaining_distance_m: f64,

    /// Instruction of the current step
    pub current_instruction: Option<String>,
}

impl ProgressSnapshot {
    /// Summarize `state` as of now.
    pub fn of(state: &ProgressState) -> Self {
        let remaining = if state.active {
            state
                .steps
                .iter()
                .skip(state.cursor)
                .map(|s| s.distance_m)
                .sum()
        } else {
            0.0
        };

        Self {
            timestamp: Utc::now(),
            active: state.active,
            cursor: state.cursor,
            total_steps: state.steps.len(),
            remaining_distance_m: remaining,
            current_instruction: state.current_step().map(|s| s.instruction.clone()),
        }
    }

    /// Share of steps already passed, 0-100.
    pub fn percent_complete(&self) -> f32 {
        if self.total_steps > 0 {
            (self.cursor as f32 / self.total_steps as f32) * 100.0
        } else {
            0.0
        }
    }
}
