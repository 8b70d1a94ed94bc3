//! Progress model - route steps with a current-step cursor.

use serde::{Deserialize, Serialize};
use crate::route::RouteStep;

/// Navigation progress along a route.
///
/// `cursor` indexes into `steps` while `active`. Reaching the end resets
/// the state back to empty and inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Steps in navigation order
    pub steps: Vec<RouteStep>,

    /// Index of the current step
    pub cursor: usize,

    /// Whether navigation is running
    pub active: bool,
}

impl ProgressState {
    /// Fresh state for a newly obtained route.
    pub fn started(steps: Vec<RouteStep>) -> Self {
        Self {
            steps,
            cursor: 0,
            active: true,
        }
    }

    /// Step under the cursor, if navigating.
    pub fn current_step(&self) -> Option<&RouteStep> {
        if self.active {
            self.steps.get(self.cursor)
        } else {
            None
        }
    }

    /// Back to the idle state.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.active = false;
    }
}

/// Outcome of a region-entered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementStatus {
    /// A next maneuver was announced
    InProgress,
    /// The final region was crossed
    Arrived,
    /// Event had no effect
    Ignored,
}

/// Result of feeding one region-entered event to the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementResult {
    /// What happened
    pub status: AnnouncementStatus,

    /// Spoken text, absent when ignored
    pub text: Option<String>,
}

impl AnnouncementResult {
    /// Next maneuver announced.
    pub fn in_progress(text: impl Into<String>) -> Self {
        Self {
            status: AnnouncementStatus::InProgress,
            text: Some(text.into()),
        }
    }

    /// Destination reached.
    pub fn arrived(text: impl Into<String>) -> Self {
        Self {
            status: AnnouncementStatus::Arrived,
            text: Some(text.into()),
        }
    }

    /// Nothing happened.
    pub fn ignored() -> Self {
        Self {
            status: AnnouncementStatus::Ignored,
            text: None,
        }
    }

    /// Whether this result ended navigation.
    pub fn is_arrival(&self) -> bool {
        self.status == AnnouncementStatus::Arrived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    #[test]
    fn test_default_state_is_idle() {
        let state = ProgressState::default();
        assert!(state.steps.is_empty());
        assert_eq!(state.cursor, 0);
        assert!(!state.active);
        assert!(state.current_step().is_none());
    }

    #[test]
    fn test_started_and_reset() {
        let step = RouteStep::new("Turn left", 50.0, Coordinate::new(0.0, 0.0).unwrap());
        let mut state = ProgressState::started(vec![step.clone()]);
        assert_eq!(state.current_step(), Some(&step));

        state.reset();
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn test_result_constructors() {
        assert!(AnnouncementResult::arrived("done").is_arrival());
        assert!(!AnnouncementResult::in_progress("go").is_arrival());
        assert_eq!(AnnouncementResult::ignored().text, None);
    }
}
