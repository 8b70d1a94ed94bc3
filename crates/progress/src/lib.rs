//! Progress Tracking
//!
//! Route step cursor, maneuver announcements and remaining-distance
//! estimation.

#![warn(missing_docs)]

pub mod tracker;
pub mod announcement;
pub mod estimator;

pub use tracker::{ProgressTracker, TrackerConfig, RegionMatching, DEFAULT_GEOFENCE_RADIUS_M};
pub use announcement::{step_announcement, initial_announcement, ARRIVAL_TEXT};
pub use estimator::ProgressSnapshot;
