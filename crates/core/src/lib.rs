//! Navigator core data models.
//!
//! Routes, geofence regions, navigation progress and the events that drive
//! a turn-by-turn session.

#![warn(missing_docs)]

// Identities and errors
mod id;
mod error;

// Geography and routes
mod geo;
mod route;

// Progress and events
mod progress;
mod event;

// Re-exports
pub use id::{RequestId, RegionId};
pub use error::{NavError, Result};
pub use geo::{Coordinate, BoundingBox, EdgePadding};
pub use route::{Route, RouteStep, GeofenceRegion};
pub use progress::{ProgressState, AnnouncementStatus, AnnouncementResult};
pub use event::{NavEvent, AuthorizationStatus};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
