//! Event model - messages on the navigation event queue.

use serde::{Deserialize, Serialize};
use crate::error::NavError;
use crate::geo::Coordinate;
use crate::id::{RegionId, RequestId};
use crate::route::Route;

/// Location authorization as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    /// User has not been asked yet
    #[default]
    NotDetermined,
    /// Blocked by policy
    Restricted,
    /// User refused
    Denied,
    /// Granted in background and foreground
    AuthorizedAlways,
    /// Granted while the app is in use
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    /// Whether location may be read.
    pub fn is_authorized(self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse
        )
    }
}

/// Something that happened, delivered on the single event queue.
#[derive(Debug, Clone)]
pub enum NavEvent {
    /// User entered a destination and asked for directions
    DestinationSubmitted(String),

    /// A destination lookup finished
    RouteResolved {
        /// Lookup the result belongs to
        request: RequestId,
        /// Route or the failure that ended the lookup
        result: Result<Route, NavError>,
    },

    /// Start/stop navigation toggle
    StartStopPressed,

    /// Device crossed into a monitored region
    RegionEntered(RegionId),

    /// New device location
    LocationUpdated(Coordinate),

    /// Authorization changed
    AuthorizationChanged(AuthorizationStatus),

    /// Stop consuming events
    Shutdown,
}

impl NavEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NavEvent::DestinationSubmitted(_) => "destination_submitted",
            NavEvent::RouteResolved { .. } => "route_resolved",
            NavEvent::StartStopPressed => "start_stop_pressed",
            NavEvent::RegionEntered(_) => "region_entered",
            NavEvent::LocationUpdated(_) => "location_updated",
            NavEvent::AuthorizationChanged(_) => "authorization_changed",
            NavEvent::Shutdown => "shutdown",
        }
    }
}
