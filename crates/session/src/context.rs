//! Collaborators a session talks to.

use std::sync::Arc;
use navigator_services::{
    Announcer, GeofenceService, Geocoder, LocationService, MapSurface, RouteProvider,
};

/// The external services a navigation session is wired to.
#[derive(Clone)]
pub struct SessionContext {
    /// Destination lookup
    pub geocoder: Arc<dyn Geocoder>,

    /// Directions backend
    pub routes: Arc<dyn RouteProvider>,

    /// Region monitoring
    pub geofence: Arc<dyn GeofenceService>,

    /// Speech
    pub announcer: Arc<dyn Announcer>,

    /// Map display
    pub map: Arc<dyn MapSurface>,

    /// Device location and authorization
    pub location: Arc<dyn LocationService>,
}

impl SessionContext {
    /// Wire up a context.
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        routes: Arc<dyn RouteProvider>,
        geofence: Arc<dyn GeofenceService>,
        announcer: Arc<dyn Announcer>,
        map: Arc<dyn MapSurface>,
        location: Arc<dyn LocationService>,
    ) -> Self {
        Self {
            geocoder,
            routes,
            geofence,
            announcer,
            map,
            location,
        }
    }

    /// Replace the route provider.
    pub fn with_routes(mut self, routes: Arc<dyn RouteProvider>) -> Self {
        self.routes = routes;
        self
    }
}
