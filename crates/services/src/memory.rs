//! In-process collaborators.
//!
//! Geofence registry, announcer, map surface and location service that keep
//! everything in memory and report through `tracing`. They back the CLI
//! simulator and the tests.

use std::sync::Arc;
use async_trait::async_trait;
use navigator_core::{
    AuthorizationStatus, BoundingBox, Coordinate, EdgePadding, GeofenceRegion, RegionId, Route,
    Time,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{Announcer, GeofenceService, LocationService, MapSurface};

/// Geofence service that only remembers what it was asked to monitor.
#[derive(Default, Clone)]
pub struct InMemoryGeofence {
    regions: Arc<Mutex<Vec<GeofenceRegion>>>,
}

impl InMemoryGeofence {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions currently monitored.
    pub async fn monitored(&self) -> Vec<GeofenceRegion> {
        self.regions.lock().await.clone()
    }

    /// Ids of monitored regions containing `point`.
    pub async fn regions_containing(&self, point: &Coordinate) -> Vec<RegionId> {
        self.regions
            .lock()
            .await
            .iter()
            .filter(|r| r.contains(point))
            .map(|r| r.id)
            .collect()
    }
}

#[async_trait]
impl GeofenceService for InMemoryGeofence {
    async fn monitor(&self, regions: &[GeofenceRegion]) {
        let mut monitored = self.regions.lock().await;
        for region in regions {
            // Re-registering an id replaces the old circle.
            monitored.retain(|r| r.id != region.id);
            monitored.push(*region);
        }
        debug!(count = monitored.len(), "Monitoring regions");
    }

    async fn stop_all(&self) {
        let mut monitored = self.regions.lock().await;
        if !monitored.is_empty() {
            debug!(count = monitored.len(), "Stopped monitoring regions");
        }
        monitored.clear();
    }
}

/// Something that was spoken.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Spoken text
    pub text: String,

    /// When it was queued
    pub spoken_at: Time,
}

/// Announcer that logs each utterance and keeps a transcript.
///
/// The transcript is never trimmed, so it grows for the life of the
/// announcer. Meant for tests and short simulations.
#[derive(Default, Clone)]
pub struct LogAnnouncer {
    transcript: Arc<Mutex<Vec<Utterance>>>,
}

impl LogAnnouncer {
    /// Create an announcer with an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, oldest first.
    pub async fn transcript(&self) -> Vec<Utterance> {
        self.transcript.lock().await.clone()
    }

    /// Spoken texts only.
    pub async fn texts(&self) -> Vec<String> {
        self.transcript
            .lock()
            .await
            .iter()
            .map(|u| u.text.clone())
            .collect()
    }
}

#[async_trait]
impl Announcer for LogAnnouncer {
    async fn speak(&self, text: &str) {
        info!(text, "Announce");
        self.transcript.lock().await.push(Utterance {
            text: text.to_string(),
            spoken_at: chrono::Utc::now(),
        });
    }
}

/// A command received by [`LogMapSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    /// Route overlay drawn
    ShowRoute {
        /// Number of polyline points
        points: usize,
    },
    /// Viewport fitted to a rectangle
    FitViewport {
        /// Target rectangle
        rect: BoundingBox,
        /// Insets
        padding: EdgePadding,
    },
    /// Viewport centered on a point
    SetRegion {
        /// Center
        center: Coordinate,
        /// North-south span in meters
        latitudinal_m: f64,
        /// East-west span in meters
        longitudinal_m: f64,
    },
}

/// Map surface that logs and records every command.
///
/// The command history is unbounded, like [`LogAnnouncer`]'s transcript.
#[derive(Default, Clone)]
pub struct LogMapSurface {
    commands: Arc<Mutex<Vec<MapCommand>>>,
}

impl LogMapSurface {
    /// Create a surface with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received, oldest first.
    pub async fn commands(&self) -> Vec<MapCommand> {
        self.commands.lock().await.clone()
    }
}

#[async_trait]
impl MapSurface for LogMapSurface {
    async fn show_route(&self, route: &Route) {
        debug!(points = route.polyline.len(), steps = route.steps.len(), "Show route");
        self.commands.lock().await.push(MapCommand::ShowRoute {
            points: route.polyline.len(),
        });
    }

    async fn fit_viewport(&self, rect: BoundingBox, padding: EdgePadding) {
        debug!(min = %rect.min, max = %rect.max, "Fit viewport");
        self.commands
            .lock()
            .await
            .push(MapCommand::FitViewport { rect, padding });
    }

    async fn set_region(&self, center: Coordinate, latitudinal_m: f64, longitudinal_m: f64) {
        debug!(%center, latitudinal_m, longitudinal_m, "Set map region");
        self.commands.lock().await.push(MapCommand::SetRegion {
            center,
            latitudinal_m,
            longitudinal_m,
        });
    }
}

#[derive(Default)]
struct LocationInner {
    status: AuthorizationStatus,
    location: Option<Coordinate>,
    grant_on_request: bool,
    requests: usize,
}

/// Location service whose answers are set by the caller.
#[derive(Default, Clone)]
pub struct ScriptedLocation {
    inner: Arc<Mutex<LocationInner>>,
}

impl ScriptedLocation {
    /// Authorized when-in-use, located at `location`.
    pub fn authorized_at(location: Coordinate) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LocationInner {
                status: AuthorizationStatus::AuthorizedWhenInUse,
                location: Some(location),
                grant_on_request: false,
                requests: 0,
            })),
        }
    }

    /// Grant when-in-use authorization as soon as it is requested.
    pub async fn grant_on_request(&self, grant: bool) {
        self.inner.lock().await.grant_on_request = grant;
    }

    /// Change authorization.
    pub async fn set_authorization(&self, status: AuthorizationStatus) {
        self.inner.lock().await.status = status;
    }

    /// Move the device.
    pub async fn set_location(&self, location: Option<Coordinate>) {
        self.inner.lock().await.location = location;
    }

    /// How many times authorization was requested.
    pub async fn authorization_requests(&self) -> usize {
        self.inner.lock().await.requests
    }
}

#[async_trait]
impl LocationService for ScriptedLocation {
    async fn authorization(&self) -> AuthorizationStatus {
        self.inner.lock().await.status
    }

    async fn request_authorization(&self) {
        let mut inner = self.inner.lock().await;
        inner.requests += 1;
        if inner.grant_on_request {
            inner.status = AuthorizationStatus::AuthorizedWhenInUse;
        }
        debug!(status = ?inner.status, "Authorization requested");
    }

    async fn current_location(&self) -> Option<Coordinate> {
        let inner = self.inner.lock().await;
        if inner.status.is_authorized() {
            inner.location
        } else {
            None
        }
    }
}
