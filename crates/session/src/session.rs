//! Navigation session - the single consumer of the event queue.

use std::sync::Arc;
use navigator_core::{
    AnnouncementStatus, AuthorizationStatus, Coordinate, NavError, NavEvent, RegionId, RequestId,
    Result, Route,
};
use navigator_progress::{ProgressSnapshot, ProgressTracker};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::context::SessionContext;

/// Text shown before any destination is entered.
pub const PROMPT_TEXT: &str = "Where do you want to go?";

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep consuming events
    Continue,
    /// Stop the loop
    Shutdown,
}

/// Drives destination lookup, the map, and turn-by-turn progress from
/// events delivered on one queue.
///
/// Lookups run on spawned tasks and report back through the same queue as
/// [`NavEvent::RouteResolved`], so handling an event never waits on the
/// network.
pub struct NavigationSession {
    ctx: SessionContext,
    config: SessionConfig,
    tracker: ProgressTracker,
    events: mpsc::WeakSender<NavEvent>,
    pending: Option<RequestId>,
    route: Option<Route>,
    show_map_route: bool,
    navigation_started: bool,
    status_text: String,
    last_error: Option<NavError>,
}

impl NavigationSession {
    /// Create a session together with both ends of its event queue.
    ///
    /// The session only keeps a weak handle to the queue, so the receiver
    /// closes once the returned sender, its clones, and any in-flight
    /// lookups are gone.
    pub fn new(
        ctx: SessionContext,
        config: SessionConfig,
    ) -> (Self, mpsc::Sender<NavEvent>, mpsc::Receiver<NavEvent>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let tracker = ProgressTracker::new(Arc::clone(&ctx.geofence), Arc::clone(&ctx.announcer))
            .with_config(config.tracker.clone());

        let session = Self {
            ctx,
            config,
            tracker,
            events: tx.downgrade(),
            pending: None,
            route: None,
            show_map_route: false,
            navigation_started: false,
            status_text: PROMPT_TEXT.to_string(),
            last_error: None,
        };
        (session, tx, rx)
    }

    /// Consume events until shutdown or until every sender is gone.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<NavEvent>) {
        info!("Navigation session running");
        while let Some(event) = rx.recv().await {
            if self.handle(event).await == Flow::Shutdown {
                break;
            }
        }
        self.shutdown().await;
        info!("Navigation session ended");
    }

    /// Handle one event.
    ///
    /// Failures are logged and shown in [`status_text`](Self::status_text);
    /// they never escape.
    pub async fn handle(&mut self, event: NavEvent) -> Flow {
        debug!(kind = event.kind(), "Handling event");

        let outcome = match event {
            NavEvent::DestinationSubmitted(text) => self.submit_destination(&text).await,
            NavEvent::RouteResolved { request, result } => {
                self.apply_route(request, result).await
            }
            NavEvent::StartStopPressed => {
                self.toggle_navigation().await;
                Ok(())
            }
            NavEvent::RegionEntered(id) => {
                self.region_entered(id).await;
                Ok(())
            }
            NavEvent::LocationUpdated(location) => {
                self.location_updated(location).await;
                Ok(())
            }
            NavEvent::AuthorizationChanged(status) => self.authorization_changed(status).await,
            NavEvent::Shutdown => {
                self.shutdown().await;
                return Flow::Shutdown;
            }
        };

        if let Err(err) = outcome {
            warn!(error = %err, "Navigation operation failed");
            self.status_text = err.to_string();
            self.last_error = Some(err);
        }
        Flow::Continue
    }

    async fn submit_destination(&mut self, text: &str) -> Result<()> {
        let query = text.trim().to_string();
        if query.is_empty() {
            debug!("Empty destination, ignoring");
            return Ok(());
        }

        if !self.ctx.location.authorization().await.is_authorized() {
            return Err(NavError::PermissionDenied);
        }
        let origin = self
            .ctx
            .location
            .current_location()
            .await
            .ok_or_else(|| NavError::RouteFailure("current location unknown".to_string()))?;

        let events = self
            .events
            .upgrade()
            .ok_or_else(|| NavError::RouteFailure("event queue closed".to_string()))?;

        self.show_map_route = true;
        self.last_error = None;

        let request = RequestId::new();
        self.pending = Some(request);
        info!(%request, destination = %query, "Requesting directions");

        let geocoder = Arc::clone(&self.ctx.geocoder);
        let routes = Arc::clone(&self.ctx.routes);
        tokio::spawn(async move {
            let result = match geocoder.geocode(&query).await {
                Ok(destination) => routes.request_route(origin, destination).await,
                Err(err) => Err(err),
            };
            if events
                .send(NavEvent::RouteResolved { request, result })
                .await
                .is_err()
            {
                debug!(%request, "Session gone before route resolved");
            }
        });
        Ok(())
    }

    async fn apply_route(&mut self, request: RequestId, result: Result<Route>) -> Result<()> {
        if self.pending != Some(request) {
            warn!(%request, "Discarding result of a superseded request");
            return Ok(());
        }
        self.pending = None;

        let route = result?;
        info!(
            steps = route.steps.len(),
            distance_m = route.total_distance_m(),
            "Route received"
        );

        // An empty route is rejected before the map or the kept route change.
        let announcement = self.tracker.start(route.steps.clone()).await?;

        self.ctx.map.show_route(&route).await;
        if let Some(rect) = route.bounding_box() {
            self.ctx.map.fit_viewport(rect, self.config.viewport_padding).await;
        }

        self.route = Some(route);
        self.show(announcement);
        Ok(())
    }

    async fn toggle_navigation(&mut self) {
        if !self.navigation_started {
            self.show_map_route = true;
            if let Some(center) = self.ctx.location.current_location().await {
                self.center_on(center).await;
            }
        } else {
            if let Some(rect) = self.route.as_ref().and_then(Route::bounding_box) {
                self.ctx.map.fit_viewport(rect, self.config.viewport_padding).await;
            }
            self.tracker.stop().await;
            if let Some(request) = self.pending.take() {
                debug!(%request, "Dropping pending request");
            }
        }

        self.navigation_started = !self.navigation_started;
        info!(started = self.navigation_started, "Navigation toggled");
    }

    async fn region_entered(&mut self, id: RegionId) {
        let result = self.tracker.on_region_entered(id).await;
        if let Some(text) = result.text {
            self.show(text);
        }
        if result.status == AnnouncementStatus::Arrived {
            self.navigation_started = false;
        }
    }

    async fn location_updated(&mut self, location: Coordinate) {
        if !self.show_map_route {
            self.center_on(location).await;
        }
    }

    async fn authorization_changed(&mut self, status: AuthorizationStatus) -> Result<()> {
        debug!(?status, "Authorization changed");
        match status {
            AuthorizationStatus::NotDetermined => {
                self.ctx.location.request_authorization().await;
                Ok(())
            }
            AuthorizationStatus::Restricted | AuthorizationStatus::Denied => {
                Err(NavError::PermissionDenied)
            }
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse => {
                if let Some(center) = self.ctx.location.current_location().await {
                    self.center_on(center).await;
                }
                Ok(())
            }
        }
    }

    /// Stop tracking and deregister every geofence. Idempotent.
    pub async fn shutdown(&mut self) {
        self.tracker.stop().await;
        self.navigation_started = false;
        if let Some(request) = self.pending.take() {
            debug!(%request, "Dropping pending request on shutdown");
        }
    }

    fn show(&mut self, text: String) {
        self.status_text = text;
        self.last_error = None;
    }

    async fn center_on(&self, center: Coordinate) {
        let span = self.config.follow_span_m;
        self.ctx.map.set_region(center, span, span).await;
    }

    /// Last message shown to the user.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Most recent failure, cleared once a later message replaces it.
    pub fn last_error(&self) -> Option<&NavError> {
        self.last_error.as_ref()
    }

    /// Whether the start/stop toggle is in the started position.
    pub fn is_navigating(&self) -> bool {
        self.navigation_started
    }

    /// Lookup whose result is awaited.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    /// Most recently received route.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Progress tracker.
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Progress summary.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.tracker.snapshot()
    }
}
