//! Collaborator trait abstractions.

use async_trait::async_trait;
use navigator_core::{
    AuthorizationStatus, BoundingBox, Coordinate, EdgePadding, GeofenceRegion, Route,
};

/// Error type for loading service backends.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while setting up a service backend.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture content is unusable
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),
}

/// Resolves free-form destination text to a location.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `query`.
    ///
    /// Fails with `NavError::GeocodeFailure` when nothing matches.
    async fn geocode(&self, query: &str) -> navigator_core::Result<Coordinate>;
}

/// Computes driving routes.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Route from `origin` to `destination`.
    ///
    /// Fails with `NavError::RouteFailure`. There is no retry.
    async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> navigator_core::Result<Route>;
}

/// Monitors circular regions and reports entries.
///
/// Entry events are delivered separately, as `NavEvent::RegionEntered` on
/// the session queue. Duplicate suppression is the service's job.
#[async_trait]
pub trait GeofenceService: Send + Sync {
    /// Start monitoring `regions` in addition to any already monitored.
    async fn monitor(&self, regions: &[GeofenceRegion]);

    /// Stop monitoring every region.
    async fn stop_all(&self);
}

/// Speaks text. Fire-and-forget.
#[async_trait]
pub trait Announcer: Send + Sync {
    /// Queue `text` for speech.
    async fn speak(&self, text: &str);
}

/// Map display surface.
#[async_trait]
pub trait MapSurface: Send + Sync {
    /// Draw the route polyline.
    async fn show_route(&self, route: &Route);

    /// Fit `rect` into the viewport with `padding`.
    async fn fit_viewport(&self, rect: BoundingBox, padding: EdgePadding);

    /// Center on `center`, spanning the given meters.
    async fn set_region(&self, center: Coordinate, latitudinal_m: f64, longitudinal_m: f64);
}

/// Device location and authorization.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Current authorization.
    async fn authorization(&self) -> AuthorizationStatus;

    /// Ask the user for when-in-use authorization.
    async fn request_authorization(&self);

    /// Last known device location.
    async fn current_location(&self) -> Option<Coordinate>;
}
