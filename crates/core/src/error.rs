//! Navigation error taxonomy.

/// Result alias for navigator operations.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors reported by navigation operations.
///
/// None of these are fatal: each one ends the operation that raised it and
/// leaves the session idle until the user starts over.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    /// The destination text could not be resolved to a location
    #[error("Geocoding failed: {0}")]
    GeocodeFailure(String),

    /// No route could be computed to the destination
    #[error("Route request failed: {0}")]
    RouteFailure(String),

    /// A route with no steps was handed to the tracker
    #[error("Route has no steps")]
    InvalidRoute,

    /// Location authorization was not granted
    #[error("Location permission denied")]
    PermissionDenied,

    /// Latitude or longitude out of range
    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },
}
