//! Fixture-backed geocoder and route provider.
//!
//! A fixture file is a JSON document listing named places and prepared
//! routes. It stands in for the remote geocoding and directions backends.

use std::collections::HashMap;
use std::path::Path;
use async_trait::async_trait;
use navigator_core::{Coordinate, NavError, Route};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::{Geocoder, Result, RouteProvider, ServiceError};

/// Default distance within which a fixture route matches a destination.
pub const DEFAULT_MATCH_TOLERANCE_M: f64 = 50.0;

/// A named place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Name users type
    pub name: String,

    /// Where it is
    pub location: Coordinate,
}

/// A prepared route ending at `destination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRoute {
    /// Where the route ends
    pub destination: Coordinate,

    /// The route itself
    #[serde(flatten)]
    pub route: Route,
}

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Geocodable places
    #[serde(default)]
    pub places: Vec<Place>,

    /// Prepared routes
    #[serde(default)]
    pub routes: Vec<FixtureRoute>,
}

impl FixtureSet {
    /// Load and validate a fixture file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref()).await?;
        let set = Self::from_json(&raw)?;
        debug!(
            path = %path.as_ref().display(),
            places = set.places.len(),
            routes = set.routes.len(),
            "Loaded fixtures"
        );
        Ok(set)
    }

    /// Parse and validate fixture JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        let set: FixtureSet = serde_json::from_str(raw)?;
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<()> {
        let points = self
            .places
            .iter()
            .map(|p| p.location)
            .chain(self.routes.iter().map(|r| r.destination))
            .chain(self.routes.iter().flat_map(|r| r.route.polyline.iter().copied()))
            .chain(self.routes.iter().flat_map(|r| r.route.steps.iter().map(|s| s.maneuver)));
        for point in points {
            Coordinate::new(point.latitude, point.longitude)
                .map_err(|e| ServiceError::InvalidFixture(e.to_string()))?;
        }

        for route in &self.routes {
            if let Some(step) = route.route.steps.iter().find(|s| !s.distance_m.is_finite() || s.distance_m < 0.0) {
                return Err(ServiceError::InvalidFixture(format!(
                    "step '{}' has distance {}",
                    step.instruction, step.distance_m
                )));
            }
        }
        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Geocoder answering from a fixed list of places.
pub struct FixtureGeocoder {
    places: HashMap<String, Coordinate>,
}

impl FixtureGeocoder {
    /// Create a geocoder over `places`.
    pub fn new(places: impl IntoIterator<Item = Place>) -> Self {
        Self {
            places: places
                .into_iter()
                .map(|p| (normalize(&p.name), p.location))
                .collect(),
        }
    }
}

#[async_trait]
impl Geocoder for FixtureGeocoder {
    async fn geocode(&self, query: &str) -> navigator_core::Result<Coordinate> {
        self.places
            .get(&normalize(query))
            .copied()
            .ok_or_else(|| NavError::GeocodeFailure(format!("no place named '{}'", query.trim())))
    }
}

/// Route provider answering from prepared routes.
pub struct FixtureRouteProvider {
    routes: Vec<FixtureRoute>,
    tolerance_m: f64,
}

impl FixtureRouteProvider {
    /// Create a provider over `routes`.
    pub fn new(routes: Vec<FixtureRoute>) -> Self {
        Self {
            routes,
            tolerance_m: DEFAULT_MATCH_TOLERANCE_M,
        }
    }

    /// Set how far a route's destination may be from the requested one.
    pub fn with_tolerance(mut self, tolerance_m: f64) -> Self {
        self.tolerance_m = tolerance_m;
        self
    }
}

#[async_trait]
impl RouteProvider for FixtureRouteProvider {
    async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> navigator_core::Result<Route> {
        let best = self
            .routes
            .iter()
            .map(|r| (r, r.destination.distance_to(&destination)))
            .filter(|(_, d)| *d <= self.tolerance_m)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((fixture, distance)) => {
                debug!(%origin, %destination, distance, "Matched fixture route");
                Ok(fixture.route.clone())
            }
            None => Err(NavError::RouteFailure(format!(
                "no route from {} to {}",
                origin, destination
            ))),
        }
    }
}

/// Geocoder and route provider built from one fixture file.
pub fn from_fixtures(set: FixtureSet) -> (FixtureGeocoder, FixtureRouteProvider) {
    (
        FixtureGeocoder::new(set.places),
        FixtureRouteProvider::new(set.routes),
    )
}
