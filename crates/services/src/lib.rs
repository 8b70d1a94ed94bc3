//! Collaborator abstractions and reference implementations for Navigator.
//!
//! Geocoding, routing, geofencing, speech, map display and device location
//! are external services. This crate defines the trait each one is reached
//! through, plus fixture-backed and in-memory implementations.

#![warn(missing_docs)]

pub mod trait_;
pub mod fixture;
pub mod memory;

pub use trait_::{
    Announcer, GeofenceService, Geocoder, LocationService, MapSurface, Result, RouteProvider,
    ServiceError,
};
pub use fixture::{
    from_fixtures, FixtureGeocoder, FixtureRoute, FixtureRouteProvider, FixtureSet, Place,
};
pub use memory::{
    InMemoryGeofence, LogAnnouncer, LogMapSurface, MapCommand, ScriptedLocation, Utterance,
};
