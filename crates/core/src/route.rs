//! Route model - steps, polyline and geofence regions.

use serde::{Deserialize, Serialize};
use crate::geo::{BoundingBox, Coordinate};
use crate::id::RegionId;

/// One maneuver of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Human-readable instruction, e.g. "Turn left onto Main St"
    pub instruction: String,

    /// Distance covered by this step, in meters
    pub distance_m: f64,

    /// Where the maneuver happens
    pub maneuver: Coordinate,
}

impl RouteStep {
    /// Create a new step.
    pub fn new(instruction: impl Into<String>, distance_m: f64, maneuver: Coordinate) -> Self {
        Self {
            instruction: instruction.into(),
            distance_m,
            maneuver,
        }
    }
}

/// A driving route as returned by a route provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Points to draw on the map
    #[serde(default)]
    pub polyline: Vec<Coordinate>,

    /// Steps in navigation order
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Viewport rectangle for this route.
    ///
    /// Falls back to the maneuver points when there is no polyline.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(&self.polyline)
            .or_else(|| BoundingBox::enclosing(self.steps.iter().map(|s| &s.maneuver)))
    }

    /// Sum of all step distances.
    pub fn total_distance_m(&self) -> f64 {
        self.steps.iter().map(|s| s.distance_m).sum()
    }
}

/// A circular region handed to the geofence service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRegion {
    /// Step index the region was registered for
    pub id: RegionId,

    /// Center of the circle
    pub center: Coordinate,

    /// Radius in meters
    pub radius_m: f64,
}

impl GeofenceRegion {
    /// Whether `point` is inside the circle.
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.center.distance_to(point) <= self.radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_bounding_box_prefers_polyline() {
        let route = Route {
            polyline: vec![coord(10.0, 10.0), coord(11.0, 12.0)],
            steps: vec![RouteStep::new("far away", 5.0, coord(50.0, 50.0))],
        };
        let bbox = route.bounding_box().unwrap();
        assert_eq!(bbox.max, coord(11.0, 12.0));
    }

    #[test]
    fn test_bounding_box_falls_back_to_steps() {
        let route = Route {
            polyline: vec![],
            steps: vec![
                RouteStep::new("a", 5.0, coord(1.0, 1.0)),
                RouteStep::new("b", 5.0, coord(2.0, 3.0)),
            ],
        };
        let bbox = route.bounding_box().unwrap();
        assert_eq!(bbox.min, coord(1.0, 1.0));
        assert_eq!(bbox.max, coord(2.0, 3.0));

        let empty = Route { polyline: vec![], steps: vec![] };
        assert!(empty.bounding_box().is_none());
    }

    #[test]
    fn test_total_distance() {
        let route = Route {
            polyline: vec![],
            steps: vec![
                RouteStep::new("a", 50.0, coord(0.0, 0.0)),
                RouteStep::new("b", 12.5, coord(0.0, 0.0)),
            ],
        };
        assert_eq!(route.total_distance_m(), 62.5);
    }

    #[test]
    fn test_region_contains() {
        let region = GeofenceRegion {
            id: RegionId(0),
            center: coord(0.0, 0.0),
            radius_m: 20.0,
        };
        assert!(region.contains(&coord(0.0001, 0.0)));
        assert!(!region.contains(&coord(0.001, 0.0)));
    }

    #[test]
    fn test_route_deserializes_without_polyline() {
        let json = r#"{"steps":[{"instruction":"Turn left","distance_m":50.0,
            "maneuver":{"latitude":1.0,"longitude":2.0}}]}"#;
        let route: Route = serde_json::from_str(json).unwrap();
        assert!(route.polyline.is_empty());
        assert_eq!(route.steps[0].instruction, "Turn left");
    }
}
