//! Turn-by-turn progress tracking.

use std::sync::Arc;
use navigator_core::{
    AnnouncementResult, GeofenceRegion, NavError, ProgressState, RegionId, Result, RouteStep,
};
use navigator_services::{Announcer, GeofenceService};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::announcement::{initial_announcement, step_announcement, ARRIVAL_TEXT};
use crate::estimator::ProgressSnapshot;

/// Default geofence radius around each maneuver.
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 20.0;

/// How region-entered events are matched against the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionMatching {
    /// Any entry advances one step, whatever region it was.
    #[default]
    Lenient,
    /// Only the current step's region advances; other ids are ignored.
    Strict,
}

/// Tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Radius of each step's geofence, in meters
    pub geofence_radius_m: f64,

    /// Region id matching mode
    pub region_matching: RegionMatching,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            geofence_radius_m: DEFAULT_GEOFENCE_RADIUS_M,
            region_matching: RegionMatching::Lenient,
        }
    }
}

/// Steps through a route as geofences are entered and announces each
/// maneuver.
///
/// Must be driven from a single event consumer; it is not safe to call
/// concurrently.
pub struct ProgressTracker {
    state: ProgressState,
    config: TrackerConfig,
    geofence: Arc<dyn GeofenceService>,
    announcer: Arc<dyn Announcer>,
}

impl ProgressTracker {
    /// Create an idle tracker.
    pub fn new(geofence: Arc<dyn GeofenceService>, announcer: Arc<dyn Announcer>) -> Self {
        Self {
            state: ProgressState::default(),
            config: TrackerConfig::default(),
            geofence,
            announcer,
        }
    }

    /// Set tracker configuration.
    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Begin navigating `steps`.
    ///
    /// Replaces any previous route, registers one geofence per step and
    /// speaks the opening announcement, which is also returned. An empty
    /// route is rejected with [`NavError::InvalidRoute`] and nothing changes.
    pub async fn start(&mut self, steps: Vec<RouteStep>) -> Result<String> {
        let Some(opening) = initial_announcement(&steps) else {
            return Err(NavError::InvalidRoute);
        };

        self.geofence.stop_all().await;

        let regions: Vec<GeofenceRegion> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| GeofenceRegion {
                id: RegionId(i),
                center: step.maneuver,
                radius_m: self.config.geofence_radius_m,
            })
            .collect();

        info!(steps = steps.len(), "Navigation started");
        self.state = ProgressState::started(steps);
        self.geofence.monitor(&regions).await;
        self.announcer.speak(&opening).await;
        Ok(opening)
    }

    /// Handle entry into a monitored region.
    pub async fn on_region_entered(&mut self, id: RegionId) -> AnnouncementResult {
        if !self.state.active {
            debug!(%id, "Region entered while idle, ignoring");
            return AnnouncementResult::ignored();
        }

        if self.config.region_matching == RegionMatching::Strict && id.index() != self.state.cursor {
            debug!(%id, cursor = self.state.cursor, "Region does not match current step, ignoring");
            return AnnouncementResult::ignored();
        }

        self.state.cursor += 1;

        if let Some(step) = self.state.steps.get(self.state.cursor) {
            let text = step_announcement(step);
            debug!(cursor = self.state.cursor, "Advanced to next step");
            self.announcer.speak(&text).await;
            return AnnouncementResult::in_progress(text);
        }

        info!("Arrived at destination");
        self.state.reset();
        self.geofence.stop_all().await;
        self.announcer.speak(ARRIVAL_TEXT).await;
        AnnouncementResult::arrived(ARRIVAL_TEXT)
    }

    /// Abandon navigation. Safe to call at any time.
    pub async fn stop(&mut self) {
        if self.state.active {
            info!(cursor = self.state.cursor, "Navigation stopped");
        }
        self.geofence.stop_all().await;
        self.state.reset();
    }

    /// Current progress state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Whether a route is being followed.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Index of the current step.
    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// Step being approached.
    pub fn current_step(&self) -> Option<&RouteStep> {
        self.state.current_step()
    }

    /// Point-in-time progress summary.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::of(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_core::{AnnouncementStatus, Coordinate};
    use navigator_services::{InMemoryGeofence, LogAnnouncer};

    fn step(instruction: &str, distance_m: f64, lat: f64) -> RouteStep {
        RouteStep::new(instruction, distance_m, Coordinate::new(lat, 0.0).unwrap())
    }

    fn sample_steps() -> Vec<RouteStep> {
        vec![
            step("turn left", 50.0, 0.0),
            step("turn right", 30.0, 0.001),
            step("arrive", 10.0, 0.002),
        ]
    }

    fn tracker() -> (ProgressTracker, InMemoryGeofence, LogAnnouncer) {
        let geofence = InMemoryGeofence::new();
        let announcer = LogAnnouncer::new();
        let tracker = ProgressTracker::new(Arc::new(geofence.clone()), Arc::new(announcer.clone()));
        (tracker, geofence, announcer)
    }

    #[tokio::test]
    async fn test_start_registers_regions_and_announces() {
        let (mut tracker, geofence, announcer) = tracker();
        let opening = tracker.start(sample_steps()).await.unwrap();

        assert!(opening.contains("turn left") && opening.contains("50"));
        assert!(opening.contains("turn right") && opening.contains("30"));
        assert_eq!(announcer.texts().await, vec![opening]);

        let regions = geofence.monitored().await;
        assert_eq!(regions.len(), 3);
        for (i, region) in regions.iter().enumerate() {
            assert_eq!(region.id, RegionId(i));
            assert_eq!(region.radius_m, DEFAULT_GEOFENCE_RADIUS_M);
            assert_eq!(region.center, sample_steps()[i].maneuver);
        }

        assert!(tracker.is_active());
        assert_eq!(tracker.cursor(), 0);
        assert_eq!(tracker.current_step().unwrap().instruction, "turn left");
    }

    #[tokio::test]
    async fn test_walk_through_route() {
        let (mut tracker, geofence, announcer) = tracker();
        tracker.start(sample_steps()).await.unwrap();

        let first = tracker.on_region_entered(RegionId(0)).await;
        assert_eq!(first, AnnouncementResult::in_progress("In 30 meters turn right"));

        let second = tracker.on_region_entered(RegionId(1)).await;
        assert_eq!(second, AnnouncementResult::in_progress("In 10 meters arrive"));

        let third = tracker.on_region_entered(RegionId(2)).await;
        assert_eq!(third, AnnouncementResult::arrived("You have arrived at your destination"));

        assert!(!tracker.is_active());
        assert_eq!(tracker.cursor(), 0);
        assert!(tracker.state().steps.is_empty());
        assert!(geofence.monitored().await.is_empty());
        assert_eq!(announcer.texts().await.len(), 4);
    }

    #[tokio::test]
    async fn test_arrival_exactly_once_for_any_length() {
        for len in 1..=6 {
            let (mut tracker, _, _) = tracker();
            let steps: Vec<_> = (0..len).map(|i| step("go", i as f64, 0.0)).collect();
            tracker.start(steps).await.unwrap();

            for i in 0..len {
                let result = tracker.on_region_entered(RegionId(i)).await;
                let expected = if i + 1 == len {
                    AnnouncementStatus::Arrived
                } else {
                    AnnouncementStatus::InProgress
                };
                assert_eq!(result.status, expected, "len {} call {}", len, i);
            }
            assert!(!tracker.is_active());
            assert_eq!(tracker.cursor(), 0);
        }
    }

    #[tokio::test]
    async fn test_tracker_reusable_after_arrival() {
        let (mut tracker, geofence, _) = tracker();
        tracker.start(vec![step("arrive", 10.0, 0.0)]).await.unwrap();
        assert!(tracker.on_region_entered(RegionId(0)).await.is_arrival());

        tracker.start(sample_steps()).await.unwrap();
        assert!(tracker.is_active());
        assert_eq!(geofence.monitored().await.len(), 3);
    }

    #[tokio::test]
    async fn test_start_empty_is_invalid_route() {
        let (mut tracker, geofence, announcer) = tracker();
        assert_eq!(tracker.start(Vec::new()).await, Err(NavError::InvalidRoute));
        assert_eq!(tracker.state(), &ProgressState::default());
        assert!(geofence.monitored().await.is_empty());
        assert!(announcer.texts().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_empty_keeps_running_route() {
        let (mut tracker, geofence, _) = tracker();
        tracker.start(sample_steps()).await.unwrap();
        tracker.on_region_entered(RegionId(0)).await;

        assert!(tracker.start(Vec::new()).await.is_err());
        assert_eq!(tracker.cursor(), 1);
        assert_eq!(geofence.monitored().await.len(), 3);
    }

    #[tokio::test]
    async fn test_restart_replaces_regions() {
        let (mut tracker, geofence, _) = tracker();
        tracker.start(sample_steps()).await.unwrap();
        tracker.on_region_entered(RegionId(0)).await;

        tracker.start(vec![step("only", 5.0, 1.0)]).await.unwrap();
        assert_eq!(tracker.cursor(), 0);
        let regions = geofence.monitored().await;
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].center, Coordinate::new(1.0, 0.0).unwrap());
    }

    #[tokio::test]
    async fn test_region_entered_while_idle_is_ignored() {
        let (mut tracker, _, announcer) = tracker();
        let result = tracker.on_region_entered(RegionId(0)).await;
        assert_eq!(result, AnnouncementResult::ignored());
        assert_eq!(tracker.cursor(), 0);
        assert!(announcer.texts().await.is_empty());
    }

    #[tokio::test]
    async fn test_stop_from_any_state() {
        let (mut tracker, geofence, _) = tracker();
        tracker.stop().await;
        assert_eq!(tracker.state(), &ProgressState::default());

        tracker.start(sample_steps()).await.unwrap();
        tracker.on_region_entered(RegionId(0)).await;
        tracker.stop().await;
        assert!(!tracker.is_active());
        assert_eq!(tracker.cursor(), 0);
        assert!(geofence.monitored().await.is_empty());

        tracker.stop().await;
        assert_eq!(tracker.state(), &ProgressState::default());
        assert_eq!(
            tracker.on_region_entered(RegionId(1)).await.status,
            AnnouncementStatus::Ignored
        );
    }

    #[tokio::test]
    async fn test_lenient_matching_ignores_region_id() {
        let (mut tracker, _, _) = tracker();
        tracker.start(sample_steps()).await.unwrap();
        let result = tracker.on_region_entered(RegionId(2)).await;
        assert_eq!(result.status, AnnouncementStatus::InProgress);
        assert_eq!(tracker.cursor(), 1);
    }

    #[tokio::test]
    async fn test_strict_matching_rejects_other_regions() {
        let (tracker, _, _) = tracker();
        let mut tracker = tracker.with_config(TrackerConfig {
            region_matching: RegionMatching::Strict,
            ..Default::default()
        });
        tracker.start(sample_steps()).await.unwrap();

        assert_eq!(tracker.on_region_entered(RegionId(2)).await.status, AnnouncementStatus::Ignored);
        assert_eq!(tracker.cursor(), 0);

        assert_eq!(tracker.on_region_entered(RegionId(0)).await.status, AnnouncementStatus::InProgress);
        // stale repeat of the region just passed
        assert_eq!(tracker.on_region_entered(RegionId(0)).await.status, AnnouncementStatus::Ignored);
        assert_eq!(tracker.cursor(), 1);
    }

    #[tokio::test]
    async fn test_custom_radius() {
        let (tracker, geofence, _) = tracker();
        let mut tracker = tracker.with_config(TrackerConfig {
            geofence_radius_m: 35.0,
            ..Default::default()
        });
        tracker.start(sample_steps()).await.unwrap();
        assert!(geofence.monitored().await.iter().all(|r| r.radius_m == 35.0));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: TrackerConfig = serde_json::from_str(r#"{"region_matching":"strict"}"#).unwrap();
        assert_eq!(config.region_matching, RegionMatching::Strict);
        assert_eq!(config.geofence_radius_m, DEFAULT_GEOFENCE_RADIUS_M);
    }
}
