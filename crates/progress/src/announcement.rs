//! Spoken announcement text.

use navigator_core::RouteStep;

/// Spoken when the last region is crossed.
pub const ARRIVAL_TEXT: &str = "You have arrived at your destination";

/// `"In {distance} meters {instruction}"`.
///
/// The distance keeps its raw value: `50.0` reads "50", `12.5` reads "12.5".
pub fn step_announcement(step: &RouteStep) -> String {
    format!("In {} meters {}", step.distance_m, step.instruction)
}

/// Announcement made when navigation starts.
///
/// Covers the first maneuver and, when there is one, the maneuver after it.
pub fn initial_announcement(steps: &[RouteStep]) -> Option<String> {
    match steps {
        [] => None,
        [only] => Some(step_announcement(only)),
        [first, second, ..] => Some(format!(
            "{}, then in {} meters, {}",
            step_announcement(first),
            second.distance_m,
            second.instruction
        )),
    }
}
