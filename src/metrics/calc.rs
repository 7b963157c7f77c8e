use std::fmt;

use crate::foundation::{
    core::{Wall, Waypoint, WaypointAction},
    error::{WalltraceError, WalltraceResult},
};

/// Uniform time cost charged per waypoint.
pub const TIME_PER_WAYPOINT: f64 = 0.1;

/// Summary numbers derived from a trajectory.
///
/// `coverage_percent` treats the swept area as `path_length * coverage_width` without
/// correcting for overlap, so re-traced ground can push it past 100.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metrics {
    pub path_length: f64,
    pub coverage_percent: f64,
    pub estimated_duration: f64,
    /// Length of the segments that end on a `paint` waypoint.
    pub painted_length: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path Length: {:.2} m", self.path_length)?;
        writeln!(f, "Coverage: {:.2}%", self.coverage_percent)?;
        write!(f, "Estimated Duration: {:.2} s", self.estimated_duration)
    }
}

/// Sum of Euclidean distances between consecutive waypoints.
pub fn path_length(trajectory: &[Waypoint]) -> f64 {
    // Fold from +0.0: an empty `f64` sum is -0.0, which prints as "-0.00".
    trajectory
        .windows(2)
        .fold(0.0, |acc, w| acc + w[0].distance(&w[1]))
}

fn painted_length(trajectory: &[Waypoint]) -> f64 {
    trajectory
        .windows(2)
        .filter(|w| w[1].action == Some(WaypointAction::Paint))
        .fold(0.0, |acc, w| acc + w[0].distance(&w[1]))
}

/// Derive [`Metrics`] for a trajectory on `wall` swept by a tool `coverage_width` meters wide.
#[tracing::instrument(skip(trajectory), fields(waypoints = trajectory.len()))]
pub fn compute_metrics(
    trajectory: &[Waypoint],
    wall: &Wall,
    coverage_width: f64,
) -> WalltraceResult<Metrics> {
    if !coverage_width.is_finite() || coverage_width <= 0.0 {
        return Err(WalltraceError::invalid_configuration(format!(
            "coverage width must be finite and > 0 (got {coverage_width})"
        )));
    }
    wall.validate()?;
    let area = wall.area();
    if !area.is_finite() || area <= 0.0 {
        return Err(WalltraceError::invalid_configuration(format!(
            "wall area must be finite and > 0 (got {area})"
        )));
    }

    let path_length = path_length(trajectory);
    let metrics = Metrics {
        path_length,
        coverage_percent: path_length * coverage_width / area * 100.0,
        estimated_duration: trajectory.len() as f64 * TIME_PER_WAYPOINT,
        painted_length: painted_length(trajectory),
    };

    if [
        metrics.path_length,
        metrics.coverage_percent,
        metrics.estimated_duration,
        metrics.painted_length,
    ]
    .iter()
    .any(|v| !v.is_finite())
    {
        return Err(WalltraceError::invalid_configuration(
            "trajectory contains non-finite coordinates",
        ));
    }

    tracing::debug!(
        path_length = metrics.path_length,
        coverage_percent = metrics.coverage_percent,
        "metrics computed"
    );
    Ok(metrics)
}

#[cfg(test)]
#[path = "../../tests/unit/metrics/calc.rs"]
mod tests;
