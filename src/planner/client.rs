//! Boundary to the external trajectory planner. Only the request/response exchange lives here;
//! planning itself happens upstream.

use crate::foundation::{
    core::{Obstacle, Wall, Waypoint},
    error::WalltraceResult,
};

/// Body of a planning request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanRequest {
    pub width: f64,
    pub height: f64,
    pub coverage_width: f64,
    pub obstacles: Vec<Obstacle>,
}

impl PlanRequest {
    pub fn from_parts(wall: &Wall, coverage_width: f64, obstacles: &[Obstacle]) -> Self {
        Self {
            width: wall.width,
            height: wall.height,
            coverage_width,
            obstacles: obstacles.to_vec(),
        }
    }
}

/// Anything that can turn a [`PlanRequest`] into an ordered waypoint list.
///
/// Failures must be reported as [`WalltraceError::PlanningUnavailable`]; callers do not retry.
///
/// [`WalltraceError::PlanningUnavailable`]: crate::WalltraceError::PlanningUnavailable
pub trait Planner {
    fn plan(&self, request: &PlanRequest) -> WalltraceResult<Vec<Waypoint>>;
}

#[cfg(feature = "http")]
pub use http::HttpPlanner;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use super::{PlanRequest, Planner};
    use crate::foundation::{
        core::Waypoint,
        error::{WalltraceError, WalltraceResult},
    };

    const TRAJECTORIES_PATH: &str = "/api/trajectories";
    const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Posts requests as JSON to `<base>/api/trajectories`.
    pub struct HttpPlanner {
        endpoint: String,
        http: reqwest::blocking::Client,
    }

    impl HttpPlanner {
        pub fn new(base_url: &str) -> WalltraceResult<Self> {
            Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
        }

        pub fn with_timeout(base_url: &str, timeout: Duration) -> WalltraceResult<Self> {
            let http = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| WalltraceError::planning_unavailable(format!("http client: {e}")))?;
            Ok(Self {
                endpoint: format!("{}{TRAJECTORIES_PATH}", base_url.trim_end_matches('/')),
                http,
            })
        }

        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl Planner for HttpPlanner {
        #[tracing::instrument(skip(self, request), fields(endpoint = %self.endpoint, obstacles = request.obstacles.len()))]
        fn plan(&self, request: &PlanRequest) -> WalltraceResult<Vec<Waypoint>> {
            let started = std::time::Instant::now();
            let response = self
                .http
                .post(&self.endpoint)
                .json(request)
                .send()
                .map_err(|e| WalltraceError::planning_unavailable(format!("request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(WalltraceError::planning_unavailable(format!(
                    "planner responded {status}: {body}"
                )));
            }

            let waypoints: Vec<Waypoint> = response.json().map_err(|e| {
                WalltraceError::planning_unavailable(format!("unreadable planner response: {e}"))
            })?;

            tracing::info!(
                waypoints = waypoints.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "trajectory planned"
            );
            Ok(waypoints)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/planner/client.rs"]
mod tests;
