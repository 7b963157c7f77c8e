//! Host-facing entry points: draw the static scene, play a trajectory over it, compute metrics.

use std::time::Duration;

use crate::{
    animation::controller::{AnimationController, PlaybackConfig, PlaybackHandle},
    foundation::{
        core::{Obstacle, RenderConfig, Wall, Waypoint},
        error::{WalltraceError, WalltraceResult},
    },
    metrics::calc::{Metrics, compute_metrics},
    planner::client::{PlanRequest, Planner},
    render::{
        backend::{FrameRGBA, RenderBackend},
        scene::{Renderer, SceneStyle},
    },
};

/// Result of [`Visualizer::plan_and_play`].
#[derive(Debug)]
pub struct PlannedRun {
    pub handle: PlaybackHandle,
    pub trajectory: Vec<Waypoint>,
    pub metrics: Metrics,
}

/// Owns the drawing surface (through the animation controller) and the current wall.
pub struct Visualizer {
    controller: AnimationController,
    wall: Option<Wall>,
}

impl Visualizer {
    pub fn new(cfg: RenderConfig, style: SceneStyle, playback: PlaybackConfig) -> Self {
        Self {
            controller: AnimationController::new(Renderer::new(cfg, style), playback),
            wall: None,
        }
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        &mut self.controller
    }

    pub fn renderer(&self) -> &Renderer {
        self.controller.renderer()
    }

    pub fn wall(&self) -> Option<&Wall> {
        self.wall.as_ref()
    }

    /// Validate `wall`, cancel any playback, then reset the surface and draw wall + obstacles.
    pub fn render_static_scene(&mut self, wall: &Wall, obstacles: &[Obstacle]) -> WalltraceResult<()> {
        wall.validate()?;
        let renderer = self.controller.begin_scene();
        renderer.draw_wall(wall);
        renderer.draw_obstacles(obstacles);
        self.wall = Some(*wall);
        tracing::debug!(
            width = wall.width,
            height = wall.height,
            obstacles = obstacles.len(),
            "static scene rendered"
        );
        Ok(())
    }

    /// Start playing `trajectory` over the current scene, first tick due at `now`.
    #[tracing::instrument(skip_all, fields(waypoints = trajectory.len(), obstacles = obstacles.len()))]
    pub fn start_playback(
        &mut self,
        trajectory: &[Waypoint],
        obstacles: &[Obstacle],
        now: Duration,
    ) -> WalltraceResult<PlaybackHandle> {
        if self.wall.is_none() {
            return Err(WalltraceError::invalid_configuration(
                "render the static scene before starting playback",
            ));
        }
        Ok(self
            .controller
            .start(trajectory.to_vec(), obstacles.to_vec(), now))
    }

    pub fn compute_metrics(
        &self,
        trajectory: &[Waypoint],
        wall: &Wall,
        coverage_width: f64,
    ) -> WalltraceResult<Metrics> {
        compute_metrics(trajectory, wall, coverage_width)
    }

    /// Full submit flow: validate, ask the planner, draw the scene, start playback, compute
    /// metrics. When planning fails the static scene is still drawn and the error returned.
    pub fn plan_and_play(
        &mut self,
        planner: &dyn Planner,
        wall: &Wall,
        coverage_width: f64,
        obstacles: &[Obstacle],
        now: Duration,
    ) -> WalltraceResult<PlannedRun> {
        wall.validate()?;
        if !coverage_width.is_finite() || coverage_width <= 0.0 {
            return Err(WalltraceError::invalid_configuration(format!(
                "coverage width must be finite and > 0 (got {coverage_width})"
            )));
        }

        let request = PlanRequest::from_parts(wall, coverage_width, obstacles);
        let planned = planner.plan(&request);
        self.render_static_scene(wall, obstacles)?;
        let trajectory = planned.map_err(|err| match err {
            e @ WalltraceError::PlanningUnavailable(_) => e,
            other => WalltraceError::planning_unavailable(other.to_string()),
        })?;

        let metrics = compute_metrics(&trajectory, wall, coverage_width)?;
        let handle = self.start_playback(&trajectory, obstacles, now)?;
        Ok(PlannedRun {
            handle,
            trajectory,
            metrics,
        })
    }

    /// Rasterize the surface as it currently stands.
    pub fn snapshot(&self, backend: &mut dyn RenderBackend) -> WalltraceResult<FrameRGBA> {
        backend.rasterize(self.renderer().surface())
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(
            RenderConfig::default(),
            SceneStyle::default(),
            PlaybackConfig::default(),
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
