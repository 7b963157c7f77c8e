//! walltrace renders a planned coverage path over a wall with rectangular obstacles and derives
//! coverage metrics from it.
//!
//! # Pipeline overview
//!
//! 1. **Scene**: `Wall + [Obstacle] -> Surface` (wall background, border, obstacle fills)
//! 2. **Playback**: `[Waypoint]` is stepped one waypoint per tick by the [`AnimationController`],
//!    each tick appending the visible part of the step and a position marker to the surface
//! 3. **Rasterize**: `Surface -> FrameRGBA` through a [`RenderBackend`] (CPU via `vello_cpu`)
//! 4. **Metrics**: `[Waypoint] + Wall + coverage width -> Metrics`, independent of playback
//!
//! Wall coordinates are meters with the origin at the wall's bottom-left and y pointing up.
//! Surface coordinates are pixels with the origin at the top-left and y pointing down; the
//! conversion lives in [`SurfaceTransform`] and is applied only by the [`Renderer`].
//!
//! Playback is cooperative: nothing happens between calls to [`AnimationController::poll`],
//! and time comes from an injectable [`Clock`], so tests advance it deterministically with
//! [`ManualClock`].
#![forbid(unsafe_code)]

mod animation;
mod collision;
mod engine;
mod foundation;
mod geometry;
mod input;
mod metrics;
mod planner;
mod render;

pub use animation::clock::{Clock, ManualClock, SystemClock};
pub use animation::controller::{
    AnimationController, AnimationState, DEFAULT_TICK_INTERVAL, PlaybackConfig, PlaybackHandle,
    PlaybackId, PlaybackStatus, TickOutcome,
};
pub use collision::classify::is_inside;
pub use collision::visibility::{
    EndpointHeuristic, FullClip, SegmentVisibility, Span, VisibilityMode,
};
pub use engine::{PlannedRun, Visualizer};
pub use foundation::core::{
    Affine, DEFAULT_SCALE, Obstacle, Point, Rect, RenderConfig, Rgba8, Vec2, Wall, Waypoint,
    WaypointAction,
};
pub use foundation::error::{WalltraceError, WalltraceResult};
pub use geometry::transform::{SurfaceTransform, obstacle_rect_px, to_pixel, to_wall};
pub use input::config::{DEFAULT_COVERAGE_WIDTH, RunConfig, read_waypoints};
pub use input::obstacles::{ParsedObstacles, parse_obstacles};
pub use metrics::calc::{Metrics, TIME_PER_WAYPOINT, compute_metrics, path_length};
#[cfg(feature = "http")]
pub use planner::client::HttpPlanner;
pub use planner::client::{PlanRequest, Planner};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use render::cpu::CpuBackend;
pub use render::scene::{Renderer, SceneStyle};
pub use render::surface::{DrawOp, Surface};
