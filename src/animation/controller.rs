//! Frame-stepped playback of a trajectory over the scene.
//!
//! The controller is a cooperative state machine: each tick draws the step from waypoint
//! `i - 1` to waypoint `i` and schedules the next tick one interval later. Nothing runs on its
//! own; the host drives it with [`AnimationController::poll`] (or `run_to_end`) against a
//! [`Clock`]. At most one playback is active. Starting another one, or calling `stop`,
//! cancels the current one; the cancelled playback's next tick is a no-op.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use crate::{
    animation::clock::Clock,
    collision::visibility::{SegmentVisibility, VisibilityMode},
    foundation::{
        core::{Obstacle, Waypoint},
        error::WalltraceResult,
    },
    render::scene::Renderer,
};

/// Default delay between two ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackStatus {
    Idle,
    Running,
    Cancelled,
    Completed,
}

impl PlaybackStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaybackId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackConfig {
    pub tick_interval: Duration,
    pub visibility: VisibilityMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            visibility: VisibilityMode::default(),
        }
    }
}

/// Caller-side view of one playback. Cheap to clone and safe to hand to another thread.
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
    id: PlaybackId,
    status: Arc<Mutex<PlaybackStatus>>,
}

impl PlaybackHandle {
    fn new(id: PlaybackId) -> Self {
        Self {
            id,
            status: Arc::new(Mutex::new(PlaybackStatus::Idle)),
        }
    }

    pub fn id(&self) -> PlaybackId {
        self.id
    }

    pub fn status(&self) -> PlaybackStatus {
        *lock(&self.status)
    }

    /// Request cancellation. Takes effect at the next tick; returns `false` when the playback
    /// had already finished.
    pub fn stop(&self) -> bool {
        let mut status = lock(&self.status);
        if status.is_finished() {
            return false;
        }
        *status = PlaybackStatus::Cancelled;
        true
    }

    fn transition(&self, from: &[PlaybackStatus], to: PlaybackStatus) -> bool {
        let mut status = lock(&self.status);
        if from.contains(&status) {
            *status = to;
            true
        } else {
            false
        }
    }
}

fn lock(status: &Mutex<PlaybackStatus>) -> MutexGuard<'_, PlaybackStatus> {
    // The guarded value is a plain enum, so a poisoned lock still holds a usable state.
    status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// State of the playback currently owned by the controller.
#[derive(Clone, Debug)]
pub struct AnimationState {
    current_index: usize,
    trajectory: Vec<Waypoint>,
    obstacles: Vec<Obstacle>,
    handle: PlaybackHandle,
    next_due: Duration,
}

impl AnimationState {
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn trajectory(&self) -> &[Waypoint] {
        &self.trajectory
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn status(&self) -> PlaybackStatus {
        self.handle.status()
    }

    pub fn handle(&self) -> &PlaybackHandle {
        &self.handle
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Step towards waypoint `index` ran; `spans` line pieces and maybe a marker were drawn.
    Stepped {
        id: PlaybackId,
        index: usize,
        spans: usize,
        marker: bool,
    },
    Completed(PlaybackId),
    Cancelled(PlaybackId),
    /// No playback to advance.
    Idle,
}

impl TickOutcome {
    pub fn drew_anything(&self) -> bool {
        matches!(self, Self::Stepped { spans, marker, .. } if *spans > 0 || *marker)
    }
}

pub struct AnimationController {
    renderer: Renderer,
    visibility: Box<dyn SegmentVisibility>,
    tick_interval: Duration,
    active: Option<AnimationState>,
    next_id: u64,
}

impl AnimationController {
    pub fn new(renderer: Renderer, cfg: PlaybackConfig) -> Self {
        Self::with_visibility(renderer, cfg.tick_interval, cfg.visibility.strategy())
    }

    /// Use a custom [`SegmentVisibility`] strategy.
    pub fn with_visibility(
        renderer: Renderer,
        tick_interval: Duration,
        visibility: Box<dyn SegmentVisibility>,
    ) -> Self {
        Self {
            renderer,
            visibility,
            tick_interval,
            active: None,
            next_id: 0,
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Cancel any running playback and hand out the renderer for a new static scene.
    pub fn begin_scene(&mut self) -> &mut Renderer {
        self.stop();
        self.retire_cancelled();
        &mut self.renderer
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn state(&self) -> Option<&AnimationState> {
        self.active.as_ref()
    }

    /// Index of the next waypoint to be stepped to, if a playback is active.
    pub fn frame_index(&self) -> Option<usize> {
        self.active.as_ref().map(|s| s.current_index)
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|s| s.status() == PlaybackStatus::Running)
    }

    /// Deadline of the next scheduled tick.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.active.as_ref().map(|s| s.next_due)
    }

    /// Start playing `trajectory`, superseding any current playback. The first tick is due at
    /// `now`. Trajectories with fewer than two waypoints complete immediately without drawing.
    pub fn start(
        &mut self,
        trajectory: Vec<Waypoint>,
        obstacles: Vec<Obstacle>,
        now: Duration,
    ) -> PlaybackHandle {
        if let Some(old) = self.active.take() {
            if old.handle.stop() {
                tracing::debug!(id = old.handle.id.0, "playback superseded");
            }
        }

        self.next_id += 1;
        let handle = PlaybackHandle::new(PlaybackId(self.next_id));

        if trajectory.len() < 2 {
            handle.transition(&[PlaybackStatus::Idle], PlaybackStatus::Completed);
            tracing::debug!(
                id = handle.id.0,
                waypoints = trajectory.len(),
                "playback completed without steps"
            );
            return handle;
        }

        handle.transition(&[PlaybackStatus::Idle], PlaybackStatus::Running);
        tracing::debug!(
            id = handle.id.0,
            waypoints = trajectory.len(),
            "playback started"
        );
        self.active = Some(AnimationState {
            current_index: 1,
            trajectory,
            obstacles,
            handle: handle.clone(),
            next_due: now,
        });
        handle
    }

    /// Cancel the active playback, if any.
    pub fn stop(&mut self) -> bool {
        self.active.as_ref().is_some_and(|s| s.handle.stop())
    }

    /// Run exactly one tick, ignoring its deadline.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(state) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };
        let id = state.handle.id;

        if state.handle.status() == PlaybackStatus::Cancelled {
            self.active = None;
            tracing::debug!(id = id.0, "playback cancelled");
            return TickOutcome::Cancelled(id);
        }

        if state.current_index >= state.trajectory.len() {
            state
                .handle
                .transition(&[PlaybackStatus::Running], PlaybackStatus::Completed);
            self.active = None;
            tracing::debug!(id = id.0, "playback completed");
            return TickOutcome::Completed(id);
        }

        let index = state.current_index;
        let prev = state.trajectory[index - 1];
        let curr = state.trajectory[index];

        let spans = self
            .visibility
            .visible_spans(&prev, &curr, &state.obstacles);
        for span in &spans {
            self.renderer.draw_segment(&span.from, &span.to);
        }
        let marker = self.visibility.marker_visible(&curr, &state.obstacles);
        if marker {
            self.renderer.draw_marker(&curr);
        }

        state.current_index += 1;
        state.next_due += self.tick_interval;
        tracing::trace!(id = id.0, index, spans = spans.len(), marker, "tick");

        TickOutcome::Stepped {
            id,
            index,
            spans: spans.len(),
            marker,
        }
    }

    /// Run every tick due at or before `now`, in order.
    pub fn poll(&mut self, now: Duration) -> Vec<TickOutcome> {
        let mut out = Vec::new();
        while let Some(due) = self.next_deadline() {
            if due > now {
                break;
            }
            let outcome = self.tick();
            let keep_going = matches!(outcome, TickOutcome::Stepped { .. });
            out.push(outcome);
            if !keep_going {
                break;
            }
        }
        out
    }

    /// Drive the active playback to its end, sleeping on `clock` between ticks.
    pub fn run_to_end<C: Clock + ?Sized>(&mut self, clock: &C) -> Option<PlaybackStatus> {
        self.run_to_end_with(clock, |_, _| Ok(()))
            .ok()
            .flatten()
    }

    /// Like [`run_to_end`](Self::run_to_end), calling `on_tick` after every tick with the
    /// renderer in its post-tick state. An error from `on_tick` stops the loop and cancels the
    /// playback.
    pub fn run_to_end_with<C, F>(
        &mut self,
        clock: &C,
        mut on_tick: F,
    ) -> WalltraceResult<Option<PlaybackStatus>>
    where
        C: Clock + ?Sized,
        F: FnMut(&TickOutcome, &Renderer) -> WalltraceResult<()>,
    {
        let Some(handle) = self.active.as_ref().map(|s| s.handle.clone()) else {
            return Ok(None);
        };

        while let Some(due) = self.next_deadline() {
            clock.sleep_until(due);
            for outcome in self.poll(clock.now()) {
                if let Err(err) = on_tick(&outcome, &self.renderer) {
                    self.stop();
                    self.retire_cancelled();
                    return Err(err);
                }
            }
        }
        Ok(Some(handle.status()))
    }

    fn retire_cancelled(&mut self) {
        if self
            .active
            .as_ref()
            .is_some_and(|s| s.status() == PlaybackStatus::Cancelled)
        {
            self.active = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/controller.rs"]
mod tests;
