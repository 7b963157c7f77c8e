//! Which parts of a trajectory segment get drawn.
//!
//! [`EndpointHeuristic`] hides a whole segment as soon as either endpoint lies inside an
//! obstacle and otherwise draws it untouched, even when it passes straight through one.
//! [`FullClip`] clips the segment against every obstacle and returns the pieces that stay
//! outside all of them.

use crate::{
    collision::classify::is_inside,
    foundation::core::{Obstacle, Waypoint},
};

/// Parametric slack below which a clipped piece is treated as empty.
const SPAN_EPS: f64 = 1e-9;

/// A drawable piece of a segment, in wall coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub from: Waypoint,
    pub to: Waypoint,
}

/// Strategy deciding what of a `from -> to` step is visible.
pub trait SegmentVisibility: Send + Sync {
    /// Visible pieces of the segment, ordered from `from` towards `to`.
    fn visible_spans(&self, from: &Waypoint, to: &Waypoint, obstacles: &[Obstacle]) -> Vec<Span>;

    /// Whether the position marker is drawn at `at`.
    fn marker_visible(&self, at: &Waypoint, obstacles: &[Obstacle]) -> bool {
        !is_inside(at, obstacles)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndpointHeuristic;

impl SegmentVisibility for EndpointHeuristic {
    fn visible_spans(&self, from: &Waypoint, to: &Waypoint, obstacles: &[Obstacle]) -> Vec<Span> {
        if is_inside(from, obstacles) || is_inside(to, obstacles) {
            Vec::new()
        } else {
            vec![Span {
                from: *from,
                to: *to,
            }]
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullClip;

impl SegmentVisibility for FullClip {
    fn visible_spans(&self, from: &Waypoint, to: &Waypoint, obstacles: &[Obstacle]) -> Vec<Span> {
        let mut hidden: Vec<(f64, f64)> = obstacles
            .iter()
            .filter_map(|obs| clip_param_range(from, to, obs))
            .collect();
        if hidden.is_empty() {
            return vec![Span {
                from: *from,
                to: *to,
            }];
        }
        hidden.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut visible = Vec::new();
        let mut cursor = 0.0f64;
        for (start, end) in hidden {
            if start > cursor + SPAN_EPS {
                visible.push((cursor, start));
            }
            cursor = cursor.max(end);
        }
        if cursor < 1.0 - SPAN_EPS {
            visible.push((cursor, 1.0));
        }

        visible
            .into_iter()
            .map(|(t0, t1)| Span {
                from: lerp(from, to, t0),
                to: lerp(from, to, t1),
            })
            .collect()
    }
}

/// Selectable built-in strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    #[default]
    EndpointHeuristic,
    FullClip,
}

impl VisibilityMode {
    pub fn strategy(self) -> Box<dyn SegmentVisibility> {
        match self {
            Self::EndpointHeuristic => Box::new(EndpointHeuristic),
            Self::FullClip => Box::new(FullClip),
        }
    }
}

/// Liang-Barsky: the `[t0, t1]` sub-range of `from -> to` inside the closed obstacle rectangle.
fn clip_param_range(from: &Waypoint, to: &Waypoint, obs: &Obstacle) -> Option<(f64, f64)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let edges = [
        (-dx, from.x - obs.x),
        (dx, obs.right() - from.x),
        (-dy, from.y - obs.y),
        (dy, obs.top() - from.y),
    ];

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

fn lerp(a: &Waypoint, b: &Waypoint, t: f64) -> Waypoint {
    Waypoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

#[cfg(test)]
#[path = "../../tests/unit/collision/visibility.rs"]
mod tests;
