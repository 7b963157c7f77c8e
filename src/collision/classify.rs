use crate::foundation::core::{Obstacle, Waypoint};

impl Obstacle {
    /// Closed-interval containment: points on an edge count as inside.
    pub fn contains(&self, p: &Waypoint) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.top()
    }
}

/// True if `point` lies inside (or on the boundary of) any obstacle.
pub fn is_inside(point: &Waypoint, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|obs| obs.contains(point))
}

#[cfg(test)]
#[path = "../../tests/unit/collision/classify.rs"]
mod tests;
