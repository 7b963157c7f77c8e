//! Wall space (meters, origin bottom-left, y up) to surface space (pixels, origin top-left,
//! y down).

use crate::foundation::core::{Affine, Obstacle, Point, Rect, RenderConfig, Wall, Waypoint};

/// Precomputed wall-to-surface mapping for one wall configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceTransform {
    scale_x: f64,
    scale_y: f64,
    surface_height: f64,
    affine: Affine,
}

impl SurfaceTransform {
    pub fn new(wall: &Wall, cfg: &RenderConfig) -> Self {
        let surface_height = wall.height * cfg.scale_y;
        // x' = sx * x, y' = H - sy * y
        let affine = Affine::new([cfg.scale_x, 0.0, 0.0, -cfg.scale_y, 0.0, surface_height]);
        Self {
            scale_x: cfg.scale_x,
            scale_y: cfg.scale_y,
            surface_height,
            affine,
        }
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    pub fn affine(&self) -> Affine {
        self.affine
    }

    pub fn to_pixel(&self, p: &Waypoint) -> Point {
        Point::new(p.x * self.scale_x, self.surface_height - p.y * self.scale_y)
    }

    pub fn to_wall(&self, px: Point) -> Waypoint {
        Waypoint::new(px.x / self.scale_x, (self.surface_height - px.y) / self.scale_y)
    }

    /// Pixel rectangle of an obstacle. The top edge comes from `y + height` because the surface
    /// grows downward.
    pub fn obstacle_rect(&self, obs: &Obstacle) -> Rect {
        let x0 = obs.x * self.scale_x;
        let y0 = self.surface_height - obs.top() * self.scale_y;
        Rect::new(
            x0,
            y0,
            x0 + obs.width * self.scale_x,
            y0 + obs.height * self.scale_y,
        )
    }
}

/// Map one wall-space point to surface pixels.
pub fn to_pixel(p: &Waypoint, wall: &Wall, cfg: &RenderConfig) -> Point {
    SurfaceTransform::new(wall, cfg).to_pixel(p)
}

/// Inverse of [`to_pixel`].
pub fn to_wall(px: Point, wall: &Wall, cfg: &RenderConfig) -> Waypoint {
    SurfaceTransform::new(wall, cfg).to_wall(px)
}

/// Top-left anchored pixel rectangle for an obstacle.
pub fn obstacle_rect_px(obs: &Obstacle, wall: &Wall, cfg: &RenderConfig) -> Rect {
    SurfaceTransform::new(wall, cfg).obstacle_rect(obs)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
