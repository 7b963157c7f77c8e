use crate::foundation::error::{WalltraceError, WalltraceResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Default pixels per meter on both axes.
pub const DEFAULT_SCALE: f64 = 80.0;

/// Physical wall extent in meters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Wall {
    pub width: f64,
    pub height: f64,
}

impl Wall {
    pub fn new(width: f64, height: f64) -> WalltraceResult<Self> {
        let wall = Self { width, height };
        wall.validate()?;
        Ok(wall)
    }

    pub fn validate(&self) -> WalltraceResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WalltraceError::invalid_configuration(format!(
                    "wall {name} must be finite and > 0 (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Coverage denominator in square meters.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Axis-aligned rectangle in wall coordinates, `(x, y)` is its bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Wall-space bounds as a `kurbo` rectangle (y still pointing up).
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.top())
    }
}

/// What the tool does while travelling towards a waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointAction {
    Move,
    Paint,
}

/// One point of a planned trajectory, in wall coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<WaypointAction>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, action: None }
    }

    pub fn with_action(mut self, action: WaypointAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn distance(&self, other: &Waypoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn as_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Pixels per meter used to size the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale_x: DEFAULT_SCALE,
            scale_y: DEFAULT_SCALE,
        }
    }
}

impl RenderConfig {
    pub fn new(scale_x: f64, scale_y: f64) -> WalltraceResult<Self> {
        for (name, value) in [("scale_x", scale_x), ("scale_y", scale_y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WalltraceError::invalid_configuration(format!(
                    "{name} must be finite and > 0 (got {value})"
                )));
            }
        }
        Ok(Self { scale_x, scale_y })
    }

    /// Defaults, overridden by `WALLTRACE_SCALE_X` / `WALLTRACE_SCALE_Y` when they parse to a
    /// positive finite number.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable source.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let scale_var = |name: &str| {
            get(name)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
        };

        let base = Self::default();
        Self {
            scale_x: scale_var("WALLTRACE_SCALE_X").unwrap_or(base.scale_x),
            scale_y: scale_var("WALLTRACE_SCALE_Y").unwrap_or(base.scale_y),
        }
    }

    /// Surface size in (fractional) pixels for a wall.
    pub fn surface_size(&self, wall: &Wall) -> (f64, f64) {
        (wall.width * self.scale_x, wall.height * self.scale_y)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
