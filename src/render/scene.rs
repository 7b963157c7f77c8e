use crate::{
    foundation::core::{Obstacle, Rect, RenderConfig, Rgba8, Wall, Waypoint},
    geometry::transform::SurfaceTransform,
    render::surface::{DrawOp, Surface},
};

/// Colors and stroke sizes for the scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneStyle {
    pub background: Rgba8,
    pub border: Rgba8,
    pub border_width: f64,
    pub obstacle: Rgba8,
    pub path: Rgba8,
    pub path_width: f64,
    pub marker: Rgba8,
    pub marker_radius: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::opaque(0xff, 0xff, 0xff),
            border: Rgba8::opaque(0x00, 0x00, 0x00),
            border_width: 1.0,
            obstacle: Rgba8::opaque(0xff, 0x4d, 0x4d),
            path: Rgba8::opaque(0x00, 0x00, 0xff),
            path_width: 2.0,
            marker: Rgba8::opaque(0x00, 0xcc, 0x66),
            marker_radius: 5.0,
        }
    }
}

/// Drawing primitives over a persistent [`Surface`]. Inputs are in wall coordinates; the
/// y-flip happens here and nowhere else.
#[derive(Clone, Debug)]
pub struct Renderer {
    cfg: RenderConfig,
    style: SceneStyle,
    transform: Option<SurfaceTransform>,
    surface: Surface,
}

impl Renderer {
    pub fn new(cfg: RenderConfig, style: SceneStyle) -> Self {
        Self {
            cfg,
            style,
            transform: None,
            surface: Surface::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn transform(&self) -> Option<&SurfaceTransform> {
        self.transform.as_ref()
    }

    pub fn has_scene(&self) -> bool {
        self.transform.is_some()
    }

    /// Size the surface for `wall` and clear it.
    pub fn reset(&mut self, wall: &Wall) {
        let (w, h) = self.cfg.surface_size(wall);
        self.surface.reset(pixel_extent(w), pixel_extent(h));
        self.transform = Some(SurfaceTransform::new(wall, &self.cfg));
    }

    /// Reset, paint the background and outline the wall.
    pub fn draw_wall(&mut self, wall: &Wall) {
        self.reset(wall);
        let full = Rect::new(
            0.0,
            0.0,
            f64::from(self.surface.width()),
            f64::from(self.surface.height()),
        );
        self.surface.push(DrawOp::Fill {
            rect: full,
            color: self.style.background,
        });
        self.surface.push(DrawOp::StrokeRect {
            rect: full,
            color: self.style.border,
            width: self.style.border_width,
        });
    }

    pub fn draw_obstacles(&mut self, obstacles: &[Obstacle]) {
        let Some(t) = self.transform else {
            tracing::warn!("draw_obstacles called before draw_wall; ignored");
            return;
        };
        for obs in obstacles {
            self.surface.push(DrawOp::Fill {
                rect: t.obstacle_rect(obs),
                color: self.style.obstacle,
            });
        }
    }

    pub fn draw_segment(&mut self, from: &Waypoint, to: &Waypoint) {
        let Some(t) = self.transform else {
            tracing::warn!("draw_segment called before draw_wall; ignored");
            return;
        };
        self.surface.push(DrawOp::Line {
            from: t.to_pixel(from),
            to: t.to_pixel(to),
            color: self.style.path,
            width: self.style.path_width,
        });
    }

    pub fn draw_marker(&mut self, at: &Waypoint) {
        let Some(t) = self.transform else {
            tracing::warn!("draw_marker called before draw_wall; ignored");
            return;
        };
        self.surface.push(DrawOp::Disc {
            center: t.to_pixel(at),
            radius: self.style.marker_radius,
            color: self.style.marker,
        });
    }
}

/// Nearest whole-pixel extent, so `0.7 m * 80` stays 56 px despite float noise.
fn pixel_extent(v: f64) -> u32 {
    v.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
