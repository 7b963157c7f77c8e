use crate::{
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{WalltraceError, WalltraceResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        surface::{DrawOp, Surface},
    },
};

/// Flattening tolerance for marker circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// `vello_cpu` rasterizer. Every call replays the full display list into a fresh pixmap.
#[derive(Debug, Default)]
pub struct CpuBackend {
    frames_rendered: u64,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl RenderBackend for CpuBackend {
    fn rasterize(&mut self, surface: &Surface) -> WalltraceResult<FrameRGBA> {
        if surface.is_empty() {
            return Err(WalltraceError::render(
                "surface has no pixels; draw a wall before rasterizing",
            ));
        }
        let width_u16: u16 = surface
            .width()
            .try_into()
            .map_err(|_| WalltraceError::render("surface width exceeds u16"))?;
        let height_u16: u16 = surface
            .height()
            .try_into()
            .map_err(|_| WalltraceError::render("surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        for op in surface.ops() {
            draw_op(&mut ctx, op);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        self.frames_rendered += 1;

        Ok(FrameRGBA {
            width: surface.width(),
            height: surface.height(),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Fill { rect, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
        }
        DrawOp::StrokeRect { rect, color, width } => {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.set_paint(color_to_cpu(*color));
            ctx.stroke_rect(&rect_to_cpu(*rect));
        }
        DrawOp::Line {
            from,
            to,
            color,
            width,
        } => {
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(*from));
            path.line_to(point_to_cpu(*to));
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(*width).with_caps(vello_cpu::kurbo::Cap::Round),
            );
            ctx.set_paint(color_to_cpu(*color));
            ctx.stroke_path(&path);
        }
        DrawOp::Disc {
            center,
            radius,
            color,
        } => {
            use vello_cpu::kurbo::Shape as _;

            let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(*center), *radius);
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}
