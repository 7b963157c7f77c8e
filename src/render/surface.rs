use crate::foundation::core::{Point, Rect, Rgba8};

/// One retained drawing command, in surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Rgba8,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba8,
        width: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba8,
        width: f64,
    },
    Disc {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
}

/// Persistent drawing surface: a pixel size plus every op drawn since the last reset.
///
/// Ops accumulate like strokes on a canvas; rasterizing replays them in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl Surface {
    /// Resize and drop all previous contents.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.clear();
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
