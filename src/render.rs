use nalgebra::Point2;

use crate::picture::RGBA8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Travel through the environment.
    Solid,
    /// Travel inside a body.
    Dashed,
}

/// Sink for the segments a trace pass produces.
pub trait Renderer {
    fn draw_segment(&mut self, a: Point2<f64>, b: Point2<f64>, color: RGBA8, style: LineStyle);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub color: RGBA8,
    pub style: LineStyle,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
}

/// Records segments in draw order so they can be inspected or replayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentLog {
    pub segments: Vec<Segment>,
}

impl SegmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replay(&self, renderer: &mut impl Renderer) {
        for segment in &self.segments {
            renderer.draw_segment(segment.a, segment.b, segment.color, segment.style);
        }
    }
}

impl Renderer for SegmentLog {
    fn draw_segment(&mut self, a: Point2<f64>, b: Point2<f64>, color: RGBA8, style: LineStyle) {
        self.segments.push(Segment { a, b, color, style });
    }
}
