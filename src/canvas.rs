use std::io::{Seek, Write};
use std::path::Path;

use bytemuck::checked::{cast_slice, cast_slice_mut};
use image::{ImageBuffer, ImageFormat, ImageResult, Rgba, RgbaImage};
use log::debug;
use nalgebra::{Point2, Vector2};

use crate::picture::{Picture, RGBA8};
use crate::polygon::Polygon;
use crate::render::{LineStyle, Renderer};

const DASH_LENGTH: f64 = 10.0;
const GAP_LENGTH: f64 = 5.0;

/// Raster target with the world origin at the center of the image.
pub struct Canvas {
    buffer: Vec<u8>,
    size: (u32, u32),
    offset: Vector2<f64>,
}

impl Canvas {
    pub fn new(size: (u32, u32), background: RGBA8) -> Self {
        let (width, height) = size;
        let buffer = vec![0; width as usize * height as usize * std::mem::size_of::<RGBA8>()];
        debug!(target: "app", "Allocating canvas. {}x{}, {} bytes", width, height, buffer.len());

        let mut canvas = Canvas {
            buffer,
            size,
            offset: Vector2::new((width / 2) as f64, (height / 2) as f64),
        };
        canvas.picture_mut().clear(background);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    pub fn picture(&self) -> Picture<&[RGBA8]> {
        Picture::new(cast_slice(&self.buffer), self.size)
    }

    pub fn picture_mut(&mut self) -> Picture<&mut [RGBA8]> {
        Picture::new(cast_slice_mut(&mut self.buffer), self.size)
    }

    fn to_screen(&self, p: Point2<f64>) -> (i64, i64) {
        let p = p + self.offset;
        (p.x.round() as i64, p.y.round() as i64)
    }

    fn line(&mut self, a: Point2<f64>, b: Point2<f64>, color: RGBA8) {
        let (from, to) = (self.to_screen(a), self.to_screen(b));
        self.picture_mut().draw_line(from, to, color);
    }

    fn dashed_line(&mut self, a: Point2<f64>, b: Point2<f64>, color: RGBA8) {
        let delta = b - a;
        let distance = delta.norm();
        if distance == 0.0 {
            return;
        }
        let direction = delta / distance;

        let mut current = a;
        let mut remaining = distance;
        let mut drawing = true;
        while remaining > 0.0 {
            let step = remaining.min(if drawing { DASH_LENGTH } else { GAP_LENGTH });
            let next = current + direction * step;
            if drawing {
                self.line(current, next, color);
            }
            current = next;
            remaining -= step;
            drawing = !drawing;
        }
    }

    pub fn draw_polygon(&mut self, polygon: &Polygon, color: RGBA8) {
        for (a, b) in polygon.edges() {
            self.line(*a, *b, color);
        }
    }

    /// Copies the canvas into an 8-bit RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let picture = self.picture();
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| {
            let RGBA8 { r, g, b, a } = *picture.pixel(x, y);
            Rgba([r, g, b, a])
        })
    }

    /// Encodes the canvas as PNG into `out`.
    pub fn write_png(&self, mut out: impl Write + Seek) -> ImageResult<()> {
        self.to_image().write_to(&mut out, ImageFormat::Png)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let path = path.as_ref();
        debug!(target: "app", "Encoding {}x{} PNG to {}", self.width(), self.height(), path.display());
        self.to_image().save_with_format(path, ImageFormat::Png)
    }
}

impl Renderer for Canvas {
    fn draw_segment(&mut self, a: Point2<f64>, b: Point2<f64>, color: RGBA8, style: LineStyle) {
        match style {
            LineStyle::Solid => self.line(a, b, color),
            LineStyle::Dashed => self.dashed_line(a, b, color),
        }
    }
}
