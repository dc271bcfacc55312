use bytemuck_derive::{AnyBitPattern, NoUninit};

/// Shortest and longest wavelengths the spectrum covers.
pub const SPECTRUM: (f64, f64) = (100.0, 2000.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully saturated hue for `wavelength`: red at the long end, sweeping to violet at the short end.
    pub fn from_wavelength(wavelength: f64) -> Self {
        let (short, long) = SPECTRUM;
        let hue = (long - wavelength) / (long - short) * 0.75;

        let h = hue * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let q = 1.0 - f;

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (1.0, f, 0.0),
            1 => (q, 1.0, 0.0),
            2 => (0.0, 1.0, f),
            3 => (0.0, q, 1.0),
            4 => (f, 0.0, 1.0),
            _ => (1.0, 0.0, q),
        };

        Color::new(r as f32, g as f32, b as f32, 1.0)
    }
}

/// Segment color for a ray of `wavelength`. Segments starting at the light source are marked white.
pub fn wavelength_to_color(wavelength: f64, marker: bool) -> RGBA8 {
    if marker {
        RGBA8::WHITE
    } else {
        Color::from_wavelength(wavelength).into()
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, AnyBitPattern, NoUninit)]
#[repr(C)]
pub struct RGBA8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for RGBA8 {
    fn from(value: Color) -> Self {
        RGBA8::new_norm(value.r, value.g, value.b, value.a)
    }
}

fn normalize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

impl RGBA8 {
    pub const WHITE: RGBA8 = RGBA8::new_hex(0xFFFFFFFF);
    pub const BLACK: RGBA8 = RGBA8::new_hex(0x000000FF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        RGBA8 { r, g, b, a }
    }

    pub const fn new_hex(rgba: u32) -> RGBA8 {
        RGBA8 {
            r: ((rgba & 0xff000000) >> 24) as u8,
            g: ((rgba & 0x00ff0000) >> 16) as u8,
            b: ((rgba & 0x0000ff00) >> 8) as u8,
            a: (rgba & 0x000000ff) as u8,
        }
    }

    pub fn new_norm(r: f32, g: f32, b: f32, a: f32) -> Self {
        RGBA8::new(normalize(r), normalize(g), normalize(b), normalize(a))
    }
}

pub struct Picture<P> {
    pixels: P,
    size: (u32, u32),
}

impl<P> Picture<P> {
    pub fn new(pixels: P, size: (u32, u32)) -> Self {
        Picture { pixels, size }
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    fn to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }
}

impl<'a, T> Picture<&'a [T]> {
    pub fn pixel(&self, x: u32, y: u32) -> &T {
        &self.pixels[self.to_index(x, y)]
    }
}

impl<'a, T: Copy> Picture<&'a mut [T]> {
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut T {
        let index = self.to_index(x, y);
        &mut self.pixels[index]
    }

    pub fn clear(&mut self, color: T) {
        self.pixels.fill(color);
    }

    /// Bresenham line from `from` to `to`, both ends included. Pixels off the picture are skipped.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: T) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if self.contains(x, y) {
                *self.pixel_mut(x as u32, y as u32) = color;
            }
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
