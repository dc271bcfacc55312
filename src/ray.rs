use nalgebra::{Point2, Unit, Vector2};

use crate::picture::SPECTRUM;

#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point2<f64>,
    pub direction: Unit<Vector2<f64>>,
    pub wavelength: f64,
    pub depth: u32,
}

impl Ray {
    /// A freshly emitted ray. `direction` does not need to be normalized.
    ///
    /// `wavelength` must lie within [`SPECTRUM`]; far outside it the dispersed index of
    /// refraction drops to zero or below and refracted directions turn into NaN.
    pub fn new(origin: Point2<f64>, direction: Vector2<f64>, wavelength: f64) -> Self {
        debug_assert!(
            (SPECTRUM.0..=SPECTRUM.1).contains(&wavelength),
            "wavelength {wavelength} outside {SPECTRUM:?}"
        );
        Self {
            origin,
            direction: Unit::new_normalize(direction),
            wavelength,
            depth: 0,
        }
    }

    /// Ray emitted from `origin` at `angle` radians from the +x axis.
    pub fn from_angle(origin: Point2<f64>, angle: f64, wavelength: f64) -> Self {
        Self::new(origin, Vector2::new(angle.cos(), angle.sin()), wavelength)
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn at(&self, t: f64) -> Point2<f64> {
        self.origin + self.direction.as_ref() * t
    }

    /// The ray continuing from `origin` after a bounce: same wavelength, one level deeper.
    pub fn bounce(&self, origin: Point2<f64>, direction: Unit<Vector2<f64>>) -> Self {
        Self {
            origin,
            direction,
            wavelength: self.wavelength,
            depth: self.depth + 1,
        }
    }
}

/// Nearest boundary crossing found along a ray.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub point: Point2<f64>,
    /// Normal of the hit edge, in the polygon's winding convention.
    pub normal: Unit<Vector2<f64>>,
    pub t: f64,
    pub edge: usize,
}
