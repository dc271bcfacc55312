use std::ops::RangeInclusive;

use nalgebra::{point, Point2};

use crate::error::TraceError;
use crate::material::MaterialRegistry;
use crate::picture::SPECTRUM;
use crate::polygon::Polygon;

pub const DEFAULT_SOURCE: Point2<f64> = Point2::new(-500.0, 0.0);
pub const DEFAULT_SAMPLES: usize = 7;
pub const PRISM_ANGLE_RANGE: RangeInclusive<f64> = 30.0..=150.0;

/// Segments starting this close to the source's x coordinate are drawn as source markers.
const MARKER_TOLERANCE: f64 = 0.1;

/// Everything one trace pass reads. Built fresh for every pass and never mutated during one.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub polygons: Vec<Polygon>,
    /// Material filling every polygon.
    pub body_material: String,
    /// Material surrounding the polygons.
    pub environment_material: String,
    pub source: Point2<f64>,
    /// Emission angle from the +x axis, in `[0, 360)`.
    pub angle_degrees: f64,
    pub samples: usize,
}

impl SceneConfig {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        SceneConfig {
            polygons,
            body_material: "diamond".to_owned(),
            environment_material: "air".to_owned(),
            source: DEFAULT_SOURCE,
            angle_degrees: 0.0,
            samples: DEFAULT_SAMPLES,
        }
    }

    /// Nine bodies scattered around the origin, with a prism of the given apex angle below it.
    pub fn showcase(prism_angle: f64) -> Result<Self, TraceError> {
        let prism_angle = prism_angle.clamp(*PRISM_ANGLE_RANGE.start(), *PRISM_ANGLE_RANGE.end());

        let polygons = vec![
            Polygon::regular(6, 150.0, point![0.0, 0.0])?,
            Polygon::regular(6, 120.0, point![-400.0, -100.0])?,
            Polygon::regular(5, 140.0, point![400.0, -80.0])?,
            Polygon::prism(prism_angle, 200.0, point![0.0, 325.0]),
            Polygon::regular(4, 100.0, point![0.0, -400.0])?,
            Polygon::regular(8, 90.0, point![380.0, 380.0])?,
            Polygon::regular(7, 80.0, point![-350.0, -350.0])?,
            Polygon::regular(5, 95.0, point![350.0, -350.0])?,
            Polygon::regular(4, 85.0, point![-320.0, 320.0])?,
        ];

        Ok(SceneConfig::new(polygons))
    }

    pub fn with_materials(mut self, body: impl Into<String>, environment: impl Into<String>) -> Self {
        self.body_material = body.into();
        self.environment_material = environment.into();
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle_degrees = degrees.rem_euclid(360.0);
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_source(mut self, source: Point2<f64>) -> Self {
        self.source = source;
        self
    }

    /// Body and environment indices, checked against `registry`.
    pub fn media(&self, registry: &MaterialRegistry) -> Result<Media, TraceError> {
        Ok(Media {
            body: registry.index_of(&self.body_material)?,
            environment: registry.index_of(&self.environment_material)?,
        })
    }

    /// `samples` wavelengths spread evenly over the spectrum, both ends included.
    pub fn wavelengths(&self) -> impl Iterator<Item = f64> {
        let (short, long) = SPECTRUM;
        let steps = self.samples.saturating_sub(1).max(1) as f64;
        (0..self.samples).map(move |i| short + (long - short) * i as f64 / steps)
    }

    pub fn is_source(&self, p: &Point2<f64>) -> bool {
        (p.x - self.source.x).abs() < MARKER_TOLERANCE
    }
}

/// Refractive indices of the two media of a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Media {
    pub body: f64,
    pub environment: f64,
}
