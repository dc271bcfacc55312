//! Dispersive 2D ray tracing through polygonal bodies.
//!
//! Rays of several wavelengths leave a single source, refract into and out of
//! polygons by Snell's law with a linear dispersion model, and fall back to
//! mirror reflection on total internal reflection.

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod material;
pub mod optics;
pub mod picture;
pub mod polygon;
pub mod ray;
pub mod render;
pub mod scene;
pub mod tracer;

pub use error::TraceError;
pub use material::MaterialRegistry;
pub use polygon::Polygon;
pub use ray::Ray;
pub use render::{LineStyle, Renderer, SegmentLog};
pub use scene::SceneConfig;
pub use tracer::{Phase, Termination, TraceSummary, Tracer, TracerConfig};
