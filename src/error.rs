use thiserror::Error;

/// Configuration problems that stop a trace pass before any segment is drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// A scene referenced a material missing from the registry.
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    /// A polygon needs at least three vertices to enclose anything.
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon { vertices: usize },

    /// Refractive indices must be finite and positive.
    #[error("invalid refractive index {index} for material '{name}'")]
    InvalidIndex { name: String, index: f64 },
}
