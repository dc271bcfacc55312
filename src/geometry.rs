use nalgebra::{Point2, Unit, Vector2};

/// Determinants smaller than this are treated as parallel lines.
pub const PARALLEL_EPSILON: f64 = 1e-8;

/// Smallest accepted ray parameter. Keeps a ray from re-hitting the edge it starts on.
pub const FORWARD_EPSILON: f64 = 1e-6;

/// Intersects the segment `ray_start -> ray_end` with the edge `edge_start -> edge_end`.
///
/// Returns the intersection point together with the parameter `t`, where the point is
/// `ray_start + t * (ray_end - ray_start)`. `ray_end` only fixes the direction and the scale
/// of `t`: hits past it are returned with `t > 1`. Parallel or colinear segments, hits behind
/// or at the ray's own origin, and hits on the edge's infinite extension all yield `None`.
pub fn intersect(
    ray_start: &Point2<f64>,
    ray_end: &Point2<f64>,
    edge_start: &Point2<f64>,
    edge_end: &Point2<f64>,
) -> Option<(Point2<f64>, f64)> {
    let (x1, y1) = (ray_start.x, ray_start.y);
    let (x2, y2) = (ray_end.x, ray_end.y);
    let (x3, y3) = (edge_start.x, edge_start.y);
    let (x4, y4) = (edge_end.x, edge_end.y);

    let denominator = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denominator;
    let u = (-(x1 - x2) * (y1 - y3) + (y1 - y2) * (x1 - x3)) / denominator;

    if t > FORWARD_EPSILON && (0.0..=1.0).contains(&u) {
        let point = *ray_start + (*ray_end - *ray_start) * t;
        Some((point, t))
    } else {
        None
    }
}

/// Unit normal of the edge `a -> b`, rotated clockwise from the edge direction.
///
/// Points outward for counter-clockwise polygons (y up) and inward otherwise.
pub fn edge_normal(a: &Point2<f64>, b: &Point2<f64>) -> Unit<Vector2<f64>> {
    let edge = *b - *a;
    Unit::new_normalize(Vector2::new(edge.y, -edge.x))
}
