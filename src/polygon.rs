use std::f64::consts::TAU;

use float_ord::FloatOrd;
use nalgebra::{point, Point2};

use crate::error::TraceError;
use crate::geometry::{edge_normal, intersect};
use crate::ray::{Hit, Ray};

/// A closed loop of vertices bounding one refractive body.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2<f64>>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2<f64>>) -> Result<Self, TraceError> {
        if vertices.len() < 3 {
            return Err(TraceError::DegeneratePolygon { vertices: vertices.len() });
        }
        Ok(Polygon { vertices })
    }

    /// Regular polygon with vertex `i` at angle `2πi / sides` around `center`.
    pub fn regular(sides: usize, radius: f64, center: Point2<f64>) -> Result<Self, TraceError> {
        let vertices = (0..sides)
            .map(|i| {
                let angle = TAU * i as f64 / sides as f64;
                point![center.x + radius * angle.cos(), center.y + radius * angle.sin()]
            })
            .collect();
        Polygon::new(vertices)
    }

    /// Isosceles prism whose apex (at the top, toward -y) spans `apex_degrees`.
    pub fn prism(apex_degrees: f64, radius: f64, center: Point2<f64>) -> Self {
        let half = apex_degrees.to_radians() / 2.0;
        let height = radius * half.cos();
        let base_width = 2.0 * radius * half.sin();

        Polygon {
            vertices: vec![
                point![center.x, center.y - height],
                point![center.x - base_width / 2.0, center.y + height],
                point![center.x + base_width / 2.0, center.y + height],
            ],
        }
    }

    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Edges as `(start, end)` pairs, closing the loop back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Nearest edge crossed by `ray`. Equal distances keep the lowest edge.
    ///
    /// `reach` only scales the returned `t` (distance is `t * reach`); edges past it still count.
    pub fn hit(&self, ray: &Ray, reach: f64) -> Option<Hit> {
        let end = ray.at(reach);
        self.edges()
            .enumerate()
            .filter_map(|(edge, (a, b))| {
                intersect(&ray.origin, &end, a, b).map(|(point, t)| Hit {
                    point,
                    normal: edge_normal(a, b),
                    t,
                    edge,
                })
            })
            .min_by_key(|hit| FloatOrd(hit.t))
    }
}

/// Nearest hit across every polygon, with the index of the polygon it belongs to.
pub fn nearest_hit(polygons: &[Polygon], ray: &Ray, reach: f64) -> Option<(usize, Hit)> {
    polygons
        .iter()
        .enumerate()
        .filter_map(|(index, polygon)| polygon.hit(ray, reach).map(|hit| (index, hit)))
        .min_by_key(|(_, hit)| FloatOrd(hit.t))
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;

    use super::*;

    fn unit_square(center: Point2<f64>) -> Polygon {
        Polygon::new(vec![
            point![center.x - 1.0, center.y - 1.0],
            point![center.x + 1.0, center.y - 1.0],
            point![center.x + 1.0, center.y + 1.0],
            point![center.x - 1.0, center.y + 1.0],
        ])
        .expect("square")
    }

    #[test]
    fn test_new_rejects_two_vertices() {
        let err = Polygon::new(vec![point![0.0, 0.0], point![1.0, 0.0]]).unwrap_err();
        assert_eq!(err, TraceError::DegeneratePolygon { vertices: 2 });
    }

    #[test]
    fn test_regular_hexagon_vertices() {
        let hexagon = Polygon::regular(6, 150.0, point![0.0, 0.0]).expect("hexagon");
        assert_eq!(hexagon.vertices().len(), 6);
        assert!((hexagon.vertices()[0].x - 150.0).abs() < 1e-9);
        assert!((hexagon.vertices()[3].x + 150.0).abs() < 1e-9);
        for v in hexagon.vertices() {
            assert!((v.coords.norm() - 150.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_regular_rejects_too_few_sides() {
        assert!(Polygon::regular(2, 10.0, point![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_prism_shape() {
        let prism = Polygon::prism(60.0, 200.0, point![0.0, 325.0]);
        let [top, left, right] = [prism.vertices()[0], prism.vertices()[1], prism.vertices()[2]];
        let height = 200.0 * 30f64.to_radians().cos();
        assert!((top.y - (325.0 - height)).abs() < 1e-9);
        assert!((left.y - right.y).abs() < 1e-12);
        assert!((right.x - left.x - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_edges_close_the_loop() {
        let square = unit_square(point![0.0, 0.0]);
        let edges: Vec<_> = square.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].1, &square.vertices()[0]);
    }

    #[test]
    fn test_hit_picks_nearest_edge() {
        let square = unit_square(point![0.0, 0.0]);
        let ray = Ray::new(point![-5.0, 0.0], vector![1.0, 0.0], 550.0);
        let hit = square.hit(&ray, 100.0).expect("hit");
        assert!((hit.point.x + 1.0).abs() < 1e-9);
        assert_eq!(hit.edge, 3);
        // counter-clockwise square: the left edge faces -x
        assert!((hit.normal.x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_beyond_reach_is_kept() {
        let square = unit_square(point![0.0, 0.0]);
        let ray = Ray::new(point![-5.0, 0.0], vector![1.0, 0.0], 550.0);
        let hit = square.hit(&ray, 3.0).expect("hit past the reach");
        assert_eq!(hit.edge, 3);
        assert!((hit.point.x + 1.0).abs() < 1e-9);
        assert!((hit.t - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_hit_across_polygons() {
        let polygons = vec![unit_square(point![10.0, 0.0]), unit_square(point![4.0, 0.0])];
        let ray = Ray::new(point![0.0, 0.0], vector![1.0, 0.0], 550.0);
        let (index, hit) = nearest_hit(&polygons, &ray, 100.0).expect("hit");
        assert_eq!(index, 1);
        assert!((hit.point.x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_hit_tie_keeps_first_polygon() {
        let polygons = vec![unit_square(point![4.0, 0.0]), unit_square(point![4.0, 0.0])];
        let ray = Ray::new(point![0.0, 0.0], vector![1.0, 0.0], 550.0);
        let (index, _) = nearest_hit(&polygons, &ray, 100.0).expect("hit");
        assert_eq!(index, 0);
    }
}
