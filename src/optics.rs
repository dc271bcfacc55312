use nalgebra::{Unit, Vector2};

use crate::material::dispersion_adjusted;

/// Outcome of crossing a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Refraction {
    Refracted(Unit<Vector2<f64>>),
    TotalInternalReflection,
}

pub fn reflect(v: &Vector2<f64>, n: &Vector2<f64>) -> Unit<Vector2<f64>> {
    Unit::new_normalize(v - 2.0 * v.dot(n) * n)
}

/// Bends `incident` through a boundary from index `n1` into index `n2` (vector form of Snell's law).
///
/// Neither vector needs to be normalized. If `incident` runs along `normal` the normal is flipped
/// and the indices swapped, so the normal always opposes the incoming ray. Dispersion is applied
/// to `n2` only.
pub fn refract(
    incident: &Vector2<f64>,
    normal: &Vector2<f64>,
    n1: f64,
    n2: f64,
    wavelength: f64,
) -> Refraction {
    let incident = incident.normalize();
    let mut normal = normal.normalize();
    let (mut n1, mut n2) = (n1, n2);

    if incident.dot(&normal) > 0.0 {
        normal = -normal;
        std::mem::swap(&mut n1, &mut n2);
    }

    let n = n1 / dispersion_adjusted(n2, wavelength);
    let cos_i = -incident.dot(&normal);
    let sin_t2 = n * n * (1.0 - cos_i * cos_i);

    if sin_t2 > 1.0 {
        return Refraction::TotalInternalReflection;
    }

    let cos_t = (1.0 - sin_t2).sqrt();
    Refraction::Refracted(Unit::new_normalize(n * incident + (n * cos_i - cos_t) * normal))
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;

    use super::*;

    fn at_angle(degrees: f64) -> Vector2<f64> {
        // incoming from above-left toward a surface whose normal is +y
        let theta = degrees.to_radians();
        vector![theta.sin(), -theta.cos()]
    }

    #[test]
    fn test_normal_incidence_does_not_bend() {
        let normal = vector![0.0, 1.0];
        // against the normal, then along it (flipped and indices swapped)
        for d in [vector![0.0, -1.0], vector![0.0, 1.0]] {
            for (n1, n2) in [(1.0, 1.5), (2.42, 1.0), (1.33, 4.1)] {
                match refract(&d, &normal, n1, n2, 1000.0) {
                    Refraction::Refracted(out) => {
                        assert!(out.x.abs() < 1e-12);
                        assert!((out.y - d.y).abs() < 1e-12);
                    }
                    Refraction::TotalInternalReflection => panic!("normal incidence cannot reflect"),
                }
            }
        }
    }

    #[test]
    fn test_normal_pointing_along_ray_is_flipped() {
        // same physical crossing as n1=1.0 -> n2=1.5, expressed with the normal pointing forward
        let d = at_angle(30.0);
        let forward = refract(&d, &vector![0.0, -1.0], 1.5, 1.0, 1000.0);
        let backward = refract(&d, &vector![0.0, 1.0], 1.0, 1.5, 1000.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_snell_law_holds() {
        let d = at_angle(30.0);
        let Refraction::Refracted(out) = refract(&d, &vector![0.0, 1.0], 1.0, 1.5, 1000.0) else {
            panic!("expected refraction");
        };
        let sin_t = out.x;
        assert!((1.0 * 30f64.to_radians().sin() - 1.5 * sin_t).abs() < 1e-12);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_unnormalized_inputs() {
        let d = at_angle(20.0) * 7.0;
        let a = refract(&d, &vector![0.0, 3.0], 1.0, 1.33, 550.0);
        let b = refract(&at_angle(20.0), &vector![0.0, 1.0], 1.0, 1.33, 550.0);
        match (a, b) {
            (Refraction::Refracted(a), Refraction::Refracted(b)) => {
                assert!((a.into_inner() - b.into_inner()).norm() < 1e-12)
            }
            _ => panic!("expected refraction"),
        }
    }

    #[test]
    fn test_critical_angle() {
        let normal = vector![0.0, 1.0];
        // leaving a 1.5 medium into 1.0: critical angle ~41.8 degrees
        assert!(matches!(
            refract(&at_angle(40.0), &normal, 1.5, 1.0, 1000.0),
            Refraction::Refracted(_)
        ));
        assert_eq!(
            refract(&at_angle(43.0), &normal, 1.5, 1.0, 1000.0),
            Refraction::TotalInternalReflection
        );
        assert_eq!(
            refract(&at_angle(80.0), &normal, 1.5, 1.0, 1000.0),
            Refraction::TotalInternalReflection
        );
    }

    #[test]
    fn test_refracted_is_unit_length() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let d = vector![rng.f64() * 2.0 - 1.0, rng.f64() * 2.0 - 1.0];
            let n = vector![rng.f64() * 2.0 - 1.0, rng.f64() * 2.0 - 1.0];
            if d.norm() < 1e-3 || n.norm() < 1e-3 {
                continue;
            }
            let n1 = 1.0 + rng.f64() * 3.1;
            let n2 = 1.0 + rng.f64() * 3.1;
            let wavelength = 100.0 + rng.f64() * 1900.0;
            if let Refraction::Refracted(out) = refract(&d, &n, n1, n2, wavelength) {
                assert!((out.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_reflect() {
        let out = reflect(&at_angle(30.0), &vector![0.0, 1.0]);
        assert!((out.x - 30f64.to_radians().sin()).abs() < 1e-12);
        assert!((out.y - 30f64.to_radians().cos()).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_is_unit_length() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..500 {
            let theta = rng.f64() * std::f64::consts::TAU;
            let phi = rng.f64() * std::f64::consts::TAU;
            let d = vector![theta.cos(), theta.sin()];
            let n = vector![phi.cos(), phi.sin()];
            assert!((reflect(&d, &n).norm() - 1.0).abs() < 1e-9);
        }
    }
}
