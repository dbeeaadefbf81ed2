use nalgebra::Point3;

use crate::curve::{CurveEvaluation, NurbsCurve};
use crate::misc::{blend, project, FloatingPoint, Homogeneous};

use super::Evaluator;

/// Homogeneous de Boor recursion
///
/// Runs two de Boor pyramids side by side in projective space:
/// one over the weighted control points `d`, giving the homogeneous curve point,
/// and one over their scaled differences `q`, giving the homogeneous first derivative.
/// The quotient rule then turns both apices into a cartesian position and velocity.
///
/// The scratch pyramids hold `degree + 1` and `degree` entries and live only for the call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeBoor;

impl<T: FloatingPoint> Evaluator<T> for DeBoor {
    fn evaluate(&self, curve: &NurbsCurve<T>, t: T) -> CurveEvaluation<T> {
        let p = curve.degree();
        let knots = curve.knots();
        let control_points = curve.control_points();
        let n = control_points.len();

        let u = knots.clamp(p, t);
        let k = knots.find_knot_span_index(n, p, u);
        #[cfg(feature = "log")]
        {
            if u != t {
                log::trace!("de boor: parameter {:?} clamped to {:?}", t, u);
            }
            log::trace!("de boor: parameter {:?} in span {}", u, k);
        }

        let mut d: Vec<Homogeneous<T>> = control_points[k - p..=k]
            .iter()
            .map(|c| c.homogenized())
            .collect();

        // derivative control points from the un-blended homogeneous points
        let degree = T::count(p);
        let mut q: Vec<Homogeneous<T>> = (0..p)
            .map(|i| (d[i + 1] - d[i]) * degree / (knots[i + k + 1] - knots[i + k + 1 - p]))
            .collect();

        for r in 1..=p {
            for j in (r..=p).rev() {
                let lo = knots[j + k - p];
                let alpha = (u - lo) / (knots[j + 1 + k - r] - lo);
                d[j] = blend(&d[j - 1], &d[j], alpha);

                if r < p && j < p {
                    // the derivative curve is one degree lower over the knots shifted by one
                    let lo = knots[j + k + 1 - p];
                    let alpha = (u - lo) / (knots[j + 1 + k - r] - lo);
                    q[j] = blend(&q[j - 1], &q[j], alpha);
                }
            }
        }

        let apex = &d[p];
        let derivative = &q[p - 1];
        let w = apex.w;

        // C = A / W, C' = (A' - C W') / W
        let position = Point3::from(project(apex) / w);
        let velocity = (project(derivative) - position.coords * derivative.w) / w;

        CurveEvaluation::new(position, velocity)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    use crate::curve::{ControlPoint, NurbsCurve};
    use crate::evaluator::{BasisSummation, Evaluator};

    use super::DeBoor;

    fn cubic_bezier() -> NurbsCurve<f64> {
        NurbsCurve::try_non_rational(
            3,
            &[
                Point3::new(0., 0., 0.),
                Point3::new(1., 2., 0.),
                Point3::new(2., 2., 0.),
                Point3::new(3., 0., 0.),
            ],
            vec![0., 0., 0., 0., 1., 1., 1., 1.],
        )
        .unwrap()
    }

    fn quarter_circle() -> NurbsCurve<f64> {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        NurbsCurve::try_new(
            2,
            vec![
                ControlPoint::new(Point3::new(1., 0., 0.), 1.),
                ControlPoint::new(Point3::new(1., 1., 0.), w),
                ControlPoint::new(Point3::new(0., 1., 0.), 1.),
            ],
            vec![0., 0., 0., 1., 1., 1.],
        )
        .unwrap()
    }

    #[test]
    fn cubic_bezier_start() {
        let e = DeBoor.evaluate(&cubic_bezier(), 0.);
        assert_relative_eq!(*e.position(), Point3::new(0., 0., 0.));
        assert_relative_eq!(*e.velocity(), Vector3::new(3., 6., 0.));
    }

    #[test]
    fn cubic_bezier_end() {
        let e = DeBoor.evaluate(&cubic_bezier(), 1.);
        assert_relative_eq!(*e.position(), Point3::new(3., 0., 0.));
        assert_relative_eq!(*e.velocity(), Vector3::new(3., -6., 0.));
    }

    #[test]
    fn cubic_bezier_midpoint() {
        let e = DeBoor.evaluate(&cubic_bezier(), 0.5);
        assert_relative_eq!(*e.position(), Point3::new(1.5, 1.5, 0.));
        assert_relative_eq!(*e.velocity(), Vector3::new(3., 0., 0.), epsilon = 1e-12);
    }

    #[test]
    fn cubic_bezier_matches_bernstein_form() {
        let curve = cubic_bezier();
        let pts: Vec<_> = curve.control_points().iter().map(|c| c.position().coords).collect();
        for i in 0..=20 {
            let t = i as f64 / 20.;
            let s = 1. - t;
            let expected = pts[0] * s * s * s
                + pts[1] * 3. * s * s * t
                + pts[2] * 3. * s * t * t
                + pts[3] * t * t * t;
            let expected_velocity = (pts[1] - pts[0]) * 3. * s * s
                + (pts[2] - pts[1]) * 6. * s * t
                + (pts[3] - pts[2]) * 3. * t * t;
            let e = DeBoor.evaluate(&curve, t);
            assert_relative_eq!(e.position().coords, expected, epsilon = 1e-12);
            assert_relative_eq!(*e.velocity(), expected_velocity, epsilon = 1e-12);
        }
    }

    #[test]
    fn parameters_outside_domain_are_clamped() {
        let curve = cubic_bezier();
        assert_eq!(DeBoor.evaluate(&curve, -0.5), DeBoor.evaluate(&curve, 0.));
        assert_eq!(DeBoor.evaluate(&curve, 1.5), DeBoor.evaluate(&curve, 1.));
    }

    #[test]
    fn quarter_circle_stays_on_circle() {
        let curve = quarter_circle();
        for i in 0..=16 {
            let t = i as f64 / 16.;
            let e = DeBoor.evaluate(&curve, t);
            assert_relative_eq!(e.position().coords.norm(), 1., epsilon = 1e-12);
            // tangent of a circle is perpendicular to its radius
            assert_relative_eq!(e.position().coords.dot(e.velocity()), 0., epsilon = 1e-12);
        }
    }

    #[test]
    fn quarter_circle_end_velocities() {
        let curve = quarter_circle();
        // C'(0) = p * (w1 / w0) * (P1 - P0) / (u[p + 1] - u[1])
        let start = DeBoor.evaluate(&curve, 0.);
        assert_relative_eq!(*start.velocity(), Vector3::new(0., 2f64.sqrt(), 0.), epsilon = 1e-12);
        let end = DeBoor.evaluate(&curve, 1.);
        assert_relative_eq!(*end.velocity(), Vector3::new(-(2f64.sqrt()), 0., 0.), epsilon = 1e-12);
    }

    #[test]
    fn linear_curve_is_polyline() {
        let curve = NurbsCurve::try_non_rational(
            1,
            &[
                Point3::new(0., 0., 0.),
                Point3::new(2., 0., 0.),
                Point3::new(2., 4., 0.),
            ],
            vec![0., 0., 1., 2., 2.],
        )
        .unwrap();
        let e = DeBoor.evaluate(&curve, 0.25);
        assert_relative_eq!(*e.position(), Point3::new(0.5, 0., 0.));
        assert_relative_eq!(*e.velocity(), Vector3::new(2., 0., 0.));
        let e = DeBoor.evaluate(&curve, 1.5);
        assert_relative_eq!(*e.position(), Point3::new(2., 2., 0.));
        assert_relative_eq!(*e.velocity(), Vector3::new(0., 4., 0.));
    }

    fn unclamped_quadratic(knots: Vec<f64>) -> NurbsCurve<f64> {
        NurbsCurve::try_non_rational(
            2,
            &[
                Point3::new(0., 0., 0.),
                Point3::new(1., 2., 0.),
                Point3::new(2., -1., 0.),
                Point3::new(3., 0., 0.),
            ],
            knots,
        )
        .unwrap()
    }

    #[test]
    fn repeated_knot_at_domain_end() {
        let curve = unclamped_quadratic(vec![0., 1., 2., 3., 3., 4., 5.]);
        let e = DeBoor.evaluate(&curve, 3.);
        assert!(e.is_finite());
        assert_relative_eq!(*e.position(), Point3::new(2., -1., 0.), epsilon = 1e-12);
        assert_relative_eq!(*e.velocity(), Vector3::new(2., -6., 0.), epsilon = 1e-12);

        let near = DeBoor.evaluate(&curve, 3. - 1e-9);
        assert_relative_eq!(*e.position(), *near.position(), epsilon = 1e-6);
        let oracle = BasisSummation.evaluate(&curve, 3.);
        assert_relative_eq!(*e.position(), *oracle.position(), epsilon = 1e-12);
        assert_relative_eq!(*e.velocity(), *oracle.velocity(), epsilon = 1e-12);
    }

    #[test]
    fn repeated_knot_at_domain_start() {
        let curve = unclamped_quadratic(vec![0., 1., 2., 2., 3., 4., 5.]);
        let e = DeBoor.evaluate(&curve, 2.);
        assert!(e.is_finite());
        assert_relative_eq!(*e.position(), Point3::new(1., 2., 0.), epsilon = 1e-12);
        assert_relative_eq!(*e.velocity(), Vector3::new(2., -6., 0.), epsilon = 1e-12);

        let near = DeBoor.evaluate(&curve, 2. + 1e-9);
        assert_relative_eq!(*e.position(), *near.position(), epsilon = 1e-6);
        let oracle = BasisSummation.evaluate(&curve, 2.);
        assert_relative_eq!(*e.position(), *oracle.position(), epsilon = 1e-12);
        assert_relative_eq!(*e.velocity(), *oracle.velocity(), epsilon = 1e-12);
    }

    #[test]
    fn zero_weight_is_not_finite() {
        let curve = NurbsCurve::new_unchecked(
            2,
            vec![
                ControlPoint::new(Point3::new(0., 0., 0.), 0.),
                ControlPoint::new(Point3::new(1., 1., 0.), 1.),
                ControlPoint::new(Point3::new(2., 0., 0.), 1.),
            ],
            vec![0., 0., 0., 1., 1., 1.],
        );
        // the first control point alone defines the curve at t = 0
        assert!(!DeBoor.evaluate(&curve, 0.).is_finite());
        // away from the start the other weights keep the denominator positive
        assert!(DeBoor.evaluate(&curve, 0.5).is_finite());
    }
}
