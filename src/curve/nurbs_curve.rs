use nalgebra::{Point3, Vector3};
use simba::scalar::SupersetOf;

use crate::curve::{ControlPoint, CurveEvaluation};
use crate::evaluator::{DeBoor, Evaluator};
use crate::misc::FloatingPoint;
use crate::prelude::KnotVector;

/// Rational B-spline (NURBS) curve representation
/// By generics, it can be used with f32 or f64 scalar types
///
/// The curve is immutable once built, so it can be evaluated from many threads at once.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NurbsCurve<T: FloatingPoint> {
    /// control points with their weights, in polygon order
    control_points: Vec<ControlPoint<T>>,
    degree: usize,
    /// knot vector for the NURBS curve
    /// the length of the knot vector is equal to the `# of control points + degree + 1`
    knots: KnotVector<T>,
}

impl<T: FloatingPoint> NurbsCurve<T> {
    /// Create a new NURBS curve
    /// # Failures
    /// - if the degree is zero
    /// - if the number of control points is not greater than the degree
    /// - if the number of knots is not equal to the number of control points + the degree + 1
    /// - if any weight is not a finite positive number
    ///
    /// # Preconditions
    /// The knot vector must be non-decreasing. It is not checked here;
    /// use [`KnotVector::is_non_decreasing`] when the knots come from an untrusted source.
    ///
    /// # Example
    /// ```
    /// use deboor::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let control_points = vec![
    ///     ControlPoint::new(Point3::new(0., 0., 0.), 1.),
    ///     ControlPoint::new(Point3::new(1., 2., 0.), 0.5),
    ///     ControlPoint::new(Point3::new(3., 1., 0.), 1.),
    /// ];
    /// let curve = NurbsCurve::try_new(2, control_points.clone(), vec![0., 0., 0., 1., 1., 1.]);
    /// assert!(curve.is_ok());
    ///
    /// let too_short = NurbsCurve::try_new(2, control_points, vec![0., 0., 1., 1.]);
    /// assert!(too_short.is_err());
    /// ```
    pub fn try_new(
        degree: usize,
        control_points: Vec<ControlPoint<T>>,
        knots: Vec<T>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(degree >= 1, "Degree must be at least 1");
        anyhow::ensure!(
            control_points.len() > degree,
            "Too few control points for curve, got {}, expected more than {}",
            control_points.len(),
            degree
        );
        anyhow::ensure!(
            knots.len() == control_points.len() + degree + 1,
            "Invalid number of knots, got {}, expected {}",
            knots.len(),
            control_points.len() + degree + 1
        );
        if let Some(index) = control_points
            .iter()
            .position(|p| !(p.weight().is_finite() && p.weight() > T::zero()))
        {
            anyhow::bail!(
                "Control point {} has a non-positive weight {:?}",
                index,
                control_points[index].weight()
            );
        }

        #[cfg(feature = "log")]
        log::debug!(
            "nurbs curve: degree {}, {} control points, {} knots",
            degree,
            control_points.len(),
            knots.len()
        );

        Ok(Self {
            degree,
            control_points,
            knots: KnotVector::new(knots),
        })
    }

    /// Create a NURBS curve from control points without weights (all weights are 1)
    pub fn try_non_rational(
        degree: usize,
        points: &[Point3<T>],
        knots: Vec<T>,
    ) -> anyhow::Result<Self> {
        Self::try_new(
            degree,
            points.iter().copied().map(ControlPoint::unweighted).collect(),
            knots,
        )
    }

    /// Create a clamped curve over an open uniform knot vector
    /// # Example
    /// ```
    /// use deboor::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let points = vec![
    ///     Point3::new(0., 0., 0.),
    ///     Point3::new(1., 1., 0.),
    ///     Point3::new(2., -1., 0.),
    ///     Point3::new(3., 0., 0.),
    ///     Point3::new(4., 1., 0.),
    /// ];
    /// let curve = NurbsCurve::try_open_uniform(
    ///     3,
    ///     points.iter().copied().map(ControlPoint::unweighted).collect(),
    /// ).unwrap();
    /// assert_eq!(curve.knots_domain(), (0., 2.));
    /// assert!(curve.is_clamped());
    /// ```
    pub fn try_open_uniform(
        degree: usize,
        control_points: Vec<ControlPoint<T>>,
    ) -> anyhow::Result<Self> {
        let knots = KnotVector::open_uniform(control_points.len(), degree);
        Self::try_new(degree, control_points, knots.to_vec())
    }

    /// Create a curve without checking any invariant
    /// Zero weights are kept as is and make the evaluation non-finite where they dominate;
    /// mismatched lengths make the evaluation panic on a slice bound.
    pub fn new_unchecked(
        degree: usize,
        control_points: Vec<ControlPoint<T>>,
        knots: Vec<T>,
    ) -> Self {
        Self {
            degree,
            control_points,
            knots: KnotVector::new(knots),
        }
    }

    /// Evaluate the position and velocity at a given parameter by the homogeneous de Boor recursion
    /// Parameters outside of the knot domain are clamped to it
    ///
    /// # Example
    /// ```
    /// use deboor::prelude::*;
    /// use nalgebra::{Point3, Vector3};
    /// use approx::assert_relative_eq;
    ///
    /// let curve = NurbsCurve::try_non_rational(
    ///     3,
    ///     &[
    ///         Point3::new(0., 0., 0.),
    ///         Point3::new(1., 2., 0.),
    ///         Point3::new(2., 2., 0.),
    ///         Point3::new(3., 0., 0.),
    ///     ],
    ///     vec![0., 0., 0., 0., 1., 1., 1., 1.],
    /// ).unwrap();
    /// let e = curve.evaluate(0.5);
    /// assert_relative_eq!(*e.position(), Point3::new(1.5, 1.5, 0.));
    /// assert_relative_eq!(*e.velocity(), Vector3::new(3., 0., 0.));
    /// ```
    pub fn evaluate(&self, t: T) -> CurveEvaluation<T> {
        DeBoor.evaluate(self, t)
    }

    /// Evaluate with a chosen evaluation algorithm
    pub fn evaluate_with<E: Evaluator<T> + ?Sized>(&self, evaluator: &E, t: T) -> CurveEvaluation<T> {
        evaluator.evaluate(self, t)
    }

    /// Evaluate the curve at a given parameter to get a point
    pub fn point_at(&self, t: T) -> Point3<T> {
        *self.evaluate(t).position()
    }

    /// Evaluate the curve at a given parameter to get a tangent vector (not normalized)
    pub fn tangent_at(&self, t: T) -> Vector3<T> {
        *self.evaluate(t).velocity()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &KnotVector<T> {
        &self.knots
    }

    pub fn control_points(&self) -> &[ControlPoint<T>] {
        &self.control_points
    }

    pub fn weights(&self) -> Vec<T> {
        self.control_points.iter().map(|p| p.weight()).collect()
    }

    pub fn knots_domain(&self) -> (T, T) {
        self.knots.domain(self.degree)
    }

    pub fn knots_domain_interval(&self) -> T {
        let (d0, d1) = self.knots_domain();
        d1 - d0
    }

    /// Check if the curve interpolates its first and last control points
    pub fn is_clamped(&self) -> bool {
        self.knots.is_clamped(self.degree)
    }

    /// Cast the curve to another floating point type
    /// # Example
    /// ```
    /// use deboor::prelude::*;
    /// use nalgebra::Point3;
    /// let curve = NurbsCurve::try_non_rational(
    ///     1,
    ///     &[Point3::new(0., 0., 0.), Point3::new(1., 0., 0.)],
    ///     vec![0., 0., 1., 1.],
    /// ).unwrap();
    /// let curve32 = curve.cast::<f32>();
    /// assert_eq!(curve32.point_at(0.5), Point3::new(0.5f32, 0., 0.));
    /// ```
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> NurbsCurve<F> {
        NurbsCurve {
            control_points: self.control_points.iter().map(|p| p.cast()).collect(),
            degree: self.degree,
            knots: self.knots.cast(),
        }
    }
}
