use nalgebra::{Point3, Vector3};

use crate::curve::{CurveEvaluation, NurbsCurve};
use crate::misc::FloatingPoint;

use super::Evaluator;

/// Direct evaluation by summing every weighted control point against its Cox-de Boor basis function
///
/// Builds the whole triangular table of basis functions over the knot vector,
/// without locating a span first, so it shares no code path with [`super::DeBoor`].
/// It is O(n * p) per call and exists to cross-check the recursive evaluator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasisSummation;

impl BasisSummation {
    /// Compute the non-rational basis functions of degree `degree - 1` and `degree` for every control point
    /// Returns a tuple of (lower degree basis, basis), of length `n + 1` and `n`.
    fn basis_functions<T: FloatingPoint>(curve: &NurbsCurve<T>, t: T) -> (Vec<T>, Vec<T>) {
        let knots = curve.knots();
        let degree = curve.degree();
        let n = curve.control_points().len();
        let (_, end) = knots.domain(degree);

        // first degree: a single active interval inside the domain
        // at the end of the domain the last non-empty interval is closed on the right
        let mut basis = vec![T::zero(); knots.len() - 1];
        for i in degree..n {
            let active = if t >= end {
                knots[i] < knots[i + 1] && knots[i] < t && t <= knots[i + 1]
            } else {
                knots[i] <= t && t < knots[i + 1]
            };
            if active {
                basis[i] = T::one();
            }
        }

        let mut lower = basis.clone();
        for d in 1..=degree {
            if d == degree {
                lower = basis.clone();
            }
            let len = knots.len() - 1 - d;
            for i in 0..len {
                let left = if basis[i] != T::zero() {
                    (t - knots[i]) * basis[i] / (knots[i + d] - knots[i])
                } else {
                    T::zero()
                };
                let right = if basis[i + 1] != T::zero() {
                    (knots[i + d + 1] - t) * basis[i + 1] / (knots[i + d + 1] - knots[i + 1])
                } else {
                    T::zero()
                };
                basis[i] = left + right;
            }
            basis.truncate(len);
        }

        (lower, basis)
    }

    /// Derivatives of the degree `p` basis functions from the degree `p - 1` ones
    /// N'(i, p) = p * (N(i, p - 1) / (u[i + p] - u[i]) - N(i + 1, p - 1) / (u[i + p + 1] - u[i + 1]))
    fn basis_derivatives<T: FloatingPoint>(curve: &NurbsCurve<T>, lower: &[T]) -> Vec<T> {
        let knots = curve.knots();
        let p = curve.degree();
        let degree = T::count(p);
        (0..curve.control_points().len())
            .map(|i| {
                let left = if lower[i] != T::zero() {
                    lower[i] / (knots[i + p] - knots[i])
                } else {
                    T::zero()
                };
                let right = if lower[i + 1] != T::zero() {
                    lower[i + 1] / (knots[i + p + 1] - knots[i + 1])
                } else {
                    T::zero()
                };
                degree * (left - right)
            })
            .collect()
    }

    /// Compute the rational basis functions `R(i) = N(i) * w(i) / sum(N(j) * w(j))` for every control point
    /// The parameter is clamped to the knot domain first.
    ///
    /// # Example
    /// ```
    /// use deboor::prelude::*;
    /// use nalgebra::Point3;
    /// use approx::assert_relative_eq;
    ///
    /// let curve = NurbsCurve::try_new(
    ///     2,
    ///     vec![
    ///         ControlPoint::new(Point3::new(0., 0., 0.), 1.),
    ///         ControlPoint::new(Point3::new(1., 1., 0.), 2.),
    ///         ControlPoint::new(Point3::new(2., 0., 0.), 1.),
    ///     ],
    ///     vec![0., 0., 0., 1., 1., 1.],
    /// ).unwrap();
    /// let r = BasisSummation.rational_basis_functions(&curve, 0.5);
    /// assert_relative_eq!(r.iter().sum::<f64>(), 1.);
    /// assert_relative_eq!(r[1], 2. / 3.);
    /// ```
    pub fn rational_basis_functions<T: FloatingPoint>(&self, curve: &NurbsCurve<T>, t: T) -> Vec<T> {
        let t = curve.knots().clamp(curve.degree(), t);
        let (_, basis) = Self::basis_functions(curve, t);
        let weighted: Vec<T> = basis
            .iter()
            .zip(curve.control_points())
            .map(|(b, c)| *b * c.weight())
            .collect();
        let sum = weighted.iter().fold(T::zero(), |acc, v| acc + *v);
        weighted.into_iter().map(|v| v / sum).collect()
    }
}

impl<T: FloatingPoint> Evaluator<T> for BasisSummation {
    fn evaluate(&self, curve: &NurbsCurve<T>, t: T) -> CurveEvaluation<T> {
        let t = curve.knots().clamp(curve.degree(), t);
        let (lower, basis) = Self::basis_functions(curve, t);
        let derivatives = Self::basis_derivatives(curve, &lower);

        // A = sum(N * w * P), W = sum(N * w) and their derivatives
        let mut a = Vector3::<T>::zeros();
        let mut w = T::zero();
        let mut da = Vector3::<T>::zeros();
        let mut dw = T::zero();
        for ((b, db), c) in basis.iter().zip(derivatives.iter()).zip(curve.control_points()) {
            let weighted = c.position().coords * c.weight();
            a += weighted * *b;
            w += c.weight() * *b;
            da += weighted * *db;
            dw += c.weight() * *db;
        }

        let position = Point3::from(a / w);
        let velocity = (da - position.coords * dw) / w;
        CurveEvaluation::new(position, velocity)
    }
}
