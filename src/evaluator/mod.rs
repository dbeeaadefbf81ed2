pub mod basis_summation;
pub mod de_boor;
pub mod evaluation_method;
pub use basis_summation::*;
pub use de_boor::*;
pub use evaluation_method::*;

use crate::curve::{CurveEvaluation, NurbsCurve};
use crate::misc::FloatingPoint;

/// An algorithm that evaluates position and velocity of a NURBS curve at a parameter
/// Implementations must be pure: no state may survive between calls.
pub trait Evaluator<T: FloatingPoint> {
    fn evaluate(&self, curve: &NurbsCurve<T>, t: T) -> CurveEvaluation<T>;

    /// Sample the curve at a given number of regularly spaced parameters between `start` and `end`
    /// Return the vector of tuples of parameter and evaluation
    fn sample_regular_range(
        &self,
        curve: &NurbsCurve<T>,
        start: T,
        end: T,
        samples: usize,
    ) -> Vec<(T, CurveEvaluation<T>)> {
        match samples {
            0 => vec![],
            1 => vec![(start, self.evaluate(curve, start))],
            _ => {
                let step = (end - start) / T::count(samples - 1);
                (0..samples)
                    .map(|i| {
                        // pin the last sample so rounding cannot leave it short of `end`
                        let t = if i + 1 == samples {
                            end
                        } else {
                            start + T::count(i) * step
                        };
                        (t, self.evaluate(curve, t))
                    })
                    .collect()
            }
        }
    }

    /// Sample the whole knot domain of the curve
    fn sample_regular(&self, curve: &NurbsCurve<T>, samples: usize) -> Vec<(T, CurveEvaluation<T>)> {
        let (start, end) = curve.knots_domain();
        self.sample_regular_range(curve, start, end, samples)
    }
}

/// Evaluate a curve at `t` by the homogeneous de Boor recursion
/// Shorthand for [`NurbsCurve::evaluate`]
pub fn evaluate<T: FloatingPoint>(curve: &NurbsCurve<T>, t: T) -> CurveEvaluation<T> {
    DeBoor.evaluate(curve, t)
}
