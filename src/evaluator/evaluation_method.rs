use crate::curve::{CurveEvaluation, NurbsCurve};
use crate::misc::FloatingPoint;

use super::{BasisSummation, DeBoor, Evaluator};

/// Runtime choice between the evaluation algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationMethod {
    /// Homogeneous de Boor recursion over the active span
    #[default]
    DeBoor,
    /// Summation of every control point against its rational basis function
    BasisSummation,
}

impl<T: FloatingPoint> Evaluator<T> for EvaluationMethod {
    fn evaluate(&self, curve: &NurbsCurve<T>, t: T) -> CurveEvaluation<T> {
        match self {
            EvaluationMethod::DeBoor => DeBoor.evaluate(curve, t),
            EvaluationMethod::BasisSummation => BasisSummation.evaluate(curve, t),
        }
    }
}
