pub mod cross_validation_options;
pub use cross_validation_options::*;

use std::cmp::Ordering;

use itertools::Itertools;

use crate::curve::NurbsCurve;
use crate::evaluator::Evaluator;
use crate::misc::FloatingPoint;

/// The largest disagreement found between two evaluators over a curve
#[derive(Clone, Debug, PartialEq)]
pub struct CrossValidationReport<T> {
    samples: usize,
    max_position_deviation: T,
    max_velocity_deviation: T,
    worst_parameter: T,
}

impl<T: Copy> CrossValidationReport<T> {
    /// Number of parameters the evaluators were compared at
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn max_position_deviation(&self) -> T {
        self.max_position_deviation
    }

    pub fn max_velocity_deviation(&self) -> T {
        self.max_velocity_deviation
    }

    /// Parameter with the largest position deviation
    pub fn worst_parameter(&self) -> T {
        self.worst_parameter
    }
}

/// Parameters the evaluators are compared at:
/// regularly spaced over the domain, plus the distinct knots inside it when requested
fn comparison_parameters<T: FloatingPoint>(
    curve: &NurbsCurve<T>,
    options: &CrossValidationOptions<T>,
) -> Vec<T> {
    let (start, end) = curve.knots_domain();
    let samples = options.samples().max(2);
    let step = (end - start) / T::count(samples - 1);
    let regular = (0..samples).map(|i| {
        if i + 1 == samples {
            end
        } else {
            start + T::count(i) * step
        }
    });

    let knots = curve
        .knots()
        .multiplicity()
        .into_iter()
        .map(|m| *m.knot())
        .filter(|u| options.include_knots() && *u >= start && *u <= end);

    regular
        .chain(knots)
        .sorted_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .dedup()
        .collect()
}

/// Compare two evaluators over the knot domain of a curve
/// Fails if a position or velocity differs by more than the tolerances in `options`,
/// or if either evaluator produces a non-finite value.
///
/// # Example
/// ```
/// use deboor::prelude::*;
/// use nalgebra::Point3;
///
/// let curve = NurbsCurve::try_open_uniform(
///     2,
///     vec![
///         ControlPoint::new(Point3::new(0., 0., 0.), 1.),
///         ControlPoint::new(Point3::new(1., 2., 0.), 0.5),
///         ControlPoint::new(Point3::new(2., 0., 1.), 2.),
///         ControlPoint::new(Point3::new(3., 1., 0.), 1.),
///     ],
/// ).unwrap();
/// let report = cross_validate(&curve, &BasisSummation, &DeBoor, &CrossValidationOptions::default()).unwrap();
/// assert!(report.max_position_deviation() < 1e-9);
/// ```
pub fn cross_validate<T, R, C>(
    curve: &NurbsCurve<T>,
    reference: &R,
    candidate: &C,
    options: &CrossValidationOptions<T>,
) -> anyhow::Result<CrossValidationReport<T>>
where
    T: FloatingPoint,
    R: Evaluator<T> + ?Sized,
    C: Evaluator<T> + ?Sized,
{
    let parameters = comparison_parameters(curve, options);

    let mut report = CrossValidationReport {
        samples: parameters.len(),
        max_position_deviation: T::zero(),
        max_velocity_deviation: T::zero(),
        worst_parameter: curve.knots_domain().0,
    };

    for t in parameters {
        let expected = reference.evaluate(curve, t);
        let actual = candidate.evaluate(curve, t);
        anyhow::ensure!(
            expected.is_finite() && actual.is_finite(),
            "Non-finite evaluation at parameter {:?}",
            t
        );

        let position = (actual.position() - expected.position()).norm();
        let velocity = (actual.velocity() - expected.velocity()).norm();
        if position > report.max_position_deviation {
            report.max_position_deviation = position;
            report.worst_parameter = t;
        }
        report.max_velocity_deviation = report.max_velocity_deviation.max(velocity);
    }

    #[cfg(feature = "log")]
    log::debug!(
        "cross validation over {} parameters: position {:?}, velocity {:?}",
        report.samples,
        report.max_position_deviation,
        report.max_velocity_deviation
    );

    if report.max_position_deviation > options.position_tolerance()
        || report.max_velocity_deviation > options.velocity_tolerance()
    {
        #[cfg(feature = "log")]
        log::warn!(
            "cross validation exceeded tolerance at parameter {:?}",
            report.worst_parameter
        );
        anyhow::bail!(
            "Evaluators disagree: position deviation {:?} (tolerance {:?}), velocity deviation {:?} (tolerance {:?})",
            report.max_position_deviation,
            options.position_tolerance(),
            report.max_velocity_deviation,
            options.velocity_tolerance()
        );
    }

    Ok(report)
}
