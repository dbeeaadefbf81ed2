#![cfg(feature = "serde")]

use approx::assert_relative_eq;
use deboor::prelude::*;
use nalgebra::Point3;

#[test]
fn test_serialization() {
    let curve = NurbsCurve::try_new(
        2,
        vec![
            ControlPoint::new(Point3::new(1., 0., 0.), 1.),
            ControlPoint::new(Point3::new(1., 1., 0.), std::f64::consts::FRAC_1_SQRT_2),
            ControlPoint::new(Point3::new(0., 1., 0.), 1.),
        ],
        vec![0., 0., 0., 1., 1., 1.],
    )
    .unwrap();
    let json = serde_json::to_string_pretty(&curve).unwrap();
    let restored: NurbsCurve<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.degree(), curve.degree());
    assert_eq!(restored.knots(), curve.knots());
    assert_relative_eq!(restored.point_at(0.3), curve.point_at(0.3), epsilon = 1e-12);
    assert_relative_eq!(restored.tangent_at(0.3), curve.tangent_at(0.3), epsilon = 1e-12);

    let method: EvaluationMethod = serde_json::from_str("\"BasisSummation\"").unwrap();
    assert_eq!(method, EvaluationMethod::BasisSummation);
}
