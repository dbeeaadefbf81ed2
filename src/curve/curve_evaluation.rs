use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;

/// Position and first derivative of a curve at a parameter
/// `velocity` is the derivative with respect to the curve parameter, not to arc length
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveEvaluation<T: FloatingPoint> {
    position: Point3<T>,
    velocity: Vector3<T>,
}

impl<T: FloatingPoint> CurveEvaluation<T> {
    pub fn new(position: Point3<T>, velocity: Vector3<T>) -> Self {
        Self { position, velocity }
    }

    pub fn position(&self) -> &Point3<T> {
        &self.position
    }

    pub fn velocity(&self) -> &Vector3<T> {
        &self.velocity
    }

    /// Normalized velocity, `None` where the curve is stationary
    pub fn tangent(&self) -> Option<Vector3<T>> {
        self.velocity.try_normalize(T::zero())
    }

    /// True if every component of the position and velocity is finite
    /// Zero weights make the homogeneous division produce NaN or infinity
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.velocity.iter())
            .all(|v| v.is_finite())
    }

    pub fn into_parts(self) -> (Point3<T>, Vector3<T>) {
        (self.position, self.velocity)
    }
}
