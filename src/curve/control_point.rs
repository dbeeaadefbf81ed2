use nalgebra::{convert, Point3};
use simba::scalar::SupersetOf;

use crate::misc::{homogenize, FloatingPoint, Homogeneous};

/// A control point of a rational curve: a cartesian position and its weight
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint<T: FloatingPoint> {
    position: Point3<T>,
    weight: T,
}

impl<T: FloatingPoint> ControlPoint<T> {
    pub fn new(position: Point3<T>, weight: T) -> Self {
        Self { position, weight }
    }

    /// Create a control point with unit weight
    pub fn unweighted(position: Point3<T>) -> Self {
        Self::new(position, T::one())
    }

    pub fn position(&self) -> &Point3<T> {
        &self.position
    }

    pub fn weight(&self) -> T {
        self.weight
    }

    /// The control point lifted into projective space
    pub fn homogenized(&self) -> Homogeneous<T> {
        homogenize(&self.position, self.weight)
    }

    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> ControlPoint<F> {
        ControlPoint::new(self.position.cast(), convert(self.weight))
    }
}

impl<T: FloatingPoint> From<Point3<T>> for ControlPoint<T> {
    fn from(position: Point3<T>) -> Self {
        Self::unweighted(position)
    }
}

impl<T: FloatingPoint> From<(Point3<T>, T)> for ControlPoint<T> {
    fn from((position, weight): (Point3<T>, T)) -> Self {
        Self::new(position, weight)
    }
}
