use nalgebra::{Point3, Vector3, Vector4};

use super::FloatingPoint;

/// A point lifted into projective space: `(w * x, w * y, w * z, w)`
/// the last element carries the accumulated weight
pub type Homogeneous<T> = Vector4<T>;

/// Lift a cartesian point with a weight into projective space
/// # Example
/// ```
/// use deboor::prelude::*;
/// use nalgebra::{Point3, Vector4};
/// let h = homogenize(&Point3::new(1., 2., 3.), 2.);
/// assert_eq!(h, Vector4::new(2., 4., 6., 2.));
/// ```
pub fn homogenize<T: FloatingPoint>(point: &Point3<T>, weight: T) -> Homogeneous<T> {
    Vector4::new(point.x * weight, point.y * weight, point.z * weight, weight)
}

/// Drop the weight component without dividing by it
/// Only meaningful after the caller has divided by `w` or when the weighted coordinates are wanted
pub fn project<T: FloatingPoint>(point: &Homogeneous<T>) -> Vector3<T> {
    point.xyz()
}

/// Divide by the weight component and drop it
/// Returns `None` if the weight is zero
pub fn dehomogenize<T: FloatingPoint>(point: &Homogeneous<T>) -> Option<Point3<T>> {
    let w = point.w;
    if w != T::zero() {
        Some(Point3::from(project(point) / w))
    } else {
        None
    }
}

/// Linear blend `(1 - alpha) * a + alpha * b`, the single step of the de Boor recursion
pub fn blend<T: FloatingPoint>(a: &Homogeneous<T>, b: &Homogeneous<T>, alpha: T) -> Homogeneous<T> {
    a * (T::one() - alpha) + b * alpha
}
