use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Scalar type a curve is evaluated over (f32, f64)
/// Mainly used to identify the type of the field in nalgebra
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Convert an f64 constant (tolerance, literal) into the scalar type
    fn constant(value: f64) -> Self {
        nalgebra::convert(value)
    }

    /// Convert a count or index (degree, sample number) into the scalar type
    fn count(value: usize) -> Self {
        nalgebra::convert(value as f64)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
