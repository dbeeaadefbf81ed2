pub mod control_point;
pub mod curve_evaluation;
pub mod nurbs_curve;
pub use control_point::*;
pub use curve_evaluation::*;
pub use nurbs_curve::*;
