pub mod floating_point;
pub mod homogeneous;

pub use floating_point::*;
pub use homogeneous::*;
