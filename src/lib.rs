#![allow(clippy::needless_range_loop)]

mod curve;
mod evaluator;
mod knot;
mod misc;
mod validation;

pub use evaluator::evaluate;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::evaluator::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::validation::*;
}
