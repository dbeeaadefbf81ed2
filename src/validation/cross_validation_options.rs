use crate::misc::FloatingPoint;

/// Options for comparing two evaluators over a curve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossValidationOptions<T> {
    /// Number of regularly spaced parameters over the knot domain
    samples: usize,
    /// Maximum allowed distance between the two positions
    position_tolerance: T,
    /// Maximum allowed distance between the two velocities
    velocity_tolerance: T,
    /// Also compare at every distinct knot inside the domain
    include_knots: bool,
}

impl<T: FloatingPoint> Default for CrossValidationOptions<T> {
    fn default() -> Self {
        Self {
            samples: 64,
            position_tolerance: T::constant(1e-6),
            velocity_tolerance: T::constant(1e-6),
            include_knots: true,
        }
    }
}

impl<T: Copy> CrossValidationOptions<T> {
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn position_tolerance(&self) -> T {
        self.position_tolerance
    }

    pub fn velocity_tolerance(&self) -> T {
        self.velocity_tolerance
    }

    pub fn include_knots(&self) -> bool {
        self.include_knots
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_position_tolerance(mut self, tol: T) -> Self {
        self.position_tolerance = tol;
        self
    }

    pub fn with_velocity_tolerance(mut self, tol: T) -> Self {
        self.velocity_tolerance = tol;
        self
    }

    pub fn with_include_knots(mut self, include_knots: bool) -> Self {
        self.include_knots = include_knots;
        self
    }
}
