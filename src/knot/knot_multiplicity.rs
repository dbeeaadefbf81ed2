/// A distinct knot value and the number of times it repeats in a knot vector
#[derive(Clone, Debug, PartialEq)]
pub struct KnotMultiplicity<T> {
    knot: T,
    multiplicity: usize,
}

impl<T> KnotMultiplicity<T> {
    pub fn new(knot: T, multiplicity: usize) -> Self {
        Self { knot, multiplicity }
    }

    pub fn knot(&self) -> &T {
        &self.knot
    }

    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// A knot of multiplicity `degree + 1` or more pins the curve to a control point
    pub fn is_full(&self, degree: usize) -> bool {
        self.multiplicity > degree
    }

    pub(crate) fn increment_multiplicity(&mut self) {
        self.multiplicity += 1;
    }
}
