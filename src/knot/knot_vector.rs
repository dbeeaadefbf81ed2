use std::ops::Index;

use itertools::Itertools;
use nalgebra::convert;
use simba::scalar::SupersetOf;

use crate::misc::FloatingPoint;
use crate::prelude::KnotMultiplicity;

/// Knot vector representation
/// The knots are expected to be non-decreasing; the vector itself does not enforce it
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnotVector<T>(Vec<T>);

impl<T: FloatingPoint> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    /// Create an open uniform knot vector for `count` control points
    /// The first and last knots repeat `degree + 1` times and the interior knots step by one,
    /// so the curve interpolates its first and last control points
    /// # Example
    /// ```
    /// use deboor::prelude::KnotVector;
    /// let knots: KnotVector<f64> = KnotVector::open_uniform(5, 2);
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// ```
    pub fn open_uniform(count: usize, degree: usize) -> Self {
        let last = count.saturating_sub(degree);
        let mut knots = Vec::with_capacity(count + degree + 1);
        knots.extend(std::iter::repeat_n(T::zero(), degree + 1));
        knots.extend((1..last).map(T::count));
        knots.extend(std::iter::repeat_n(T::count(last), degree + 1));
        Self(knots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn first(&self) -> T {
        self.0[0]
    }

    pub fn last(&self) -> T {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Get the domain of the knot vector by degree
    /// The domain is `[knots[degree], knots[len - degree - 1]]`
    pub fn domain(&self, degree: usize) -> (T, T) {
        (self.0[degree], self.0[self.0.len() - 1 - degree])
    }

    /// Clamp a parameter into the domain of the knot vector
    pub fn clamp(&self, degree: usize, u: T) -> T {
        let (min, max) = self.domain(degree);
        u.clamp(min, max)
    }

    /// Check that no knot is smaller than the knot before it
    pub fn is_non_decreasing(&self) -> bool {
        self.0.iter().tuple_windows().all(|(a, b)| a <= b)
    }

    /// Get the multiplicity of each knot
    /// # Example
    /// ```
    /// use deboor::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 2., 3., 3., 3.]);
    /// let knot_multiplicity = knots.multiplicity();
    /// assert_eq!(knot_multiplicity.len(), 4);
    /// assert_eq!(knot_multiplicity[0].multiplicity(), 3);
    /// assert_eq!(knot_multiplicity[1].multiplicity(), 1);
    /// assert_eq!(knot_multiplicity[2].multiplicity(), 2);
    /// assert_eq!(knot_multiplicity[3].multiplicity(), 3);
    /// ```
    pub fn multiplicity(&self) -> Vec<KnotMultiplicity<T>> {
        let mut mult = vec![];
        let Some(first) = self.0.first() else {
            return mult;
        };

        let mut current = KnotMultiplicity::new(*first, 0);
        self.0.iter().for_each(|knot| {
            if (*knot - *current.knot()).abs() > T::default_epsilon() {
                mult.push(current.clone());
                current = KnotMultiplicity::new(*knot, 0);
            }
            current.increment_multiplicity();
        });
        mult.push(current);

        mult
    }

    /// Check if the knot vector is clamped
    /// `clamped` means the first and last knots have a multiplicity greater than the degree
    /// e.g. [0, 0, 0, 1, 2, 3, 3, 3] with degree 2 is clamped
    pub fn is_clamped(&self, degree: usize) -> bool {
        let multiplicity = self.multiplicity();
        match (multiplicity.first(), multiplicity.last()) {
            (Some(start), Some(end)) => start.is_full(degree) && end.is_full(degree),
            _ => false,
        }
    }

    /// Find the knot span index by binary search
    /// `n` is the number of control points, so `knots[n]` is the end of the domain.
    /// Returns `k` such that `knots[k] <= u < knots[k + 1]`,
    /// parameters at or beyond the domain ends snap to the first or last non-empty span.
    ///
    /// # Example
    /// ```
    /// use deboor::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// assert_eq!(knots.find_knot_span_index(5, 2, 2.5), 4);
    /// assert_eq!(knots.find_knot_span_index(5, 2, 3.0), 4);
    /// assert_eq!(knots.find_knot_span_index(5, 2, -1.0), 2);
    /// ```
    pub fn find_knot_span_index(&self, n: usize, degree: usize, u: T) -> usize {
        // the boundary spans step past empty spans left by a repeated end knot
        if u >= self[n] {
            let mut span = n - 1;
            while span > degree && self[span] == self[span + 1] {
                span -= 1;
            }
            return span;
        }

        if u <= self[degree] {
            let mut span = degree;
            while span + 1 < n && self[span] == self[span + 1] {
                span += 1;
            }
            return span;
        }

        let mut low = degree;
        let mut high = n;
        let mut mid = (low + high) / 2;
        while u < self[mid] || self[mid + 1] <= u {
            if u < self[mid] {
                high = mid;
            } else {
                low = mid;
            }
            let next = (low + high) / 2;
            if mid == next {
                // only reachable with a decreasing knot vector
                break;
            }
            mid = next;
        }

        mid
    }

    /// Cast the knot vector to another floating point type
    /// # Example
    /// ```
    /// use deboor::prelude::*;
    /// let knots: KnotVector<f64> = KnotVector::new(vec![0., 0., 1., 2., 2.]);
    /// let knots2 = knots.cast::<f32>();
    /// assert_eq!(knots2.last(), 2.0f32);
    /// ```
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> KnotVector<F> {
        KnotVector::new(self.0.iter().map(|v| convert(*v)).collect())
    }
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> FromIterator<T> for KnotVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
