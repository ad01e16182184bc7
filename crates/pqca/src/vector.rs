//! Lattice coordinate vectors.

use std::fmt;
use std::ops::{Add, Index, Sub};

/// An n-dimensional vector of integer coordinates.
///
/// Used to address points in a qubit lattice before they are flattened
/// to linear qubit names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vector(Vec<i64>);

impl Vector {
    /// Create a vector from its entries.
    pub fn new(entries: impl Into<Vec<i64>>) -> Self {
        Self(entries.into())
    }

    /// Append an entry, producing a vector one dimension higher.
    #[must_use]
    pub fn extend(&self, next_entry: i64) -> Self {
        let mut entries = self.0.clone();
        entries.push(next_entry);
        Self(entries)
    }

    /// The entries in order.
    pub fn entries(&self) -> &[i64] {
        &self.0
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combine two vectors entry-wise. Extra entries of the longer
    /// vector are dropped.
    fn action(&self, other: &Self, action: impl Fn(i64, i64) -> i64) -> Self {
        Self(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| action(*a, *b))
                .collect(),
        )
    }
}

impl From<Vec<i64>> for Vector {
    fn from(entries: Vec<i64>) -> Self {
        Self(entries)
    }
}

impl Index<usize> for Vector {
    type Output = i64;

    fn index(&self, index: usize) -> &i64 {
        &self.0[index]
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        self.action(other, |a, b| a + b)
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        self.action(other, |a, b| a - b)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let a = Vector::new([1, 2]);
        let b = Vector::new([3, 4]);
        assert_eq!(&a + &b, Vector::new([4, 6]));
    }

    #[test]
    fn test_sub() {
        let a = Vector::new([3, 4]);
        let b = Vector::new([1, 2]);
        assert_eq!(&a - &b, Vector::new([2, 2]));
    }

    #[test]
    fn test_extend() {
        let v = Vector::new([1]).extend(2).extend(3);
        assert_eq!(v, Vector::new([1, 2, 3]));
    }

    #[test]
    fn test_mismatched_lengths_truncate() {
        let a = Vector::new([1, 2, 3]);
        let b = Vector::new([10, 20]);
        assert_eq!(&a + &b, Vector::new([11, 22]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::new([1, 2]).to_string(), "Vector[1, 2]");
    }
}
