// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Scalar and matrix primitives stored in tree leaves. These are the only
// payload types node fields hold besides other nodes and the cardinality
// containers.

use std::fmt;

use crate::containers::Node;

/// Complex scalar used for constant values and matrix elements.
pub type Complex = num_complex::Complex64;

/// One of the three Pauli measurement axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        write!(f, "{name}")
    }
}

impl Node for Axis {}

/// File version identifier: an ordered sequence of integer components,
/// major first. Empty only in incomplete trees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub items: Vec<i64>,
}

impl Version {
    pub fn new(items: Vec<i64>) -> Version {
        Version { items }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl Node for Version {
    fn is_complete(&self) -> bool {
        !self.items.is_empty()
    }
}

/// Row-major dense two-dimensional array. Element access is 1-based,
/// following the conventions of the input language.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    num_rows: usize,
    num_cols: usize,
}

/// Matrix of real numbers.
pub type RMatrix = Matrix<f64>;

/// Matrix of complex numbers.
pub type CMatrix = Matrix<Complex>;

impl<T: Clone + Default> Matrix<T> {
    /// Creates a zero-initialized matrix of the given size.
    pub fn new(num_rows: usize, num_cols: usize) -> Matrix<T> {
        Matrix {
            data: vec![T::default(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }
}

impl<T> Matrix<T> {
    /// Creates a matrix from row-major data. The number of rows is inferred.
    ///
    /// # Panics
    ///
    /// Panics when `num_cols` is zero or does not divide the data length.
    pub fn from_row_major(data: Vec<T>, num_cols: usize) -> Matrix<T> {
        assert!(
            num_cols > 0 && data.len() % num_cols == 0,
            "invalid matrix shape"
        );
        let num_rows = data.len() / num_cols;
        Matrix {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates a column vector.
    pub fn col_vector(data: Vec<T>) -> Matrix<T> {
        let num_rows = data.len();
        Matrix {
            data,
            num_rows,
            num_cols: 1,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the element at the given 1-based position.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn at(&self, row: usize, col: usize) -> &T {
        self.get(row, col).expect("matrix index out of range")
    }

    /// Mutable 1-based element access.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        assert!(
            row >= 1 && row <= self.num_rows && col >= 1 && col <= self.num_cols,
            "matrix index out of range"
        );
        &mut self.data[(row - 1) * self.num_cols + col - 1]
    }

    /// Range-checked 1-based element access.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < 1 || row > self.num_rows || col < 1 || col > self.num_cols {
            return None;
        }
        self.data.get((row - 1) * self.num_cols + col - 1)
    }

    /// The elements in row-major order.
    pub fn row_major(&self) -> &[T] {
        &self.data
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    /// Renders as `[a, b; c, d]` with `;` between rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 1..=self.num_rows {
            if row > 1 {
                write!(f, "; ")?;
            }
            for col in 1..=self.num_cols {
                if col > 1 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.at(row, col))?;
            }
        }
        write!(f, "]")
    }
}

impl<T> Node for Matrix<T> {}

impl Node for bool {}
impl Node for i64 {}
impl Node for f64 {}
impl Node for String {}
impl Node for Complex {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_shape_and_access() {
        let m = RMatrix::from_row_major(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_cols(), 3);
        assert_eq!(*m.at(1, 1), 1.0);
        assert_eq!(*m.at(2, 3), 6.0);
        assert!(m.get(0, 1).is_none());
        assert!(m.get(2, 4).is_none());
    }

    #[test]
    #[should_panic(expected = "matrix index out of range")]
    fn test_matrix_at_out_of_range_panics() {
        let m = RMatrix::new(2, 2);
        let _ = m.at(3, 1);
    }

    #[test]
    fn test_matrix_equality() {
        let a = RMatrix::from_row_major(vec![1.0, 2.0, 3.0, 4.0], 2);
        let b = RMatrix::from_row_major(vec![1.0, 2.0, 3.0, 4.0], 2);
        // Same data, different shape.
        let c = RMatrix::from_row_major(vec![1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_matrix_display() {
        let m = RMatrix::from_row_major(vec![1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(m.to_string(), "[1, 2; 3, 4]");
    }

    #[test]
    fn test_version_display_and_completeness() {
        let version = Version::new(vec![1, 0]);
        assert_eq!(version.to_string(), "1.0");
        assert!(version.is_complete());
        assert!(!Version::default().is_complete());
    }
}
