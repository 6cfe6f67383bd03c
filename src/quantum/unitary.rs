//! Unitary matrix representation of a whole circuit

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::StateError;
use crate::quantum::matrix;

/// The accumulated operator U of an `n`-qubit circuit
#[derive(Clone, Debug, PartialEq)]
pub struct Unitary {
    qubit_count: usize,
    matrix: Array2<Complex64>,
}

impl Unitary {
    /// Validated unitary from an explicit matrix
    pub fn new(qubit_count: usize, matrix: Array2<Complex64>, tolerance: f64) -> Result<Self, StateError> {
        let dim = 1 << qubit_count;
        if matrix.dim() != (dim, dim) {
            return Err(StateError::DimensionMismatch {
                expected: dim,
                actual: matrix.nrows(),
            });
        }

        let unitary = Unitary { qubit_count, matrix };
        unitary.validate(tolerance)?;
        Ok(unitary)
    }

    /// The identity operator, starting point of unitary evolution
    pub fn identity(qubit_count: usize) -> Self {
        Unitary {
            qubit_count,
            matrix: matrix::identity(1 << qubit_count),
        }
    }

    pub(crate) fn from_matrix(qubit_count: usize, matrix: Array2<Complex64>) -> Self {
        Unitary { qubit_count, matrix }
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Array2<Complex64> {
        self.matrix
    }

    /// Check U·U† ≈ I
    pub fn validate(&self, tolerance: f64) -> Result<(), StateError> {
        if !matrix::is_unitary(&self.matrix, tolerance) {
            return Err(StateError::NotUnitary);
        }
        Ok(())
    }
}
