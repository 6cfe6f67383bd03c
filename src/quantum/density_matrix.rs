//! Density matrix representation of mixed states

use std::fmt::{self, Display};

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::StateError;
use crate::quantum::matrix;
use crate::quantum::state::{ket_label, StateVector, DEFAULT_TOLERANCE};

/// Represents a quantum state as a density matrix
#[derive(Clone, Debug, PartialEq)]
pub struct DensityMatrix {
    qubit_count: usize,

    /// The density matrix as a 2D array of complex values
    matrix: Array2<Complex64>,
}

impl DensityMatrix {
    /// Create a new density matrix from a 2D array
    pub fn new(qubit_count: usize, matrix: Array2<Complex64>) -> Result<Self, StateError> {
        let expected_dim = 1 << qubit_count;

        if matrix.dim() != (expected_dim, expected_dim) {
            return Err(StateError::DimensionMismatch {
                expected: expected_dim,
                actual: matrix.nrows(),
            });
        }

        let dm = DensityMatrix {
            qubit_count,
            matrix,
        };
        dm.validate(DEFAULT_TOLERANCE)?;

        Ok(dm)
    }

    pub(crate) fn from_matrix(qubit_count: usize, matrix: Array2<Complex64>) -> Self {
        DensityMatrix {
            qubit_count,
            matrix,
        }
    }

    /// Create a density matrix from a state vector: ρ = |ψ⟩⟨ψ|
    pub fn from_state_vector(state: &StateVector) -> Self {
        let dim = state.dimension();
        let amplitudes = state.amplitudes();
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| amplitudes[i] * amplitudes[j].conj());

        DensityMatrix {
            qubit_count: state.qubit_count(),
            matrix,
        }
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Calculate the dimension of the Hilbert space
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Get a reference to the matrix
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Array2<Complex64> {
        self.matrix
    }

    /// Check Hermiticity, unit trace and positive semidefiniteness.
    ///
    /// Together these are equivalent to the eigenvalues being real,
    /// non-negative and summing to one.
    pub fn validate(&self, tolerance: f64) -> Result<(), StateError> {
        if !matrix::is_hermitian(&self.matrix, tolerance) {
            return Err(StateError::NotHermitian);
        }

        let trace = self.trace();
        if (trace - 1.0).abs() > tolerance {
            return Err(StateError::InvalidTrace { trace });
        }

        if !matrix::is_positive_semidefinite(&self.matrix, tolerance) {
            return Err(StateError::NotPositiveSemidefinite);
        }

        Ok(())
    }

    /// Calculate the purity Tr(ρ²)
    pub fn purity(&self) -> f64 {
        let dim = self.dimension();
        let mut sum = Complex64::new(0.0, 0.0);
        for i in 0..dim {
            for j in 0..dim {
                sum += self.matrix[[i, j]] * self.matrix[[j, i]];
            }
        }
        sum.re
    }

    /// Calculate the trace of the density matrix
    pub fn trace(&self) -> f64 {
        self.matrix.diag().iter().map(|x| x.re).sum()
    }

    /// Probability of every basis index (the diagonal)
    pub fn probabilities(&self) -> Vec<f64> {
        self.matrix.diag().iter().map(|x| x.re).collect()
    }
}

impl Display for DensityMatrix {
    /// Populations first, then coherences, as `ρ_ij |i⟩⟨j|` terms.
    /// Entries with modulus at or below [`DEFAULT_TOLERANCE`] are omitted.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}-qubit density matrix, purity {:.6}:",
            self.qubit_count,
            self.purity()
        )?;

        let populations = self.matrix.indexed_iter().filter(|((row, col), _)| row == col);
        let coherences = self.matrix.indexed_iter().filter(|((row, col), _)| row != col);

        for ((row, col), value) in populations.chain(coherences) {
            if value.norm() > DEFAULT_TOLERANCE {
                writeln!(
                    f,
                    "  ({:.6}{:+.6}i) |{}⟩⟨{}|",
                    value.re,
                    value.im,
                    ket_label(row, self.qubit_count),
                    ket_label(col, self.qubit_count)
                )?;
            }
        }

        Ok(())
    }
}
