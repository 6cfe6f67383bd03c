//! Dense complex matrix helpers shared by gates and states

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Absolute tolerance used when checking operator unitarity
pub const UNITARY_TOLERANCE: f64 = 1e-6;

/// Identity matrix of the given dimension
pub fn identity(dim: usize) -> Array2<Complex64> {
    Array2::from_diag(&Array1::from_elem(dim, Complex64::new(1.0, 0.0)))
}

/// Conjugate transpose M†
pub fn conjugate_transpose(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().map(|x| x.conj())
}

/// Returns `true` if every entry of `a` is within `tolerance` of `b`
pub fn approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, tolerance: f64) -> bool {
    a.shape() == b.shape()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).norm() <= tolerance)
}

/// Check M·M† ≈ I
pub fn is_unitary(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }

    let product = matrix.dot(&conjugate_transpose(matrix));
    approx_eq(&product, &identity(rows), tolerance)
}

/// Check M = M†
pub fn is_hermitian(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }

    for i in 0..rows {
        for j in 0..=i {
            if (matrix[[i, j]] - matrix[[j, i]].conj()).norm() > tolerance {
                return false;
            }
        }
    }

    true
}

/// Check that a Hermitian matrix has no eigenvalue below `-tolerance`.
///
/// Attempts a Cholesky factorisation of `M + tolerance·I`; it exists exactly
/// when the shifted matrix is positive definite.
pub fn is_positive_semidefinite(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
    let dim = matrix.nrows();
    let mut lower: Array2<Complex64> = Array2::zeros((dim, dim));

    for j in 0..dim {
        let mut diagonal = matrix[[j, j]].re + tolerance;
        for k in 0..j {
            diagonal -= lower[[j, k]].norm_sqr();
        }
        if diagonal <= 0.0 {
            return false;
        }
        let pivot = diagonal.sqrt();
        lower[[j, j]] = Complex64::new(pivot, 0.0);

        for i in (j + 1)..dim {
            let mut sum = matrix[[i, j]];
            for k in 0..j {
                sum -= lower[[i, k]] * lower[[j, k]].conj();
            }
            lower[[i, j]] = sum / pivot;
        }
    }

    true
}

/// Exponent `k` such that `2^k == dimension`, if any
pub fn log2_exact(dimension: usize) -> Option<usize> {
    if dimension.is_power_of_two() {
        Some(dimension.trailing_zeros() as usize)
    } else {
        None
    }
}
