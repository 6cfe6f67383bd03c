//! Compute one output row at a time from the matching row of the expanded
//! operator.
//!
//! Row `r` of the expanded operator is non-zero only in the `2^k` columns of
//! `r`'s coupled group, so each output amplitude costs `2^k` products. For
//! matrix states, output row `r` is a combination of `2^k` input rows and
//! its `2^n` columns are split across the expansion workers.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::{MatrixTransformation, StatevectorTransformation};
use crate::quantum::gate::SimulatorGate;
use crate::simulators::simulator_matrix::SimulatorMatrix;
use crate::simulators::worker_pool::WorkerPool;

#[derive(Debug, Clone)]
pub struct RowByRowTransformation {
    calculation: WorkerPool,
    expansion: WorkerPool,
}

impl RowByRowTransformation {
    /// The expansion pool only splits the columns of matrix rows
    pub fn new(calculation: WorkerPool, expansion: WorkerPool) -> Self {
        RowByRowTransformation {
            calculation,
            expansion,
        }
    }

    pub fn calculation_workers(&self) -> usize {
        self.calculation.workers()
    }

    pub fn expansion_workers(&self) -> usize {
        self.expansion.workers()
    }
}

impl StatevectorTransformation for RowByRowTransformation {
    fn transform(&self, operator: &SimulatorGate, amplitudes: &Array1<Complex64>) -> Array1<Complex64> {
        let matrix = SimulatorMatrix::new(operator);
        let mut output = vec![Complex64::new(0.0, 0.0); matrix.dimension()];

        self.calculation.fill(&mut output, |row| {
            matrix
                .row(row)
                .map(|(col, value)| value * amplitudes[col])
                .sum()
        });

        Array1::from_vec(output)
    }
}

impl MatrixTransformation for RowByRowTransformation {
    fn transform(&self, operator: &SimulatorGate, input: &Array2<Complex64>) -> Array2<Complex64> {
        let matrix = SimulatorMatrix::new(operator);
        let dim = matrix.dimension();
        let mut output = vec![Complex64::new(0.0, 0.0); dim * dim];

        self.calculation.for_each_unit(&mut output, dim, |row, output_row| {
            let entries: Vec<(usize, Complex64)> = matrix.row(row).collect();
            self.expansion.fill(output_row, |col| {
                entries
                    .iter()
                    .map(|&(k, value)| value * input[[k, col]])
                    .sum()
            });
        });

        Array2::from_shape_vec((dim, dim), output)
            .expect("buffer length is dim * dim by construction")
    }
}
