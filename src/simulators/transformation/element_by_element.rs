//! Compute every output entry independently from single entries of the
//! expanded operator.
//!
//! Nothing but the small operator is held in memory, at the cost of a full
//! `2^n` scan per output entry.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::{MatrixTransformation, StatevectorTransformation};
use crate::quantum::gate::SimulatorGate;
use crate::simulators::simulator_matrix::SimulatorMatrix;
use crate::simulators::worker_pool::WorkerPool;

#[derive(Debug, Clone)]
pub struct ElementByElementTransformation {
    calculation: WorkerPool,
}

impl ElementByElementTransformation {
    pub fn new(calculation: WorkerPool) -> Self {
        ElementByElementTransformation { calculation }
    }
}

impl StatevectorTransformation for ElementByElementTransformation {
    fn transform(&self, operator: &SimulatorGate, amplitudes: &Array1<Complex64>) -> Array1<Complex64> {
        let matrix = SimulatorMatrix::new(operator);
        let dim = matrix.dimension();
        let mut output = vec![Complex64::new(0.0, 0.0); dim];

        self.calculation.fill(&mut output, |row| {
            (0..dim)
                .map(|col| matrix.value(row, col) * amplitudes[col])
                .sum()
        });

        Array1::from_vec(output)
    }
}

impl MatrixTransformation for ElementByElementTransformation {
    fn transform(&self, operator: &SimulatorGate, input: &Array2<Complex64>) -> Array2<Complex64> {
        let matrix = SimulatorMatrix::new(operator);
        let dim = matrix.dimension();
        let mut output = vec![Complex64::new(0.0, 0.0); dim * dim];

        self.calculation.fill(&mut output, |element| {
            let (row, col) = (element / dim, element % dim);
            (0..dim)
                .map(|k| matrix.value(row, k) * input[[k, col]])
                .sum()
        });

        Array2::from_shape_vec((dim, dim), output)
            .expect("buffer length is dim * dim by construction")
    }
}
