//! Expand the operator to the full register, then multiply densely.
//!
//! Fastest for small registers, but needs `4^n` complex entries.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::{MatrixTransformation, StatevectorTransformation};
use crate::quantum::gate::SimulatorGate;
use crate::simulators::simulator_matrix::SimulatorMatrix;
use crate::simulators::worker_pool::WorkerPool;

#[derive(Debug, Clone)]
pub struct FullMatrixTransformation {
    expansion: WorkerPool,
}

impl FullMatrixTransformation {
    pub fn new(expansion: WorkerPool) -> Self {
        FullMatrixTransformation { expansion }
    }

    fn expand(&self, operator: &SimulatorGate) -> Array2<Complex64> {
        SimulatorMatrix::new(operator).expand(&self.expansion)
    }
}

impl StatevectorTransformation for FullMatrixTransformation {
    fn transform(&self, operator: &SimulatorGate, amplitudes: &Array1<Complex64>) -> Array1<Complex64> {
        self.expand(operator).dot(amplitudes)
    }
}

impl MatrixTransformation for FullMatrixTransformation {
    fn transform(&self, operator: &SimulatorGate, matrix: &Array2<Complex64>) -> Array2<Complex64> {
        self.expand(operator).dot(matrix)
    }
}
