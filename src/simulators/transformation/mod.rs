//! Gate transformations
//!
//! A transformation applies one gate to one state. The strategies are
//! interchangeable and agree within floating point tolerance; they differ
//! only in how much of the expanded `2^n × 2^n` operator they build:
//!
//! | strategy           | operator storage | statevector | matrices |
//! |--------------------|------------------|-------------|----------|
//! | `FullMatrix`       | `4^n`            | yes         | yes      |
//! | `RowByRow`         | `2^k` per row    | yes         | yes      |
//! | `ElementByElement` | none             | yes         | yes      |
//! | `Direct`           | `2^(n-k)` table  | yes         | no       |

pub mod direct;
pub mod element_by_element;
pub mod full_matrix;
pub mod row_by_row;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use tracing::debug;

use crate::error::{ConfigurationError, TransformationError};
use crate::quantum::gate::{Gate, SimulatorGate};
use crate::quantum::matrix::conjugate_transpose;
use crate::quantum::{DensityMatrix, StateVector, Unitary};
use crate::simulators::config::{MatrixStrategy, StatevectorStrategy};
use crate::simulators::worker_pool::{clamp_concurrency, WorkerPool};

pub use direct::DirectTransformation;
pub use element_by_element::ElementByElementTransformation;
pub use full_matrix::FullMatrixTransformation;
pub use row_by_row::RowByRowTransformation;

/// Applies gates to statevectors
pub trait StatevectorTransformation: Send + Sync {
    /// Compute the expanded operator times `amplitudes`. The operator has
    /// already been validated for `amplitudes`' register size.
    fn transform(&self, operator: &SimulatorGate, amplitudes: &Array1<Complex64>) -> Array1<Complex64>;

    /// Apply an already extracted operator
    fn apply_operator(
        &self,
        operator: &SimulatorGate,
        state: &StateVector,
    ) -> Result<StateVector, TransformationError> {
        check_qubit_count(operator, state.qubit_count())?;
        let amplitudes = self.transform(operator, state.amplitudes());
        Ok(StateVector::from_amplitudes(state.qubit_count(), amplitudes))
    }

    /// Validate `gate` against the state and apply it.
    /// The input state is never modified.
    fn apply(&self, gate: &Gate, state: &StateVector) -> Result<StateVector, TransformationError> {
        let operator = gate.extract(state.qubit_count())?;
        self.apply_operator(&operator, state)
    }
}

/// Applies gates to unitary and density matrices
pub trait MatrixTransformation: Send + Sync {
    /// Compute the expanded operator times `matrix`
    fn transform(&self, operator: &SimulatorGate, matrix: &Array2<Complex64>) -> Array2<Complex64>;

    /// U' = G·U
    fn apply_to_unitary(&self, gate: &Gate, unitary: &Unitary) -> Result<Unitary, TransformationError> {
        let operator = gate.extract(unitary.qubit_count())?;
        let matrix = self.transform(&operator, unitary.matrix());
        Ok(Unitary::from_matrix(unitary.qubit_count(), matrix))
    }

    /// ρ' = G·ρ·G†, computed as G·(G·ρ)† since ρ is Hermitian
    fn apply_to_density_matrix(
        &self,
        gate: &Gate,
        density_matrix: &DensityMatrix,
    ) -> Result<DensityMatrix, TransformationError> {
        let qubit_count = density_matrix.qubit_count();
        let operator = gate.extract(qubit_count)?;
        let left = self.transform(&operator, density_matrix.matrix());
        let matrix = self.transform(&operator, &conjugate_transpose(&left));
        Ok(DensityMatrix::from_matrix(qubit_count, matrix))
    }
}

fn check_qubit_count(operator: &SimulatorGate, qubit_count: usize) -> Result<(), TransformationError> {
    if operator.circuit_qubit_count() != qubit_count {
        return Err(TransformationError::QubitCountMismatch {
            operator: operator.circuit_qubit_count(),
            state: qubit_count,
        });
    }
    Ok(())
}

fn pool(requested: usize, knob: &str) -> Result<WorkerPool, ConfigurationError> {
    WorkerPool::new(clamp_concurrency(requested, knob))
}

/// Statevector rows are single amplitudes with no columns to split, so the
/// expansion pool runs inline whatever `expansion_concurrency` says.
fn statevector_row_by_row(
    calculation_concurrency: usize,
    expansion_concurrency: usize,
) -> Result<RowByRowTransformation, ConfigurationError> {
    debug!(expansion_concurrency, "statevector rows are not expanded, running inline");
    Ok(RowByRowTransformation::new(
        pool(calculation_concurrency, "calculation_concurrency")?,
        WorkerPool::sequential(),
    ))
}

/// Build the statevector transformation selected by `strategy`
pub fn statevector_transformation(
    strategy: StatevectorStrategy,
) -> Result<Box<dyn StatevectorTransformation>, ConfigurationError> {
    debug!(?strategy, "building statevector transformation");

    let transformation: Box<dyn StatevectorTransformation> = match strategy {
        StatevectorStrategy::FullMatrix {
            expansion_concurrency,
        } => Box::new(FullMatrixTransformation::new(pool(
            expansion_concurrency,
            "expansion_concurrency",
        )?)),
        StatevectorStrategy::RowByRow {
            calculation_concurrency,
            expansion_concurrency,
        } => Box::new(statevector_row_by_row(
            calculation_concurrency,
            expansion_concurrency,
        )?),
        StatevectorStrategy::ElementByElement {
            calculation_concurrency,
        } => Box::new(ElementByElementTransformation::new(pool(
            calculation_concurrency,
            "calculation_concurrency",
        )?)),
        StatevectorStrategy::Direct {
            calculation_concurrency,
        } => Box::new(DirectTransformation::new(pool(
            calculation_concurrency,
            "calculation_concurrency",
        )?)),
    };

    Ok(transformation)
}

/// Build the matrix transformation selected by `strategy`
pub fn matrix_transformation(
    strategy: MatrixStrategy,
) -> Result<Box<dyn MatrixTransformation>, ConfigurationError> {
    debug!(?strategy, "building matrix transformation");

    let transformation: Box<dyn MatrixTransformation> = match strategy {
        MatrixStrategy::FullMatrix {
            expansion_concurrency,
        } => Box::new(FullMatrixTransformation::new(pool(
            expansion_concurrency,
            "expansion_concurrency",
        )?)),
        MatrixStrategy::RowByRow {
            calculation_concurrency,
            expansion_concurrency,
        } => Box::new(RowByRowTransformation::new(
            pool(calculation_concurrency, "calculation_concurrency")?,
            pool(expansion_concurrency, "expansion_concurrency")?,
        )),
        MatrixStrategy::ElementByElement {
            calculation_concurrency,
        } => Box::new(ElementByElementTransformation::new(pool(
            calculation_concurrency,
            "calculation_concurrency",
        )?)),
    };

    Ok(transformation)
}
