//! Circuit evolution
//!
//! A [`Simulator`] owns one transformation per state representation, built
//! once from its [`SimulatorConfig`]. Evolution is a strict left fold over
//! the gate list: gate `i + 1` starts only after gate `i` has produced its
//! whole output, and the first failing gate ends the evolution. The final
//! state is validated once, after the last gate.

use tracing::{debug, trace, warn};

use crate::error::{ConfigurationError, EvolutionError, StateError, TransformationError};
use crate::quantum::gate::Gate;
use crate::quantum::{DensityMatrix, StateVector, Unitary};
use crate::simulators::config::SimulatorConfig;
use crate::simulators::transformation::{
    matrix_transformation, statevector_transformation, MatrixTransformation,
    StatevectorTransformation,
};

/// Apply `gates` in order, starting from `initial`.
///
/// Errors are tagged with the index and descriptor of the failing gate; no
/// partial state is returned.
pub fn evolve<S, F>(gates: &[Gate], initial: S, mut step: F) -> Result<S, EvolutionError>
where
    F: FnMut(&Gate, &S) -> Result<S, TransformationError>,
{
    gates
        .iter()
        .enumerate()
        .try_fold(initial, |state, (index, gate)| {
            trace!(index, %gate, "applying gate");
            step(gate, &state).map_err(|source| EvolutionError::Application {
                index,
                gate: gate.clone(),
                source,
            })
        })
}

fn check_result(result: Result<(), StateError>) -> Result<(), EvolutionError> {
    result.map_err(|error| {
        warn!(%error, "final state failed validation");
        EvolutionError::ResultValidation(error)
    })
}

/// Quantum circuit simulator with configurable gate transformations
pub struct Simulator {
    config: SimulatorConfig,
    statevector: Box<dyn StatevectorTransformation>,
    unitary: Box<dyn MatrixTransformation>,
    density_matrix: Box<dyn MatrixTransformation>,
}

impl Simulator {
    /// Build the transformations and their worker pools
    pub fn new(config: SimulatorConfig) -> Result<Self, ConfigurationError> {
        debug!(?config, "building simulator");

        Ok(Simulator {
            statevector: statevector_transformation(config.statevector)?,
            unitary: matrix_transformation(config.unitary)?,
            density_matrix: matrix_transformation(config.density_matrix)?,
            config,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Evolve a statevector through `gates`; the result must be normalized
    pub fn statevector(&self, gates: &[Gate], initial: &StateVector) -> Result<StateVector, EvolutionError> {
        debug!(
            gates = gates.len(),
            qubits = initial.qubit_count(),
            "evolving statevector"
        );

        let state = evolve(gates, initial.clone(), |gate, state| {
            self.statevector.apply(gate, state)
        })?;
        check_result(state.validate(self.config.tolerance))?;

        debug!(norm = state.norm_sqr(), "statevector evolution finished");
        Ok(state)
    }

    /// Accumulate the unitary of `gates` on an `n`-qubit register
    pub fn unitary(&self, gates: &[Gate], qubit_count: usize) -> Result<Unitary, EvolutionError> {
        debug!(gates = gates.len(), qubits = qubit_count, "evolving unitary");

        let unitary = evolve(gates, Unitary::identity(qubit_count), |gate, unitary| {
            self.unitary.apply_to_unitary(gate, unitary)
        })?;
        check_result(unitary.validate(self.config.tolerance))?;

        debug!("unitary evolution finished");
        Ok(unitary)
    }

    /// Evolve a density matrix through `gates`
    pub fn density_matrix(
        &self,
        gates: &[Gate],
        initial: &DensityMatrix,
    ) -> Result<DensityMatrix, EvolutionError> {
        debug!(
            gates = gates.len(),
            qubits = initial.qubit_count(),
            "evolving density matrix"
        );

        let density_matrix = evolve(gates, initial.clone(), |gate, density_matrix| {
            self.density_matrix.apply_to_density_matrix(gate, density_matrix)
        })?;
        check_result(density_matrix.validate(self.config.tolerance))?;

        debug!(purity = density_matrix.purity(), "density matrix evolution finished");
        Ok(density_matrix)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        // Single-worker pools run inline and never fail to build
        Simulator::new(SimulatorConfig::default())
            .expect("default configuration uses inline worker pools")
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator").field("config", &self.config).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evolve_reports_failing_gate() {
        let simulator = Simulator::default();
        let gates = vec![Gate::not(0), Gate::not(5), Gate::not(1)];
        let mut applied = 0;
        let result = evolve(&gates, StateVector::zero_state(2), |gate, state| {
            applied += 1;
            simulator.statevector.apply(gate, state)
        });

        assert_eq!(applied, 2);
        match result {
            Err(EvolutionError::Application { index, gate, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(gate, Gate::not(5));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_gate_list_returns_initial_state() {
        let simulator = Simulator::default();
        let initial = StateVector::from_bits("10").unwrap();
        let state = simulator.statevector(&[], &initial).unwrap();
        assert_eq!(state, initial);
    }
}
