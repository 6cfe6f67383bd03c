//! Engine configuration
//!
//! Strategies carry their own concurrency knobs. Values are fixed when a
//! [`Simulator`](crate::simulators::Simulator) is built and reused for every
//! gate of every evolution it runs. A concurrency of 0 is clamped to 1.

use serde::{Deserialize, Serialize};

use crate::quantum::state::DEFAULT_TOLERANCE;

/// How gates are applied to a statevector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatevectorStrategy {
    /// Expand the operator to `2^n × 2^n` and multiply
    FullMatrix { expansion_concurrency: usize },

    /// Compute each output amplitude from its row of the expanded operator.
    /// `expansion_concurrency` applies to matrix states only and is ignored here.
    RowByRow {
        calculation_concurrency: usize,
        expansion_concurrency: usize,
    },

    /// Compute each output amplitude from individual operator entries
    ElementByElement { calculation_concurrency: usize },

    /// Multiply each coupled group by the small operator in place
    Direct { calculation_concurrency: usize },
}

impl Default for StatevectorStrategy {
    fn default() -> Self {
        StatevectorStrategy::Direct {
            calculation_concurrency: 1,
        }
    }
}

/// How gates are applied to unitary and density matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixStrategy {
    FullMatrix { expansion_concurrency: usize },

    RowByRow {
        calculation_concurrency: usize,
        expansion_concurrency: usize,
    },

    ElementByElement { calculation_concurrency: usize },
}

impl Default for MatrixStrategy {
    fn default() -> Self {
        MatrixStrategy::RowByRow {
            calculation_concurrency: 1,
            expansion_concurrency: 1,
        }
    }
}

/// Configuration for a [`Simulator`](crate::simulators::Simulator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Strategy for statevector evolution
    pub statevector: StatevectorStrategy,

    /// Strategy for unitary evolution
    pub unitary: MatrixStrategy,

    /// Strategy for density matrix evolution
    pub density_matrix: MatrixStrategy,

    /// Absolute tolerance for validating the final state
    pub tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            statevector: StatevectorStrategy::default(),
            unitary: MatrixStrategy::default(),
            density_matrix: MatrixStrategy::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statevector(mut self, strategy: StatevectorStrategy) -> Self {
        self.statevector = strategy;
        self
    }

    pub fn with_unitary(mut self, strategy: MatrixStrategy) -> Self {
        self.unitary = strategy;
        self
    }

    pub fn with_density_matrix(mut self, strategy: MatrixStrategy) -> Self {
        self.density_matrix = strategy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Use `strategy` for both unitary and density matrix evolution
    pub fn with_matrix_strategy(self, strategy: MatrixStrategy) -> Self {
        self.with_unitary(strategy).with_density_matrix(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(
            config.statevector,
            StatevectorStrategy::Direct {
                calculation_concurrency: 1
            }
        );
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_builder_methods() {
        let strategy = MatrixStrategy::FullMatrix {
            expansion_concurrency: 4,
        };
        let config = SimulatorConfig::new()
            .with_matrix_strategy(strategy)
            .with_tolerance(1e-8);
        assert_eq!(config.unitary, strategy);
        assert_eq!(config.density_matrix, strategy);
        assert_eq!(config.tolerance, 1e-8);
    }
}
