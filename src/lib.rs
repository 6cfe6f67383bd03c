//! Quantum Gate Transformation Engine
//!
//! This crate applies quantum gates to quantum states held in three
//! representations: statevectors, unitary matrices, and density matrices.
//! Small gate operators acting on a few qubits are lifted onto an `n`-qubit
//! register by one of several interchangeable transformation strategies,
//! each trading memory for speed and each able to spread its work over a
//! bounded worker pool.

pub mod error;
pub mod quantum;
pub mod simulators;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{
        ConfigurationError, EvolutionError, GateError, StateError, TransformationError,
    };
    pub use crate::quantum::prelude::*;
    pub use crate::simulators::{
        MatrixStrategy, MatrixTransformation, Simulator, SimulatorConfig, StatevectorStrategy,
        StatevectorTransformation,
    };
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
