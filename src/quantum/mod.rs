// src/quantum/mod.rs
//! Quantum states and gates
//!
//! This module implements the state representations the simulators evolve
//! (statevectors, unitaries, and density matrices) together with the gate
//! descriptors and their resolution into validated operators.

pub mod density_matrix;
pub mod gate;
pub mod matrix;
pub mod state;
pub mod unitary;

pub use density_matrix::DensityMatrix;
pub use gate::{Axis, Gate, SimulatorGate};
pub use state::{Outcome, StateVector};
pub use unitary::Unitary;

/// Re-export commonly used types
pub mod prelude {
    pub use super::{DensityMatrix, StateVector, Unitary};
    pub use super::{Axis, Gate, SimulatorGate};
}
