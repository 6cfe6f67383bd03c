//! Quantum circuit simulators
//!
//! This module applies gates to statevectors, unitaries, and density
//! matrices with interchangeable transformation strategies, and folds gate
//! lists into full circuit evolutions.

pub mod config;
pub mod indexer;
pub mod simulator;
pub mod simulator_matrix;
pub mod transformation;
pub mod worker_pool;

pub use config::{MatrixStrategy, SimulatorConfig, StatevectorStrategy};
pub use indexer::GateIndexer;
pub use simulator::{evolve, Simulator};
pub use simulator_matrix::SimulatorMatrix;
pub use transformation::{
    matrix_transformation, statevector_transformation, MatrixTransformation,
    StatevectorTransformation,
};
pub use worker_pool::WorkerPool;
