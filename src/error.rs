//! Error types
//!
//! Every failure the engine can report is an explicit value. Gate validation
//! happens before any amplitude is touched, so a failed application never
//! leaves a partially transformed state behind.

use thiserror::Error;

use crate::quantum::gate::Gate;

/// Errors raised while resolving a gate into a validated operator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// A gate must act on at least one qubit
    #[error("Gate must act on at least one qubit")]
    EmptyInputs,

    /// Operator matrix is not square
    #[error("Operator matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Operator dimension is not a power of two
    #[error("Operator dimension {dimension} is not a power of 2")]
    NotPowerOfTwo { dimension: usize },

    /// Operator matrix is not unitary within tolerance
    #[error("Operator matrix is not unitary")]
    NotUnitary,

    /// The same qubit appears more than once in the input list
    #[error("Qubit indices are not unique: {qubits:?}")]
    DuplicateQubits { qubits: Vec<usize> },

    /// A qubit index does not exist in the circuit
    #[error("Qubit index {qubit} out of range for {qubit_count}-qubit circuit")]
    QubitOutOfRange { qubit: usize, qubit_count: usize },

    /// Number of inputs does not match the operator dimension
    #[error("Operator acts on {expected} qubits, but {actual} inputs were specified")]
    InputCountMismatch { expected: usize, actual: usize },

    /// Controlled gates and oracles need at least one control
    #[error("Controlled gate has no control qubits")]
    EmptyControls,

    /// A control qubit is also one of the gate's targets
    #[error("Control qubit {qubit} is also a target")]
    ControlOverlapsTarget { qubit: usize },

    /// Truth table entry is not a bit string over the controls
    #[error("Truth table entry {entry:?} is not a {controls}-bit string")]
    InvalidTruthTableEntry { entry: String, controls: usize },
}

/// Errors raised when building or validating a state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Statevector does not have unit norm
    #[error("State vector not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },

    /// Unitary matrix does not satisfy U·U† = I
    #[error("Matrix is not unitary")]
    NotUnitary,

    /// Density matrix is not Hermitian
    #[error("Density matrix is not Hermitian")]
    NotHermitian,

    /// Density matrix trace is not one
    #[error("Density matrix trace is {trace}, expected 1")]
    InvalidTrace { trace: f64 },

    /// Density matrix has a negative eigenvalue
    #[error("Density matrix is not positive semidefinite")]
    NotPositiveSemidefinite,

    /// Basis index does not exist
    #[error("Index {index} is out of range for {qubit_count}-qubit state")]
    IndexOutOfRange { index: usize, qubit_count: usize },

    /// Qubit index does not exist
    #[error("Qubit index {qubit} out of range for {qubit_count}-qubit state")]
    QubitOutOfRange { qubit: usize, qubit_count: usize },

    /// Bit string contains something other than '0' and '1'
    #[error("Invalid bit string {bits:?}")]
    InvalidBitString { bits: String },
}

/// Errors raised while applying a single gate to a state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformationError {
    /// The gate could not be resolved into a valid operator
    #[error(transparent)]
    Gate(#[from] GateError),

    /// The operator was extracted for a different circuit size
    #[error("Operator built for {operator} qubits applied to {state}-qubit state")]
    QubitCountMismatch { operator: usize, state: usize },
}

/// Errors raised by a full evolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvolutionError {
    /// A gate failed; evolution stopped at this gate
    #[error("Gate #{index} ({gate}) could not be applied: {source}")]
    Application {
        index: usize,
        gate: Gate,
        #[source]
        source: TransformationError,
    },

    /// The final state does not satisfy its invariants within tolerance
    #[error("Final state failed validation: {0}")]
    ResultValidation(#[from] StateError),
}

/// Errors raised while building an engine from its configuration
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
