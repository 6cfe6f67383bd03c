// src/quantum/gate.rs
//! Gate descriptors and operator extraction
//!
//! A [`Gate`] describes an operation in circuit terms: a named gate on a
//! target, a raw matrix on a list of inputs, or a controlled gate / oracle
//! wrapping another gate. Before a gate reaches a transformation it is
//! resolved into a [`SimulatorGate`], a flat operator matrix plus the ordered
//! list of qubits it acts on, validated against the circuit size.

use std::collections::HashSet;
use std::fmt;

use ndarray::{array, Array2};
use num_complex::Complex64;

use crate::error::GateError;
use crate::quantum::matrix::{self, UNITARY_TOLERANCE};

/// Common complex numbers used in quantum gates
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

    pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

    pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
}

/// Rotation axis on the Bloch sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A gate as it appears in a circuit's gate list
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Hadamard gate
    Hadamard { target: usize },

    /// Pauli-X gate (NOT gate)
    Not { target: usize },

    /// Pauli-Y gate
    PauliY { target: usize },

    /// Pauli-Z gate
    PauliZ { target: usize },

    /// Phase gate with arbitrary angle: diag(1, e^{iθ})
    PhaseShift { radians: f64, target: usize },

    /// Rotation around one of the Bloch sphere axes
    Rotation { axis: Axis, radians: f64, target: usize },

    /// SWAP gate
    Swap { first: usize, second: usize },

    /// Arbitrary operator. The first input is the most significant bit of
    /// the operator's row/column index.
    Matrix { matrix: Array2<Complex64>, inputs: Vec<usize> },

    /// Apply `gate` only when every control qubit is 1
    Controlled { gate: Box<Gate>, controls: Vec<usize> },

    /// Apply `gate` when the control qubits match any of the bit strings in
    /// `truth_table`. The first character of an entry is the first control.
    Oracle {
        truth_table: Vec<String>,
        controls: Vec<usize>,
        gate: Box<Gate>,
    },
}

impl Gate {
    pub fn hadamard(target: usize) -> Self {
        Gate::Hadamard { target }
    }

    pub fn not(target: usize) -> Self {
        Gate::Not { target }
    }

    pub fn phase_shift(radians: f64, target: usize) -> Self {
        Gate::PhaseShift { radians, target }
    }

    pub fn rotation(axis: Axis, radians: f64, target: usize) -> Self {
        Gate::Rotation { axis, radians, target }
    }

    pub fn swap(first: usize, second: usize) -> Self {
        Gate::Swap { first, second }
    }

    pub fn matrix(matrix: Array2<Complex64>, inputs: Vec<usize>) -> Self {
        Gate::Matrix { matrix, inputs }
    }

    pub fn controlled(gate: Gate, controls: Vec<usize>) -> Self {
        Gate::Controlled {
            gate: Box::new(gate),
            controls,
        }
    }

    /// Controlled-NOT flipping `target` when `control` is 1
    pub fn controlled_not(target: usize, control: usize) -> Self {
        Self::controlled(Self::not(target), vec![control])
    }

    pub fn oracle(truth_table: Vec<String>, controls: Vec<usize>, gate: Gate) -> Self {
        Gate::Oracle {
            truth_table,
            controls,
            gate: Box::new(gate),
        }
    }

    /// Returns a display name for this gate
    pub fn name(&self) -> String {
        match self {
            Gate::Hadamard { .. } => "H".to_string(),
            Gate::Not { .. } => "X".to_string(),
            Gate::PauliY { .. } => "Y".to_string(),
            Gate::PauliZ { .. } => "Z".to_string(),
            Gate::PhaseShift { radians, .. } => format!("P({:.2})", radians),
            Gate::Rotation { axis, radians, .. } => format!("R{:?}({:.2})", axis, radians),
            Gate::Swap { .. } => "SWAP".to_string(),
            Gate::Matrix { matrix, .. } => format!("U{}x{}", matrix.nrows(), matrix.ncols()),
            Gate::Controlled { gate, controls } => {
                format!("{}{}", "C".repeat(controls.len()), gate.name())
            }
            Gate::Oracle { truth_table, gate, .. } => {
                format!("Oracle[{}]{}", truth_table.join("|"), gate.name())
            }
        }
    }

    /// All qubits this gate touches, controls first
    pub fn inputs(&self) -> Vec<usize> {
        match self {
            Gate::Hadamard { target }
            | Gate::Not { target }
            | Gate::PauliY { target }
            | Gate::PauliZ { target }
            | Gate::PhaseShift { target, .. }
            | Gate::Rotation { target, .. } => vec![*target],
            Gate::Swap { first, second } => vec![*first, *second],
            Gate::Matrix { inputs, .. } => inputs.clone(),
            Gate::Controlled { gate, controls } | Gate::Oracle { gate, controls, .. } => {
                let mut inputs = controls.clone();
                inputs.extend(gate.inputs());
                inputs
            }
        }
    }

    /// Resolve this gate into a validated operator for an `n`-qubit circuit
    pub fn extract(&self, qubit_count: usize) -> Result<SimulatorGate, GateError> {
        let (matrix, qubits) = self.resolve(qubit_count)?;
        SimulatorGate::new(matrix, qubits, qubit_count)
    }

    /// Flatten controls and oracles into a single operator and input list
    fn resolve(&self, qubit_count: usize) -> Result<(Array2<Complex64>, Vec<usize>), GateError> {
        use constants::*;

        match self {
            Gate::Hadamard { target } => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                on_target(array![[factor, factor], [factor, -factor]], *target)
            }
            Gate::Not { target } => on_target(array![[ZERO, ONE], [ONE, ZERO]], *target),
            Gate::PauliY { target } => on_target(array![[ZERO, -I], [I, ZERO]], *target),
            Gate::PauliZ { target } => on_target(array![[ONE, ZERO], [ZERO, -ONE]], *target),
            Gate::PhaseShift { radians, target } => {
                let phase = Complex64::new(radians.cos(), radians.sin());
                on_target(array![[ONE, ZERO], [ZERO, phase]], *target)
            }
            Gate::Rotation { axis, radians, target } => {
                on_target(rotation_matrix(*axis, *radians), *target)
            }
            Gate::Swap { first, second } => Ok((
                array![
                    [ONE, ZERO, ZERO, ZERO],
                    [ZERO, ZERO, ONE, ZERO],
                    [ZERO, ONE, ZERO, ZERO],
                    [ZERO, ZERO, ZERO, ONE]
                ],
                vec![*first, *second],
            )),
            Gate::Matrix { matrix, inputs } => Ok((matrix.clone(), inputs.clone())),
            Gate::Controlled { gate, controls } => {
                let all_set = vec!["1".repeat(controls.len())];
                resolve_oracle(&all_set, controls, gate, qubit_count)
            }
            Gate::Oracle {
                truth_table,
                controls,
                gate,
            } => resolve_oracle(truth_table, controls, gate, qubit_count),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits = self
            .inputs()
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}({})", self.name(), qubits)
    }
}

fn on_target(
    matrix: Array2<Complex64>,
    target: usize,
) -> Result<(Array2<Complex64>, Vec<usize>), GateError> {
    Ok((matrix, vec![target]))
}

fn rotation_matrix(axis: Axis, theta: f64) -> Array2<Complex64> {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();

    match axis {
        Axis::X => array![
            [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
            [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)]
        ],
        Axis::Y => array![
            [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
            [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)]
        ],
        Axis::Z => {
            let phase_pos = Complex64::new(0.0, theta / 2.0).exp();
            let phase_neg = Complex64::new(0.0, -theta / 2.0).exp();
            array![
                [phase_neg, Complex64::new(0.0, 0.0)],
                [Complex64::new(0.0, 0.0), phase_pos]
            ]
        }
    }
}

/// Build the block-diagonal operator of an oracle.
///
/// Controls occupy the most significant bits of the operator index, so each
/// control pattern selects one diagonal block: the inner operator if the
/// pattern is listed in the truth table, identity otherwise.
///
/// Controls are checked against the register before the `2^c`-sized
/// operator is allocated.
fn resolve_oracle(
    truth_table: &[String],
    controls: &[usize],
    gate: &Gate,
    qubit_count: usize,
) -> Result<(Array2<Complex64>, Vec<usize>), GateError> {
    if controls.is_empty() {
        return Err(GateError::EmptyControls);
    }

    if let Some(&qubit) = controls.iter().find(|&&q| q >= qubit_count) {
        return Err(GateError::QubitOutOfRange { qubit, qubit_count });
    }
    let unique: HashSet<_> = controls.iter().collect();
    if unique.len() != controls.len() {
        return Err(GateError::DuplicateQubits {
            qubits: controls.to_vec(),
        });
    }

    let (inner, targets) = gate.resolve(qubit_count)?;
    if inner.nrows() != inner.ncols() {
        return Err(GateError::NotSquare {
            rows: inner.nrows(),
            cols: inner.ncols(),
        });
    }
    if let Some(&qubit) = controls.iter().find(|c| targets.contains(c)) {
        return Err(GateError::ControlOverlapsTarget { qubit });
    }
    if let Some(&qubit) = targets.iter().find(|&&q| q >= qubit_count) {
        return Err(GateError::QubitOutOfRange { qubit, qubit_count });
    }

    let mut active = HashSet::new();
    for entry in truth_table {
        if entry.len() != controls.len() || !entry.chars().all(|c| c == '0' || c == '1') {
            return Err(GateError::InvalidTruthTableEntry {
                entry: entry.clone(),
                controls: controls.len(),
            });
        }
        let pattern = entry
            .chars()
            .fold(0usize, |acc, c| (acc << 1) | usize::from(c == '1'));
        active.insert(pattern);
    }

    let block = inner.nrows();
    let patterns = 1usize << controls.len();
    let mut matrix = Array2::zeros((patterns * block, patterns * block));

    for pattern in 0..patterns {
        let offset = pattern * block;
        for i in 0..block {
            if active.contains(&pattern) {
                for j in 0..block {
                    matrix[[offset + i, offset + j]] = inner[[i, j]];
                }
            } else {
                matrix[[offset + i, offset + i]] = constants::ONE;
            }
        }
    }

    let mut qubits = controls.to_vec();
    qubits.extend(targets);

    Ok((matrix, qubits))
}

/// A validated operator ready to be applied by a transformation.
///
/// Guarantees: the matrix is square with dimension `2^k`, unitary within
/// tolerance, and `qubits` holds `k` distinct indices below the circuit's
/// qubit count.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorGate {
    matrix: Array2<Complex64>,
    qubits: Vec<usize>,
    circuit_qubit_count: usize,
}

impl SimulatorGate {
    /// Validate an operator against an `n`-qubit circuit
    pub fn new(
        matrix: Array2<Complex64>,
        qubits: Vec<usize>,
        circuit_qubit_count: usize,
    ) -> Result<Self, GateError> {
        if qubits.is_empty() {
            return Err(GateError::EmptyInputs);
        }

        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(GateError::NotSquare { rows, cols });
        }

        let k = matrix::log2_exact(rows)
            .ok_or(GateError::NotPowerOfTwo { dimension: rows })?;
        if k != qubits.len() {
            return Err(GateError::InputCountMismatch {
                expected: k,
                actual: qubits.len(),
            });
        }

        if let Some(&qubit) = qubits.iter().find(|&&q| q >= circuit_qubit_count) {
            return Err(GateError::QubitOutOfRange {
                qubit,
                qubit_count: circuit_qubit_count,
            });
        }

        let unique: HashSet<_> = qubits.iter().collect();
        if unique.len() != qubits.len() {
            return Err(GateError::DuplicateQubits { qubits });
        }

        if !matrix::is_unitary(&matrix, UNITARY_TOLERANCE) {
            return Err(GateError::NotUnitary);
        }

        Ok(SimulatorGate {
            matrix,
            qubits,
            circuit_qubit_count,
        })
    }

    /// The `2^k × 2^k` operator
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Qubits the operator acts on, most significant local bit first
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Number of qubits the operator acts on (`k`)
    pub fn qubit_count(&self) -> usize {
        self.qubits.len()
    }

    /// Number of qubits in the circuit the operator was validated for (`n`)
    pub fn circuit_qubit_count(&self) -> usize {
        self.circuit_qubit_count
    }
}
