use ndarray::{array, Array2};
use num_complex::Complex64;
use std::f64::consts::PI;

use qtransform::error::GateError;
use qtransform::quantum::gate::constants::{FRAC_1_SQRT_2, I, ONE, ZERO};
use qtransform::quantum::matrix::is_unitary;
use qtransform::quantum::{Axis, Gate, SimulatorGate};

/// Helper function for comparing complex numbers with tolerance
fn complex_approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
    (a - b).norm() < epsilon
}

fn matrix_approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| complex_approx_eq(*x, *y, 1e-10))
}

#[test]
fn test_standard_gate_matrices() {
    let h = Gate::hadamard(0).extract(1).unwrap();
    let f = Complex64::new(FRAC_1_SQRT_2, 0.0);
    assert!(matrix_approx_eq(h.matrix(), &array![[f, f], [f, -f]]));

    let x = Gate::not(0).extract(1).unwrap();
    assert!(matrix_approx_eq(x.matrix(), &array![[ZERO, ONE], [ONE, ZERO]]));

    let y = Gate::PauliY { target: 0 }.extract(1).unwrap();
    assert!(matrix_approx_eq(y.matrix(), &array![[ZERO, -I], [I, ZERO]]));

    let z = Gate::PauliZ { target: 0 }.extract(1).unwrap();
    assert!(matrix_approx_eq(z.matrix(), &array![[ONE, ZERO], [ZERO, -ONE]]));

    let s = Gate::phase_shift(PI / 2.0, 0).extract(1).unwrap();
    assert!(matrix_approx_eq(s.matrix(), &array![[ONE, ZERO], [ZERO, I]]));
}

#[test]
fn test_rotations_are_unitary() {
    for &axis in &[Axis::X, Axis::Y, Axis::Z] {
        for &theta in &[0.0, 0.3, PI / 2.0, PI, 5.0] {
            let gate = Gate::rotation(axis, theta, 0).extract(1).unwrap();
            assert!(is_unitary(gate.matrix(), 1e-10));
        }
    }

    // Rx(π) = -iX
    let rx = Gate::rotation(Axis::X, PI, 0).extract(1).unwrap();
    assert!(matrix_approx_eq(rx.matrix(), &array![[ZERO, -I], [-I, ZERO]]));
}

#[test]
fn test_extract_keeps_input_order() {
    let operator = Gate::swap(3, 1).extract(4).unwrap();
    assert_eq!(operator.qubits(), &[3, 1]);
    assert_eq!(operator.qubit_count(), 2);
    assert_eq!(operator.circuit_qubit_count(), 4);
}

#[test]
fn test_toffoli_from_nested_controls() {
    let toffoli = Gate::controlled(Gate::controlled_not(0, 1), vec![2]);
    assert_eq!(toffoli.inputs(), vec![2, 1, 0]);
    assert_eq!(toffoli.name(), "CCX");

    let operator = toffoli.extract(3).unwrap();
    let mut expected = Array2::eye(8);
    expected[[6, 6]] = ZERO;
    expected[[7, 7]] = ZERO;
    expected[[6, 7]] = ONE;
    expected[[7, 6]] = ONE;
    assert!(matrix_approx_eq(operator.matrix(), &expected));
}

#[test]
fn test_oracle_truth_table() {
    let oracle = Gate::oracle(
        vec!["00".to_string(), "11".to_string()],
        vec![0, 1],
        Gate::not(2),
    );
    let operator = oracle.extract(3).unwrap();
    let matrix = operator.matrix();

    // Patterns 00 and 11 select X blocks, 01 and 10 identity blocks
    for pattern in 0..4 {
        let offset = pattern * 2;
        let flipped = pattern == 0 || pattern == 3;
        let diagonal = if flipped { ZERO } else { ONE };
        let off_diagonal = if flipped { ONE } else { ZERO };
        assert_eq!(matrix[[offset, offset]], diagonal);
        assert_eq!(matrix[[offset, offset + 1]], off_diagonal);
    }
}

#[test]
fn test_empty_truth_table_is_identity() {
    let oracle = Gate::oracle(vec![], vec![1], Gate::hadamard(0));
    let operator = oracle.extract(2).unwrap();
    assert!(matrix_approx_eq(operator.matrix(), &Array2::eye(4)));
}

#[test]
fn test_display() {
    assert_eq!(Gate::controlled_not(1, 0).to_string(), "CX(0,1)");
    assert_eq!(Gate::swap(2, 0).to_string(), "SWAP(2,0)");
}

#[test]
fn test_operator_validation_order() {
    let eye2: Array2<Complex64> = Array2::eye(2);

    assert_eq!(
        SimulatorGate::new(eye2.clone(), vec![], 2),
        Err(GateError::EmptyInputs)
    );
    assert_eq!(
        SimulatorGate::new(Array2::zeros((2, 4)), vec![0], 2),
        Err(GateError::NotSquare { rows: 2, cols: 4 })
    );
    assert_eq!(
        SimulatorGate::new(Array2::eye(3), vec![0], 2),
        Err(GateError::NotPowerOfTwo { dimension: 3 })
    );
    assert_eq!(
        SimulatorGate::new(eye2.clone(), vec![0, 1], 2),
        Err(GateError::InputCountMismatch {
            expected: 1,
            actual: 2
        })
    );
    assert_eq!(
        SimulatorGate::new(eye2.clone(), vec![2], 2),
        Err(GateError::QubitOutOfRange {
            qubit: 2,
            qubit_count: 2
        })
    );
    assert_eq!(
        SimulatorGate::new(Array2::eye(4), vec![1, 1], 2),
        Err(GateError::DuplicateQubits { qubits: vec![1, 1] })
    );
    assert_eq!(
        SimulatorGate::new(eye2.mapv(|x| x * 2.0), vec![0], 2),
        Err(GateError::NotUnitary)
    );
}

#[test]
fn test_invalid_controls() {
    assert_eq!(
        Gate::controlled(Gate::not(0), vec![]).extract(2),
        Err(GateError::EmptyControls)
    );
    assert_eq!(
        Gate::controlled(Gate::swap(0, 1), vec![1]).extract(3),
        Err(GateError::ControlOverlapsTarget { qubit: 1 })
    );
    assert_eq!(
        Gate::oracle(vec!["1x".to_string()], vec![1, 2], Gate::not(0)).extract(3),
        Err(GateError::InvalidTruthTableEntry {
            entry: "1x".to_string(),
            controls: 2
        })
    );
}

#[test]
fn test_controls_outside_register_are_rejected_before_expansion() {
    let gate = Gate::controlled(Gate::not(0), (100..140).collect());
    assert_eq!(
        gate.extract(2),
        Err(GateError::QubitOutOfRange {
            qubit: 100,
            qubit_count: 2
        })
    );

    let oracle = Gate::oracle(vec![], (1..80).collect(), Gate::hadamard(0));
    assert_eq!(
        oracle.extract(4),
        Err(GateError::QubitOutOfRange {
            qubit: 4,
            qubit_count: 4
        })
    );
}

#[test]
fn test_repeated_controls_are_rejected_before_expansion() {
    let gate = Gate::controlled(Gate::not(0), vec![1; 64]);
    assert_eq!(
        gate.extract(2),
        Err(GateError::DuplicateQubits { qubits: vec![1; 64] })
    );
}

#[test]
fn test_nested_control_outside_register() {
    let gate = Gate::controlled(Gate::controlled_not(0, 5), vec![1]);
    assert_eq!(
        gate.extract(3),
        Err(GateError::QubitOutOfRange {
            qubit: 5,
            qubit_count: 3
        })
    );
}
