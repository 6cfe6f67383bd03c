use ndarray::{array, Array1, Array2};
use num_complex::Complex64;

use qtransform::error::StateError;
use qtransform::quantum::{DensityMatrix, Outcome, StateVector, Unitary};

/// Helper function for comparing f64 with tolerance
fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

#[test]
fn test_pure_state_density_matrix() {
    let h = 1.0 / 2.0_f64.sqrt();
    let plus = StateVector::new(1, array![c(h, 0.0), c(h, 0.0)]).unwrap();
    let rho = DensityMatrix::from_state_vector(&plus);

    assert!(approx_eq(rho.trace(), 1.0, 1e-10));
    assert!(approx_eq(rho.purity(), 1.0, 1e-10));
    assert!(rho.validate(1e-10).is_ok());
    for value in rho.matrix().iter() {
        assert!(approx_eq(value.re, 0.5, 1e-10));
    }
}

#[test]
fn test_maximally_mixed_state() {
    let rho = DensityMatrix::new(1, array![[c(0.5, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]])
        .unwrap();

    assert!(approx_eq(rho.purity(), 0.5, 1e-10));
    assert_eq!(rho.probabilities(), vec![0.5, 0.5]);
}

#[test]
fn test_density_matrix_validation() {
    assert_eq!(
        DensityMatrix::new(1, Array2::zeros((4, 4))),
        Err(StateError::DimensionMismatch {
            expected: 2,
            actual: 4
        })
    );

    assert_eq!(
        DensityMatrix::new(1, array![[c(0.5, 0.0), c(0.5, 0.0)], [c(0.0, 0.0), c(0.5, 0.0)]]),
        Err(StateError::NotHermitian)
    );

    assert_eq!(
        DensityMatrix::new(1, array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]]),
        Err(StateError::InvalidTrace { trace: 2.0 })
    );

    assert_eq!(
        DensityMatrix::new(1, array![[c(1.5, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-0.5, 0.0)]]),
        Err(StateError::NotPositiveSemidefinite)
    );

    // Hermitian with unit trace, but eigenvalues 1.5 and -0.5
    assert_eq!(
        DensityMatrix::new(1, array![[c(0.5, 0.0), c(0.0, 1.0)], [c(0.0, -1.0), c(0.5, 0.0)]]),
        Err(StateError::NotPositiveSemidefinite)
    );
}

#[test]
fn test_state_vector_validation() {
    assert_eq!(
        StateVector::new(2, Array1::zeros(2)),
        Err(StateError::DimensionMismatch {
            expected: 4,
            actual: 2
        })
    );

    match StateVector::new(1, array![c(1.0, 0.0), c(1.0, 0.0)]) {
        Err(StateError::NotNormalized { norm }) => assert!(approx_eq(norm, 2.0, 1e-10)),
        other => panic!("unexpected result: {:?}", other),
    }

    assert_eq!(
        StateVector::computational_basis(2, 4),
        Err(StateError::IndexOutOfRange {
            index: 4,
            qubit_count: 2
        })
    );

    assert_eq!(
        StateVector::from_bits("10a"),
        Err(StateError::InvalidBitString {
            bits: "10a".to_string()
        })
    );
}

#[test]
fn test_from_bits_is_most_significant_first() {
    let state = StateVector::from_bits("100").unwrap();
    assert_eq!(state.qubit_count(), 3);
    assert!(approx_eq(state.probability(4), 1.0, 1e-10));

    let probabilities = state.measure_qubit_probability(2).unwrap();
    assert!(approx_eq(probabilities[&Outcome::One], 1.0, 1e-10));
    assert!(approx_eq(probabilities[&Outcome::Zero], 0.0, 1e-10));

    assert_eq!(
        state.measure_qubit_probability(3),
        Err(StateError::QubitOutOfRange {
            qubit: 3,
            qubit_count: 3
        })
    );
}

#[test]
fn test_inner_product() {
    let zero = StateVector::from_bits("0").unwrap();
    let one = StateVector::from_bits("1").unwrap();

    assert_eq!(zero.inner_product(&zero).unwrap(), c(1.0, 0.0));
    assert_eq!(zero.inner_product(&one).unwrap(), c(0.0, 0.0));
    assert!(zero.inner_product(&StateVector::zero_state(2)).is_err());
}

#[test]
fn test_unitary_validation() {
    assert!(Unitary::new(1, array![[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]], 1e-10).is_ok());

    assert_eq!(
        Unitary::new(1, array![[c(1.0, 0.0), c(1.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]], 1e-10),
        Err(StateError::NotUnitary)
    );

    let identity = Unitary::identity(2);
    assert_eq!(identity.dimension(), 4);
    assert!(identity.validate(1e-12).is_ok());
}
