// src/quantum/state.rs
//! Statevector representation
//!
//! Basis index bit `q` is the value of qubit `q`, so in a 3-qubit register
//! index 4 is `|100⟩` (qubit 2 set).

use std::collections::HashMap;
use std::fmt::{self, Display};

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::StateError;

/// Default absolute tolerance for state invariants
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A measurement outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Measurement yielded 0
    Zero,
    /// Measurement yielded 1
    One,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "0"),
            Outcome::One => write!(f, "1"),
        }
    }
}

/// State vector representation of a pure quantum state
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    qubit_count: usize,

    /// The state vector as an array of complex amplitudes
    amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Create a new state vector with the given amplitudes.
    ///
    /// Fails if the length is not `2^qubit_count` or the vector is not
    /// normalized within [`DEFAULT_TOLERANCE`].
    pub fn new(qubit_count: usize, amplitudes: Array1<Complex64>) -> Result<Self, StateError> {
        let expected_dim = 1 << qubit_count;

        if amplitudes.len() != expected_dim {
            return Err(StateError::DimensionMismatch {
                expected: expected_dim,
                actual: amplitudes.len(),
            });
        }

        let state = StateVector {
            qubit_count,
            amplitudes,
        };
        state.validate(DEFAULT_TOLERANCE)?;

        Ok(state)
    }

    /// Wrap amplitudes produced by a transformation. Normalization is only
    /// checked once evolution has finished.
    pub(crate) fn from_amplitudes(qubit_count: usize, amplitudes: Array1<Complex64>) -> Self {
        debug_assert_eq!(amplitudes.len(), 1 << qubit_count);
        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    /// Create a new state vector in the computational basis state |index⟩
    pub fn computational_basis(qubit_count: usize, index: usize) -> Result<Self, StateError> {
        let dim = 1 << qubit_count;

        if index >= dim {
            return Err(StateError::IndexOutOfRange { index, qubit_count });
        }

        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);

        Ok(StateVector {
            qubit_count,
            amplitudes,
        })
    }

    /// Create the zero state |00...0⟩
    pub fn zero_state(qubit_count: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << qubit_count);
        amplitudes[0] = Complex64::new(1.0, 0.0);

        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    /// Basis state from a ket label such as `"0101"`, highest qubit first
    pub fn from_bits(bits: &str) -> Result<Self, StateError> {
        if bits.is_empty() || !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(StateError::InvalidBitString {
                bits: bits.to_string(),
            });
        }

        let index = bits
            .chars()
            .fold(0usize, |acc, c| (acc << 1) | usize::from(c == '1'));
        Self::computational_basis(bits.len(), index)
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Returns the dimension of the Hilbert space (2^n for n qubits)
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Get a reference to the amplitudes
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    pub fn into_amplitudes(self) -> Array1<Complex64> {
        self.amplitudes
    }

    /// Sum of squared amplitude moduli
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum()
    }

    /// Check that the vector has unit norm within `tolerance`
    pub fn validate(&self, tolerance: f64) -> Result<(), StateError> {
        let norm = self.norm_sqr();
        if (norm - 1.0).abs() > tolerance {
            return Err(StateError::NotNormalized { norm });
        }
        Ok(())
    }

    /// Inner product ⟨self|other⟩
    pub fn inner_product(&self, other: &Self) -> Result<Complex64, StateError> {
        if self.qubit_count != other.qubit_count {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }

        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Calculate the probability of measuring the given basis index
    pub fn probability(&self, index: usize) -> f64 {
        if index >= self.dimension() {
            return 0.0;
        }
        self.amplitudes[index].norm_sqr()
    }

    /// Probability of every basis index
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).collect()
    }

    /// Probability of each outcome when measuring a single qubit
    pub fn measure_qubit_probability(&self, qubit: usize) -> Result<HashMap<Outcome, f64>, StateError> {
        self.check_qubit(qubit)?;

        let mut prob_zero = 0.0;
        let mut prob_one = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if (i >> qubit) & 1 == 0 {
                prob_zero += amp.norm_sqr();
            } else {
                prob_one += amp.norm_sqr();
            }
        }

        let mut probabilities = HashMap::new();
        probabilities.insert(Outcome::Zero, prob_zero);
        probabilities.insert(Outcome::One, prob_one);
        Ok(probabilities)
    }

    /// Joint outcome probabilities for a list of qubits, in the given order.
    /// Outcomes with probability below 1e-10 are omitted.
    pub fn measure_qubits_probability(
        &self,
        qubits: &[usize],
    ) -> Result<HashMap<Vec<Outcome>, f64>, StateError> {
        for &q in qubits {
            self.check_qubit(q)?;
        }

        let mut probabilities = HashMap::new();
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > 1e-10 {
                let outcomes = qubits
                    .iter()
                    .map(|&q| if (i >> q) & 1 == 0 { Outcome::Zero } else { Outcome::One })
                    .collect::<Vec<_>>();
                *probabilities.entry(outcomes).or_insert(0.0) += prob;
            }
        }

        Ok(probabilities)
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), StateError> {
        if qubit >= self.qubit_count {
            return Err(StateError::QubitOutOfRange {
                qubit,
                qubit_count: self.qubit_count,
            });
        }
        Ok(())
    }
}

/// Ket label of a basis index, highest qubit first
pub(crate) fn ket_label(index: usize, qubit_count: usize) -> String {
    format!("{:0width$b}", index, width = qubit_count)
}

impl Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-qubit state:", self.qubit_count)?;

        let threshold = 1e-10;
        let mut has_entries = false;

        for (i, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() > threshold {
                has_entries = true;

                write!(f, "  ({:.6}{:+.6}i) |{}⟩", amp.re, amp.im, ket_label(i, self.qubit_count))?;
                writeln!(f, " [{:.1}%]", amp.norm_sqr() * 100.0)?;
            }
        }

        if !has_entries {
            writeln!(f, "  (zero state)")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_is_msb_first() {
        let state = StateVector::from_bits("100").unwrap();
        assert_eq!(state.qubit_count(), 3);
        assert_eq!(state.amplitudes()[4], Complex64::new(1.0, 0.0));

        assert!(StateVector::from_bits("").is_err());
        assert!(StateVector::from_bits("10a").is_err());
    }

    #[test]
    fn test_new_rejects_unnormalized() {
        let amplitudes = Array1::from(vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)]);
        assert!(matches!(
            StateVector::new(1, amplitudes),
            Err(StateError::NotNormalized { .. })
        ));

        let amplitudes = Array1::from(vec![Complex64::new(1.0, 0.0)]);
        assert!(matches!(
            StateVector::new(1, amplitudes),
            Err(StateError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_qubit_probability_uses_low_bit_for_qubit_zero() {
        // |01⟩: qubit 0 set
        let state = StateVector::computational_basis(2, 1).unwrap();
        let p0 = state.measure_qubit_probability(0).unwrap();
        let p1 = state.measure_qubit_probability(1).unwrap();
        assert_eq!(p0[&Outcome::One], 1.0);
        assert_eq!(p1[&Outcome::Zero], 1.0);

        let joint = state.measure_qubits_probability(&[1, 0]).unwrap();
        assert_eq!(joint[&vec![Outcome::Zero, Outcome::One]], 1.0);
    }

    #[test]
    fn test_display() {
        let state = StateVector::from_bits("10").unwrap();
        let text = state.to_string();
        assert!(text.contains("|10⟩"));
        assert!(text.contains("[100.0%]"));
    }
}
