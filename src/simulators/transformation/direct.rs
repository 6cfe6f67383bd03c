//! Apply the small operator to each coupled group directly.
//!
//! The register splits into `2^(n-k)` coupled groups of `2^k` amplitudes.
//! Each group is an independent `2^k × 2^k` matrix-vector product, so every
//! amplitude is read and written exactly once. Groups are computed into a
//! group-major buffer by the workers and scattered back to basis order in a
//! final merge.

use ndarray::Array1;
use num_complex::Complex64;

use super::StatevectorTransformation;
use crate::quantum::gate::SimulatorGate;
use crate::simulators::indexer::GateIndexer;
use crate::simulators::worker_pool::WorkerPool;

/// Statevector-only transformation with `O(2^n · 2^k)` total work
#[derive(Debug, Clone)]
pub struct DirectTransformation {
    calculation: WorkerPool,
}

impl DirectTransformation {
    pub fn new(calculation: WorkerPool) -> Self {
        DirectTransformation { calculation }
    }
}

impl StatevectorTransformation for DirectTransformation {
    fn transform(&self, operator: &SimulatorGate, amplitudes: &Array1<Complex64>) -> Array1<Complex64> {
        let indexer = GateIndexer::new(operator.qubits());
        let passives: Vec<usize> = indexer.filter(operator.circuit_qubit_count()).collect();
        let group_size = indexer.group_size();
        let matrix = operator.matrix();

        let mut groups = vec![Complex64::new(0.0, 0.0); amplitudes.len()];
        match indexer {
            GateIndexer::Single { qubit } => {
                let (m00, m01) = (matrix[[0, 0]], matrix[[0, 1]]);
                let (m10, m11) = (matrix[[1, 0]], matrix[[1, 1]]);
                let stride = 1 << qubit;

                self.calculation.for_each_unit(&mut groups, 2, |group, out| {
                    let i0 = passives[group];
                    let (a0, a1) = (amplitudes[i0], amplitudes[i0 | stride]);
                    out[0] = m00 * a0 + m01 * a1;
                    out[1] = m10 * a0 + m11 * a1;
                });
            }
            GateIndexer::Multi { .. } => {
                self.calculation.for_each_unit(&mut groups, group_size, |group, out| {
                    let passive = passives[group];
                    let inputs: Vec<Complex64> = (0..group_size)
                        .map(|local| amplitudes[indexer.global_index(passive, local)])
                        .collect();

                    for (row, slot) in out.iter_mut().enumerate() {
                        *slot = inputs
                            .iter()
                            .enumerate()
                            .map(|(col, amp)| matrix[[row, col]] * amp)
                            .sum();
                    }
                });
            }
        }

        let mut output = Array1::zeros(amplitudes.len());
        for (group, &passive) in passives.iter().enumerate() {
            let values = &groups[group * group_size..(group + 1) * group_size];
            for (local, value) in values.iter().enumerate() {
                output[indexer.global_index(passive, local)] = *value;
            }
        }

        output
    }
}
