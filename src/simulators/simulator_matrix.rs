//! Logical view of an operator expanded to the whole register
//!
//! Entry `(row, col)` of the expanded `2^n × 2^n` operator is zero unless
//! `row` and `col` agree on every qubit the gate does not touch, in which
//! case it is `operator[local(row), local(col)]`. Nothing of size `4^n` is
//! stored unless [`SimulatorMatrix::expand`] is called.

use ndarray::Array2;
use num_complex::Complex64;

use crate::quantum::gate::SimulatorGate;
use crate::simulators::indexer::GateIndexer;
use crate::simulators::worker_pool::WorkerPool;

pub struct SimulatorMatrix<'a> {
    operator: &'a Array2<Complex64>,
    indexer: GateIndexer,
    qubit_count: usize,
}

impl<'a> SimulatorMatrix<'a> {
    pub fn new(gate: &'a SimulatorGate) -> Self {
        SimulatorMatrix {
            operator: gate.matrix(),
            indexer: GateIndexer::new(gate.qubits()),
            qubit_count: gate.circuit_qubit_count(),
        }
    }

    pub fn indexer(&self) -> &GateIndexer {
        &self.indexer
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Side length of the expanded operator, `2^n`
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Entry `(row, col)` of the expanded operator
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> Complex64 {
        if self.indexer.passive_index(row) != self.indexer.passive_index(col) {
            return Complex64::new(0.0, 0.0);
        }
        self.operator[[self.indexer.local_index(row), self.indexer.local_index(col)]]
    }

    /// The only columns of `row` that can be non-zero, with their values
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, Complex64)> + '_ {
        let local_row = self.indexer.local_index(row);
        self.indexer
            .group(row)
            .enumerate()
            .map(move |(local_col, col)| (col, self.operator[[local_row, local_col]]))
    }

    /// Materialize the full expanded operator, rows split across `pool`
    pub fn expand(&self, pool: &WorkerPool) -> Array2<Complex64> {
        let dim = self.dimension();
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];

        pool.for_each_unit(&mut data, dim, |row, slots| {
            for (col, value) in self.row(row) {
                slots[col] = value;
            }
        });

        Array2::from_shape_vec((dim, dim), data)
            .expect("buffer length is dim * dim by construction")
    }
}
