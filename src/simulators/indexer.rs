//! Bit-index algebra for applying a k-qubit operator to an n-qubit register
//!
//! For a gate on ordered qubits `Q = [q_0, …, q_{k-1}]`, every global basis
//! index splits into
//!
//! * a *local* index in `[0, 2^k)`, gathered from the bits at `Q` with `q_0`
//!   as the most significant bit, and
//! * a *passive* index, the global index with every bit in `Q` cleared.
//!
//! Indices sharing the same passive part form a *coupled group* of `2^k`
//! members: the operator only ever mixes amplitudes inside one group. The
//! groups partition `[0, 2^n)`.

/// Maps global indices to local/passive parts for one gate.
///
/// Qubit lists are validated upstream (non-empty, unique, in range) and are
/// not re-checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateIndexer {
    /// Single-qubit gate, O(1) per lookup
    Single { qubit: usize },

    /// General multi-qubit gate
    Multi { qubits: Vec<usize>, mask: usize },
}

impl GateIndexer {
    pub fn new(qubits: &[usize]) -> Self {
        debug_assert!(!qubits.is_empty(), "gate must act on at least one qubit");

        match qubits {
            [qubit] => GateIndexer::Single { qubit: *qubit },
            _ => GateIndexer::Multi {
                qubits: qubits.to_vec(),
                mask: qubits.iter().fold(0, |mask, &q| mask | (1 << q)),
            },
        }
    }

    /// Number of qubits the gate acts on (`k`)
    pub fn gate_qubit_count(&self) -> usize {
        match self {
            GateIndexer::Single { .. } => 1,
            GateIndexer::Multi { qubits, .. } => qubits.len(),
        }
    }

    /// Size of a coupled group (`2^k`)
    pub fn group_size(&self) -> usize {
        1 << self.gate_qubit_count()
    }

    /// Bits of the gate's qubits
    pub fn mask(&self) -> usize {
        match self {
            GateIndexer::Single { qubit } => 1 << qubit,
            GateIndexer::Multi { mask, .. } => *mask,
        }
    }

    /// Gather the gate's qubit bits out of a global index
    #[inline]
    pub fn local_index(&self, index: usize) -> usize {
        match self {
            GateIndexer::Single { qubit } => (index >> qubit) & 1,
            GateIndexer::Multi { qubits, .. } => qubits
                .iter()
                .fold(0, |local, &q| (local << 1) | ((index >> q) & 1)),
        }
    }

    /// Global index with the gate's qubit bits cleared
    #[inline]
    pub fn passive_index(&self, index: usize) -> usize {
        index & !self.mask()
    }

    /// Scatter a local index back into a passive index
    #[inline]
    pub fn global_index(&self, passive: usize, local: usize) -> usize {
        match self {
            GateIndexer::Single { qubit } => passive | (local << qubit),
            GateIndexer::Multi { qubits, .. } => {
                let k = qubits.len();
                qubits.iter().enumerate().fold(passive, |global, (j, &q)| {
                    global | (((local >> (k - 1 - j)) & 1) << q)
                })
            }
        }
    }

    /// Members of the coupled group containing `index`, in local order
    pub fn group(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let passive = self.passive_index(index);
        (0..self.group_size()).map(move |local| self.global_index(passive, local))
    }

    /// Passive indices of an `n`-qubit register, one per coupled group
    pub fn filter(&self, qubit_count: usize) -> Filter {
        Filter::new(self.mask(), qubit_count)
    }
}

/// Enumerates the indices with zero bits at every gate position, in
/// increasing order. Each yields exactly one coupled group.
#[derive(Debug, Clone)]
pub struct Filter {
    free: usize,
    next: Option<usize>,
}

impl Filter {
    fn new(mask: usize, qubit_count: usize) -> Self {
        let full = (1usize << qubit_count) - 1;
        Filter {
            free: full & !mask,
            next: Some(0),
        }
    }

    /// Number of groups, `2^(n-k)`
    pub fn group_count(&self) -> usize {
        1 << self.free.count_ones()
    }
}

impl Iterator for Filter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        // Next submask of `free` in increasing order; wraps to 0 after the last
        let following = current.wrapping_sub(self.free) & self.free;
        self.next = if following == 0 { None } else { Some(following) };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_single_qubit_indexing() {
        let indexer = GateIndexer::new(&[2]);
        assert!(matches!(indexer, GateIndexer::Single { qubit: 2 }));
        assert_eq!(indexer.local_index(0b101), 1);
        assert_eq!(indexer.local_index(0b011), 0);
        assert_eq!(indexer.passive_index(0b101), 0b001);
        assert_eq!(indexer.global_index(0b001, 1), 0b101);
        assert_eq!(indexer.group(0b111).collect::<Vec<_>>(), vec![0b011, 0b111]);
    }

    #[test]
    fn test_multi_qubit_order_is_significant() {
        // First listed qubit is the most significant local bit
        let indexer = GateIndexer::new(&[0, 2]);
        assert_eq!(indexer.local_index(0b001), 0b10);
        assert_eq!(indexer.local_index(0b100), 0b01);

        let reversed = GateIndexer::new(&[2, 0]);
        assert_eq!(reversed.local_index(0b001), 0b01);
        assert_eq!(reversed.local_index(0b100), 0b10);
    }

    #[test]
    fn test_local_global_roundtrip() {
        let indexer = GateIndexer::new(&[3, 0, 2]);
        for index in 0..32 {
            let local = indexer.local_index(index);
            let passive = indexer.passive_index(index);
            assert_eq!(indexer.global_index(passive, local), index);
        }
    }

    #[test]
    fn test_group_members_share_passive_bits() {
        let indexer = GateIndexer::new(&[1, 3]);
        let group: Vec<_> = indexer.group(0b10101).collect();
        assert_eq!(group.len(), 4);
        for (local, &member) in group.iter().enumerate() {
            assert_eq!(indexer.passive_index(member), 0b10101 & !0b01010);
            assert_eq!(indexer.local_index(member), local);
        }
    }

    #[test]
    fn test_filter_partitions_register() {
        let qubit_count = 5;
        let indexer = GateIndexer::new(&[4, 1]);
        let filter = indexer.filter(qubit_count);
        assert_eq!(filter.group_count(), 8);

        let passives: Vec<_> = filter.collect();
        assert_eq!(passives.len(), 8);
        assert!(passives.windows(2).all(|w| w[0] < w[1]));
        assert!(passives.iter().all(|p| p & indexer.mask() == 0));

        let mut seen = HashSet::new();
        for &passive in &passives {
            for member in indexer.group(passive) {
                assert!(seen.insert(member), "index {} in two groups", member);
            }
        }
        assert_eq!(seen.len(), 1 << qubit_count);
    }

    #[test]
    fn test_filter_when_gate_covers_register() {
        let indexer = GateIndexer::new(&[1, 0]);
        let passives: Vec<_> = indexer.filter(2).collect();
        assert_eq!(passives, vec![0]);
    }
}
