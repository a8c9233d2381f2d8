use crate::board::Cell;

// splitmix64 constants
const SEED: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX2: u64 = 0x94D0_49BB_1331_11EB;

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(SEED);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(MIX1);
    z = (z ^ (z >> 27)).wrapping_mul(MIX2);
    z ^ (z >> 31)
}

/// Zobrist key table: one 64-bit key per (cell, piece kind) plus a
/// side-to-move key. Deterministically seeded so hashes are stable across
/// runs, which keeps cached evaluations reproducible in tests.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    keys: Vec<[u64; 3]>,
    side: u64,
}

impl ZobristTable {
    pub fn new(cell_count: usize) -> ZobristTable {
        let mut state = SEED;
        let mut keys = Vec::with_capacity(cell_count);
        for _ in 0..cell_count {
            keys.push([
                splitmix64(&mut state),
                splitmix64(&mut state),
                splitmix64(&mut state),
            ]);
        }
        let side = splitmix64(&mut state);
        ZobristTable { keys, side }
    }

    pub fn piece_key(&self, index: usize, cell: Cell) -> u64 {
        let slot = match cell {
            Cell::Max => 0,
            Cell::Min => 1,
            Cell::Blocker => 2,
            Cell::Empty => unreachable!("empty cells carry no key"),
        };
        self.keys[index][slot]
    }

    pub fn side_key(&self) -> u64 {
        self.side
    }
}
