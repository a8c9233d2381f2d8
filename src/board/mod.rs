use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::zobrist::ZobristTable;

/// Stones required in a row to win.
pub const WINNING_COUNT: usize = 5;

/// The four scan axes: right, down, down-right, down-left.
/// Row-major iteration visits the backward end of a run first for all of
/// these, so pattern scans never need to look back.
pub const FOUR_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// All eight neighbor offsets, used by the adjacency gate.
pub const EIGHT_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Max,
    Min,
    /// A cell nobody may play on. One is seeded at the board center to
    /// prevent a trivial symmetric opening.
    Blocker,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Player {
    Max,
    Min,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }

    /// Sign convention: Max is +1, Min is -1.
    pub fn sign(self) -> i64 {
        match self {
            Player::Max => 1,
            Player::Min => -1,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Max => Cell::Max,
            Player::Min => Cell::Min,
        }
    }
}

/// Plain snapshot of a position, safe to hand across the facade boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: Vec<Cell>,
    pub board_size: usize,
    pub current_player: Player,
    pub last_move: Option<usize>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("expected 'row,col', got {0:?}")]
    Malformed(String),
    #[error("coordinate {0} out of range for board size {1}")]
    OutOfRange(usize, usize),
}

/// Parse a human-entered "row,col" coordinate (0-based) into a cell index.
pub fn parse_coord(input: &str, board_size: usize) -> Result<usize, CoordParseError> {
    let mut parts = input.trim().split(',');
    let row = parts
        .next()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(|| CoordParseError::Malformed(input.to_string()))?;
    let col = parts
        .next()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(|| CoordParseError::Malformed(input.to_string()))?;
    if parts.next().is_some() {
        return Err(CoordParseError::Malformed(input.to_string()));
    }
    if row >= board_size {
        return Err(CoordParseError::OutOfRange(row, board_size));
    }
    if col >= board_size {
        return Err(CoordParseError::OutOfRange(col, board_size));
    }
    Ok(row * board_size + col)
}

/// One Gomoku position with its move history and incrementally maintained
/// Zobrist hash. Exclusively owned by the search during a query and by the
/// caller between queries; there is no interior sharing.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    current: Player,
    log: Vec<usize>,
    zobrist: ZobristTable,
    key: u64,
}

impl Board {
    pub fn new(size: usize) -> Board {
        let cells = vec![Cell::Empty; size * size];
        let zobrist = ZobristTable::new(size * size);
        let mut board = Board {
            size,
            cells,
            current: Player::Max,
            log: Vec::new(),
            zobrist,
            key: 0,
        };
        board.place_raw(board.center(), Cell::Blocker);
        board
    }

    pub fn from_state(state: &BoardState) -> Board {
        let zobrist = ZobristTable::new(state.cells.len());
        let mut key = 0u64;
        for (idx, &cell) in state.cells.iter().enumerate() {
            if cell != Cell::Empty {
                key ^= zobrist.piece_key(idx, cell);
            }
        }
        let mut log = Vec::new();
        if let Some(mv) = state.last_move {
            log.push(mv);
        }
        Board {
            size: state.board_size,
            cells: state.cells.clone(),
            current: state.current_player,
            log,
            zobrist,
            key,
        }
    }

    pub fn to_state(&self) -> BoardState {
        BoardState {
            cells: self.cells.clone(),
            board_size: self.size,
            current_player: self.current,
            last_move: self.last_move(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn center(&self) -> usize {
        let mid = self.size / 2;
        mid * self.size + mid
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn last_move(&self) -> Option<usize> {
        self.log.last().copied()
    }

    pub fn move_count(&self) -> usize {
        self.log.len()
    }

    pub fn to_index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.size && col >= 0 && (col as usize) < self.size
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Out-of-range coordinates read as empty, mirroring the facade contract
    /// that UI callers may probe freely.
    pub fn value_at(&self, row: i32, col: i32) -> Cell {
        if !self.in_bounds(row, col) {
            return Cell::Empty;
        }
        self.cells[row as usize * self.size + col as usize]
    }

    /// State hash identifying (board, side-to-move).
    pub fn state_hash(&self) -> u64 {
        match self.current {
            Player::Max => self.key,
            Player::Min => self.key ^ self.zobrist.side_key(),
        }
    }

    /// Place the current player's stone. Fails without mutating on an
    /// out-of-range index or an occupied cell.
    pub fn make_move(&mut self, index: usize) -> bool {
        if index >= self.cells.len() {
            return false;
        }
        if self.cells[index] != Cell::Empty {
            return false;
        }
        self.place_raw(index, self.current.cell());
        self.current = self.current.opponent();
        self.log.push(index);
        true
    }

    /// Exact inverse of `make_move` for the most recent move. Fails without
    /// mutating unless `index` is the top of the move log.
    pub fn undo_move(&mut self, index: usize) -> bool {
        if self.log.last() != Some(&index) {
            return false;
        }
        self.log.pop();
        self.clear_raw(index);
        self.current = self.current.opponent();
        true
    }

    /// Undo the last `n` moves. Fails without mutating if fewer than `n`
    /// moves are recorded.
    pub fn undo_moves(&mut self, n: usize) -> bool {
        if self.log.len() < n {
            return false;
        }
        for _ in 0..n {
            let index = self.log[self.log.len() - 1];
            self.undo_move(index);
        }
        true
    }

    /// Raw placement that skips the player flip and the move log. Used for
    /// blockers and for the move generator's one-ply simulations; the hash
    /// stays consistent because set/clear XOR the same key.
    pub(crate) fn place_raw(&mut self, index: usize, cell: Cell) {
        debug_assert_eq!(self.cells[index], Cell::Empty);
        self.cells[index] = cell;
        self.key ^= self.zobrist.piece_key(index, cell);
    }

    pub(crate) fn clear_raw(&mut self, index: usize) {
        let cell = self.cells[index];
        debug_assert_ne!(cell, Cell::Empty);
        self.key ^= self.zobrist.piece_key(index, cell);
        self.cells[index] = Cell::Empty;
    }

    pub fn is_board_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
        self.current = Player::Max;
        self.log.clear();
        self.key = 0;
        let center = self.center();
        self.place_raw(center, Cell::Blocker);
    }

    /// Walk from (row, col) along (dx, dy) counting contiguous stones equal
    /// to `piece`. A side stops at an empty cell or a blocker (neutral
    /// boundary); an opponent stone also stops it and marks it blocked.
    fn count_piece(&self, piece: Cell, row: usize, col: usize, dx: i32, dy: i32) -> (usize, bool) {
        let mut count = 0;
        let mut blocked = false;
        let mut step = 1i32;
        loop {
            let r = row as i32 + step * dy;
            let c = col as i32 + step * dx;
            if !self.in_bounds(r, c) {
                break;
            }
            let current = self.cells[r as usize * self.size + c as usize];
            if current == piece {
                count += 1;
                step += 1;
            } else if current == Cell::Empty || current == Cell::Blocker {
                break;
            } else {
                blocked = true;
                break;
            }
        }
        (count, blocked)
    }

    /// Whether the stone at `index` sits on a winning line.
    ///
    /// Overlines (6+) always win. An exact 5 wins unless opponent stones cap
    /// both ends; blocker- or edge-bounded ends are neutral boundaries and do
    /// not trigger that exception.
    pub fn has_winning_line(&self, index: usize) -> bool {
        if index >= self.cells.len() {
            return false;
        }
        let piece = self.cells[index];
        if piece == Cell::Empty || piece == Cell::Blocker {
            return false;
        }
        let (row, col) = self.row_col(index);
        for &(dx, dy) in &FOUR_DIRECTIONS {
            let (forward, forward_blocked) = self.count_piece(piece, row, col, dx, dy);
            let (backward, backward_blocked) = self.count_piece(piece, row, col, -dx, -dy);
            let total = 1 + forward + backward;
            if total > WINNING_COUNT {
                return true;
            }
            if total == WINNING_COUNT && !(forward_blocked && backward_blocked) {
                return true;
            }
        }
        false
    }

    pub fn is_winning_board(&self) -> bool {
        match self.last_move() {
            Some(index) => self.has_winning_line(index),
            None => false,
        }
    }

    /// Probe: would playing `index` complete a winning line for the side to
    /// move? Leaves the board unchanged.
    pub fn is_winning_move(&mut self, index: usize) -> bool {
        if !self.make_move(index) {
            return false;
        }
        let result = self.has_winning_line(index);
        self.undo_move(index);
        result
    }

    /// Adjacency gate: any non-empty cell (stones and blockers alike) within
    /// `radius` king-steps of (row, col)?
    pub fn has_neighbor(&self, row: usize, col: usize, radius: u32) -> bool {
        for &(dx, dy) in &EIGHT_DIRECTIONS {
            for step in 1..=radius as i32 {
                let r = row as i32 + step * dy;
                let c = col as i32 + step * dx;
                if !self.in_bounds(r, c) {
                    continue;
                }
                if self.cells[r as usize * self.size + c as usize] != Cell::Empty {
                    return true;
                }
            }
        }
        false
    }
}
