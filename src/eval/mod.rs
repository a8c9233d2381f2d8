pub mod pattern;
pub mod values;

use std::collections::HashMap;

use log::trace;

use crate::board::{Board, Cell, Player, FOUR_DIRECTIONS};
use crate::eval::pattern::{classify, PatternType, PATTERN_TYPE_COUNT};
pub use crate::eval::values::{threat_level, PatternValues, WIN_VALUE};

/// Pattern occurrence counts for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternCounts([u32; PATTERN_TYPE_COUNT]);

impl PatternCounts {
    pub fn get(&self, ty: PatternType) -> u32 {
        self.0[ty as usize]
    }

    pub fn add(&mut self, ty: PatternType) {
        self.0[ty as usize] += 1;
    }

    fn four_count(&self) -> u32 {
        self.get(PatternType::Open4)
            + self.get(PatternType::Blocked4)
            + self.get(PatternType::OpenBroken4)
            + self.get(PatternType::BlockedBroken4)
    }

    fn open_three_count(&self) -> u32 {
        self.get(PatternType::Open3) + self.get(PatternType::OpenBroken3)
    }
}

/// Full pattern scan result: the signed score plus per-player counts.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub value: i64,
    pub max_counts: PatternCounts,
    pub min_counts: PatternCounts,
}

/// Static evaluator: scans the board for line patterns, applies the tempo
/// scaler and the forced-win heuristic, and memoizes results per state hash.
#[derive(Clone, Debug)]
pub struct Evaluator {
    values: PatternValues,
    scaler: f64,
    check_sure_win: bool,
    memo: HashMap<u64, i64>,
}

impl Default for Evaluator {
    fn default() -> Evaluator {
        Evaluator::new(PatternValues::default(), 1.5, true)
    }
}

impl Evaluator {
    pub fn new(values: PatternValues, scaler: f64, check_sure_win: bool) -> Evaluator {
        Evaluator {
            values,
            scaler,
            check_sure_win,
            memo: HashMap::new(),
        }
    }

    pub fn values(&self) -> &PatternValues {
        &self.values
    }

    pub fn pattern_value(&self, ty: PatternType) -> i64 {
        self.values.get(ty)
    }

    pub fn set_pattern_value(&mut self, ty: PatternType, value: i64) {
        self.values.set(ty, value);
        self.memo.clear();
    }

    pub fn current_player_scaler(&self) -> f64 {
        self.scaler
    }

    pub fn set_current_player_scaler(&mut self, scaler: f64) {
        self.scaler = scaler;
        self.memo.clear();
    }

    pub fn check_sure_win(&self) -> bool {
        self.check_sure_win
    }

    pub fn set_check_sure_win(&mut self, enabled: bool) {
        self.check_sure_win = enabled;
        self.memo.clear();
    }

    pub fn clear_cache(&mut self) {
        self.memo.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.memo.len()
    }

    /// Scan the whole board, counting each physical pattern once.
    ///
    /// Cells are visited in row-major order, which always reaches the
    /// backward end of a run first, so the per-direction walks never look
    /// back. Stones covered by a classified pattern are marked processed for
    /// that direction. Side-to-move patterns are scaled by the tempo scaler.
    /// The scan short-circuits to `±WIN_VALUE` as soon as a winning pattern
    /// appears.
    pub fn count_patterns(&self, board: &Board) -> Evaluation {
        let size = board.size();
        let cell_count = board.cell_count();
        let mut processed = vec![false; FOUR_DIRECTIONS.len() * cell_count];
        let mut max_counts = PatternCounts::default();
        let mut min_counts = PatternCounts::default();
        let mut value: i64 = 0;

        for row in 0..size {
            for col in 0..size {
                let index = row * size + col;
                let piece = board.cell_at(index);
                let player = match piece {
                    Cell::Max => Player::Max,
                    Cell::Min => Player::Min,
                    _ => continue,
                };
                let sign = player.sign();
                let scaled = player == board.current_player();
                for (dir, &(dx, dy)) in FOUR_DIRECTIONS.iter().enumerate() {
                    if processed[dir * cell_count + index] {
                        continue;
                    }
                    let pattern = classify(board, row, col, dx, dy, false);
                    if pattern.ty == PatternType::None {
                        continue;
                    }
                    for &cell in &pattern.cells {
                        processed[dir * cell_count + cell] = true;
                    }
                    match player {
                        Player::Max => max_counts.add(pattern.ty),
                        Player::Min => min_counts.add(pattern.ty),
                    }
                    let pattern_value = self.values.get(pattern.ty);
                    if pattern_value >= WIN_VALUE {
                        return Evaluation {
                            value: sign * WIN_VALUE,
                            max_counts,
                            min_counts,
                        };
                    }
                    let contribution = if scaled {
                        (pattern_value as f64 * self.scaler).round() as i64
                    } else {
                        pattern_value
                    };
                    value += sign * contribution;
                }
            }
        }

        Evaluation {
            value,
            max_counts,
            min_counts,
        }
    }

    /// Forced-win heuristic: decide from the pattern counts alone whether
    /// one side can no longer be stopped. Returns the winner's sign, or 0.
    ///
    /// The side to move wins with any four in hand, or with an open three
    /// the opponent cannot answer with a four of their own. The opponent
    /// wins with an open four, or with more unstoppable threats than one
    /// reply can cover. Deliberately approximate; it trades soundness for a
    /// cheap cutoff.
    pub fn who_is_forced_win(
        &self,
        max_counts: &PatternCounts,
        min_counts: &PatternCounts,
        to_move: Player,
    ) -> i64 {
        let (current, next) = match to_move {
            Player::Max => (max_counts, min_counts),
            Player::Min => (min_counts, max_counts),
        };

        let current_has_four = current.four_count() > 0;
        let current_open_four_next_turn = current.open_three_count() > 0;
        let next_has_four = next.four_count() > 0;

        if current_has_four || (current_open_four_next_turn && !next_has_four) {
            return to_move.sign();
        }

        let next_four_count = next.four_count();
        let next_possible_open_four = next.open_three_count();
        if next.get(PatternType::Open4) > 0
            || next_four_count > 1
            || next_four_count + next_possible_open_four > 1
            || (next_possible_open_four > 1 && !current_open_four_next_turn)
        {
            return -to_move.sign();
        }
        0
    }

    /// Memoized static evaluation from Max's perspective.
    pub fn evaluate(&mut self, board: &Board, hash: u64) -> i64 {
        if let Some(&cached) = self.memo.get(&hash) {
            return cached;
        }
        let evaluation = self.count_patterns(board);
        let mut value = evaluation.value;
        if self.check_sure_win && value.abs() < WIN_VALUE {
            let winner = self.who_is_forced_win(
                &evaluation.max_counts,
                &evaluation.min_counts,
                board.current_player(),
            );
            if winner > 0 {
                value = WIN_VALUE;
            } else if winner < 0 {
                value = -WIN_VALUE;
            }
        }
        trace!("eval {hash:#018x} = {value}");
        self.memo.insert(hash, value);
        value
    }

    /// Evaluation of a finished position. The side to move did not make the
    /// winning move, so the opponent of the side to move has won.
    pub fn evaluate_terminal(&mut self, board: &Board, hash: u64) -> i64 {
        let value = -board.current_player().sign() * WIN_VALUE;
        self.memo.insert(hash, value);
        value
    }
}
