use crate::board::{Board, Cell, FOUR_DIRECTIONS};
use crate::eval::pattern::{classify, Pattern, PatternType};
use crate::eval::values::{threat_level, PatternValues};

/// Tactical urgency of a candidate cell, ascending. MultiThreat1 means two
/// or more threats one move from a five; MultiThreat2 means multiple open
/// threes. Creating a threat outranks blocking the same level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum MovePriority {
    None,
    SingleThreat,
    BlockMultiThreat2,
    CreateMultiThreat2,
    BlockMultiThreat1,
    CreateMultiThreat1,
    BlockWin,
    Win,
}

struct Candidate {
    index: usize,
    priority: MovePriority,
    score: i64,
}

// Patterns a stone at (row, col) participates in: forward and backward
// walks per axis with look-back, the backward walk dropped when it sees
// the same physical pattern.
fn patterns_at(board: &Board, row: usize, col: usize) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for &(dx, dy) in &FOUR_DIRECTIONS {
        let forward = classify(board, row, col, dx, dy, true);
        let backward = classify(board, row, col, -dx, -dy, true);
        let same = forward.is_same(&backward);
        if forward.ty != PatternType::None {
            patterns.push(forward);
        }
        if !same && backward.ty != PatternType::None {
            patterns.push(backward);
        }
    }
    patterns
}

fn tally(patterns: &[Pattern], values: &PatternValues) -> (u32, u32, i64) {
    let mut level1 = 0;
    let mut level2 = 0;
    let mut score = 0;
    for pattern in patterns {
        match threat_level(pattern.ty) {
            Some(1) => level1 += 1,
            Some(2) => level2 += 1,
            _ => {}
        }
        score += values.get(pattern.ty);
    }
    (level1, level2, score)
}

/// Generate candidate moves for the side to move.
///
/// Every empty cell with a neighbor inside `radius` is scored by simulating
/// an own stone and an opponent stone there and classifying the resulting
/// patterns. An immediate win short-circuits to that single move. Otherwise
/// only the highest priority tier survives, ranked by summed pattern value
/// and truncated to `cutoff`. An empty result means no cell is near the
/// action (early opening aside, the position is lost to every reply).
pub fn tactical_moves(
    board: &mut Board,
    values: &PatternValues,
    radius: u32,
    cutoff: usize,
) -> Vec<usize> {
    let size = board.size();
    let opponent = board.current_player().opponent();
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut best_priority = MovePriority::None;

    for row in 0..size {
        for col in 0..size {
            let index = row * size + col;
            if board.cell_at(index) != Cell::Empty {
                continue;
            }
            if !board.has_neighbor(row, col, radius) {
                continue;
            }

            board.make_move(index);
            if board.has_winning_line(index) {
                board.undo_move(index);
                return vec![index];
            }
            let own_patterns = patterns_at(board, row, col);
            board.undo_move(index);

            board.place_raw(index, opponent.cell());
            let opponent_wins = board.has_winning_line(index);
            let opponent_patterns = patterns_at(board, row, col);
            board.clear_raw(index);

            let (own1, own2, own_score) = tally(&own_patterns, values);
            let (opp1, opp2, opp_score) = tally(&opponent_patterns, values);

            let priority = if opponent_wins {
                MovePriority::BlockWin
            } else if own1 >= 2 || (own1 >= 1 && own2 >= 1) {
                MovePriority::CreateMultiThreat1
            } else if opp1 >= 2 || (opp1 >= 1 && opp2 >= 1) {
                MovePriority::BlockMultiThreat1
            } else if own2 >= 2 {
                MovePriority::CreateMultiThreat2
            } else if opp2 >= 2 {
                MovePriority::BlockMultiThreat2
            } else if own1 + own2 >= 1 || opp1 + opp2 >= 1 {
                MovePriority::SingleThreat
            } else {
                MovePriority::None
            };

            if priority > best_priority {
                best_priority = priority;
            }
            candidates.push(Candidate {
                index,
                priority,
                score: own_score + opp_score,
            });
        }
    }

    candidates.retain(|c| c.priority == best_priority);
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
    candidates.truncate(cutoff);
    candidates.into_iter().map(|c| c.index).collect()
}

/// Fallback for hopeless positions: the empty cell that would give the
/// opponent the most pattern value, i.e. the most blocking reply.
pub fn best_block_move(board: &mut Board, values: &PatternValues) -> Option<usize> {
    let size = board.size();
    let opponent = board.current_player().opponent();
    let mut best: Option<usize> = None;
    let mut best_value = 0i64;

    for row in 0..size {
        for col in 0..size {
            let index = row * size + col;
            if board.cell_at(index) != Cell::Empty {
                continue;
            }
            board.place_raw(index, opponent.cell());
            let value: i64 = patterns_at(board, row, col)
                .iter()
                .map(|p| values.get(p.ty))
                .sum();
            board.clear_raw(index);
            if value > best_value {
                best_value = value;
                best = Some(index);
            }
        }
    }
    best
}
