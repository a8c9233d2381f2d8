use std::fmt::Debug;
use std::time::Instant;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::eval::WIN_VALUE;
use crate::search::tt::{Bound, Tt};

pub const INF: i64 = i64::MAX / 2;

/// What the search needs from a game. One negamax serves every domain that
/// can evaluate positions, enumerate moves, and apply/undo them.
///
/// `evaluate` scores from Max's perspective; the search orients it with the
/// side sign. `apply_move`/`undo_move` must be exact inverses; the search
/// undoes every move it applies, on every exit path.
pub trait SearchDomain {
    type Move: Copy + Eq + Debug;

    fn evaluate(&mut self, hash: u64) -> i64;
    fn evaluate_terminal(&mut self, hash: u64) -> i64;
    fn state_hash(&self) -> u64;
    fn is_terminal(&self) -> bool;
    fn potential_moves(&mut self) -> Vec<Self::Move>;
    fn apply_move(&mut self, mv: Self::Move) -> bool;
    fn undo_move(&mut self, mv: Self::Move) -> bool;
    /// +1 when Max is to move, -1 when Min is.
    fn side_sign(&self) -> i64;
}

#[derive(Clone, Copy, Debug)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    pub value: i64,
    pub depth: u32,
    pub nodes: u64,
}

const DEADLINE_CHECK_INTERVAL: u64 = 4096;

/// Negamax alpha-beta searcher with transposition caching and randomized
/// tie-breaking among equal best root moves.
pub struct Searcher {
    tt: Tt,
    rng: SmallRng,
    nodes: u64,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    pub fn new(tt_entries: usize) -> Searcher {
        Searcher {
            tt: Tt::with_capacity_entries(tt_entries),
            rng: SmallRng::from_entropy(),
            nodes: 0,
            deadline: None,
            stopped: false,
        }
    }

    /// Fix the tie-break RNG for reproducible move choices.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    pub fn clear_cache(&mut self) {
        self.tt.clear();
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn out_of_time(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.stopped = true;
                return true;
            }
        }
        false
    }

    fn negamax<D: SearchDomain>(
        &mut self,
        domain: &mut D,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        color: i64,
    ) -> i64 {
        self.nodes += 1;
        if self.out_of_time() {
            return alpha;
        }

        let hash = domain.state_hash();
        if let Some(entry) = self.tt.get(hash) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }
                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        if depth == 0 {
            return color * domain.evaluate(hash);
        }
        if domain.is_terminal() {
            return color * domain.evaluate_terminal(hash);
        }

        let moves = domain.potential_moves();
        if moves.is_empty() {
            return color * domain.evaluate(hash);
        }

        let alpha_origin = alpha;
        let mut best = -INF;
        for mv in moves {
            if !domain.apply_move(mv) {
                continue;
            }
            let value = -self.negamax(domain, depth - 1, -beta, -alpha, -color);
            domain.undo_move(mv);
            if value > best {
                best = value;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }

        if !self.stopped {
            let bound = if best <= alpha_origin {
                Bound::Upper
            } else if best >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.tt.put(hash, depth, best, bound);
        }
        best
    }

    /// Fixed-depth search of the root. Ties between equal best moves are
    /// broken at random. Returns `best_move: None` when the domain yields
    /// no moves.
    pub fn find_best_move<D: SearchDomain>(
        &mut self,
        domain: &mut D,
        depth: u32,
    ) -> SearchResult<D::Move> {
        self.nodes = 0;
        self.stopped = false;
        self.search_root(domain, depth)
    }

    /// Iterative deepening up to `max_depth` within an optional time budget.
    /// An iteration cut short by the deadline is discarded; the last
    /// completed one stands.
    pub fn find_best_move_deepening<D: SearchDomain>(
        &mut self,
        domain: &mut D,
        max_depth: u32,
        deadline: Option<Instant>,
    ) -> SearchResult<D::Move> {
        self.nodes = 0;
        self.stopped = false;
        self.deadline = deadline;
        let mut result = SearchResult {
            best_move: None,
            value: 0,
            depth: 0,
            nodes: 0,
        };
        for depth in 1..=max_depth {
            self.tt.bump_generation();
            let iteration = self.search_root(domain, depth);
            if self.stopped {
                if result.best_move.is_none() {
                    result = iteration;
                }
                break;
            }
            result = iteration;
            if result.value.abs() >= WIN_VALUE {
                break;
            }
        }
        self.deadline = None;
        result
    }

    fn search_root<D: SearchDomain>(&mut self, domain: &mut D, depth: u32) -> SearchResult<D::Move> {
        let color = domain.side_sign();
        let moves = domain.potential_moves();
        let mut best_value = -INF;
        let mut ties: Vec<D::Move> = Vec::new();

        for mv in moves {
            if !domain.apply_move(mv) {
                continue;
            }
            // Full window per root move so ties carry exact values.
            let value = -self.negamax(domain, depth.saturating_sub(1), -INF, INF, -color);
            domain.undo_move(mv);
            if self.stopped {
                break;
            }
            debug!("root {mv:?} depth {depth} value {value}");
            if value > best_value {
                best_value = value;
                ties.clear();
                ties.push(mv);
            } else if value == best_value {
                ties.push(mv);
            }
        }

        let best_move = if ties.is_empty() {
            None
        } else {
            Some(ties[self.rng.gen_range(0..ties.len())])
        };
        debug!(
            "search depth {depth}: {} nodes, value {best_value}, move {best_move:?}",
            self.nodes
        );
        SearchResult {
            best_move,
            value: best_value,
            depth,
            nodes: self.nodes,
        }
    }
}
