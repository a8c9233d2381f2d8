use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState, Player};
use crate::eval::pattern::PatternType;
use crate::eval::{Evaluator, PatternValues};
use crate::search::{best_block_move, tactical_moves, SearchDomain, Searcher};

/// Engine tuning, loadable from JSON. Every field has a sensible default so
/// a partial config file works.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies.
    pub lookahead: u32,
    pub pattern_values: PatternValues,
    /// Multiplier on the side-to-move's pattern scores.
    pub current_player_scaler: f64,
    /// Candidate moves kept per node.
    pub moves_cutoff: usize,
    /// Apply the forced-win heuristic on top of the pattern score.
    pub check_sure_win: bool,
    /// Adjacency gate radius for candidate generation.
    pub neighbor_radius: u32,
    /// When set, iterative deepening under this time budget instead of a
    /// fixed-depth search.
    pub movetime_ms: Option<u64>,
    pub tt_entries: usize,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            lookahead: 3,
            pattern_values: PatternValues::default(),
            current_player_scaler: 1.5,
            moves_cutoff: 12,
            check_sure_win: true,
            neighbor_radius: 1,
            movetime_ms: None,
            tt_entries: 1 << 20,
        }
    }
}

// Adapter binding a position to the evaluator for the generic search.
struct GomokuDomain<'a> {
    board: &'a mut Board,
    evaluator: &'a mut Evaluator,
    values: PatternValues,
    radius: u32,
    cutoff: usize,
}

impl SearchDomain for GomokuDomain<'_> {
    type Move = usize;

    fn evaluate(&mut self, hash: u64) -> i64 {
        self.evaluator.evaluate(self.board, hash)
    }

    fn evaluate_terminal(&mut self, hash: u64) -> i64 {
        self.evaluator.evaluate_terminal(self.board, hash)
    }

    fn state_hash(&self) -> u64 {
        self.board.state_hash()
    }

    fn is_terminal(&self) -> bool {
        self.board.is_winning_board()
    }

    fn potential_moves(&mut self) -> Vec<usize> {
        tactical_moves(self.board, &self.values, self.radius, self.cutoff)
    }

    fn apply_move(&mut self, mv: usize) -> bool {
        self.board.make_move(mv)
    }

    fn undo_move(&mut self, mv: usize) -> bool {
        self.board.undo_move(mv)
    }

    fn side_sign(&self) -> i64 {
        self.board.current_player().sign()
    }
}

/// Game facade: owns the evaluator and searcher, answers move queries for
/// caller-supplied positions. Queries take a snapshot in and hand a cell
/// index back; the engine never retains references to caller state.
pub struct Engine {
    config: EngineConfig,
    evaluator: Evaluator,
    searcher: Searcher,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Engine {
        let evaluator = Evaluator::new(
            config.pattern_values.clone(),
            config.current_player_scaler,
            config.check_sure_win,
        );
        let searcher = Searcher::new(config.tt_entries);
        Engine {
            config,
            evaluator,
            searcher,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for the side to move in `state`, or `None` when the search
    /// finds no candidate (full board, or no cell near the action).
    pub fn find_best_move(&mut self, state: &BoardState) -> Option<usize> {
        let mut board = Board::from_state(state);
        let mut domain = GomokuDomain {
            board: &mut board,
            evaluator: &mut self.evaluator,
            values: self.config.pattern_values.clone(),
            radius: self.config.neighbor_radius,
            cutoff: self.config.moves_cutoff,
        };
        let result = match self.config.movetime_ms {
            Some(ms) => {
                let deadline = Instant::now() + Duration::from_millis(ms);
                self.searcher
                    .find_best_move_deepening(&mut domain, self.config.lookahead, Some(deadline))
            }
            None => self
                .searcher
                .find_best_move(&mut domain, self.config.lookahead),
        };
        info!(
            "best move {:?} value {} ({} nodes, depth {})",
            result.best_move, result.value, result.nodes, result.depth
        );
        result.best_move
    }

    /// The most blocking reply, for callers that want a move even when the
    /// position is lost.
    pub fn best_block_move(&mut self, state: &BoardState) -> Option<usize> {
        let mut board = Board::from_state(state);
        best_block_move(&mut board, &self.config.pattern_values)
    }

    /// Static evaluation of a position, from Max's perspective.
    pub fn evaluate(&mut self, state: &BoardState) -> i64 {
        let board = Board::from_state(state);
        let hash = board.state_hash();
        self.evaluator.evaluate(&board, hash)
    }

    /// Forget everything learned from the previous game. Caches only; the
    /// caller owns the board.
    pub fn reset_game(&mut self) {
        self.searcher.clear_cache();
        self.evaluator.clear_cache();
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.searcher.set_seed(seed);
    }

    pub fn look_ahead(&self) -> u32 {
        self.config.lookahead
    }

    pub fn set_look_ahead(&mut self, plies: u32) {
        self.config.lookahead = plies;
    }

    pub fn pattern_value(&self, ty: PatternType) -> i64 {
        self.evaluator.pattern_value(ty)
    }

    /// Retune one pattern score. Cached evaluations are invalidated.
    pub fn set_pattern_value(&mut self, ty: PatternType, value: i64) {
        self.config.pattern_values.set(ty, value);
        self.evaluator.set_pattern_value(ty, value);
        self.searcher.clear_cache();
    }

    pub fn current_player_value_scaler(&self) -> f64 {
        self.evaluator.current_player_scaler()
    }

    pub fn set_current_player_value_scaler(&mut self, scaler: f64) {
        self.config.current_player_scaler = scaler;
        self.evaluator.set_current_player_scaler(scaler);
        self.searcher.clear_cache();
    }

    pub fn check_sure_win(&self) -> bool {
        self.evaluator.check_sure_win()
    }

    pub fn set_check_sure_win(&mut self, enabled: bool) {
        self.config.check_sure_win = enabled;
        self.evaluator.set_check_sure_win(enabled);
        self.searcher.clear_cache();
    }
}

/// A complete playable game: a live board plus an engine, the convenience
/// wrapper the CLI drives.
pub struct Game {
    board: Board,
    engine: Engine,
}

impl Game {
    pub fn new(board_size: usize, config: EngineConfig) -> Game {
        Game {
            board: Board::new(board_size),
            engine: Engine::new(config),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn current_player(&self) -> Player {
        self.board.current_player()
    }

    pub fn make_move(&mut self, index: usize) -> bool {
        self.board.make_move(index)
    }

    pub fn is_over(&self) -> bool {
        self.board.is_winning_board() || self.board.is_board_full()
    }

    /// Let the engine choose and play a move. Falls back to the most
    /// blocking reply when the search comes up empty.
    pub fn engine_move(&mut self) -> Option<usize> {
        let state = self.board.to_state();
        let mv = self
            .engine
            .find_best_move(&state)
            .or_else(|| self.engine.best_block_move(&state))?;
        if self.board.make_move(mv) {
            Some(mv)
        } else {
            None
        }
    }

    /// Start a fresh game, dropping engine caches with it.
    pub fn reset(&mut self) {
        self.board.reset();
        self.engine.reset_game();
    }
}
