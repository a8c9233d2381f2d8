// Gomoku engine: pattern-based evaluation + negamax/alpha-beta search
pub mod board;
pub mod engine;
pub mod eval;
pub mod search;

pub use board::{Board, BoardState, Cell, Player};
pub use engine::{Engine, EngineConfig, Game};
pub use eval::{Evaluator, PatternValues, WIN_VALUE};
