pub mod alphabeta;
pub mod movegen;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchDomain, SearchResult, Searcher};
pub use movegen::{best_block_move, tactical_moves, MovePriority};
pub use tt::{Bound, Tt};
