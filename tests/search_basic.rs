use fivebot::board::{BoardState, Cell, Player};
use fivebot::engine::{Engine, EngineConfig};
use fivebot::search::{SearchDomain, Searcher};

/// Fixed two-ply game tree for exercising the search in isolation. Max
/// moves at the root, Min at depth one; leaves carry static values.
struct TreeDomain {
    path: Vec<usize>,
    leaves: fn(&[usize]) -> i64,
    eval_calls: usize,
}

impl TreeDomain {
    fn new(leaves: fn(&[usize]) -> i64) -> TreeDomain {
        TreeDomain {
            path: Vec::new(),
            leaves,
            eval_calls: 0,
        }
    }
}

impl SearchDomain for TreeDomain {
    type Move = usize;

    fn evaluate(&mut self, _hash: u64) -> i64 {
        self.eval_calls += 1;
        (self.leaves)(&self.path)
    }

    fn evaluate_terminal(&mut self, _hash: u64) -> i64 {
        0
    }

    fn state_hash(&self) -> u64 {
        self.path.iter().fold(1u64, |h, &m| h * 8 + m as u64 + 2)
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn potential_moves(&mut self) -> Vec<usize> {
        if self.path.len() < 2 {
            vec![0, 1]
        } else {
            Vec::new()
        }
    }

    fn apply_move(&mut self, mv: usize) -> bool {
        self.path.push(mv);
        true
    }

    fn undo_move(&mut self, mv: usize) -> bool {
        if self.path.last() == Some(&mv) {
            self.path.pop();
            true
        } else {
            false
        }
    }

    fn side_sign(&self) -> i64 {
        if self.path.len() % 2 == 0 {
            1
        } else {
            -1
        }
    }
}

fn minimax_leaves(path: &[usize]) -> i64 {
    match path {
        [0, 0] => 2,
        [0, 1] => 7,
        [1, 0] => 1,
        [1, 1] => 3,
        _ => 0,
    }
}

#[test]
fn finds_minimax_value() {
    let mut domain = TreeDomain::new(minimax_leaves);
    let mut searcher = Searcher::new(1024);
    let result = searcher.find_best_move(&mut domain, 2);
    // Max picks the branch whose worst reply is best: min(2,7)=2 beats
    // min(1,3)=1.
    assert_eq!(result.value, 2);
    assert_eq!(result.best_move, Some(0));
    assert!(domain.path.is_empty(), "search must undo every move");
}

#[test]
fn cached_entries_skip_repeated_subtrees() {
    let mut domain = TreeDomain::new(minimax_leaves);
    let mut searcher = Searcher::new(1024);
    searcher.find_best_move(&mut domain, 2);
    let calls_after_first = domain.eval_calls;
    assert!(calls_after_first > 0);

    let second = searcher.find_best_move(&mut domain, 2);
    assert_eq!(second.value, 2);
    assert_eq!(
        domain.eval_calls, calls_after_first,
        "exact entries must answer the repeat search"
    );

    searcher.clear_cache();
    searcher.find_best_move(&mut domain, 2);
    assert!(domain.eval_calls > calls_after_first);
}

#[test]
fn seeded_tie_break_is_reproducible() {
    fn tied(path: &[usize]) -> i64 {
        match path {
            [0, _] | [1, _] => 5,
            _ => 0,
        }
    }
    let pick = |seed: u64| {
        let mut domain = TreeDomain::new(tied);
        let mut searcher = Searcher::new(1024);
        searcher.set_seed(seed);
        searcher.find_best_move(&mut domain, 2)
    };
    let a = pick(7);
    let b = pick(7);
    assert_eq!(a.value, 5);
    assert_eq!(a.best_move, b.best_move);
    assert!(matches!(a.best_move, Some(0) | Some(1)));
}

// ---- full-engine positions ----

const SIZE: usize = 15;

fn position(max_cells: &[usize], min_cells: &[usize], to_move: Player) -> BoardState {
    let mut cells = vec![Cell::Empty; SIZE * SIZE];
    for &idx in max_cells {
        cells[idx] = Cell::Max;
    }
    for &idx in min_cells {
        cells[idx] = Cell::Min;
    }
    BoardState {
        cells,
        board_size: SIZE,
        current_player: to_move,
        last_move: None,
    }
}

fn engine(lookahead: u32) -> Engine {
    let mut engine = Engine::new(EngineConfig {
        lookahead,
        ..EngineConfig::default()
    });
    engine.set_seed(42);
    engine
}

#[test]
fn plays_the_winning_move() {
    let state = position(&[16, 17, 18, 19], &[80, 81, 82], Player::Max);
    let mv = engine(2).find_best_move(&state);
    assert_eq!(mv, Some(15), "move generation short-circuits on a win");
}

#[test]
fn blocks_the_losing_move() {
    // Min's four is edge-capped on the left; 19 is the only block.
    let state = position(&[50, 65], &[15, 16, 17, 18], Player::Max);
    let mv = engine(2).find_best_move(&state);
    assert_eq!(mv, Some(19));
}

#[test]
fn forced_win_found_at_any_lookahead() {
    // Max on move with an open three and no opposing fours: extending to
    // an open four decides the game, and every search depth must see it.
    let state = position(&[31, 32, 33], &[100, 101], Player::Max);
    for depth in [1, 2, 3, 4] {
        let mv = engine(depth).find_best_move(&state);
        assert!(
            matches!(mv, Some(30) | Some(34)),
            "depth {depth} chose {mv:?} instead of completing the open four"
        );
    }
}

#[test]
fn returns_none_when_no_cell_is_in_range() {
    // Full board: nowhere to play at all.
    let cells = vec![Cell::Max; SIZE * SIZE];
    let state = BoardState {
        cells,
        board_size: SIZE,
        current_player: Player::Min,
        last_move: None,
    };
    assert_eq!(engine(2).find_best_move(&state), None);
}
