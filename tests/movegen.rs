use fivebot::board::{Board, BoardState, Cell, Player};
use fivebot::eval::PatternValues;
use fivebot::search::{best_block_move, tactical_moves};

const SIZE: usize = 15;

fn position(max_cells: &[usize], min_cells: &[usize], to_move: Player) -> Board {
    let mut cells = vec![Cell::Empty; SIZE * SIZE];
    for &idx in max_cells {
        cells[idx] = Cell::Max;
    }
    for &idx in min_cells {
        cells[idx] = Cell::Min;
    }
    Board::from_state(&BoardState {
        cells,
        board_size: SIZE,
        current_player: to_move,
        last_move: None,
    })
}

#[test]
fn winning_cell_short_circuits() {
    let mut board = position(&[16, 17, 18, 19], &[80, 81, 82], Player::Max);
    let moves = tactical_moves(&mut board, &PatternValues::default(), 1, 12);
    assert_eq!(moves, vec![15], "first completing cell ends the scan");
}

#[test]
fn blocking_cells_outrank_everything_else() {
    // Min threatens an open four; Max must answer at one of its ends.
    let mut board = position(&[50], &[16, 17, 18, 19], Player::Max);
    let moves = tactical_moves(&mut board, &PatternValues::default(), 1, 12);
    assert_eq!(moves, vec![15, 20]);
}

#[test]
fn double_four_crossing_beats_single_threats() {
    // Two Max open threes cross at cell 16; playing there makes two fours
    // at once. Extending either three alone is only a single threat.
    let mut board = position(&[17, 18, 19, 31, 46, 61], &[200, 202], Player::Max);
    let moves = tactical_moves(&mut board, &PatternValues::default(), 1, 12);
    assert_eq!(moves, vec![16]);
}

#[test]
fn blocks_opponent_double_threat() {
    let mut board = position(&[200, 202], &[17, 18, 19, 31, 46, 61], Player::Max);
    let moves = tactical_moves(&mut board, &PatternValues::default(), 1, 12);
    assert_eq!(moves, vec![16]);
}

#[test]
fn cutoff_truncates_candidates() {
    let mut board = position(&[40], &[200], Player::Max);
    let moves = tactical_moves(&mut board, &PatternValues::default(), 1, 3);
    assert_eq!(moves.len(), 3);
}

#[test]
fn gate_admits_only_cells_near_stones() {
    // Fresh board: the only occupied cell is the center blocker.
    let mut board = Board::new(SIZE);
    let moves = tactical_moves(&mut board, &PatternValues::default(), 1, 12);
    assert_eq!(moves.len(), 8, "the blocker's eight neighbors");
    let (cr, cc) = board.row_col(board.center());
    for mv in moves {
        let (r, c) = board.row_col(mv);
        assert!(r.abs_diff(cr) <= 1 && c.abs_diff(cc) <= 1);
    }
}

#[test]
fn generation_leaves_board_untouched() {
    let mut board = position(&[40, 41], &[200, 201], Player::Max);
    let hash = board.state_hash();
    let count = board.move_count();
    tactical_moves(&mut board, &PatternValues::default(), 1, 12);
    assert_eq!(board.state_hash(), hash);
    assert_eq!(board.move_count(), count);
}

#[test]
fn block_move_picks_strongest_extension() {
    // Min's three starts one cell off the left edge, so its right
    // extension is the only one yielding an open four.
    let mut board = position(&[], &[16, 17, 18], Player::Max);
    let block = best_block_move(&mut board, &PatternValues::default());
    assert_eq!(block, Some(19));
}

#[test]
fn block_move_none_without_threats() {
    let mut board = Board::new(SIZE);
    assert_eq!(best_block_move(&mut board, &PatternValues::default()), None);
}
