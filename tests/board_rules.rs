use fivebot::board::{parse_coord, Board, Cell, CoordParseError, Player};

fn play(board: &mut Board, moves: &[usize]) {
    for &mv in moves {
        assert!(board.make_move(mv), "move {mv} must be legal");
    }
}

#[test]
fn new_board_seeds_center_blocker() {
    let board = Board::new(15);
    assert_eq!(board.cell_at(board.center()), Cell::Blocker);
    assert_eq!(board.current_player(), Player::Max);
    assert_eq!(board.move_count(), 0);
}

#[test]
fn make_move_rejects_occupied_and_out_of_range() {
    let mut board = Board::new(15);
    assert!(!board.make_move(board.center()), "blocker cell is occupied");
    assert!(!board.make_move(board.cell_count()), "index out of range");
    assert!(board.make_move(0));
    assert!(!board.make_move(0), "cell already taken");
    // Failed moves must not flip the turn.
    assert_eq!(board.current_player(), Player::Min);
}

#[test]
fn undo_only_accepts_last_move() {
    let mut board = Board::new(15);
    play(&mut board, &[0, 1, 2]);
    assert!(!board.undo_move(1), "1 is not the last move");
    assert_eq!(board.move_count(), 3);
    assert!(board.undo_move(2));
    assert_eq!(board.cell_at(2), Cell::Empty);
    assert_eq!(board.current_player(), Player::Max);
}

#[test]
fn undo_moves_rejects_overdraw() {
    let mut board = Board::new(15);
    play(&mut board, &[0, 1]);
    assert!(!board.undo_moves(3));
    assert_eq!(board.move_count(), 2, "failed undo must not mutate");
    assert!(board.undo_moves(2));
    assert_eq!(board.move_count(), 0);
}

#[test]
fn make_undo_restores_hash() {
    let mut board = Board::new(15);
    let before = board.state_hash();
    play(&mut board, &[16, 31, 17]);
    board.undo_moves(3);
    assert_eq!(board.state_hash(), before);
}

#[test]
fn hash_distinguishes_side_to_move() {
    // Same stones, different player on move.
    let mut a = Board::new(15);
    play(&mut a, &[16, 31]);
    let state = a.to_state();
    let mut flipped = state.clone();
    flipped.current_player = Player::Min;
    let b = Board::from_state(&flipped);
    assert_ne!(Board::from_state(&state).state_hash(), b.state_hash());
}

#[test]
fn five_in_a_row_wins() {
    let mut board = Board::new(15);
    // Max on row 0, Min parked far away.
    play(&mut board, &[0, 100, 1, 101, 2, 102, 3, 103, 4]);
    assert!(board.has_winning_line(4));
    assert!(board.is_winning_board());
}

#[test]
fn overline_wins_even_when_flanked() {
    let mut board = Board::new(15);
    // o xxxxxx o on row 1: opponent caps both ends of a six.
    play(
        &mut board,
        &[16, 15, 17, 22, 18, 100, 19, 101, 20, 102, 21],
    );
    assert_eq!(board.cell_at(15), Cell::Min);
    assert_eq!(board.cell_at(22), Cell::Min);
    assert!(board.has_winning_line(21), "overline ignores flanking");
}

#[test]
fn flanked_five_is_not_a_win() {
    let mut board = Board::new(15);
    // Min stones at both ends of Max's exact five on row 1.
    play(&mut board, &[16, 15, 17, 21, 18, 100, 19, 101, 20]);
    assert!(!board.has_winning_line(20), "o xxxxx o is dead");
}

#[test]
fn edge_bounded_five_wins() {
    let mut board = Board::new(15);
    // Five against the left edge, opponent only on the right end.
    play(&mut board, &[0, 5, 1, 100, 2, 101, 3, 102, 4]);
    assert_eq!(board.cell_at(5), Cell::Min);
    assert!(board.has_winning_line(4), "edge is a neutral boundary");
}

#[test]
fn blocker_bounded_five_wins() {
    let mut board = Board::new(15);
    // Five to the right of the center blocker, opponent on the far end.
    // Layout on row 7: # x x x x x o
    play(&mut board, &[113, 118, 114, 100, 115, 101, 116, 102, 117]);
    assert!(board.has_winning_line(117), "blocker is a neutral boundary");
}

#[test]
fn diagonal_five_wins() {
    let mut board = Board::new(15);
    let diag: Vec<usize> = (0..5).map(|i| i * 16).collect();
    let mut moves = Vec::new();
    for (i, &mv) in diag.iter().enumerate() {
        moves.push(mv);
        if i < 4 {
            moves.push(200 + i);
        }
    }
    play(&mut board, &moves);
    assert!(board.has_winning_line(diag[4]));
}

#[test]
fn is_winning_move_probe_leaves_board_unchanged() {
    let mut board = Board::new(15);
    play(&mut board, &[0, 100, 1, 101, 2, 102, 3, 103]);
    let hash = board.state_hash();
    assert!(board.is_winning_move(4));
    assert!(!board.is_winning_move(10));
    assert_eq!(board.cell_at(4), Cell::Empty);
    assert_eq!(board.state_hash(), hash);
    assert_eq!(board.move_count(), 8);
}

#[test]
fn has_neighbor_counts_blocker() {
    let board = Board::new(15);
    let (row, col) = board.row_col(board.center());
    assert!(board.has_neighbor(row, col + 1, 1));
    assert!(!board.has_neighbor(0, 0, 1));
    assert!(board.has_neighbor(row, col + 2, 2));
}

#[test]
fn reset_restores_fresh_board() {
    let mut board = Board::new(15);
    play(&mut board, &[0, 1, 2]);
    board.reset();
    let once = board.state_hash();
    board.reset();
    assert_eq!(board.state_hash(), once, "reset is idempotent");
    assert_eq!(board.move_count(), 0);
    assert_eq!(board.cell_at(0), Cell::Empty);
    assert_eq!(board.cell_at(board.center()), Cell::Blocker);
    assert_eq!(board.current_player(), Player::Max);
    assert_eq!(board.state_hash(), Board::new(15).state_hash());
}

#[test]
fn state_round_trip() {
    let mut board = Board::new(15);
    play(&mut board, &[16, 31, 17]);
    let state = board.to_state();
    let restored = Board::from_state(&state);
    assert_eq!(restored.state_hash(), board.state_hash());
    assert_eq!(restored.current_player(), board.current_player());
    assert_eq!(restored.last_move(), Some(17));
}

#[test]
fn board_state_serializes() {
    let board = Board::new(9);
    let json = serde_json::to_string(&board.to_state()).unwrap();
    let back: fivebot::BoardState = serde_json::from_str(&json).unwrap();
    assert_eq!(back.board_size, 9);
    assert_eq!(back.cells[board.center()], Cell::Blocker);
}

#[test]
fn coordinate_parsing() {
    assert_eq!(parse_coord("3,4", 15), Ok(3 * 15 + 4));
    assert_eq!(parse_coord(" 0 , 14 ", 15), Ok(14));
    assert!(matches!(
        parse_coord("15,0", 15),
        Err(CoordParseError::OutOfRange(15, 15))
    ));
    assert!(matches!(
        parse_coord("abc", 15),
        Err(CoordParseError::Malformed(_))
    ));
    assert!(matches!(
        parse_coord("1,2,3", 15),
        Err(CoordParseError::Malformed(_))
    ));
}
