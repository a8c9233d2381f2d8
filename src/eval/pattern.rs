use crate::board::{Board, Cell, WINNING_COUNT};

/// Line pattern categories. Open ends can still extend on both sides,
/// Blocked on one, Closed on none. Broken patterns contain a single gap.
/// Over5 is an overline of six or more stones.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(usize)]
pub enum PatternType {
    None = 0,
    Open5,
    Open4,
    Open3,
    Open2,
    Blocked5,
    Blocked4,
    Blocked3,
    Blocked2,
    OpenBroken5,
    OpenBroken4,
    OpenBroken3,
    OpenBroken2,
    BlockedBroken5,
    BlockedBroken4,
    BlockedBroken3,
    BlockedBroken2,
    Closed5,
    Closed4,
    Closed3,
    Closed2,
    Over5,
}

pub const PATTERN_TYPE_COUNT: usize = 22;

// Window cell classes, one base-4 nibble each.
const CLASS_EMPTY: u32 = 0; // '_'
const CLASS_PIECE: u32 = 1; // 'x'
const CLASS_OPPONENT: u32 = 2; // 'o'
const CLASS_BOUND: u32 = 3; // '#', a blocker or the board edge

/// A classified line window: the category plus the owner's stone indices
/// inside it, used for processed-cell marking and duplicate elimination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub ty: PatternType,
    pub cells: Vec<usize>,
}

impl Pattern {
    pub fn none() -> Pattern {
        Pattern {
            ty: PatternType::None,
            cells: Vec::new(),
        }
    }

    /// Two walks describe the same physical pattern when their categories
    /// match and their stone sets match, in order or reversed.
    pub fn is_same(&self, other: &Pattern) -> bool {
        if self.ty != other.ty || self.cells.len() != other.cells.len() {
            return false;
        }
        let len = self.cells.len();
        (0..len).all(|i| {
            self.cells[i] == other.cells[i] || self.cells[i] == other.cells[len - i - 1]
        })
    }
}

fn cell_class(board: &Board, row: i32, col: i32, owner: Cell) -> u32 {
    if !board.in_bounds(row, col) {
        return CLASS_BOUND;
    }
    let cell = board.value_at(row, col);
    if cell == owner {
        CLASS_PIECE
    } else {
        match cell {
            Cell::Empty => CLASS_EMPTY,
            Cell::Blocker => CLASS_BOUND,
            _ => CLASS_OPPONENT,
        }
    }
}

/// Classify the line window starting at (row, col) in direction (dx, dy).
///
/// The window opens with the class of the cell behind the start, then the
/// start stone, then up to five forward cells. The walk tolerates one gap
/// and stops after a second empty, an opponent stone, or a boundary, so a
/// key is at most seven nibbles.
///
/// With `look_back` the start first slides backward onto the earliest own
/// stone reachable through at most one gap, which lets callers classify
/// from an arbitrary stone of a run instead of its backward end.
pub fn classify(
    board: &Board,
    row: usize,
    col: usize,
    dx: i32,
    dy: i32,
    look_back: bool,
) -> Pattern {
    if !board.in_bounds(row as i32, col as i32) {
        return Pattern::none();
    }
    let owner = board.value_at(row as i32, col as i32);
    if owner == Cell::Empty || owner == Cell::Blocker {
        return Pattern::none();
    }

    let (mut row, mut col) = (row, col);
    if look_back {
        let mut cursor_r = row as i32;
        let mut cursor_c = col as i32;
        let mut spaces = 0;
        for _ in 0..WINNING_COUNT {
            cursor_r -= dy;
            cursor_c -= dx;
            if !board.in_bounds(cursor_r, cursor_c) {
                break;
            }
            let cell = board.value_at(cursor_r, cursor_c);
            if cell == owner {
                row = cursor_r as usize;
                col = cursor_c as usize;
            } else if cell == Cell::Empty {
                spaces += 1;
                if spaces >= 2 {
                    break;
                }
            } else {
                break;
            }
        }
    }

    let mut key = cell_class(board, row as i32 - dy, col as i32 - dx, owner);
    key = (key << 4) | CLASS_PIECE;
    let mut cells = vec![board.to_index(row, col)];
    let mut empties = 0;
    for step in 1..=WINNING_COUNT as i32 {
        let r = row as i32 + step * dy;
        let c = col as i32 + step * dx;
        let class = cell_class(board, r, c, owner);
        key = (key << 4) | class;
        match class {
            CLASS_EMPTY => {
                empties += 1;
                if empties >= 2 {
                    break;
                }
            }
            CLASS_PIECE => cells.push(board.to_index(r as usize, c as usize)),
            _ => break,
        }
    }

    Pattern {
        ty: pattern_type(key),
        cells,
    }
}

/// Frozen window-key table. Keys read left to right as base-4 nibbles:
/// `_` empty, `x` own stone, `o` opponent stone, `#` blocker or edge.
pub fn pattern_type(key: u32) -> PatternType {
    match key {
        // Fives. Only an opponent cap on both ends kills a five; a blocker
        // or edge boundary leaves it winning.
        0x0111110 => PatternType::Open5, // _xxxxx_
        0x0111112 // _xxxxxo
        | 0x0111113 // _xxxxx#
        | 0x2111110 // oxxxxx_
        | 0x3111110 // #xxxxx_
        | 0x2111113 // oxxxxx#
        | 0x3111112 // #xxxxxo
        | 0x3111113 => PatternType::Blocked5, // #xxxxx#
        0x2111112 => PatternType::Closed5, // oxxxxxo

        // Overlines.
        0x0111111 // _xxxxxx
        | 0x2111111 // oxxxxxx
        | 0x3111111 => PatternType::Over5, // #xxxxxx

        // Broken fives: five stones with one internal gap.
        0x0111101 // _xxxx_x
        | 0x0111011 // _xxx_xx
        | 0x0110111 // _xx_xxx
        | 0x0101111 => PatternType::OpenBroken5, // _x_xxxx
        0x2111101 // oxxxx_x
        | 0x2111011 // oxxx_xx
        | 0x2110111 // oxx_xxx
        | 0x2101111 // ox_xxxx
        | 0x3111101 // #xxxx_x
        | 0x3111011 // #xxx_xx
        | 0x3110111 // #xx_xxx
        | 0x3101111 => PatternType::BlockedBroken5, // #x_xxxx

        // Fours.
        0x0111100 // _xxxx__
        | 0x0111102 // _xxxx_o
        | 0x0111103 => PatternType::Open4, // _xxxx_#
        0x011112 // _xxxxo
        | 0x011113 // _xxxx#
        | 0x2111100 // oxxxx__
        | 0x3111100 // #xxxx__
        | 0x2111102 // oxxxx_o
        | 0x2111103 // oxxxx_#
        | 0x3111102 // #xxxx_o
        | 0x3111103 => PatternType::Blocked4, // #xxxx_#
        0x211112 // oxxxxo
        | 0x211113 // oxxxx#
        | 0x311112 // #xxxxo
        | 0x311113 => PatternType::Closed4, // #xxxx#

        // Broken fours.
        0x0111010 // _xxx_x_
        | 0x0110110 // _xx_xx_
        | 0x0101110 => PatternType::OpenBroken4, // _x_xxx_
        0x0111012 // _xxx_xo
        | 0x0110112 // _xx_xxo
        | 0x0101112 // _x_xxxo
        | 0x0111013 // _xxx_x#
        | 0x0110113 // _xx_xx#
        | 0x0101113 // _x_xxx#
        | 0x2111010 // oxxx_x_
        | 0x2110110 // oxx_xx_
        | 0x2101110 // ox_xxx_
        | 0x3111010 // #xxx_x_
        | 0x3110110 // #xx_xx_
        | 0x3101110 // #x_xxx_
        | 0x2111012 // oxxx_xo
        | 0x2111013 // oxxx_x#
        | 0x3111012 // #xxx_xo
        | 0x3111013 // #xxx_x#
        | 0x2110112 // oxx_xxo
        | 0x2110113 // oxx_xx#
        | 0x3110112 // #xx_xxo
        | 0x3110113 // #xx_xx#
        | 0x2101112 // ox_xxxo
        | 0x2101113 // ox_xxx#
        | 0x3101112 // #x_xxxo
        | 0x3101113 => PatternType::BlockedBroken4, // #x_xxx#

        // Threes.
        0x011100 // _xxx__
        | 0x011102 // _xxx_o
        | 0x011103 => PatternType::Open3, // _xxx_#
        0x01112 // _xxxo
        | 0x01113 // _xxx#
        | 0x211100 // oxxx__
        | 0x311100 => PatternType::Blocked3, // #xxx__
        0x211102 // oxxx_o
        | 0x211103 // oxxx_#
        | 0x311102 // #xxx_o
        | 0x311103 // #xxx_#
        | 0x21112 // oxxxo
        | 0x21113 // oxxx#
        | 0x31112 // #xxxo
        | 0x31113 => PatternType::Closed3, // #xxx#

        // Broken threes. A broken three capped on both ends is worthless
        // and stays unclassified.
        0x011010 // _xx_x_
        | 0x010110 => PatternType::OpenBroken3, // _x_xx_
        0x011012 // _xx_xo
        | 0x011013 // _xx_x#
        | 0x010112 // _x_xxo
        | 0x010113 // _x_xx#
        | 0x211010 // oxx_x_
        | 0x311010 // #xx_x_
        | 0x210110 // ox_xx_
        | 0x310110 => PatternType::BlockedBroken3, // #x_xx_

        // Twos.
        0x01100 // _xx__
        | 0x01102 // _xx_o
        | 0x01103 => PatternType::Open2, // _xx_#
        0x0112 // _xxo
        | 0x0113 // _xx#
        | 0x21100 // oxx__
        | 0x31100 => PatternType::Blocked2, // #xx__
        0x01010 => PatternType::OpenBroken2, // _x_x_
        0x01012 // _x_xo
        | 0x01013 // _x_x#
        | 0x21010 // ox_x_
        | 0x31010 => PatternType::BlockedBroken2, // #x_x_
        0x21102 // oxx_o
        | 0x21103 // oxx_#
        | 0x31102 // #xx_o
        | 0x31103 // #xx_#
        | 0x21012 // ox_xo
        | 0x21013 // ox_x#
        | 0x31012 // #x_xo
        | 0x31013 // #x_x#
        | 0x2112 // oxxo
        | 0x2113 // oxx#
        | 0x3112 // #xxo
        | 0x3113 => PatternType::Closed2, // #xx#

        _ => PatternType::None,
    }
}
