use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use fivebot::board::{parse_coord, Board, Cell, Player};
use fivebot::engine::{EngineConfig, Game};

#[derive(Parser, Debug)]
#[command(name = "fivebot", about = "Gomoku engine with a terminal front end")]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = 15)]
    board_size: usize,

    /// Search depth in plies
    #[arg(long, default_value_t = 3)]
    lookahead: u32,

    /// Candidate moves kept per search node
    #[arg(long, default_value_t = 12)]
    moves_cutoff: usize,

    /// Score multiplier for the side to move
    #[arg(long, default_value_t = 1.5)]
    scaler: f64,

    /// Adjacency radius for candidate generation
    #[arg(long, default_value_t = 1)]
    radius: u32,

    /// Time budget per engine move in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// RNG seed for reproducible tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Play engine vs engine instead of human vs engine
    #[arg(long)]
    selfplay: bool,

    /// Human plays O (second) instead of X
    #[arg(long)]
    second: bool,

    /// JSON engine config file; overrides the tuning flags above
    #[arg(long)]
    config: Option<String>,
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    if let Some(path) = &args.config {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        let config: EngineConfig =
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
        return Ok(config);
    }
    Ok(EngineConfig {
        lookahead: args.lookahead,
        moves_cutoff: args.moves_cutoff,
        current_player_scaler: args.scaler,
        neighbor_radius: args.radius,
        movetime_ms: args.movetime_ms,
        ..EngineConfig::default()
    })
}

fn print_board(board: &Board) {
    let size = board.size();
    print!("   ");
    for col in 0..size {
        print!("{col:>3}");
    }
    println!();
    for row in 0..size {
        print!("{row:>3}");
        for col in 0..size {
            let glyph = match board.value_at(row as i32, col as i32) {
                Cell::Empty => '.',
                Cell::Max => 'X',
                Cell::Min => 'O',
                Cell::Blocker => '#',
            };
            print!("{glyph:>3}");
        }
        println!();
    }
}

fn read_human_move(board: &Board) -> Result<usize> {
    let stdin = io::stdin();
    loop {
        print!("your move (row,col): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("stdin closed");
        }
        match parse_coord(&line, board.size()) {
            Ok(index) if board.cell_at(index) == Cell::Empty => return Ok(index),
            Ok(_) => println!("cell is occupied"),
            Err(err) => println!("{err}"),
        }
    }
}

fn announce_result(board: &Board, winner_label: &str) {
    if board.is_winning_board() {
        println!("{winner_label} wins!");
    } else {
        println!("draw");
    }
}

fn run_selfplay(mut game: Game) -> Result<()> {
    while !game.is_over() {
        let player = game.current_player();
        match game.engine_move() {
            Some(mv) => {
                let (row, col) = game.board().row_col(mv);
                info!("{player:?} plays {row},{col}");
            }
            None => bail!("engine found no move in a live position"),
        }
        print_board(game.board());
    }
    let loser = game.current_player();
    announce_result(game.board(), &format!("{:?}", loser.opponent()));
    Ok(())
}

fn run_human_game(mut game: Game, human: Player) -> Result<()> {
    print_board(game.board());
    while !game.is_over() {
        if game.current_player() == human {
            let mv = read_human_move(game.board())?;
            game.make_move(mv);
        } else {
            match game.engine_move() {
                Some(mv) => {
                    let (row, col) = game.board().row_col(mv);
                    println!("engine plays {row},{col}");
                }
                None => bail!("engine found no move in a live position"),
            }
        }
        print_board(game.board());
    }
    // The loser is on move after a winning line appears.
    let label = if game.board().is_winning_board() && game.current_player() != human {
        "you"
    } else {
        "engine"
    };
    announce_result(game.board(), label);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    let mut game = Game::new(args.board_size, config);
    if let Some(seed) = args.seed {
        game.engine_mut().set_seed(seed);
    }

    if args.selfplay {
        run_selfplay(game)
    } else {
        let human = if args.second { Player::Min } else { Player::Max };
        run_human_game(game, human)
    }
}
