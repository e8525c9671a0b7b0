use anyhow::Result;
use clap::Parser;
use cozy_chess::Color;
use movepick::{MoveGenerator, Position, Strategy, StrategyConfig, StrategyKind};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the movepick engine", long_about = None)]
struct Args {
    /// Move generator used by the computer
    #[arg(long, value_enum, default_value = "minimax")]
    strategy: StrategyKind,

    /// Search depth in plies (minimax only)
    #[arg(long, default_value_t = movepick::strategy::DEFAULT_DEPTH)]
    depth: u32,

    /// Linear policy file (model strategy only)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Your color: 'w' for white, 'b' for black, 'none' to watch the engine play itself
    #[arg(long, default_value = "w")]
    color: String,

    /// Seed for the engine's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,
}

fn parse_color(color_str: &str) -> Result<Option<Color>> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Some(Color::White)),
        "b" | "black" => Ok(Some(Color::Black)),
        "none" => Ok(None),
        _ => anyhow::bail!("Invalid color: use 'w', 'b' or 'none'"),
    }
}

fn print_status(pos: &Position) {
    println!("\n{}", pos);
    if pos.is_check() && !pos.is_mate() {
        println!("Check!");
    }
}

fn get_human_move(pos: &Position) -> Result<Option<String>> {
    loop {
        print!("Enter your move (e.g., e2e4), or 'quit': ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim();
        if input == "quit" {
            return Ok(None);
        }
        // Rejected moves leave the position untouched; ask again.
        match pos.parse_move(input) {
            Ok(mv) => return Ok(Some(pos.move_to_uci(mv))),
            Err(e) => println!("{e}"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;
    let config = StrategyConfig::from_kind(args.strategy, args.depth, args.model.as_deref())?;
    let mut engine = Strategy::new(&config, args.seed);
    println!("Engine strategy: {:?}", config);

    let mut pos = match args.fen {
        Some(fen) => Position::from_fen(&fen)?,
        None => Position::startpos(),
    };

    loop {
        print_status(&pos);
        if pos.is_mate() {
            let winner = if pos.side_to_move() == Color::White { "Black" } else { "White" };
            println!("\nCheckmate! {winner} wins!");
            break;
        }
        if pos.is_stalemate() {
            println!("\nGame is a stalemate!");
            break;
        }
        if pos.is_draw() {
            println!("\nGame is a draw!");
            break;
        }

        if Some(pos.side_to_move()) == human_color {
            match get_human_move(&pos)? {
                Some(uci) => { pos.make_move_uci(&uci)?; }
                None => {
                    println!("Thanks for playing!");
                    break;
                }
            }
        } else {
            let start_time = Instant::now();
            let mv = engine.generate_move(&pos)?;
            println!("Computer plays: {} ({:.2}s)", pos.move_to_uci(mv), start_time.elapsed().as_secs_f32());
            pos = pos.apply(mv)?;
        }
    }

    Ok(())
}
