use anyhow::Context;
use cozy_chess::Color;
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use crate::board::Position;
use crate::error::Result;
use crate::strategy::{MoveGenerator, Strategy, StrategyConfig, StrategyKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
    /// Ply cap reached with the game still running.
    Unfinished,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub outcome: Outcome,
    pub final_fen: String,
}

/// Play one game between two generators starting from `start`.
pub fn play_game(
    white: &mut dyn MoveGenerator,
    black: &mut dyn MoveGenerator,
    start: Position,
    max_plies: usize,
) -> Result<GameRecord> {
    let start_fen = start.to_fen();
    let mut pos = start;
    let mut moves = Vec::new();
    let outcome = loop {
        if !pos.has_legal_moves() {
            if !pos.is_check() { break Outcome::Draw; }
            break if pos.side_to_move() == Color::White { Outcome::BlackWins } else { Outcome::WhiteWins };
        }
        if pos.is_draw() { break Outcome::Draw; }
        if moves.len() >= max_plies { break Outcome::Unfinished; }
        let mv = if pos.side_to_move() == Color::White {
            white.generate_move(&pos)?
        } else {
            black.generate_move(&pos)?
        };
        moves.push(pos.move_to_uci(mv));
        pos = pos.apply(mv)?;
    };
    Ok(GameRecord { start_fen, moves, outcome, final_fen: pos.to_fen() })
}

#[derive(Clone, Debug)]
pub struct ArenaParams {
    pub games: usize,
    pub max_plies: usize,
    pub white: StrategyConfig,
    pub black: StrategyConfig,
    pub seed: u64,
    pub openings_path: Option<PathBuf>, // optional FEN/EPD list, one per line
}

#[derive(Debug, Serialize)]
pub struct ArenaReport {
    pub white: StrategyKind,
    pub black: StrategyKind,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub games: Vec<GameRecord>,
}

impl ArenaReport {
    fn tally(white: StrategyKind, black: StrategyKind, games: Vec<GameRecord>) -> Self {
        let count = |o: Outcome| games.iter().filter(|g| g.outcome == o).count();
        Self {
            white,
            black,
            white_wins: count(Outcome::WhiteWins),
            black_wins: count(Outcome::BlackWins),
            draws: count(Outcome::Draw),
            unfinished: count(Outcome::Unfinished),
            games,
        }
    }
}

/// Play `params.games` independent games in parallel. Each game gets its own
/// strategy instances, seeded from `seed` and the game index, so no search
/// state is shared between threads. `on_game_done` runs once per finished game.
pub fn run_arena<F>(params: &ArenaParams, on_game_done: F) -> anyhow::Result<ArenaReport>
where
    F: Fn(&GameRecord) + Sync,
{
    let openings = load_openings(params)?;
    info!(
        "arena: {} games, white={:?} black={:?}, {} openings",
        params.games, params.white, params.black, openings.len()
    );
    let games = (0..params.games)
        .into_par_iter()
        .map(|gi| {
            let start = if openings.is_empty() { Position::startpos() } else { openings[gi % openings.len()].clone() };
            let base = params.seed.wrapping_add(2 * gi as u64);
            let mut white = Strategy::new(&params.white, Some(base));
            let mut black = Strategy::new(&params.black, Some(base + 1));
            let record = play_game(&mut white, &mut black, start, params.max_plies)
                .with_context(|| format!("arena game {gi}"))?;
            on_game_done(&record);
            Ok(record)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(ArenaReport::tally(params.white.kind(), params.black.kind(), games))
}

fn load_openings(params: &ArenaParams) -> anyhow::Result<Vec<Position>> {
    let mut out = Vec::new();
    let Some(ref p) = params.openings_path else { return Ok(out) };
    let text = std::fs::read_to_string(p).with_context(|| format!("read openings {}", p.display()))?;
    for line in text.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') { continue; }
        // Support EPD (4 fields) by padding halfmove/fullmove
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let fen = if parts.len() >= 6 {
            parts[0..6].join(" ")
        } else if parts.len() >= 4 {
            let mut v = parts[0..4].to_vec();
            v.push("0"); v.push("1"); v.join(" ")
        } else { raw.to_string() };
        match Position::from_fen(&fen) {
            Ok(pos) => out.push(pos),
            Err(e) => warn!("skipping opening line: {e}"),
        }
    }
    Ok(out)
}
