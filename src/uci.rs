use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::board::Position;
use crate::strategy::{MoveGenerator, Strategy, StrategyConfig};

pub struct UciEngine {
    pos: Position,
    config: StrategyConfig,
    strategy: Strategy,
    seed: Option<u64>,
}

impl UciEngine {
    pub fn new(config: StrategyConfig, seed: Option<u64>) -> Self {
        let strategy = Strategy::new(&config, seed);
        Self { pos: Position::startpos(), config, strategy, seed }
    }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self) -> Vec<String> {
        vec![
            format!("id name movepick ({})", self.strategy.name()),
            "id author movepick contributors".to_string(),
            "uciok".to_string(),
        ]
    }

    fn cmd_ucinewgame(&mut self) {
        self.pos = Position::startpos();
        self.strategy = Strategy::new(&self.config, self.seed);
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        let base = match tokens.next() {
            Some("startpos") => Position::startpos(),
            Some("fen") => {
                let fen_fields: Vec<&str> = tokens.by_ref().take_while(|t| *t != "moves").collect();
                match Position::from_fen(&fen_fields.join(" ")) {
                    Ok(p) => p,
                    Err(e) => { warn!("{e}"); return; }
                }
            }
            _ => return,
        };
        let moves: Vec<String> = tokens.filter(|t| *t != "moves").map(|s| s.to_string()).collect();
        match base.with_moves(&moves) {
            Ok(p) => self.pos = p,
            Err(e) => warn!("ignoring position command: {e}"),
        }
    }

    fn cmd_go(&mut self, args: &str) -> String {
        // Only 'go depth N' is honoured, and only by the minimax strategy.
        let mut depth: Option<u32> = None;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                depth = tokens.next().and_then(|s| s.parse::<u32>().ok());
            }
        }
        let res = match (&mut self.strategy, depth) {
            (Strategy::Minimax(m), Some(d)) => m.generate_move_with_depth(&self.pos, d),
            (s, _) => s.generate_move(&self.pos),
        };
        match res {
            Ok(mv) => format!("bestmove {}", self.pos.move_to_uci(mv)),
            Err(e) => {
                debug!("no move: {e}");
                "bestmove 0000".to_string()
            }
        }
    }

    /// Handle one command line. Returns the lines to print and whether to stop.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let line = line.trim();
        if line.is_empty() { return (vec![], false); }
        if line == "uci" { return (self.cmd_uci(), false); }
        if line == "isready" { return (vec!["readyok".to_string()], false); }
        if line == "ucinewgame" { self.cmd_ucinewgame(); return (vec![], false); }
        if line == "quit" { return (vec![], true); }
        if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); return (vec![], false); }
        if line == "go" { return (vec![self.cmd_go("")], false); }
        if let Some(rest) = line.strip_prefix("go ") { return (vec![self.cmd_go(rest)], false); }
        debug!("unknown command: {line}");
        (vec![], false)
    }

    pub fn run_loop(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = match line { Ok(s) => s, Err(_) => break };
            let (out, quit) = self.handle_line(&line);
            for l in out { let _ = writeln!(stdout, "{l}"); }
            let _ = stdout.flush();
            if quit { break; }
        }
    }
}
