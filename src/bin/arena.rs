use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use movepick::arena::{run_arena, ArenaParams};
use movepick::strategy::{StrategyConfig, StrategyKind, DEFAULT_DEPTH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arena", about = "Play two move generators against each other and report the results")]
struct Args {
    #[arg(long, value_enum, default_value = "minimax")]
    white: StrategyKind,
    #[arg(long, value_enum, default_value = "random")]
    black: StrategyKind,
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    white_depth: u32,
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    black_depth: u32,
    /// Linear policy file used by any side playing the model strategy
    #[arg(long)]
    model: Option<PathBuf>,
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Worker threads (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,
    #[arg(long)]
    openings: Option<PathBuf>,
    /// Write the JSON report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    if a.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(a.threads).build_global()?;
    }
    let params = ArenaParams {
        games: a.games,
        max_plies: a.max_plies,
        white: StrategyConfig::from_kind(a.white, a.white_depth, a.model.as_deref())?,
        black: StrategyConfig::from_kind(a.black, a.black_depth, a.model.as_deref())?,
        seed: a.seed,
        openings_path: a.openings,
    };
    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {elapsed_precise}")?);
    let report = run_arena(&params, |_| pb.inc(1))?;
    pb.finish();
    eprintln!(
        "white ({:?}) wins {}, black ({:?}) wins {}, draws {}, unfinished {}",
        report.white, report.white_wins, report.black, report.black_wins, report.draws, report.unfinished
    );
    let json = serde_json::to_string_pretty(&report)?;
    match a.out {
        Some(path) => std::fs::write(&path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
