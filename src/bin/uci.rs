use clap::Parser;
use movepick::strategy::{StrategyConfig, StrategyKind, DEFAULT_DEPTH};
use movepick::uci::UciEngine;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "uci", about = "Serve the movepick engine over UCI on stdin/stdout")]
struct Args {
    #[arg(long, value_enum, default_value = "minimax")]
    strategy: StrategyKind,
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    #[arg(long)]
    model: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let config = StrategyConfig::from_kind(a.strategy, a.depth, a.model.as_deref())?;
    let mut engine = UciEngine::new(config, a.seed);
    engine.run_loop();
    Ok(())
}
