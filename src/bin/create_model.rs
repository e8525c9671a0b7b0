use clap::Parser;
use movepick::network::LinearPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create_model", about = "Write a randomly initialised linear policy file")]
struct Args {
    #[arg(long, default_value = "weights/linear_policy.bin")]
    out: PathBuf,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    if let Some(dir) = a.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    println!("Creating linear policy with random weights (seed={})...", a.seed);
    let model = LinearPolicy::random(a.seed);
    model.save(&a.out)?;
    println!("Model saved to: {}", a.out.display());
    Ok(())
}
