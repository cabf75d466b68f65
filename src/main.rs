use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use referee::Engine;

/// Checks the legality of chess moves read from a file and reports whether
/// either king is in check after every move.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the file with one command per line.
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    referee::log_engine_info();

    let input = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let mut engine = Engine::new(BufReader::new(input), io::stdout().lock());
    engine.run()
}
