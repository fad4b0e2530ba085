mod config;
mod errors;
mod evaluator;
mod logger;
mod mask;
mod normalizer;
mod obfuscator;
mod parse;
mod replacer;
mod selector;
mod walker;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use config::load_config;
use errors::AppError;
use mask::MaskGenerator;

#[derive(Parser)]
#[command(name = "codecloak", version)]
struct Cli {
    /// Root directory whose Go sources are rewritten in place
    root: PathBuf,

    /// Optional JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Go toolchain binary used as the literal-decoding oracle
    #[arg(long)]
    go_binary: Option<String>,

    /// Seed the mask RNG for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), AppError> {
    logger::init();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref(), cli.go_binary.as_deref())?;

    let masks = match cli.seed {
        Some(seed) => MaskGenerator::seeded(seed),
        None => MaskGenerator::new(),
    };

    info!(root = %cli.root.display(), "obfuscating string literals");
    walker::obfuscate_tree(&cli.root, &cfg, masks)
}
