use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Provably-fair mine field predictor", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with engine settings and defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict a board and play it, by hand or automatically
    Play(commands::PlayArgs),
    /// Analyse a seed and list the mines it places
    Verify(commands::VerifyArgs),
    /// Print win probability and multipliers for every mine count
    Odds,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {args:?}");

    let config = config::CliConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Play(play) => commands::play(&config, play),
        Command::Verify(verify) => commands::verify(verify),
        Command::Odds => {
            commands::odds();
            Ok(())
        }
    }
}
