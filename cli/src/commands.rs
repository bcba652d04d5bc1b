use anyhow::{Context, Result, bail};
use clap::Args;
use minepredict_core::{
    CellCount, CellIndex, GRID_SIDE, GameConfig, MAX_MINES, MIN_MINES, ProbabilitySnapshot,
    Scheduler, Seed, Session, SessionEvent, TOTAL_CELLS, WallClockScheduler, mine_density,
};
use minepredict_protocol::{ExportRecord, ShareSummary};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::render;

#[derive(Args, Debug)]
pub(crate) struct PlayArgs {
    /// Seed for the mine layout; omit to use the configured default or generate one
    #[arg(short, long)]
    seed: Option<String>,

    /// Number of mines, 1 to 24
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=24))]
    mines: Option<CellCount>,

    /// Cells to reveal by hand, in order
    #[arg(short, long, value_delimiter = ',')]
    reveal: Vec<CellIndex>,

    /// Let the auto player reveal cells until the game ends
    #[arg(short, long)]
    auto: bool,

    /// Write the prediction as JSON to this file, or `-` for stdout
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print a short shareable summary
    #[arg(long)]
    share: bool,
}

#[derive(Args, Debug)]
pub(crate) struct VerifyArgs {
    /// Seed to analyse
    #[arg(short, long)]
    seed: String,

    /// Also list the mine positions this seed produces for the given count
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=24))]
    mines: Option<CellCount>,
}

pub(crate) fn play(config: &CliConfig, args: PlayArgs) -> Result<()> {
    let mut session = Session::new(config.engine.clone(), WallClockScheduler::new())?;
    session.subscribe(|event: &SessionEvent| match event {
        SessionEvent::Revealed {
            index,
            outcome,
            auto: true,
        } => println!("auto: cell {index} -> {outcome:?}"),
        SessionEvent::AutoStopped { reason } => log::info!("auto play stopped: {reason:?}"),
        other => log::debug!("{other:?}"),
    });

    let seed = args.seed.as_deref().unwrap_or(config.defaults.seed.as_str());
    let mines = args.mines.unwrap_or(config.defaults.mines);
    let game = session.predict(seed, mines)?;
    println!("seed: {}", game.seed);
    println!("mines: {} ({:.1}% density)", game.mines, game.density() * 100.0);
    println!("{}", render::snapshot(session.snapshot()));

    for index in args.reveal {
        let outcome = session
            .reveal(index)
            .with_context(|| format!("revealing cell {index}"))?;
        println!("cell {index} -> {outcome:?}");
        if session.state().is_finished() {
            break;
        }
    }

    if args.auto && !session.state().is_finished() {
        session.start_auto()?;
        session.run_until_idle();
    }

    print!("{}", render::board(&session.board()));
    println!("{}", render::snapshot(session.snapshot()));

    if args.share {
        let summary = ShareSummary::new(
            game.seed.as_str(),
            game.mines,
            TOTAL_CELLS,
            multiplier_for(&session, &game),
        );
        println!("{}", summary.to_text());
    }

    if let Some(path) = args.export {
        let json = export_record(&session, &game).to_json_pretty()?;
        if path.as_os_str() == "-" {
            println!("{json}");
        } else {
            std::fs::write(&path, json)
                .with_context(|| format!("writing export to {}", path.display()))?;
            log::info!("exported prediction to {}", path.display());
        }
    }

    Ok(())
}

fn export_record<S: Scheduler>(session: &Session<S>, game: &GameConfig) -> ExportRecord {
    ExportRecord {
        timestamp: chrono::Utc::now(),
        hash_seed: game.seed.to_string(),
        mine_amount: game.mines,
        grid_size: GRID_SIDE,
        prediction_count: session.stats().predictions,
        current_multiplier: multiplier_for(session, game),
        mine_positions: session.grid().mine_positions(),
    }
}

/// Multiplier to report: the live one while in play, else the opening one for the config.
fn multiplier_for<S: Scheduler>(session: &Session<S>, game: &GameConfig) -> Option<f64> {
    session
        .snapshot()
        .or_else(|| ProbabilitySnapshot::for_mine_count(game.mines).ok())
        .map(|s| s.actual_multiplier)
}

pub(crate) fn verify(args: VerifyArgs) -> Result<()> {
    let Some(seed) = Seed::parse(&args.seed) else {
        bail!("seed is empty or malformed");
    };
    println!("{}", render::seed_info(seed.as_str(), &seed.info()));

    let Some(mines) = args.mines else {
        return Ok(());
    };
    let game = GameConfig::new(seed, mines)?;
    let positions = game.mine_positions()?;
    let listed: Vec<String> = positions.iter().map(ToString::to_string).collect();
    println!("mines ({mines}): {}", listed.join(", "));
    Ok(())
}

pub(crate) fn odds() {
    println!("mines  safe  density  win      fair      payout");
    for mines in MIN_MINES..=MAX_MINES {
        let Ok(s) = ProbabilitySnapshot::for_mine_count(mines) else {
            continue;
        };
        println!(
            "{:>5}  {:>4}  {:>6.1}%  {:>6.1}%  {:>7.4}x  {:>7.4}x",
            mines,
            s.safe_remaining(),
            mine_density(mines) * 100.0,
            s.win_probability * 100.0,
            s.fair_multiplier,
            s.actual_multiplier
        );
    }
}
