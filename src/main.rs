//! Command-line battle runner: loads a RON battle config, pits the two
//! configured controllers against each other and prints the battle log.

use clap::{Parser, ValueEnum};
use pokemon_arena::battle::rng::{BattleRng, SeededRng};
use pokemon_arena::{BattleConfig, BattleEngine, BattleFormat, BattleOutcome, BattleResult, BattleRunner};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pokemon-arena")]
#[command(about = "Run an AI-vs-AI creature battle", long_about = None)]
struct Cli {
    /// Battle config file (RON). The stock demo matchup is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed, overriding the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Battle format, overriding the config
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Turn limit, overriding the config
    #[arg(long)]
    max_turns: Option<u32>,

    /// Directory of JSON data files, overriding the config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Only print the final result
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Single,
    Double,
}

impl From<FormatArg> for BattleFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Single => BattleFormat::Single,
            FormatArg::Double => BattleFormat::Double,
        }
    }
}

fn main() {
    // Logs go to stderr so the battle log on stdout stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Battle failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> BattleResult<()> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading battle config from {}", path.display());
            BattleConfig::load(path)?
        }
        None => BattleConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(max_turns) = cli.max_turns {
        config.max_turns = max_turns;
    }
    if let Some(dir) = cli.data {
        config.data_dir = Some(dir);
    }

    let dex = config.load_dex()?;
    let mut rng = match config.seed {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_entropy(),
    };
    let rng: &mut dyn BattleRng = &mut rng;

    let side_a = config.side_a.build_roster(&dex, config.format, config.level, rng)?;
    let side_b = config.side_b.build_roster(&dex, config.format, config.level, rng)?;
    tracing::info!(
        "{} vs {} ({} battle, seed {:?})",
        side_a.name(),
        side_b.name(),
        config.format,
        config.seed
    );

    let engine = BattleEngine::new(side_a, side_b, dex.type_chart().clone())?;
    let mut runner = BattleRunner::new(
        engine,
        config.side_a.controller.behavior(),
        config.side_b.controller.behavior(),
    )
    .with_max_turns(config.max_turns);

    let summary = runner.run(rng)?;

    if !cli.quiet {
        for line in runner.events().formatted_lines(runner.engine()) {
            println!("{}", line);
        }
        println!();
    }

    let engine = runner.engine();
    match summary.outcome {
        Some(BattleOutcome::Winner(side)) => {
            println!("{} wins after {} turns!", engine.roster(side).name(), summary.turns)
        }
        Some(BattleOutcome::Draw) => println!("The battle ends in a draw after {} turns.", summary.turns),
        None => println!("No winner after {} turns.", summary.turns),
    }

    Ok(())
}
