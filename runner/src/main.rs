mod collaborators;
mod runner_config;
mod session;

use clap::{Parser, ValueEnum};
use snake_common::app::SnakeGame;
use snake_common::config::{ConfigContentProvider, MemoryContentProvider, Validate};
use snake_common::games::SessionRng;
use snake_common::games::snake::AutopilotKind;
use snake_common::stats::StatsStore;
use snake_common::{log, logger, version};

use runner_config::{DEFAULT_CONFIG_FILE, RunnerConfig, get_config_manager};
use session::run_session;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AutopilotArg {
    Efficient,
    Random,
}

impl From<AutopilotArg> for AutopilotKind {
    fn from(value: AutopilotArg) -> Self {
        match value {
            AutopilotArg::Efficient => AutopilotKind::Efficient,
            AutopilotArg::Random => AutopilotKind::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "cosmic_snake_runner", version = version::VERSION)]
struct Args {
    /// YAML runner config; missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Seed for the whole session. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    games: Option<u32>,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    tick_interval_ms: Option<u64>,

    #[arg(long)]
    stats_file: Option<String>,

    /// Keep statistics in memory only.
    #[arg(long)]
    no_persist: bool,

    #[arg(long, value_enum)]
    autopilot: Option<AutopilotArg>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Print the last snapshot as JSON on exit.
    #[arg(long)]
    dump_final_state: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut RunnerConfig) {
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = Some(max_ticks);
        }
        if let Some(tick_interval_ms) = self.tick_interval_ms {
            config.tick_interval_ms = tick_interval_ms;
        }
        if let Some(stats_file) = &self.stats_file {
            config.stats_file = stats_file.clone();
        }
        if let Some(autopilot) = self.autopilot {
            config.autopilot = autopilot.into();
        }
    }
}

async fn play<TContentProvider>(
    config: &RunnerConfig,
    stats_store: StatsStore<TContentProvider>,
    mut rng: SessionRng,
    dump_final_state: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    TContentProvider: ConfigContentProvider,
{
    let game_rng = SessionRng::new(rng.random());
    let autopilot_rng = SessionRng::new(rng.random());
    let mut game = SnakeGame::new(config.simulation.clone(), stats_store, game_rng)?;

    let summary = run_session(&mut game, config, autopilot_rng).await;

    log!(
        "Played {} game(s) in {} ticks{}; high score {}, best combo {}, total games {}",
        summary.games_finished,
        summary.ticks,
        if summary.interrupted { " (interrupted)" } else { "" },
        summary.statistics.high_score,
        summary.statistics.best_combo,
        summary.statistics.total_games
    );

    if dump_final_state {
        println!("{}", serde_json::to_string_pretty(&summary.final_snapshot)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = get_config_manager(&args.config).get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Cosmic Snake runner {} starting: seed {}, {}x{} grid, {} game(s)",
        version::VERSION,
        rng.seed(),
        config.simulation.grid_width,
        config.simulation.grid_height,
        config.games
    );

    if args.no_persist {
        let store = StatsStore::new(MemoryContentProvider::new());
        play(&config, store, rng, args.dump_final_state).await?;
    } else {
        log!("Statistics file: {}", config.stats_file);
        let store = StatsStore::from_json_file(&config.stats_file);
        play(&config, store, rng, args.dump_final_state).await?;
    }

    Ok(())
}
