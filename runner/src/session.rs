use std::time::Duration;

use snake_common::app::{
    AudioSink, FrameRenderer, GameEvent, InputEvent, Screen, SnakeGame, dispatch_audio,
};
use snake_common::config::ConfigContentProvider;
use snake_common::games::SessionRng;
use snake_common::games::snake::{Autopilot, AutopilotKind, SimulationSnapshot, SnakeSimulation};
use snake_common::log;
use snake_common::stats::StatisticsRecord;
use tokio::time::{MissedTickBehavior, interval};

use crate::collaborators::{HudRenderer, LoggingAudioSink};
use crate::runner_config::RunnerConfig;

#[derive(Debug)]
pub struct SessionSummary {
    pub games_finished: u32,
    pub ticks: u64,
    pub interrupted: bool,
    pub statistics: StatisticsRecord,
    pub final_snapshot: SimulationSnapshot,
}

/// What the autopilot would press this frame.
pub fn next_input(
    screen: Screen,
    simulation: &SnakeSimulation,
    kind: AutopilotKind,
    rng: &mut SessionRng,
    more_games: bool,
) -> Option<InputEvent> {
    match screen {
        Screen::TitleScreen | Screen::Menu => Some(InputEvent::Confirm),
        Screen::Paused => Some(InputEvent::TogglePause),
        Screen::Playing => {
            Autopilot::calculate_move(kind, simulation, rng).map(InputEvent::Direction)
        }
        Screen::GameOver if more_games => Some(InputEvent::Restart),
        Screen::GameOver => None,
    }
}

pub fn count_finished_games(events: &[GameEvent]) -> u32 {
    events
        .iter()
        .filter(|event| {
            matches!(
                event,
                GameEvent::ScreenChanged {
                    to: Screen::GameOver,
                    ..
                }
            )
        })
        .count() as u32
}

fn log_game_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ScreenChanged { from, to } => log!("Screen {:?} -> {:?}", from, to),
            GameEvent::StatisticsUpdated {
                record,
                new_high_score: true,
            } => log!("New high score: {}", record.high_score),
            GameEvent::SpeedChanged { base_speed } => log!("Base speed set to {}", base_speed),
            _ => {}
        }
    }
}

/// Drives `game` at the configured tick rate until enough games have
/// finished, the tick limit is hit or Ctrl+C arrives.
pub async fn run_session<TContentProvider>(
    game: &mut SnakeGame<TContentProvider>,
    config: &RunnerConfig,
    mut autopilot_rng: SessionRng,
) -> SessionSummary
where
    TContentProvider: ConfigContentProvider,
{
    let mut audio = LoggingAudioSink::new();
    let mut renderer = HudRenderer::new();

    let mut tick_timer = interval(Duration::from_millis(config.tick_interval_ms));
    tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    let mut games_finished: u32 = 0;
    let mut interrupted = false;

    loop {
        tokio::select! {
            _ = tick_timer.tick() => {
                let mut events = Vec::new();
                let more_games = games_finished < config.games;
                if let Some(input) = next_input(
                    game.screen(),
                    game.simulation(),
                    config.autopilot,
                    &mut autopilot_rng,
                    more_games,
                ) {
                    events.extend(game.handle_input(input));
                }
                events.extend(game.tick());
                ticks += 1;

                dispatch_audio(&events, &mut audio);
                log_game_events(&events);

                let finished_now = count_finished_games(&events);
                if finished_now > 0 {
                    games_finished += finished_now;
                    log!(
                        "Game {}/{} over with score {} after {} ticks",
                        games_finished,
                        config.games,
                        game.simulation().score(),
                        game.run_ticks()
                    );
                }

                if config.hud_interval_ticks > 0 && ticks % config.hud_interval_ticks == 0 {
                    renderer.render(&game.snapshot(), game.statistics());
                }

                if games_finished >= config.games {
                    break;
                }
                if let Some(max_ticks) = config.max_ticks
                    && ticks >= max_ticks
                {
                    log!("Tick limit {} reached", max_ticks);
                    break;
                }
            }
            result = &mut shutdown => {
                match result {
                    Ok(()) => log!("Shutdown signal received"),
                    Err(e) => log!("Failed to listen for Ctrl+C: {}", e),
                }
                interrupted = true;
                break;
            }
        }
    }

    let flushed = game.flush_statistics();
    log_game_events(&flushed);
    log!(
        "Session ended after {} ticks, {} cues played, {} HUD frames",
        ticks,
        audio.played(),
        renderer.frames()
    );

    SessionSummary {
        games_finished,
        ticks,
        interrupted,
        statistics: *game.statistics(),
        final_snapshot: game.snapshot(),
    }
}
