use crate::config::{ConfigContentProvider, FileContentConfigProvider};
use crate::games::SessionRng;
use crate::games::snake::{
    Direction, SimulationEvent, SimulationSettings, SimulationSnapshot, SnakeSimulation,
};
use crate::log;
use crate::stats::{StatisticsRecord, StatsStore};
use super::input::InputEvent;
use super::menu::MenuOption;
use super::screen::Screen;

/// Fixed simulation rate the tick counts and durations are tuned for.
pub const TICKS_PER_SECOND: u64 = 60;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Simulation(SimulationEvent),
    ScreenChanged { from: Screen, to: Screen },
    FullscreenChanged(bool),
    SpeedChanged { base_speed: u32 },
    StatisticsUpdated {
        record: StatisticsRecord,
        new_high_score: bool,
    },
}

/// Screen flow around a [`SnakeSimulation`]: title, menu, pause and game
/// over, plus the statistics flushed at the end of every run.
pub struct SnakeGame<TContentProvider = FileContentConfigProvider>
where
    TContentProvider: ConfigContentProvider,
{
    simulation: SnakeSimulation,
    screen: Screen,
    menu_option: MenuOption,
    fullscreen: bool,
    statistics: StatisticsRecord,
    stats_store: StatsStore<TContentProvider>,
    rng: SessionRng,
    run_started: bool,
    run_recorded: bool,
    run_ticks: u64,
}

impl<TContentProvider> SnakeGame<TContentProvider>
where
    TContentProvider: ConfigContentProvider,
{
    pub fn new(
        settings: SimulationSettings,
        stats_store: StatsStore<TContentProvider>,
        mut rng: SessionRng,
    ) -> Result<Self, String> {
        let simulation = SnakeSimulation::new(settings, SessionRng::new(rng.random()))?;
        let statistics = stats_store.load_or_default();
        log!(
            "Loaded statistics: high score {}, {} games played",
            statistics.high_score,
            statistics.total_games
        );

        Ok(Self {
            simulation,
            screen: Screen::TitleScreen,
            menu_option: MenuOption::Resume,
            fullscreen: false,
            statistics,
            stats_store,
            rng,
            run_started: false,
            run_recorded: false,
            run_ticks: 0,
        })
    }

    pub fn handle_input(&mut self, input: InputEvent) -> Vec<GameEvent> {
        let mut events = Vec::new();

        match input {
            InputEvent::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                events.push(GameEvent::FullscreenChanged(self.fullscreen));
            }
            InputEvent::Back => self.handle_back(&mut events),
            _ => match self.screen {
                Screen::TitleScreen => self.handle_title_input(input, &mut events),
                Screen::Menu => self.handle_menu_input(input, &mut events),
                Screen::Playing => self.handle_playing_input(input, &mut events),
                Screen::Paused => {
                    if input == InputEvent::TogglePause {
                        self.set_screen(Screen::Playing, &mut events);
                    }
                }
                Screen::GameOver => {
                    if matches!(input, InputEvent::Confirm | InputEvent::Restart) {
                        self.start_new_run(&mut events);
                    }
                }
            },
        }

        events
    }

    /// One fixed-rate frame. The simulation only runs while playing.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.is_run_in_progress() && self.screen != Screen::TitleScreen {
            self.run_ticks += 1;
        }

        if self.screen != Screen::Playing {
            return events;
        }

        events.extend(self.simulation.advance().into_iter().map(GameEvent::Simulation));

        if self.simulation.is_game_over() {
            self.set_screen(Screen::GameOver, &mut events);
        }

        events
    }

    /// Records a finished but not yet counted run, e.g. before shutdown.
    pub fn flush_statistics(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.record_finished_run(&mut events);
        events
    }

    fn handle_back(&mut self, events: &mut Vec<GameEvent>) {
        match self.screen {
            Screen::Playing | Screen::Paused | Screen::GameOver => {
                self.set_screen(Screen::Menu, events);
            }
            Screen::Menu => {
                if self.is_run_in_progress() {
                    self.set_screen(Screen::Playing, events);
                } else {
                    self.set_screen(Screen::TitleScreen, events);
                }
            }
            Screen::TitleScreen => {}
        }
    }

    fn handle_title_input(&mut self, input: InputEvent, events: &mut Vec<GameEvent>) {
        match input {
            InputEvent::Confirm => self.start_new_run(events),
            InputEvent::ShowStatistics => {
                self.menu_option = MenuOption::ResetStatistics;
                self.set_screen(Screen::Menu, events);
            }
            _ => {}
        }
    }

    fn handle_menu_input(&mut self, input: InputEvent, events: &mut Vec<GameEvent>) {
        match input {
            InputEvent::MenuUp | InputEvent::Direction(Direction::Up) => {
                self.menu_option = self.menu_option.previous();
            }
            InputEvent::MenuDown | InputEvent::Direction(Direction::Down) => {
                self.menu_option = self.menu_option.next();
            }
            InputEvent::Confirm => match self.menu_option {
                MenuOption::Resume => {
                    if self.is_run_in_progress() {
                        self.set_screen(Screen::Playing, events);
                    } else {
                        self.start_new_run(events);
                    }
                }
                MenuOption::NewGame => self.start_new_run(events),
                MenuOption::ResetStatistics => {
                    // A finished run still pending must not leak into the fresh record.
                    self.record_finished_run(events);
                    self.statistics = StatisticsRecord::default();
                    self.stats_store.save_quietly(&self.statistics);
                    log!("Statistics reset");
                    events.push(GameEvent::StatisticsUpdated {
                        record: self.statistics,
                        new_high_score: false,
                    });
                }
                MenuOption::BackToTitle => self.set_screen(Screen::TitleScreen, events),
            },
            _ => {}
        }
    }

    fn handle_playing_input(&mut self, input: InputEvent, events: &mut Vec<GameEvent>) {
        match input {
            InputEvent::Direction(direction) => {
                self.simulation.set_pending_direction(direction);
            }
            InputEvent::TogglePause => self.set_screen(Screen::Paused, events),
            InputEvent::SpeedUp => {
                let base_speed = self.simulation.increase_speed();
                events.push(GameEvent::SpeedChanged { base_speed });
            }
            InputEvent::SpeedDown => {
                let base_speed = self.simulation.decrease_speed();
                events.push(GameEvent::SpeedChanged { base_speed });
            }
            _ => {}
        }
    }

    fn start_new_run(&mut self, events: &mut Vec<GameEvent>) {
        self.record_finished_run(events);

        self.simulation.restart(SessionRng::new(self.rng.random()));
        self.run_started = true;
        self.run_recorded = false;
        self.run_ticks = 0;
        self.menu_option = MenuOption::Resume;
        self.set_screen(Screen::Playing, events);
    }

    fn record_finished_run(&mut self, events: &mut Vec<GameEvent>) {
        if !self.run_started || self.run_recorded || !self.simulation.is_game_over() {
            return;
        }

        let score = self.simulation.score();
        let best_combo = self.simulation.combo().best;
        let play_time = self.run_ticks / TICKS_PER_SECOND;
        let new_high_score = self.statistics.record_run(score, best_combo, play_time);
        self.run_recorded = true;

        self.stats_store.save_quietly(&self.statistics);
        log!(
            "Run finished: score {}, best combo {}, {}s{}",
            score,
            best_combo,
            play_time,
            if new_high_score { " (new high score)" } else { "" }
        );

        events.push(GameEvent::StatisticsUpdated {
            record: self.statistics,
            new_high_score,
        });
    }

    fn set_screen(&mut self, to: Screen, events: &mut Vec<GameEvent>) {
        let from = self.screen;
        if from == to {
            return;
        }
        self.screen = to;
        self.simulation.set_paused(to != Screen::Playing);
        events.push(GameEvent::ScreenChanged { from, to });
    }

    pub fn is_run_in_progress(&self) -> bool {
        self.run_started && !self.simulation.is_game_over()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu_option(&self) -> MenuOption {
        self.menu_option
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn statistics(&self) -> &StatisticsRecord {
        &self.statistics
    }

    pub fn simulation(&self) -> &SnakeSimulation {
        &self.simulation
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        self.simulation.snapshot()
    }

    pub fn run_ticks(&self) -> u64 {
        self.run_ticks
    }

    #[cfg(test)]
    pub(crate) fn simulation_mut(&mut self) -> &mut SnakeSimulation {
        &mut self.simulation
    }
}
