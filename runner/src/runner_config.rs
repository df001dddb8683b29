use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_common::games::snake::{AutopilotKind, SimulationSettings};
use snake_common::stats::DEFAULT_STATS_FILE;

pub const DEFAULT_CONFIG_FILE: &str = "cosmic_snake_runner.yaml";

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunnerConfig {
    pub simulation: SimulationSettings,
    pub tick_interval_ms: u64,
    pub stats_file: String,
    pub games: u32,
    pub max_ticks: Option<u64>,
    pub autopilot: AutopilotKind,
    /// Log a HUD line every this many ticks; 0 disables it.
    pub hud_interval_ticks: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings::default(),
            tick_interval_ms: 16,
            stats_file: DEFAULT_STATS_FILE.to_string(),
            games: 1,
            max_ticks: None,
            autopilot: AutopilotKind::Efficient,
            hud_interval_ticks: 300,
        }
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.simulation.validate()?;
        if !(1..=1000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 1ms and 1000ms".to_string());
        }
        if self.games == 0 {
            return Err("At least one game must be played".to_string());
        }
        if self.stats_file.trim().is_empty() {
            return Err("Statistics file path must not be empty".to_string());
        }
        Ok(())
    }
}
