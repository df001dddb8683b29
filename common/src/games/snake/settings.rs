use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::GridSize;

pub const MIN_SPEED: u32 = 4;
pub const MAX_SPEED: u32 = 20;

/// How the streak turns into bonus points on top of the single base point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboFormula {
    /// `streak / 3`
    Third,
    /// `streak / 2`
    Half,
}

impl ComboFormula {
    pub fn bonus(&self, streak: u32) -> u32 {
        match self {
            ComboFormula::Third => streak / 3,
            ComboFormula::Half => streak / 2,
        }
    }
}

/// All tunables of a run. Durations are in ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub initial_length: usize,
    /// Ticks per move; lower is faster.
    pub base_speed: u32,
    pub growth_per_food: u32,
    pub combo_window: u32,
    pub combo_formula: ComboFormula,
    pub power_ups_enabled: bool,
    pub power_up_spawn_interval: u64,
    pub power_up_spawn_probability: f64,
    pub power_up_lifetime: u32,
    pub bonus_points_base: u32,
    pub speed_boost_duration: u32,
    pub invulnerability_duration: u32,
    pub placement_attempts: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_length: 3,
            base_speed: 10,
            growth_per_food: 2,
            combo_window: 120,
            combo_formula: ComboFormula::Third,
            power_ups_enabled: true,
            power_up_spawn_interval: 300,
            power_up_spawn_probability: 0.15,
            power_up_lifetime: 600,
            bonus_points_base: 5,
            speed_boost_duration: 300,
            invulnerability_duration: 180,
            placement_attempts: 100,
        }
    }
}

impl SimulationSettings {
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width, self.grid_height)
    }
}

impl Validate for SimulationSettings {
    fn validate(&self) -> Result<(), String> {
        if !(3..=200).contains(&self.grid_width) {
            return Err("Grid width must be between 3 and 200".to_string());
        }
        if !(3..=200).contains(&self.grid_height) {
            return Err("Grid height must be between 3 and 200".to_string());
        }
        if self.initial_length < 1 || self.initial_length >= self.grid_width {
            return Err("Initial length must be at least 1 and shorter than the grid width".to_string());
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.base_speed) {
            return Err(format!(
                "Base speed must be between {} and {}",
                MIN_SPEED, MAX_SPEED
            ));
        }
        if self.combo_window == 0 {
            return Err("Combo window must be positive".to_string());
        }
        if self.power_up_spawn_interval == 0 {
            return Err("Power-up spawn interval must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_probability) {
            return Err("Power-up spawn probability must be between 0.0 and 1.0".to_string());
        }
        if self.power_up_lifetime == 0 {
            return Err("Power-up lifetime must be positive".to_string());
        }
        Ok(())
    }
}
