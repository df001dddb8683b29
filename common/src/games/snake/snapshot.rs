use serde::Serialize;

use super::combo::ComboState;
use super::power_up::{EffectTimers, PowerUp};
use super::types::{Direction, GridSize, Point};

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationSnapshot {
    pub grid: GridSize,
    pub snake: Vec<Point>,
    pub direction: Direction,
    pub food: Option<Point>,
    pub power_up: Option<PowerUp>,
    pub score: u32,
    pub combo: ComboState,
    pub timers: EffectTimers,
    pub frame: u64,
    pub speed: u32,
    pub base_speed: u32,
    pub paused: bool,
    pub game_over: bool,
    pub collision: Option<Point>,
    pub shake_intensity: f32,
}
