use std::time::Duration;

use crate::games::snake::SimulationEvent;

/// Streaks above this play the combo sound instead of the plain one.
const COMBO_CUE_THRESHOLD: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Eat,
    Combo,
    PowerUp,
    GameOver,
}

impl AudioCue {
    pub fn from_event(event: &SimulationEvent) -> Option<AudioCue> {
        match event {
            SimulationEvent::FoodEaten { streak, .. } if *streak > COMBO_CUE_THRESHOLD => {
                Some(AudioCue::Combo)
            }
            SimulationEvent::FoodEaten { .. } => Some(AudioCue::Eat),
            SimulationEvent::PowerUpCollected { .. } => Some(AudioCue::PowerUp),
            SimulationEvent::Collided { .. } => Some(AudioCue::GameOver),
            SimulationEvent::PowerUpSpawned { .. }
            | SimulationEvent::PowerUpExpired { .. }
            | SimulationEvent::ComboReset { .. } => None,
        }
    }

    /// Fundamental of the beep the mixer synthesizes for this cue.
    pub fn frequency_hz(&self) -> f32 {
        match self {
            AudioCue::Eat => 880.0,
            AudioCue::Combo => 1320.0,
            AudioCue::PowerUp => 1100.0,
            AudioCue::GameOver => 220.0,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            AudioCue::Eat => Duration::from_millis(100),
            AudioCue::Combo => Duration::from_millis(120),
            AudioCue::PowerUp => Duration::from_millis(200),
            AudioCue::GameOver => Duration::from_millis(500),
        }
    }
}
