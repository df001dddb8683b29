use serde::Serialize;

use super::types::{Point, PowerUpKind};

/// What happened during one `advance()`. Drained by the audio and feedback
/// layers; the simulation never plays anything itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SimulationEvent {
    FoodEaten {
        position: Point,
        streak: u32,
        points: u32,
    },
    PowerUpSpawned {
        position: Point,
        kind: PowerUpKind,
    },
    PowerUpCollected {
        position: Point,
        kind: PowerUpKind,
    },
    PowerUpExpired {
        kind: PowerUpKind,
    },
    ComboReset {
        streak: u32,
    },
    Collided {
        position: Point,
    },
}
