use serde::Serialize;

use crate::games::SessionRng;
use super::types::{Point, PowerUpKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PowerUp {
    pub position: Point,
    pub kind: PowerUpKind,
    pub remaining: u32,
}

impl PowerUp {
    pub fn random_kind(position: Point, lifetime: u32, rng: &mut SessionRng) -> Self {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        Self {
            position,
            kind,
            remaining: lifetime,
        }
    }

    /// Returns `true` once the power-up has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Remaining ticks of timed effects granted by power-ups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EffectTimers {
    pub speed_boost: u32,
    pub invulnerable: u32,
}
