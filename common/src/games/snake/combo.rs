use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComboState {
    pub streak: u32,
    pub countdown: u32,
    pub best: u32,
}

impl ComboState {
    /// Extends the streak and restarts the countdown. Returns the new streak.
    pub fn register_pickup(&mut self, window: u32) -> u32 {
        self.streak += 1;
        self.best = self.best.max(self.streak);
        self.countdown = window;
        self.streak
    }

    /// Counts down one move without a pickup. Returns the lost streak when
    /// the countdown lapses on a live combo.
    pub fn register_miss(&mut self) -> Option<u32> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 && self.streak > 0 {
            let lost = self.streak;
            self.streak = 0;
            return Some(lost);
        }
        None
    }
}
