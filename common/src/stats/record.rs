use serde::{Deserialize, Serialize};

/// Lifetime totals kept across runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsRecord {
    pub high_score: u32,
    pub total_games: u32,
    pub total_score: u64,
    pub best_combo: u32,
    pub play_time_seconds: u64,
}

impl StatisticsRecord {
    /// Folds one finished run into the totals. Returns `true` on a new high score.
    pub fn record_run(&mut self, score: u32, best_combo: u32, play_time_seconds: u64) -> bool {
        let new_high_score = score > self.high_score;
        self.total_games += 1;
        self.total_score += score as u64;
        self.high_score = self.high_score.max(score);
        self.best_combo = self.best_combo.max(best_combo);
        self.play_time_seconds += play_time_seconds;
        new_high_score
    }
}
