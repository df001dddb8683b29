use snake_common::app::{AudioCue, AudioSink, FrameRenderer};
use snake_common::games::snake::{MAX_SPEED, MIN_SPEED, SimulationSnapshot};
use snake_common::log;
use snake_common::stats::StatisticsRecord;

/// Stands in for the mixer: every cue becomes a log line.
#[derive(Default)]
pub struct LoggingAudioSink {
    played: u64,
}

impl LoggingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LoggingAudioSink {
    fn play(&mut self, cue: AudioCue) {
        self.played += 1;
        log!(
            "Audio cue {:?}: {:.0}Hz for {}ms",
            cue,
            cue.frequency_hz(),
            cue.duration().as_millis()
        );
    }
}

/// Logs the heads-up line a graphical renderer would draw.
#[derive(Default)]
pub struct HudRenderer {
    frames: u64,
}

impl HudRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Lower move interval means a faster snake, so the HUD shows it inverted.
pub fn display_speed(base_speed: u32) -> u32 {
    (MAX_SPEED + MIN_SPEED).saturating_sub(base_speed)
}

pub fn hud_line(snapshot: &SimulationSnapshot, statistics: &StatisticsRecord) -> String {
    let mut line = format!(
        "Score: {} | High: {} | Speed: {} | Length: {}",
        snapshot.score,
        statistics.high_score.max(snapshot.score),
        display_speed(snapshot.base_speed),
        snapshot.snake.len()
    );
    if snapshot.combo.streak > 1 {
        line.push_str(&format!(" | Combo x{}", snapshot.combo.streak));
    }
    if snapshot.timers.speed_boost > 0 {
        line.push_str(" | Boost");
    }
    if snapshot.timers.invulnerable > 0 {
        line.push_str(" | Shield");
    }
    if snapshot.paused {
        line.push_str(" | Paused");
    }
    line
}

impl FrameRenderer for HudRenderer {
    fn render(&mut self, snapshot: &SimulationSnapshot, statistics: &StatisticsRecord) {
        self.frames += 1;
        log!("{}", hud_line(snapshot, statistics));
    }
}
