use crate::games::snake::SimulationSnapshot;
use crate::stats::StatisticsRecord;
use super::audio_cue::AudioCue;
use super::game::GameEvent;

/// Plays sound cues. Implementations must not block the tick.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Draws one frame from a snapshot.
pub trait FrameRenderer {
    fn render(&mut self, snapshot: &SimulationSnapshot, statistics: &StatisticsRecord);
}

/// Forwards the audible part of a batch of game events.
pub fn dispatch_audio(events: &[GameEvent], sink: &mut impl AudioSink) {
    for event in events {
        if let GameEvent::Simulation(simulation_event) = event
            && let Some(cue) = AudioCue::from_event(simulation_event)
        {
            sink.play(cue);
        }
    }
}
