mod audio_cue;
mod collaborators;
mod game;
mod input;
mod menu;
mod screen;

pub use audio_cue::AudioCue;
pub use collaborators::{AudioSink, FrameRenderer, dispatch_audio};
pub use game::{GameEvent, SnakeGame, TICKS_PER_SECOND};
pub use input::InputEvent;
pub use menu::MenuOption;
pub use screen::Screen;
