use crate::games::snake::Direction;

/// Edge-triggered commands: one value per key press, never per held frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Direction(Direction),
    TogglePause,
    Confirm,
    Restart,
    Back,
    SpeedUp,
    SpeedDown,
    ToggleFullscreen,
    MenuUp,
    MenuDown,
    ShowStatistics,
}
