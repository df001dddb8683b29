use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Screen {
    TitleScreen,
    Menu,
    Playing,
    Paused,
    GameOver,
}
