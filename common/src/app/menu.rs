use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MenuOption {
    Resume,
    NewGame,
    ResetStatistics,
    BackToTitle,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Resume,
        MenuOption::NewGame,
        MenuOption::ResetStatistics,
        MenuOption::BackToTitle,
    ];

    fn index(&self) -> usize {
        match self {
            MenuOption::Resume => 0,
            MenuOption::NewGame => 1,
            MenuOption::ResetStatistics => 2,
            MenuOption::BackToTitle => 3,
        }
    }

    pub fn previous(&self) -> MenuOption {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    pub fn next(&self) -> MenuOption {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}
