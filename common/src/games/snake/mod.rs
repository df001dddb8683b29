mod autopilot;
mod combo;
mod events;
mod placement;
mod power_up;
mod settings;
mod simulation;
mod snake;
mod snapshot;
mod types;

pub use autopilot::{Autopilot, AutopilotKind};
pub use combo::ComboState;
pub use events::SimulationEvent;
pub use placement::find_free_cell;
pub use power_up::{EffectTimers, PowerUp};
pub use settings::{ComboFormula, MAX_SPEED, MIN_SPEED, SimulationSettings};
pub use simulation::SnakeSimulation;
pub use snake::Snake;
pub use snapshot::SimulationSnapshot;
pub use types::{Direction, GridSize, Point, PowerUpKind};
