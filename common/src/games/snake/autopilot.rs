use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::simulation::SnakeSimulation;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutopilotKind {
    /// Greedy walk towards the nearest pickup, avoiding the body.
    Efficient,
    /// Any safe direction.
    Random,
}

/// Input source that plays the game by itself.
pub struct Autopilot;

impl Autopilot {
    pub fn calculate_move(
        kind: AutopilotKind,
        simulation: &SnakeSimulation,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if simulation.is_game_over() {
            return None;
        }
        match kind {
            AutopilotKind::Efficient => Self::efficient_pathfinding(simulation, rng),
            AutopilotKind::Random => Self::random_valid_move(simulation, rng),
        }
    }

    fn efficient_pathfinding(simulation: &SnakeSimulation, rng: &mut SessionRng) -> Option<Direction> {
        let Some(target) = Self::find_target(simulation) else {
            return Self::random_valid_move(simulation, rng);
        };

        let grid = simulation.grid();
        let head = simulation.snake().head();

        let mut best_dir = None;
        let mut best_distance = usize::MAX;

        for dir in Self::get_valid_directions(simulation.direction()) {
            let next_pos = grid.step(head, dir);
            if Self::is_safe_position(next_pos, simulation) {
                let distance = grid.wrapped_distance(next_pos, target);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_valid_move(simulation, rng))
    }

    fn random_valid_move(simulation: &SnakeSimulation, rng: &mut SessionRng) -> Option<Direction> {
        let grid = simulation.grid();
        let head = simulation.snake().head();
        let current_direction = simulation.direction();

        let safe_directions: Vec<Direction> = Self::get_valid_directions(current_direction)
            .into_iter()
            .filter(|&dir| Self::is_safe_position(grid.step(head, dir), simulation))
            .collect();

        if safe_directions.is_empty() {
            Some(current_direction)
        } else {
            let idx = rng.random_range(0..safe_directions.len());
            Some(safe_directions[idx])
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    /// Nearest of the food and the active power-up.
    fn find_target(simulation: &SnakeSimulation) -> Option<Point> {
        let grid = simulation.grid();
        let head = simulation.snake().head();
        simulation
            .food()
            .into_iter()
            .chain(simulation.power_up().map(|p| p.position))
            .min_by_key(|target| grid.wrapped_distance(head, *target))
    }

    fn is_safe_position(pos: Point, simulation: &SnakeSimulation) -> bool {
        !simulation.snake().contains(&pos)
    }
}
