use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::combo::ComboState;
use super::events::SimulationEvent;
use super::placement::find_free_cell;
use super::power_up::{EffectTimers, PowerUp};
use super::settings::{MAX_SPEED, MIN_SPEED, SimulationSettings};
use super::snake::Snake;
use super::snapshot::SimulationSnapshot;
use super::types::{Direction, GridSize, Point, PowerUpKind};

const COLLISION_SHAKE: f32 = 15.0;
const SHAKE_DECAY: f32 = 0.9;

/// One run of the game: snake, food, power-up, combo and score on a toroidal
/// grid. Time only moves through [`SnakeSimulation::advance`].
pub struct SnakeSimulation {
    settings: SimulationSettings,
    grid: GridSize,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    pending_growth: u32,
    food: Option<Point>,
    power_up: Option<PowerUp>,
    combo: ComboState,
    timers: EffectTimers,
    frame: u64,
    base_speed: u32,
    speed: u32,
    score: u32,
    collision: Option<Point>,
    paused: bool,
    shake_intensity: f32,
    rng: SessionRng,
}

impl SnakeSimulation {
    pub fn new(settings: SimulationSettings, rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;
        Ok(Self::build(settings, rng))
    }

    /// Starts a fresh run with the same settings.
    pub fn restart(&mut self, rng: SessionRng) {
        *self = Self::build(self.settings.clone(), rng);
    }

    fn build(settings: SimulationSettings, rng: SessionRng) -> Self {
        let grid = settings.grid();
        let direction = Direction::Right;
        let snake = Snake::new(grid.center(), direction, settings.initial_length, &grid);
        let base_speed = settings.base_speed;

        let mut simulation = Self {
            settings,
            grid,
            snake,
            direction,
            pending_direction: direction,
            pending_growth: 0,
            food: None,
            power_up: None,
            combo: ComboState::default(),
            timers: EffectTimers::default(),
            frame: 0,
            base_speed,
            speed: base_speed,
            score: 0,
            collision: None,
            paused: false,
            shake_intensity: 0.0,
            rng,
        };
        simulation.food = simulation.place_food();
        simulation
    }

    /// Queues a turn for the next move. A reversal of the current heading is
    /// ignored, so is any input after game over.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.is_game_over() || direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Fewer ticks per move.
    pub fn increase_speed(&mut self) -> u32 {
        if self.base_speed > MIN_SPEED {
            self.base_speed -= 1;
        }
        self.base_speed
    }

    pub fn decrease_speed(&mut self) -> u32 {
        if self.base_speed < MAX_SPEED {
            self.base_speed += 1;
        }
        self.base_speed
    }

    pub fn advance(&mut self) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        if self.paused || self.is_game_over() {
            return events;
        }

        self.frame += 1;
        self.update_timers(&mut events);

        if self.frame % self.speed as u64 != 0 {
            return events;
        }

        self.move_snake(&mut events);
        events
    }

    fn update_timers(&mut self, events: &mut Vec<SimulationEvent>) {
        if self.timers.speed_boost > 0 {
            self.timers.speed_boost -= 1;
            self.speed = (self.base_speed / 2).max(1);
        } else {
            self.speed = self.base_speed;
        }

        self.timers.invulnerable = self.timers.invulnerable.saturating_sub(1);

        if self.shake_intensity > 0.0 {
            self.shake_intensity *= SHAKE_DECAY;
        }

        if let Some(power_up) = self.power_up.as_mut() {
            if power_up.tick() {
                let kind = power_up.kind;
                self.power_up = None;
                events.push(SimulationEvent::PowerUpExpired { kind });
            }
        } else if self.settings.power_ups_enabled
            && self.frame % self.settings.power_up_spawn_interval == 0
        {
            self.try_spawn_power_up(events);
        }
    }

    fn move_snake(&mut self, events: &mut Vec<SimulationEvent>) {
        self.direction = self.pending_direction;
        let next_head = self.grid.step(self.snake.head(), self.direction);

        if self.timers.invulnerable == 0 && self.snake.contains(&next_head) {
            self.collision = Some(next_head);
            self.shake_intensity = COLLISION_SHAKE;
            log!(
                "Snake collided with itself at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            events.push(SimulationEvent::Collided { position: next_head });
            return;
        }

        self.snake.push_head(next_head);

        let ate_food = self.food == Some(next_head);
        if ate_food {
            self.eat_food(next_head, events);
        }

        if let Some(power_up) = self.power_up
            && power_up.position == next_head
        {
            self.collect_power_up(power_up, events);
        }

        // Growth from a pickup on this move already keeps the tail.
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.snake.pop_tail();
        }

        if !ate_food && let Some(streak) = self.combo.register_miss() {
            events.push(SimulationEvent::ComboReset { streak });
        }

        if self.food.is_none() {
            self.food = self.place_food();
            if self.food.is_none() {
                log!("No free cell left for food");
            }
        }
    }

    fn eat_food(&mut self, position: Point, events: &mut Vec<SimulationEvent>) {
        self.pending_growth += self.settings.growth_per_food;
        let streak = self.combo.register_pickup(self.settings.combo_window);
        let points = 1 + self.settings.combo_formula.bonus(streak);
        self.score += points;
        events.push(SimulationEvent::FoodEaten {
            position,
            streak,
            points,
        });

        self.food = None;
        self.food = self.place_food();
    }

    fn collect_power_up(&mut self, power_up: PowerUp, events: &mut Vec<SimulationEvent>) {
        match power_up.kind {
            PowerUpKind::BonusPoints => {
                self.score += self.settings.bonus_points_base + self.combo.streak;
            }
            PowerUpKind::SpeedBoost => {
                self.timers.speed_boost = self.settings.speed_boost_duration;
            }
            PowerUpKind::Invulnerability => {
                self.timers.invulnerable = self.settings.invulnerability_duration;
            }
        }
        self.power_up = None;
        log!("Collected {:?} power-up", power_up.kind);
        events.push(SimulationEvent::PowerUpCollected {
            position: power_up.position,
            kind: power_up.kind,
        });
    }

    fn try_spawn_power_up(&mut self, events: &mut Vec<SimulationEvent>) {
        if !self.rng.chance(self.settings.power_up_spawn_probability) {
            return;
        }

        let snake = &self.snake;
        let food = self.food;
        let position = find_free_cell(
            &self.grid,
            &mut self.rng,
            self.settings.placement_attempts,
            |p| snake.contains(p) || food == Some(*p),
        );

        if let Some(position) = position {
            let power_up =
                PowerUp::random_kind(position, self.settings.power_up_lifetime, &mut self.rng);
            log!(
                "{:?} power-up spawned at ({}, {})",
                power_up.kind,
                position.x,
                position.y
            );
            events.push(SimulationEvent::PowerUpSpawned {
                position,
                kind: power_up.kind,
            });
            self.power_up = Some(power_up);
        }
    }

    fn place_food(&mut self) -> Option<Point> {
        let snake = &self.snake;
        let power_up = self.power_up;
        find_free_cell(
            &self.grid,
            &mut self.rng,
            self.settings.placement_attempts,
            |p| snake.contains(p) || power_up.is_some_and(|pu| pu.position == *p),
        )
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            grid: self.grid,
            snake: self.snake.segments().copied().collect(),
            direction: self.direction,
            food: self.food,
            power_up: self.power_up,
            score: self.score,
            combo: self.combo,
            timers: self.timers,
            frame: self.frame,
            speed: self.speed,
            base_speed: self.base_speed,
            paused: self.paused,
            game_over: self.is_game_over(),
            collision: self.collision,
            shake_intensity: self.shake_intensity,
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn power_up(&self) -> Option<&PowerUp> {
        self.power_up.as_ref()
    }

    pub fn combo(&self) -> &ComboState {
        &self.combo
    }

    pub fn timers(&self) -> &EffectTimers {
        &self.timers
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }

    pub fn collision(&self) -> Option<Point> {
        self.collision
    }

    pub fn shake_intensity(&self) -> f32 {
        self.shake_intensity
    }
}

#[cfg(test)]
impl SnakeSimulation {
    pub(crate) fn set_body(&mut self, segments: &[Point], direction: Direction) {
        self.snake = Snake::from_segments(segments.iter().copied());
        self.direction = direction;
        self.pending_direction = direction;
    }

    pub(crate) fn set_food(&mut self, food: Option<Point>) {
        self.food = food;
    }

    pub(crate) fn set_power_up(&mut self, power_up: Option<PowerUp>) {
        self.power_up = power_up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::ComboFormula;

    fn settings(width: usize, height: usize) -> SimulationSettings {
        SimulationSettings {
            grid_width: width,
            grid_height: height,
            base_speed: MIN_SPEED,
            power_ups_enabled: false,
            ..SimulationSettings::default()
        }
    }

    fn create(width: usize, height: usize) -> SnakeSimulation {
        SnakeSimulation::new(settings(width, height), SessionRng::new(42)).unwrap()
    }

    fn body(sim: &SnakeSimulation) -> Vec<Point> {
        sim.snake().segments().copied().collect()
    }

    /// Runs exactly one movement interval and returns everything emitted.
    fn advance_move(sim: &mut SnakeSimulation) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        for _ in 0..sim.base_speed() {
            events.extend(sim.advance());
        }
        events
    }

    #[test]
    fn test_new_places_centered_snake_and_free_food() {
        let sim = create(10, 10);
        assert_eq!(
            body(&sim),
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)]
        );
        let food = sim.food().unwrap();
        assert!(!sim.snake().contains(&food));
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let invalid = SimulationSettings {
            grid_width: 1,
            ..SimulationSettings::default()
        };
        assert!(SnakeSimulation::new(invalid, SessionRng::new(1)).is_err());
    }

    #[test]
    fn test_body_unchanged_between_moves() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(0, 0)));
        let before = body(&sim);
        for _ in 0..sim.base_speed() - 1 {
            sim.advance();
            assert_eq!(body(&sim), before);
        }
        sim.advance();
        assert_ne!(body(&sim), before);
        assert_eq!(sim.frame(), sim.base_speed() as u64);
    }

    #[test]
    fn test_head_wraps_on_every_edge() {
        let cases = [
            (Point::new(9, 3), Direction::Right, Point::new(0, 3)),
            (Point::new(0, 3), Direction::Left, Point::new(9, 3)),
            (Point::new(3, 0), Direction::Up, Point::new(3, 7)),
            (Point::new(3, 7), Direction::Down, Point::new(3, 0)),
            (Point::new(9, 7), Direction::Right, Point::new(0, 7)),
            (Point::new(0, 0), Direction::Up, Point::new(0, 7)),
        ];
        for (head, direction, expected) in cases {
            let mut sim = create(10, 8);
            sim.set_body(&[head], direction);
            sim.set_food(Some(Point::new(5, 5)));
            advance_move(&mut sim);
            assert_eq!(sim.snake().head(), expected);
            assert!(sim.grid().contains(sim.snake().head()));
        }
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(0, 0)));
        assert!(!sim.set_pending_direction(Direction::Left));
        advance_move(&mut sim);
        assert_eq!(sim.direction(), Direction::Right);
        assert_eq!(sim.snake().head(), Point::new(6, 5));
        assert!(!sim.is_game_over());
    }

    #[test]
    fn test_last_direction_before_move_wins() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(0, 0)));
        assert!(sim.set_pending_direction(Direction::Up));
        assert!(sim.set_pending_direction(Direction::Down));
        advance_move(&mut sim);
        assert_eq!(sim.direction(), Direction::Down);
        assert_eq!(sim.snake().head(), Point::new(5, 6));
    }

    #[test]
    fn test_turn_then_reverse_within_one_move_checks_current_direction() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(0, 0)));
        sim.set_pending_direction(Direction::Up);
        // Left is the reverse of the committed heading, so it is still rejected.
        assert!(!sim.set_pending_direction(Direction::Left));
        advance_move(&mut sim);
        assert_eq!(sim.direction(), Direction::Up);
    }

    #[test]
    fn test_eating_food_scenario() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(6, 5)));
        let events = advance_move(&mut sim);

        assert_eq!(sim.snake().head(), Point::new(6, 5));
        assert_eq!(sim.score(), 1 + ComboFormula::Third.bonus(1));
        assert_eq!(sim.pending_growth(), 1);
        assert_eq!(
            body(&sim),
            vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)]
        );
        assert_eq!(sim.combo().streak, 1);
        assert_eq!(
            events,
            vec![SimulationEvent::FoodEaten {
                position: Point::new(6, 5),
                streak: 1,
                points: 1,
            }]
        );
        let food = sim.food().unwrap();
        assert!(![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)].contains(&food));
    }

    #[test]
    fn test_growth_starts_on_eat_move() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(6, 5)));
        advance_move(&mut sim);
        assert_eq!(sim.snake().len(), 4);
        assert_eq!(sim.pending_growth(), 1);
        sim.set_food(Some(Point::new(0, 0)));
        advance_move(&mut sim);
        assert_eq!(sim.snake().len(), 5);
        assert_eq!(sim.pending_growth(), 0);
        advance_move(&mut sim);
        assert_eq!(sim.snake().len(), 5);
    }

    #[test]
    fn test_self_collision_leaves_body_untouched() {
        let mut sim = create(5, 5);
        let line = [
            Point::new(1, 2),
            Point::new(2, 2),
            Point::new(3, 2),
            Point::new(4, 2),
        ];
        sim.set_body(&line, Direction::Right);
        sim.set_food(Some(Point::new(0, 0)));

        let events = advance_move(&mut sim);

        assert!(sim.is_game_over());
        assert_eq!(sim.collision(), Some(Point::new(2, 2)));
        assert_eq!(body(&sim), line.to_vec());
        assert_eq!(events, vec![SimulationEvent::Collided { position: Point::new(2, 2) }]);
        assert!(sim.shake_intensity() > 0.0);
    }

    #[test]
    fn test_wrapping_into_own_tail_collides() {
        let mut sim = create(5, 5);
        let row: Vec<Point> = (0..5).rev().map(|x| Point::new(x, 1)).collect();
        sim.set_body(&row, Direction::Right);
        sim.set_food(Some(Point::new(0, 4)));
        advance_move(&mut sim);
        assert_eq!(sim.collision(), Some(Point::new(0, 1)));
        assert_eq!(body(&sim), row);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut sim = create(5, 5);
        sim.set_body(&[Point::new(1, 2), Point::new(2, 2)], Direction::Right);
        advance_move(&mut sim);
        assert!(sim.is_game_over());
        let frame = sim.frame();
        assert!(sim.advance().is_empty());
        assert_eq!(sim.frame(), frame);
        assert!(!sim.set_pending_direction(Direction::Up));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut sim = create(10, 10);
        assert!(sim.toggle_pause());
        let before = body(&sim);
        for _ in 0..20 {
            sim.advance();
        }
        assert_eq!(sim.frame(), 0);
        assert_eq!(body(&sim), before);
        assert!(!sim.toggle_pause());
    }

    #[test]
    fn test_invulnerability_passes_through_body() {
        let mut sim = create(5, 5);
        sim.set_body(&[Point::new(1, 2), Point::new(2, 2), Point::new(3, 2)], Direction::Right);
        sim.set_food(Some(Point::new(0, 0)));
        sim.collect_power_up(
            PowerUp {
                position: Point::new(1, 2),
                kind: PowerUpKind::Invulnerability,
                remaining: 100,
            },
            &mut Vec::new(),
        );
        advance_move(&mut sim);
        assert!(!sim.is_game_over());
        assert_eq!(sim.snake().head(), Point::new(2, 2));
    }

    #[test]
    fn test_food_never_on_body() {
        let mut sim = create(4, 4);
        let segments: Vec<Point> = sim
            .grid()
            .cells()
            .filter(|p| *p != Point::new(3, 3))
            .collect();
        sim.set_body(&segments, Direction::Right);
        for _ in 0..50 {
            let placed = sim.place_food();
            assert_eq!(placed, Some(Point::new(3, 3)));
        }
    }

    #[test]
    fn test_food_placement_on_full_grid_gives_up() {
        let mut sim = create(3, 3);
        let segments: Vec<Point> = sim.grid().cells().collect();
        sim.set_body(&segments, Direction::Right);
        assert_eq!(sim.place_food(), None);
    }

    #[test]
    fn test_food_replaced_on_tail_freed_by_same_move() {
        let mut sim = SnakeSimulation::new(
            SimulationSettings {
                initial_length: 1,
                growth_per_food: 0,
                ..settings(3, 3)
            },
            SessionRng::new(4),
        )
        .unwrap();
        let segments = [
            Point::new(1, 1),
            Point::new(0, 1),
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(1, 2),
            Point::new(0, 2),
        ];
        sim.set_body(&segments, Direction::Right);
        sim.set_food(Some(Point::new(2, 1)));

        let events = advance_move(&mut sim);

        assert_eq!(
            events,
            vec![SimulationEvent::FoodEaten {
                position: Point::new(2, 1),
                streak: 1,
                points: 1,
            }]
        );
        assert!(!sim.is_game_over());
        assert_eq!(sim.snake().len(), 8);
        assert_eq!(sim.food(), Some(Point::new(0, 2)));
    }

    #[test]
    fn test_power_up_not_spawned_on_full_grid() {
        let mut sim = SnakeSimulation::new(
            SimulationSettings {
                initial_length: 1,
                base_speed: MAX_SPEED,
                power_ups_enabled: true,
                power_up_spawn_interval: 1,
                power_up_spawn_probability: 1.0,
                ..settings(3, 3)
            },
            SessionRng::new(6),
        )
        .unwrap();
        let segments: Vec<Point> = sim.grid().cells().collect();
        sim.set_body(&segments, Direction::Right);
        sim.set_food(None);

        for _ in 0..5 {
            assert!(sim.advance().is_empty());
        }
        assert!(sim.power_up().is_none());
        assert_eq!(sim.food(), None);
    }

    #[test]
    fn test_food_avoids_active_power_up() {
        let mut sim = create(3, 3);
        let free = [Point::new(2, 2), Point::new(1, 2)];
        let segments: Vec<Point> = sim.grid().cells().filter(|p| !free.contains(p)).collect();
        sim.set_body(&segments, Direction::Right);
        sim.set_power_up(Some(PowerUp {
            position: Point::new(2, 2),
            kind: PowerUpKind::BonusPoints,
            remaining: 10,
        }));
        for _ in 0..20 {
            assert_eq!(sim.place_food(), Some(Point::new(1, 2)));
        }
    }

    #[test]
    fn test_combo_builds_and_resets() {
        let mut sim = SnakeSimulation::new(
            SimulationSettings {
                grid_width: 20,
                grid_height: 5,
                base_speed: MIN_SPEED,
                combo_window: 2,
                power_ups_enabled: false,
                ..SimulationSettings::default()
            },
            SessionRng::new(7),
        )
        .unwrap();

        let mut total = 0;
        for n in 1..=4u32 {
            let next = sim.grid().step(sim.snake().head(), Direction::Right);
            sim.set_food(Some(next));
            let events = advance_move(&mut sim);
            assert_eq!(sim.combo().streak, n);
            total += 1 + n / 3;
            assert!(matches!(events.as_slice(), [SimulationEvent::FoodEaten { streak, .. }] if *streak == n));
        }
        assert_eq!(sim.score(), total);

        sim.set_food(Some(Point::new(0, 0)));
        let first_miss = advance_move(&mut sim);
        assert!(first_miss.is_empty());
        assert_eq!(sim.combo().streak, 4);
        let second_miss = advance_move(&mut sim);
        assert_eq!(second_miss, vec![SimulationEvent::ComboReset { streak: 4 }]);
        assert_eq!(sim.combo().streak, 0);
        assert_eq!(sim.combo().best, 4);
    }

    #[test]
    fn test_half_formula_scores_more() {
        let mut sim = SnakeSimulation::new(
            SimulationSettings {
                grid_width: 20,
                grid_height: 5,
                base_speed: MIN_SPEED,
                combo_formula: ComboFormula::Half,
                power_ups_enabled: false,
                ..SimulationSettings::default()
            },
            SessionRng::new(7),
        )
        .unwrap();
        for _ in 0..2 {
            let next = sim.grid().step(sim.snake().head(), Direction::Right);
            sim.set_food(Some(next));
            advance_move(&mut sim);
        }
        assert_eq!(sim.score(), 1 + (1 + 1));
    }

    #[test]
    fn test_bonus_power_up_adds_points() {
        let mut sim = create(10, 10);
        sim.set_food(Some(Point::new(0, 0)));
        sim.set_power_up(Some(PowerUp {
            position: Point::new(6, 5),
            kind: PowerUpKind::BonusPoints,
            remaining: 50,
        }));
        let events = advance_move(&mut sim);
        assert_eq!(sim.score(), 5);
        assert!(sim.power_up().is_none());
        assert!(events.contains(&SimulationEvent::PowerUpCollected {
            position: Point::new(6, 5),
            kind: PowerUpKind::BonusPoints,
        }));
    }

    #[test]
    fn test_speed_boost_halves_move_interval() {
        let mut sim = SnakeSimulation::new(
            SimulationSettings {
                grid_width: 30,
                grid_height: 10,
                base_speed: 10,
                power_ups_enabled: false,
                ..SimulationSettings::default()
            },
            SessionRng::new(3),
        )
        .unwrap();
        sim.set_food(Some(Point::new(0, 0)));
        sim.set_power_up(Some(PowerUp {
            position: Point::new(16, 5),
            kind: PowerUpKind::SpeedBoost,
            remaining: 1000,
        }));
        for _ in 0..10 {
            sim.advance();
        }
        assert_eq!(sim.snake().head(), Point::new(16, 5));
        assert_eq!(sim.timers().speed_boost, 300);

        for _ in 0..5 {
            sim.advance();
        }
        assert_eq!(sim.speed(), 5);
        assert_eq!(sim.snake().head(), Point::new(17, 5));
    }

    #[test]
    fn test_power_up_expires() {
        let mut sim = create(10, 10);
        sim.set_power_up(Some(PowerUp {
            position: Point::new(0, 9),
            kind: PowerUpKind::SpeedBoost,
            remaining: 2,
        }));
        assert!(sim.advance().is_empty());
        let events = sim.advance();
        assert!(events.contains(&SimulationEvent::PowerUpExpired { kind: PowerUpKind::SpeedBoost }));
        assert!(sim.power_up().is_none());
    }

    #[test]
    fn test_power_up_spawns_on_interval() {
        let mut sim = SnakeSimulation::new(
            SimulationSettings {
                grid_width: 40,
                grid_height: 40,
                base_speed: MAX_SPEED,
                power_up_spawn_interval: 5,
                power_up_spawn_probability: 1.0,
                ..SimulationSettings::default()
            },
            SessionRng::new(11),
        )
        .unwrap();
        for _ in 0..4 {
            assert!(sim.advance().is_empty());
        }
        let events = sim.advance();
        let power_up = *sim.power_up().unwrap();
        assert_eq!(
            events,
            vec![SimulationEvent::PowerUpSpawned {
                position: power_up.position,
                kind: power_up.kind,
            }]
        );
        assert!(!sim.snake().contains(&power_up.position));
        assert_ne!(sim.food(), Some(power_up.position));
    }

    #[test]
    fn test_speed_controls_clamp() {
        let mut sim = create(10, 10);
        assert_eq!(sim.increase_speed(), MIN_SPEED);
        for _ in 0..100 {
            sim.decrease_speed();
        }
        assert_eq!(sim.base_speed(), MAX_SPEED);
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut sim = create(5, 5);
        sim.set_body(&[Point::new(1, 2), Point::new(2, 2)], Direction::Right);
        sim.decrease_speed();
        advance_move(&mut sim);
        assert!(sim.is_game_over());

        sim.restart(SessionRng::new(8));
        assert!(!sim.is_game_over());
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.base_speed(), MIN_SPEED);
        assert_eq!(sim.snake().len(), 3);
        assert_eq!(sim.shake_intensity(), 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut sim = SnakeSimulation::new(SimulationSettings::default(), SessionRng::new(seed)).unwrap();
            for _ in 0..2000 {
                sim.advance();
            }
            serde_json::to_string(&sim.snapshot()).unwrap()
        };
        assert_eq!(run(99), run(99));
    }
}
