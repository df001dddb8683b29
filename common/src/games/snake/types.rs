use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Screen orientation: `y` grows downward, so `Up` moves towards row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    pub fn wrapping_inc(value: usize, max: usize) -> usize {
        if value + 1 >= max {
            0
        } else {
            value + 1
        }
    }

    pub fn wrapping_dec(value: usize, max: usize) -> usize {
        if value == 0 {
            max - 1
        } else {
            value - 1
        }
    }

    /// One cell in `direction`, re-entering from the opposite edge.
    pub fn step(&self, from: Point, direction: Direction) -> Point {
        match direction {
            Direction::Up => Point::new(from.x, Self::wrapping_dec(from.y, self.height)),
            Direction::Down => Point::new(from.x, Self::wrapping_inc(from.y, self.height)),
            Direction::Left => Point::new(Self::wrapping_dec(from.x, self.width), from.y),
            Direction::Right => Point::new(Self::wrapping_inc(from.x, self.width), from.y),
        }
    }

    /// Shortest Manhattan distance on the torus.
    pub fn wrapped_distance(&self, a: Point, b: Point) -> usize {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        dx.min(self.width - dx) + dy.min(self.height - dy)
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    BonusPoints,
    SpeedBoost,
    Invulnerability,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::BonusPoints,
        PowerUpKind::SpeedBoost,
        PowerUpKind::Invulnerability,
    ];
}
