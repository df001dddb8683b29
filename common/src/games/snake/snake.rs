use std::collections::{HashMap, VecDeque};

use super::types::{Direction, GridSize, Point};

/// Body ordered head first. `occupancy` counts segments per cell; counts above
/// one only appear while an invulnerable head crosses the body.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    occupancy: HashMap<Point, usize>,
}

impl Snake {
    /// Head at `start_pos`, remaining segments trailing behind `direction`.
    pub fn new(start_pos: Point, direction: Direction, length: usize, grid: &GridSize) -> Self {
        let behind = direction.opposite();
        let mut segments = Vec::with_capacity(length.max(1));
        let mut current = start_pos;
        segments.push(current);
        for _ in 1..length.max(1) {
            current = grid.step(current, behind);
            segments.push(current);
        }
        Self::from_segments(segments)
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            occupancy: HashMap::new(),
        };
        for segment in segments {
            snake.body.push_back(segment);
            *snake.occupancy.entry(segment).or_insert(0) += 1;
        }
        assert!(!snake.body.is_empty(), "Snake body should never be empty");
        snake
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.occupancy.contains_key(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub(crate) fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        *self.occupancy.entry(head).or_insert(0) += 1;
    }

    /// Drops the tail unless it is the last segment.
    pub(crate) fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        if let Some(count) = self.occupancy.get_mut(&tail) {
            *count -= 1;
            if *count == 0 {
                self.occupancy.remove(&tail);
            }
        }
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trails_behind_direction() {
        let grid = GridSize::new(10, 10);
        let snake = Snake::new(Point::new(5, 5), Direction::Right, 3, &grid);
        let segments: Vec<Point> = snake.segments().copied().collect();
        assert_eq!(segments, vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)]);
    }

    #[test]
    fn test_new_wraps_trailing_segments() {
        let grid = GridSize::new(10, 10);
        let snake = Snake::new(Point::new(0, 0), Direction::Down, 3, &grid);
        assert_eq!(snake.tail(), Point::new(0, 8));
    }

    #[test]
    fn test_pop_tail_keeps_last_segment() {
        let mut snake = Snake::from_segments([Point::new(1, 1), Point::new(1, 2)]);
        assert_eq!(snake.pop_tail(), Some(Point::new(1, 2)));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
        assert!(snake.contains(&Point::new(1, 1)));
        assert!(!snake.contains(&Point::new(1, 2)));
    }

    #[test]
    fn test_overlapping_segments_tracked() {
        let mut snake = Snake::from_segments([Point::new(2, 2), Point::new(3, 2)]);
        snake.push_head(Point::new(3, 2));
        snake.pop_tail();
        assert!(snake.contains(&Point::new(3, 2)));
        assert_eq!(snake.len(), 2);
    }
}
