use crate::games::SessionRng;
use super::types::{GridSize, Point};

/// Random unoccupied cell. Tries `attempts` uniform draws first, then scans
/// every cell and picks among the free ones. `None` means the grid is full.
pub fn find_free_cell(
    grid: &GridSize,
    rng: &mut SessionRng,
    attempts: usize,
    is_occupied: impl Fn(&Point) -> bool,
) -> Option<Point> {
    for _ in 0..attempts {
        let candidate = Point::new(
            rng.random_range(0..grid.width),
            rng.random_range(0..grid.height),
        );
        if !is_occupied(&candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Point> = grid.cells().filter(|cell| !is_occupied(cell)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_grid_returns_none() {
        let grid = GridSize::new(3, 3);
        let mut rng = SessionRng::new(1);
        assert_eq!(find_free_cell(&grid, &mut rng, 50, |_| true), None);
    }

    #[test]
    fn test_single_free_cell_found_by_scan() {
        let grid = GridSize::new(4, 4);
        let hole = Point::new(3, 1);
        let mut rng = SessionRng::new(9);
        let found = find_free_cell(&grid, &mut rng, 0, |p| *p != hole);
        assert_eq!(found, Some(hole));
    }

    #[test]
    fn test_result_never_occupied() {
        let grid = GridSize::new(6, 6);
        let mut rng = SessionRng::new(3);
        for _ in 0..200 {
            let found = find_free_cell(&grid, &mut rng, 5, |p| p.x < 5).unwrap();
            assert_eq!(found.x, 5);
        }
    }
}
