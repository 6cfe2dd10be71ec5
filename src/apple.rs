use std::collections::BTreeSet;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Returns every in-bounds cell the snake does not occupy.
///
/// The set iterates in ascending `(x, y)` order, which fixes which cell a
/// given random index selects.
#[must_use]
pub fn available_positions(bounds: GridSize, snake: &Snake) -> BTreeSet<Position> {
    let mut available = BTreeSet::new();
    for x in 0..i32::from(bounds.width) {
        for y in 0..i32::from(bounds.height) {
            available.insert(Position { x, y });
        }
    }

    available.remove(&snake.head());
    for segment in snake.body() {
        available.remove(segment);
    }
    available
}

/// Picks a free cell uniformly at random, or `None` when the grid is full.
///
/// Draws exactly one value from `rng` when a cell is available and none
/// otherwise.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let available = available_positions(bounds, snake);
    if available.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..available.len());
    available.into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{available_positions, spawn_position};
    use crate::snake::{Position, Snake};

    #[test]
    fn apple_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            Position::new(2, 0),
            vec![Position::new(1, 0), Position::new(0, 0)],
            Direction::Right,
        );
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let apple = spawn_position(&mut rng, bounds, &snake).expect("grid has free cells");
            assert!(!snake.occupies(apple));
            assert!(apple.is_within_bounds(bounds));
        }
    }

    #[test]
    fn available_cells_enumerate_column_by_column() {
        let snake = Snake::new(Position::new(0, 0));
        let bounds = GridSize {
            width: 2,
            height: 2,
        };

        let available: Vec<Position> = available_positions(bounds, &snake).into_iter().collect();

        assert_eq!(
            available,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn out_of_bounds_head_frees_nothing() {
        let snake = Snake::from_segments(
            Position::new(-1, 0),
            vec![Position::new(0, 0)],
            Direction::Left,
        );
        let bounds = GridSize {
            width: 2,
            height: 1,
        };

        let available = available_positions(bounds, &snake);

        assert_eq!(available.len(), 1);
        assert!(available.contains(&Position::new(1, 0)));
    }

    #[test]
    fn full_grid_yields_no_apple() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::from_segments(
            Position::new(1, 0),
            vec![Position::new(0, 0)],
            Direction::Right,
        );
        let bounds = GridSize {
            width: 2,
            height: 1,
        };

        assert_eq!(spawn_position(&mut rng, bounds, &snake), None);
    }

    #[test]
    fn single_free_cell_is_always_chosen() {
        let snake = Snake::new(Position::new(0, 0));
        let bounds = GridSize {
            width: 2,
            height: 1,
        };

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                spawn_position(&mut rng, bounds, &snake),
                Some(Position::new(1, 0))
            );
        }
    }

    #[test]
    fn same_seed_picks_same_cell() {
        let snake = Snake::new(Position::new(3, 3));
        let bounds = GridSize {
            width: 7,
            height: 7,
        };

        let first = spawn_position(&mut StdRng::seed_from_u64(99), bounds, &snake);
        let second = spawn_position(&mut StdRng::seed_from_u64(99), bounds, &snake);

        assert_eq!(first, second);
    }
}
