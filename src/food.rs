use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Food item on the board. Immutable once placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Picks a grid-aligned cell uniformly from the whole playfield.
///
/// With `avoid_occupied` set, cells under the snake are excluded and `None`
/// is returned when every cell is taken. Otherwise the snake is ignored and
/// the result is always `Some`.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    segment_size: u16,
    snake: &Snake,
    avoid_occupied: bool,
) -> Option<Position> {
    let columns = i32::from(bounds.columns(segment_size));
    let rows = i32::from(bounds.rows(segment_size));
    let pitch = i32::from(segment_size);
    if columns == 0 || rows == 0 {
        return None;
    }

    if !avoid_occupied {
        let x = rng.gen_range(0..columns) * pitch;
        let y = rng.gen_range(0..rows) * pitch;
        return Some(Position { x, y });
    }

    let mut candidates = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let position = Position {
                x: column * pitch,
                y: row * pitch,
            };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::spawn_position;

    const BOUNDS: GridSize = GridSize {
        width: 80,
        height: 60,
    };

    #[test]
    fn uniform_spawn_covers_whole_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::new(Position::new(0, 0), Direction::Right, 10);
        let mut seen = HashSet::new();

        for _ in 0..5_000 {
            let position = spawn_position(&mut rng, BOUNDS, 10, &snake, false)
                .expect("uniform spawn always yields a cell");
            assert!(position.is_within_bounds(BOUNDS));
            assert_eq!(position.x % 10, 0);
            assert_eq!(position.y % 10, 0);
            seen.insert(position);
        }

        assert_eq!(seen.len(), BOUNDS.total_cells(10));
    }

    #[test]
    fn uniform_spawn_may_land_on_snake() {
        // A snake covering the whole 2x1 board still gets food on its body.
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 20,
            height: 10,
        };
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(10, 0)],
            Direction::Left,
            10,
        );

        let position = spawn_position(&mut rng, bounds, 10, &snake, false)
            .expect("uniform spawn ignores the snake");
        assert!(snake.occupies(position));
    }

    #[test]
    fn avoiding_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(10, 0),
                Position::new(20, 0),
            ],
            Direction::Left,
            10,
        );

        for _ in 0..100 {
            let position = spawn_position(&mut rng, BOUNDS, 10, &snake, true)
                .expect("board has free cells");
            assert!(!snake.occupies(position));
        }
    }

    #[test]
    fn avoiding_spawn_on_full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = GridSize {
            width: 20,
            height: 10,
        };
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(10, 0)],
            Direction::Left,
            10,
        );

        assert_eq!(spawn_position(&mut rng, bounds, 10, &snake, true), None);
    }
}
