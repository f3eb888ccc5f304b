use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws attempted per board cell before falling back to a scan.
const DRAWS_PER_CELL: usize = 4;

/// Offset of the first fruit to the right of the head.
#[must_use]
pub fn initial_offset(bounds: GridSize) -> i32 {
    i32::from((bounds.width / 4).max(1))
}

/// Picks a uniformly random cell not occupied by the snake.
///
/// Draws random cells and rejects occupied ones. After a bounded number of
/// rejections it picks uniformly among the remaining free cells, so the call
/// always terminates while at least one cell is free.
///
/// # Panics
///
/// Panics when the snake covers every cell of the board. The game ends with
/// a full board before a respawn is attempted, so this is an invariant
/// violation.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Position {
    let cells = bounds.total_cells();
    assert!(
        snake.len() < cells,
        "spawn_position: no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    for _ in 0..cells * DRAWS_PER_CELL {
        let candidate = random_cell(rng, bounds);
        if !snake.occupies(candidate) {
            return candidate;
        }
    }

    let candidates: Vec<Position> = all_cells(bounds)
        .filter(|position| !snake.occupies(*position))
        .collect();

    assert!(
        !candidates.is_empty(),
        "spawn_position: no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    candidates[rng.gen_range(0..candidates.len())]
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

fn all_cells(bounds: GridSize) -> impl Iterator<Item = Position> {
    (0..i32::from(bounds.height))
        .flat_map(move |y| (0..i32::from(bounds.width)).map(move |x| Position { x, y }))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::snake::{Position, Snake};

    use super::{all_cells, initial_offset, spawn_position};

    #[test]
    fn fruit_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
            ],
            bounds.total_cells(),
        );

        for _ in 0..100 {
            let fruit = spawn_position(&mut rng, bounds, &snake);
            assert!(!snake.occupies(fruit));
            assert!(fruit.is_within_bounds(bounds));
        }
    }

    #[test]
    fn single_free_cell_is_always_found() {
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let free = Position { x: 2, y: 2 };
        let body: Vec<Position> = all_cells(bounds).filter(|p| *p != free).collect();
        let snake = Snake::from_segments(body, bounds.total_cells());

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(spawn_position(&mut rng, bounds, &snake), free);
        }
    }

    #[test]
    #[should_panic(expected = "no free cells")]
    fn full_board_is_an_invariant_violation() {
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let snake = Snake::from_segments(all_cells(bounds).collect(), bounds.total_cells());
        let mut rng = StdRng::seed_from_u64(1);

        let _ = spawn_position(&mut rng, bounds, &snake);
    }

    #[test]
    fn initial_offset_is_a_quarter_width_but_at_least_one() {
        assert_eq!(initial_offset(GridSize { width: 3, height: 3 }), 1);
        assert_eq!(initial_offset(GridSize { width: 5, height: 5 }), 1);
        assert_eq!(
            initial_offset(GridSize {
                width: 16,
                height: 16
            }),
            4
        );
    }

    #[test]
    fn all_cells_covers_board_once() {
        let bounds = GridSize {
            width: 4,
            height: 3,
        };
        assert_eq!(all_cells(bounds).count(), 12);
    }
}
