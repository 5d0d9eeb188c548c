//! Random tile placement.

use crate::grid::{Coord, Grid};
use rand::Rng;

/// Chance that a spawned tile is a 2 rather than a 4
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Result of a spawn attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    /// Grid after the spawn (equal to the input when it was full)
    pub grid: Grid,
    /// Where the tile landed, `None` if there was no room
    pub spawned: Option<Coord>,
}

impl Spawn {
    /// Value of the spawned tile, if any
    pub fn value(&self) -> Option<u32> {
        self.spawned.and_then(|at| self.grid.get(at))
    }
}

/// Place a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Spawn {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return Spawn {
            grid: grid.clone(),
            spawned: None,
        };
    }

    let at = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };

    Spawn {
        grid: grid.with_tile(at, value),
        spawned: Some(at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_fills_one_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::from_rows([[2, 0, 4, 0], [0; 4], [8, 8, 8, 8], [0; 4]]);

        for _ in 0..50 {
            let spawn = spawn_random_tile(&grid, &mut rng);
            let at = spawn.spawned.unwrap();

            assert_eq!(grid.get(at), Some(0));
            assert_eq!(spawn.grid.occupied(), grid.occupied() + 1);
            assert!(matches!(spawn.value(), Some(2) | Some(4)));
        }
    }

    #[test]
    fn test_full_grid_is_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let spawn = spawn_random_tile(&grid, &mut rng);

        assert_eq!(spawn.spawned, None);
        assert_eq!(spawn.value(), None);
        assert_eq!(spawn.grid, grid);
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let grid = Grid::new();
        let a = spawn_random_tile(&grid, &mut StdRng::seed_from_u64(42));
        let b = spawn_random_tile(&grid, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_cell_is_chosen() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        let spawn = spawn_random_tile(&grid, &mut rng);
        assert_eq!(spawn.spawned, Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_value_distribution_favors_two() {
        let mut rng = StdRng::seed_from_u64(2048);
        let grid = Grid::new();
        let fours = (0..2000)
            .filter(|_| spawn_random_tile(&grid, &mut rng).value() == Some(4))
            .count();
        // Expected around 200
        assert!((100..320).contains(&fours), "got {fours} fours");
    }
}
