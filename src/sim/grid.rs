//! Brick grid
//!
//! Column-major grid of bricks, indexed `[column][row]` like the level layout.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{Difficulty, Level};

/// Chance that a cell becomes a special (tougher) brick on levels that have them
pub const SPECIAL_BRICK_CHANCE: f64 = 0.5;

/// A single brick cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    /// Remaining durability (0 = destroyed)
    pub status: u8,
    /// Number of hits taken so far
    pub hit_count: u32,
}

impl Brick {
    pub fn new(status: u8) -> Self {
        Self {
            status,
            hit_count: 0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    /// Flattened storage, `cells[column * rows + row]`
    cells: Vec<Brick>,
}

impl BrickGrid {
    /// Build a fresh grid for `difficulty`, rolling special bricks from `rng`.
    ///
    /// Easy never consumes a draw; Medium and Hard draw once per cell in
    /// column-major order.
    pub fn initialize<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let level = difficulty.level();
        let mut cells = Vec::with_capacity(level.brick_count());

        for _column in 0..level.columns {
            for _row in 0..level.rows {
                let status = match difficulty.special_status() {
                    Some(special) if rng.random_bool(SPECIAL_BRICK_CHANCE) => special,
                    _ => 1,
                };
                cells.push(Brick::new(status));
            }
        }

        Self {
            columns: level.columns,
            rows: level.rows,
            cells,
        }
    }

    /// Grid with every brick at the given status (tests, scripted demos)
    pub fn uniform(columns: usize, rows: usize, status: u8) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Brick::new(status); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| column * self.rows + row)
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        self.index(column, row).map(|i| &self.cells[i])
    }

    /// Apply one hit to `(column, row)`.
    ///
    /// Returns true only if this hit took the brick from alive to destroyed.
    /// Out-of-range cells are ignored.
    pub fn hit(&mut self, column: usize, row: usize) -> bool {
        let Some(i) = self.index(column, row) else {
            return false;
        };
        let brick = &mut self.cells[i];
        let was_alive = brick.is_alive();
        brick.status = brick.status.saturating_sub(1);
        brick.hit_count += 1;
        was_alive && !brick.is_alive()
    }

    /// True once every cell is at status 0 (level clear)
    pub fn all_destroyed(&self) -> bool {
        self.cells.iter().all(|b| !b.is_alive())
    }

    /// Count of bricks still standing
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|b| b.is_alive()).count()
    }

    /// Iterate `(column, row, brick)` in column-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Brick)> + '_ {
        let rows = self.rows;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, brick)| (i / rows, i % rows, brick))
    }

    /// Bounding rectangle of `(column, row)` in canvas space
    pub fn brick_rect(level: &Level, column: usize, row: usize) -> Rect {
        let (x, y) = level.brick_origin(column, row);
        Rect::new(x, y, level.brick_width, level.brick_height)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// RNG that always yields the same word. `ConstRng(0)` makes every
    /// 50% roll succeed, `ConstRng(u64::MAX)` makes every roll fail.
    pub(crate) struct ConstRng(pub u64);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 8];
            }
        }
    }

    #[test]
    fn test_initialize_dimensions_and_status_sets() {
        let mut rng = Pcg32::seed_from_u64(7);
        for difficulty in Difficulty::ALL {
            let level = difficulty.level();
            let grid = BrickGrid::initialize(difficulty, &mut rng);
            assert_eq!(grid.len(), level.columns * level.rows);
            assert_eq!(grid.columns(), level.columns);
            assert_eq!(grid.rows(), level.rows);

            let allowed: &[u8] = match difficulty {
                Difficulty::Easy => &[1],
                Difficulty::Medium => &[1, 2],
                Difficulty::Hard => &[1, 3],
            };
            for (_, _, brick) in grid.iter() {
                assert!(allowed.contains(&brick.status), "{:?}: {}", difficulty, brick.status);
                assert_eq!(brick.hit_count, 0);
            }
        }
    }

    #[test]
    fn test_injected_rng_controls_special_bricks() {
        let all_special = BrickGrid::initialize(Difficulty::Hard, &mut ConstRng(0));
        assert!(all_special.iter().all(|(_, _, b)| b.status == 3));

        let none_special = BrickGrid::initialize(Difficulty::Medium, &mut ConstRng(u64::MAX));
        assert!(none_special.iter().all(|(_, _, b)| b.status == 1));

        // Easy ignores the RNG entirely
        let easy = BrickGrid::initialize(Difficulty::Easy, &mut ConstRng(0));
        assert!(easy.iter().all(|(_, _, b)| b.status == 1));
    }

    /// Counts every word drawn from the wrapped generator
    struct CountingRng {
        inner: Pcg32,
        draws: usize,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dst)
        }
    }

    #[test]
    fn test_only_special_levels_draw_from_rng() {
        for difficulty in Difficulty::ALL {
            let mut rng = CountingRng {
                inner: Pcg32::seed_from_u64(3),
                draws: 0,
            };
            BrickGrid::initialize(difficulty, &mut rng);
            match difficulty {
                Difficulty::Easy => assert_eq!(rng.draws, 0),
                _ => assert!(rng.draws >= difficulty.level().brick_count(), "{:?}", difficulty),
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = BrickGrid::initialize(Difficulty::Medium, &mut Pcg32::seed_from_u64(42));
        let b = BrickGrid::initialize(Difficulty::Medium, &mut Pcg32::seed_from_u64(42));
        let statuses = |g: &BrickGrid| g.iter().map(|(_, _, b)| b.status).collect::<Vec<_>>();
        assert_eq!(statuses(&a), statuses(&b));
    }

    #[test]
    fn test_hit_single_status_brick() {
        let mut grid = BrickGrid::uniform(2, 2, 1);
        assert!(grid.hit(1, 0));
        let brick = grid.get(1, 0).unwrap();
        assert_eq!(brick.status, 0);
        assert_eq!(brick.hit_count, 1);
        assert!(!grid.all_destroyed());
        assert_eq!(grid.remaining(), 3);

        // Hitting a dead brick floors at zero and reports no new destruction
        assert!(!grid.hit(1, 0));
        assert_eq!(grid.get(1, 0).unwrap().status, 0);
        assert_eq!(grid.get(1, 0).unwrap().hit_count, 2);
    }

    #[test]
    fn test_hit_tough_brick_needs_multiple_hits() {
        let mut grid = BrickGrid::uniform(1, 1, 3);
        assert!(!grid.hit(0, 0));
        assert!(!grid.hit(0, 0));
        assert!(grid.hit(0, 0));
        assert!(grid.all_destroyed());
    }

    #[test]
    fn test_all_destroyed_only_when_every_cell_is_zero() {
        let mut grid = BrickGrid::uniform(3, 2, 1);
        let cells: Vec<_> = grid.iter().map(|(c, r, _)| (c, r)).collect();
        for (i, (c, r)) in cells.iter().enumerate() {
            assert!(!grid.all_destroyed());
            grid.hit(*c, *r);
            assert_eq!(grid.remaining(), cells.len() - i - 1);
        }
        assert!(grid.all_destroyed());
    }

    #[test]
    fn test_out_of_range_hit_is_ignored() {
        let mut grid = BrickGrid::uniform(2, 2, 1);
        assert!(!grid.hit(2, 0));
        assert!(!grid.hit(0, 5));
        assert_eq!(grid.remaining(), 4);
        assert!(grid.get(2, 0).is_none());
    }

    #[test]
    fn test_iter_is_column_major() {
        let grid = BrickGrid::uniform(2, 3, 1);
        let order: Vec<_> = grid.iter().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }
}
