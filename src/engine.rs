use crate::Age;
use crate::config::Config;
use crate::grid::Grid;
use crate::rule_set::RuleSet;

/// Offsets of the eight cells surrounding a cell, as `(d_row, d_col)`.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Result of a single step of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// The freshly computed grid
    pub grid: Grid,

    /// Whether the simulation reached its fixed point with this step
    pub stable: bool,
}

/// Computes generations of an aging Game of Life.
///
/// A live cell which survives, or a dead cell which is born, gains one year of age, up to
/// `max_age`. Every other cell ends up dead. Neighbors are counted on a bounded plane: cells
/// past the edge of the grid count as dead, nothing wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    max_age: Age,
    rule: RuleSet,
}

impl Engine {
    pub fn new(max_age: Age, rule: RuleSet) -> Self {
        Self { max_age, rule }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_age, config.rule)
    }

    pub fn max_age(&self) -> Age {
        self.max_age
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    /// Number of live cells around `(row, col)`, not counting the cell itself.
    pub fn neighbors(&self, grid: &Grid, row: usize, col: usize) -> u8 {
        let mut n = 0;

        for (dr, dc) in NEIGHBORHOOD {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };

            if grid.in_bounds(r, c) && grid.row(r)[c] > 0 {
                n += 1;
            }
        }

        n
    }

    /// Age of a cell currently aged `age` with `n` live neighbors, one generation later.
    pub fn next_age(&self, age: Age, n: u8) -> Age {
        let alive = if age > 0 {
            self.rule.is_survival(n)
        } else {
            self.rule.is_birth(n)
        };

        if alive {
            age.saturating_add(1).min(self.max_age)
        } else {
            0
        }
    }

    /// Compute the generation following `grid`. The input is only ever read from, so every cell
    /// sees the neighbors of the same generation.
    pub fn next(&self, grid: &Grid) -> Grid {
        let cells = grid
            .iter()
            .map(|(row, col, age)| self.next_age(age, self.neighbors(grid, row, col)))
            .collect();

        Grid::from_parts(grid.rows(), grid.cols(), cells)
    }

    /// A simulation is stable once every live cell of `next` has stopped aging, and `next` is
    /// identical to `prev`.
    ///
    /// Both halves are needed. Two grids may coincide while cells are still aging, and a grid
    /// saturated at `max_age` may still be changing shape.
    pub fn is_stable(&self, prev: &Grid, next: &Grid) -> bool {
        let saturated = next
            .ages()
            .iter()
            .all(|&age| age == 0 || age >= self.max_age);

        saturated && prev == next
    }

    pub fn step(&self, grid: &Grid) -> Generation {
        let next = self.next(grid);
        let stable = self.is_stable(grid, &next);

        Generation { grid: next, stable }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
