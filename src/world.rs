use tracing::debug;
use tracing::info;

use crate::engine::Engine;
use crate::engine::Generation;
use crate::grid::Grid;

/// Outcome of [`World::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The grid may still change
    Changed,

    /// The grid reached its fixed point. Advancing further is a no-op.
    Stable,
}

/// The current generation of a simulation run, along with the engine driving it.
pub struct World {
    engine: Engine,

    /// The current generation
    grid: Grid,

    /// Number of steps taken since the grid was last replaced
    generation: u64,
}

impl World {
    pub fn new(engine: Engine, grid: Grid) -> Self {
        Self {
            engine,
            grid,
            generation: 0,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move the world one generation forward.
    pub fn advance(&mut self) -> Advance {
        let Generation { grid, stable } = self.engine.step(&self.grid);

        self.grid = grid;
        self.generation += 1;

        debug!(
            generation = self.generation,
            alive = self.grid.alive_count(),
            stable,
            "Advanced world"
        );

        if stable {
            info!(generation = self.generation, "World is stable");
            Advance::Stable
        } else {
            Advance::Changed
        }
    }

    /// Start a new run on `grid`
    pub fn replace(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
    }

    /// Kill every cell of the current grid
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Advance;
    use super::World;
    use crate::engine::Engine;
    use crate::grid::Grid;
    use crate::rule_set::B3S23;

    #[test]
    fn lone_cell_dies_then_stabilizes() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, 4).unwrap();

        let mut world = World::new(Engine::new(20, B3S23), grid);

        assert_eq!(world.advance(), Advance::Changed);
        assert!(world.grid().is_dead());
        assert_eq!(world.advance(), Advance::Stable);
        assert_eq!(world.generation(), 2);
    }

    #[test]
    fn replace_resets_generation() {
        let mut world = World::new(Engine::default(), Grid::new(2, 2));

        world.advance();
        world.replace(Grid::new(5, 5));

        assert_eq!(world.generation(), 0);
        assert_eq!(world.grid().rows(), 5);
    }
}
