use crate::cell::Direction;
use crate::maze_grid::MazeGrid;
use crate::solver::PathSolver;
use crate::{MazeResult, Progress};
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info, warn};
use rand::Rng;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Source of uniform random indices driving maze generation. Implemented for every [Rng];
/// a seeded generator makes generation exactly reproducible.
pub trait RandomSource {
    /// Returns an index drawn uniformly from `0..bound`. Callers never pass a zero bound.
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// A fully generated maze: the grid plus the cells whose outer walls were opened.
#[derive(Clone, Debug)]
pub struct Maze {
    pub grid: MazeGrid,
    pub entrance: Point,
    pub exit: Point,
}

impl Maze {
    /// Hands the grid over to a [PathSolver] searching from the entrance to the exit.
    pub fn into_solver(self) -> MazeResult<PathSolver> {
        PathSolver::new(self.grid, self.entrance, self.exit)
    }
}

/// Randomized Prim's algorithm. Starting from a random seed cell, the maze grows by repeatedly
/// picking a random frontier cell (not yet in the maze, but adjacent to it) and connecting it to
/// one random neighbour that is already part of the maze. Because each new cell is joined by
/// exactly one passage, the result is a spanning tree over the grid.
///
/// The frontier is kept in an [IndexSet] so that a uniform pick and its removal are both
/// constant time. Membership is mirrored in [Cell::is_frontier](crate::Cell::is_frontier).
pub struct MazeGenerator<R> {
    grid: MazeGrid,
    rng: R,
    frontier: FxIndexSet<Point>,
    cells_added: usize,
    current: Option<Point>,
}

impl<R: RandomSource> MazeGenerator<R> {
    /// Creates a closed `width` x `height` grid and carves the randomly chosen seed cell.
    pub fn new(width: usize, height: usize, mut rng: R) -> MazeResult<MazeGenerator<R>> {
        let mut grid = MazeGrid::new(width, height)?;
        let seed = Point::new(rng.below(width) as i32, rng.below(height) as i32);
        info!("Generating {}x{} maze from seed cell {}", width, height, seed);
        let cell = grid.cell_mut(seed);
        cell.visited = true;
        cell.generation_order = Some(0);
        let mut generator = MazeGenerator {
            grid,
            rng,
            frontier: FxIndexSet::default(),
            cells_added: 1,
            current: Some(seed),
        };
        generator.extend_frontier(seed);
        Ok(generator)
    }

    /// Adds one frontier cell to the maze.
    pub fn step(&mut self) -> Progress {
        if self.frontier.is_empty() {
            return Progress::Complete;
        }
        let pick = self.rng.below(self.frontier.len());
        let point = match self.frontier.swap_remove_index(pick) {
            Some(point) => point,
            None => return Progress::Complete,
        };
        self.grid.cell_mut(point).is_frontier = false;

        let carved: Vec<(Direction, Point)> = self
            .grid
            .neighbours(point)
            .filter(|(_, n)| self.grid.cell(*n).visited)
            .collect();
        // Frontier cells are only ever added next to a carved cell, and carved cells stay
        // carved, so this cannot be empty.
        debug_assert!(!carved.is_empty(), "frontier cell {} has no carved neighbour", point);
        if carved.is_empty() {
            warn!("Dropping frontier cell {} without a carved neighbour", point);
            return self.progress();
        }
        let (direction, link) = carved[self.rng.below(carved.len())];
        self.grid.link(point, link, direction);

        let cell = self.grid.cell_mut(point);
        cell.visited = true;
        cell.generation_order = Some(self.cells_added);
        self.cells_added += 1;
        self.current = Some(point);
        self.extend_frontier(point);
        self.progress()
    }

    /// Runs the remaining steps, then opens the entrance on the top row and the exit on the
    /// bottom row. Both columns are drawn independently and may coincide.
    pub fn finish(mut self) -> Maze {
        while !self.step().is_complete() {}
        debug!("Carved {} cells", self.cells_added);

        let width = self.grid.width();
        let bottom = self.grid.height() as i32 - 1;
        let entrance = Point::new(self.rng.below(width) as i32, 0);
        let exit = Point::new(self.rng.below(width) as i32, bottom);
        self.grid.open_boundary(entrance, Direction::North);
        self.grid.cell_mut(entrance).is_start = true;
        self.grid.open_boundary(exit, Direction::South);
        self.grid.cell_mut(exit).is_end = true;
        info!("Maze generated with entrance {} and exit {}", entrance, exit);

        Maze {
            grid: self.grid,
            entrance,
            exit,
        }
    }

    fn extend_frontier(&mut self, point: Point) {
        let fresh: Vec<Point> = self
            .grid
            .neighbours(point)
            .map(|(_, n)| n)
            .filter(|n| {
                let cell = self.grid.cell(*n);
                !cell.visited && !cell.is_frontier
            })
            .collect();
        for n in fresh {
            self.grid.cell_mut(n).is_frontier = true;
            self.frontier.insert(n);
        }
    }

    fn progress(&self) -> Progress {
        if self.frontier.is_empty() {
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

impl<R> MazeGenerator<R> {
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// The cell carved by the most recent step.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    pub fn cells_added(&self) -> usize {
        self.cells_added
    }

    pub fn frontier(&self) -> impl Iterator<Item = &Point> + '_ {
        self.frontier.iter()
    }

    pub fn is_complete(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Abandons generation, returning the grid as it stands.
    pub fn into_grid(self) -> MazeGrid {
        self.grid
    }
}
