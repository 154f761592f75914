//! # maze_pathfinding
//!
//! Generates [perfect mazes](https://en.wikipedia.org/wiki/Maze_generation_algorithm) on a
//! rectangular grid with a randomized variant of
//! [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm) and solves them with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//!
//! Both algorithms advance one discrete step at a time so that an observer (typically a
//! renderer) can sample the [MazeGrid] between steps. [MazeSession] ties the two phases
//! together; [MazeGenerator] and [PathSolver] can also be driven on their own.
//!
//! ```no_run
//! use maze_pathfinding::{MazeConfig, SolveOutcome};
//!
//! let config = MazeConfig::new(20, 10).with_seed(7);
//! let maze = config.generator().unwrap().finish();
//! let mut solver = maze.into_solver().unwrap();
//! if let SolveOutcome::Found { cost, .. } = solver.run() {
//!     println!("{}\nSolved in {} steps", solver.grid(), cost);
//! }
//! ```
pub mod cell;
pub mod config;
pub mod generator;
pub mod maze_grid;
mod search;
pub mod session;
pub mod solver;

pub use cell::{Cell, Direction, UNREACHED};
pub use config::MazeConfig;
pub use generator::{Maze, MazeGenerator, RandomSource};
pub use maze_grid::MazeGrid;
pub use session::{MazeSession, Phase};
pub use solver::{PathSolver, SolveOutcome};

pub use grid_util::point::Point;

/// Result of advancing a step-wise algorithm by one unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// More steps remain.
    Pending,
    /// The algorithm has run to completion; further steps do nothing.
    Complete,
}

impl Progress {
    pub fn is_complete(self) -> bool {
        self == Progress::Complete
    }
}

/// Errors reported synchronously to the caller. Failing to find a path is not an error, see
/// [SolveOutcome::NoPath].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The grid would be empty or too large to address.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A search endpoint lies outside the grid.
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Point),

    /// A wall was to be removed between two cells that do not share it.
    #[error("{b} is not the neighbour of {a} towards {direction}")]
    NotAdjacent {
        a: Point,
        b: Point,
        direction: Direction,
    },
}

pub type MazeResult<T> = Result<T, MazeError>;
