use crate::generator::{Maze, MazeGenerator, RandomSource};
use crate::maze_grid::MazeGrid;
use crate::solver::{PathSolver, SolveOutcome};
use crate::{MazeResult, Progress};
use grid_util::point::Point;
use log::info;

/// Which part of the generate-then-solve sequence currently owns the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Generating,
    /// Generation is done; waiting for [begin_solving](MazeSession::begin_solving).
    Generated,
    Solving,
    Finished,
}

enum Stage<R> {
    Generating(MazeGenerator<R>),
    Generated(Maze),
    Solving(PathSolver),
}

/// Drives a [MazeGenerator] and then a [PathSolver] over the same grid, one step per call to
/// [advance](Self::advance). Between calls an observer can read the grid, the phase and the
/// cell touched by the last step. Dropping the session at any point is fine; the grid is simply
/// left partially generated or solved.
pub struct MazeSession<R> {
    stage: Option<Stage<R>>,
}

impl<R: RandomSource> MazeSession<R> {
    pub fn new(width: usize, height: usize, rng: R) -> MazeResult<MazeSession<R>> {
        Ok(MazeSession {
            stage: Some(Stage::Generating(MazeGenerator::new(width, height, rng)?)),
        })
    }

    /// Performs one unit of work in the active phase. Returns [Progress::Complete] once that
    /// phase has nothing left to do; while [Phase::Generated] no work happens until solving
    /// is requested.
    pub fn advance(&mut self) -> Progress {
        match self.stage.take() {
            Some(Stage::Generating(mut generator)) => {
                let progress = generator.step();
                self.stage = Some(if progress.is_complete() {
                    Stage::Generated(generator.finish())
                } else {
                    Stage::Generating(generator)
                });
                progress
            }
            Some(Stage::Solving(mut solver)) => {
                let progress = solver.step();
                self.stage = Some(Stage::Solving(solver));
                progress
            }
            stage => {
                self.stage = stage;
                Progress::Complete
            }
        }
    }

    /// Hands the grid to a [PathSolver] running from the maze entrance to its exit. Any
    /// remaining generation work is completed first. Does nothing once solving has begun.
    pub fn begin_solving(&mut self) {
        self.stage = match self.stage.take() {
            Some(Stage::Generating(generator)) => Some(Self::solver_for(generator.finish())),
            Some(Stage::Generated(maze)) => Some(Self::solver_for(maze)),
            stage => stage,
        };
    }

    fn solver_for(maze: Maze) -> Stage<R> {
        info!("Handing maze over to the solver");
        Stage::Solving(PathSolver::seeded(maze.grid, maze.entrance, maze.exit))
    }

    /// Runs both phases to completion and returns the search result.
    pub fn run_to_end(&mut self) -> SolveOutcome {
        while !self.advance().is_complete() {}
        self.begin_solving();
        while !self.advance().is_complete() {}
        self.outcome().cloned().unwrap_or(SolveOutcome::NoPath)
    }
}

impl<R> MazeSession<R> {
    fn stage(&self) -> &Stage<R> {
        self.stage
            .as_ref()
            .expect("session stage is restored after every transition")
    }

    pub fn phase(&self) -> Phase {
        match self.stage() {
            Stage::Generating(_) => Phase::Generating,
            Stage::Generated(_) => Phase::Generated,
            Stage::Solving(solver) if solver.is_complete() => Phase::Finished,
            Stage::Solving(_) => Phase::Solving,
        }
    }

    /// Read-only view of the grid for rendering.
    pub fn grid(&self) -> &MazeGrid {
        match self.stage() {
            Stage::Generating(generator) => generator.grid(),
            Stage::Generated(maze) => &maze.grid,
            Stage::Solving(solver) => solver.grid(),
        }
    }

    /// The cell touched by the most recent step, [None] while idle between or after the
    /// phases.
    pub fn current_position(&self) -> Option<Point> {
        match self.stage() {
            Stage::Generating(generator) => generator.current(),
            Stage::Generated(_) => None,
            Stage::Solving(solver) if solver.is_complete() => None,
            Stage::Solving(solver) => solver.current(),
        }
    }

    pub fn entrance(&self) -> Option<Point> {
        self.grid().start()
    }

    pub fn exit(&self) -> Option<Point> {
        self.grid().end()
    }

    pub fn outcome(&self) -> Option<&SolveOutcome> {
        match self.stage() {
            Stage::Solving(solver) => solver.outcome(),
            _ => None,
        }
    }

    pub fn into_grid(self) -> MazeGrid {
        match self.stage {
            Some(Stage::Generating(generator)) => generator.into_grid(),
            Some(Stage::Generated(maze)) => maze.grid,
            Some(Stage::Solving(solver)) => solver.into_grid(),
            None => unreachable!("session stage is restored after every transition"),
        }
    }
}
