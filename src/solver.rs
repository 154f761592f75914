use crate::maze_grid::MazeGrid;
use crate::search::{FxIndexMap, OpenEntry, NO_PARENT};
use crate::{MazeError, MazeResult, Progress};
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use log::{info, warn};
use std::collections::BinaryHeap;

/// Final result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// `path` runs from start to goal inclusive, `cost` is the number of steps along it.
    Found { path: Vec<Point>, cost: i32 },
    /// The open list ran dry before the goal was finalized.
    NoPath,
}

/// A* over the passages of a [MazeGrid], advanced one expansion at a time. The heuristic is
/// the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the goal, which
/// never overestimates since every move is a single cardinal step.
///
/// Stale open-list entries are never removed eagerly; a popped entry whose cell is already
/// finalized (`visited`) is discarded. Parents are tracked in an index map, and heap entries
/// refer to nodes by their index in it.
pub struct PathSolver {
    grid: MazeGrid,
    start: Point,
    goal: Point,
    to_see: BinaryHeap<OpenEntry>,
    parents: FxIndexMap<Point, usize>,
    expanded: usize,
    current: Option<Point>,
    outcome: Option<SolveOutcome>,
}

impl PathSolver {
    /// Takes ownership of `grid`, clears any state left by a previous phase and seeds the
    /// open list with `start`. Fails with [MazeError::OutOfBounds] if either endpoint is off
    /// the grid.
    pub fn new(grid: MazeGrid, start: Point, goal: Point) -> MazeResult<PathSolver> {
        if let Some(&outside) = [start, goal].iter().find(|p| !grid.point_in_bounds(**p)) {
            return Err(MazeError::OutOfBounds(outside));
        }
        Ok(PathSolver::seeded(grid, start, goal))
    }

    /// Like [new](Self::new) for endpoints already known to lie on the grid.
    pub(crate) fn seeded(mut grid: MazeGrid, start: Point, goal: Point) -> PathSolver {
        grid.reset_for_solving();
        grid.cell_mut(start).distance = 0;
        let mut parents = FxIndexMap::default();
        parents.insert(start, NO_PARENT);
        let mut to_see = BinaryHeap::new();
        to_see.push(OpenEntry {
            estimate: start.manhattan_distance(&goal),
            cost: 0,
            index: 0,
        });
        info!("Solving maze from {} to {}", start, goal);
        PathSolver {
            grid,
            start,
            goal,
            to_see,
            parents,
            expanded: 0,
            current: None,
            outcome: None,
        }
    }

    /// Pops one entry from the open list and, unless it is stale, finalizes its cell and
    /// relaxes the passable neighbours.
    pub fn step(&mut self) -> Progress {
        if self.outcome.is_some() {
            return Progress::Complete;
        }
        let OpenEntry { cost, index, .. } = match self.to_see.pop() {
            Some(entry) => entry,
            None => return self.exhausted(),
        };
        let (&node, _) = self
            .parents
            .get_index(index)
            .expect("open list entries index into parents");
        if self.grid.cell(node).visited {
            return self.progress();
        }
        self.grid.cell_mut(node).visited = true;
        self.expanded += 1;
        self.current = Some(node);

        if node == self.goal {
            let path = self.mark_path(index);
            info!(
                "Path of {} steps found after expanding {} cells",
                cost, self.expanded
            );
            self.outcome = Some(SolveOutcome::Found { path, cost });
            return Progress::Complete;
        }

        let successors: Vec<Point> = self
            .grid
            .passable_neighbours(node)
            .filter(|n| !self.grid.cell(*n).visited)
            .collect();
        for successor in successors {
            let new_cost = cost + 1;
            if new_cost >= self.grid.cell(successor).distance {
                continue;
            }
            self.grid.cell_mut(successor).distance = new_cost;
            let n = match self.parents.entry(successor) {
                Vacant(e) => {
                    let n = e.index();
                    e.insert(index);
                    n
                }
                Occupied(mut e) => {
                    e.insert(index);
                    e.index()
                }
            };
            self.to_see.push(OpenEntry {
                estimate: new_cost + successor.manhattan_distance(&self.goal),
                cost: new_cost,
                index: n,
            });
        }
        self.progress()
    }

    /// Steps until the search concludes.
    pub fn run(&mut self) -> SolveOutcome {
        while !self.step().is_complete() {}
        self.outcome.clone().unwrap_or(SolveOutcome::NoPath)
    }

    /// Walks the parent links from the node at `index` back to the start, flagging every cell
    /// on the way as part of the path. Returns the path from start to that node.
    fn mark_path(&mut self, index: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ix = index;
        while let Some((&node, &parent)) = self.parents.get_index(ix) {
            self.grid.cell_mut(node).in_path = true;
            path.push(node);
            ix = parent;
        }
        path.reverse();
        path
    }

    fn progress(&mut self) -> Progress {
        if self.to_see.is_empty() {
            self.exhausted()
        } else {
            Progress::Pending
        }
    }

    fn exhausted(&mut self) -> Progress {
        warn!("{} is not reachable from {}", self.goal, self.start);
        self.current = None;
        self.outcome = Some(SolveOutcome::NoPath);
        Progress::Complete
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Gives the grid back, e.g. to run another search over the same walls.
    pub fn into_grid(self) -> MazeGrid {
        self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    /// The cell finalized by the most recent step.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Number of cells finalized so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn outcome(&self) -> Option<&SolveOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }
}
