use crate::cell::{Cell, Direction};
use crate::{MazeError, MazeResult};
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;

/// [MazeGrid] owns a fixed `width` x `height` block of [Cell]s kept in a [SimpleGrid]. Every
/// cell starts fully walled in; passages are carved with
/// [remove_wall_between](Self::remove_wall_between), which always updates both sides of a
/// shared wall so the two cells never disagree.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    cells: SimpleGrid<Cell>,
}

impl MazeGrid {
    /// Creates a grid of closed cells. Fails with [MazeError::InvalidDimensions] when either
    /// dimension is zero or the grid cannot be addressed with `i32` coordinates.
    pub fn new(width: usize, height: usize) -> MazeResult<MazeGrid> {
        let addressable = width <= i32::MAX as usize && height <= i32::MAX as usize;
        match width.checked_mul(height) {
            Some(count) if count > 0 && addressable => Ok(MazeGrid {
                cells: SimpleGrid::new(width, height, Cell::default()),
            }),
            _ => Err(MazeError::InvalidDimensions { width, height }),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.cells.point_in_bounds(point)
    }

    /// Read-only view of the cell at `point`, [None] if it lies outside the grid.
    pub fn get(&self, point: Point) -> Option<&Cell> {
        if self.point_in_bounds(point) {
            self.cells.get_point(point)
        } else {
            None
        }
    }

    pub(crate) fn cell(&self, point: Point) -> &Cell {
        self.get(point).expect("point lies on the grid")
    }

    pub(crate) fn cell_mut(&mut self, point: Point) -> &mut Cell {
        debug_assert!(self.point_in_bounds(point));
        self.cells
            .get_point_mut(point)
            .expect("point lies on the grid")
    }

    /// Index of an in-bounds `point` in the [UnionFind] built by
    /// [connected_components](Self::connected_components).
    fn component_ix(&self, point: &Point) -> usize {
        debug_assert!(self.point_in_bounds(*point));
        self.cells.get_ix_point(point)
    }

    fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.height() as i32, 0..self.width() as i32).map(|(y, x)| Point::new(x, y))
    }

    /// Iterates over all cells together with their coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.points().map(move |p| (p, self.cell(p)))
    }

    /// The adjacent coordinate in `direction`, or [None] when that would leave the grid.
    pub fn neighbor(&self, point: Point, direction: Direction) -> Option<Point> {
        let (dx, dy) = direction.offset();
        let next = Point::new(point.x + dx, point.y + dy);
        if self.point_in_bounds(next) {
            Some(next)
        } else {
            None
        }
    }

    /// All in-bounds neighbours of `point` paired with the direction leading to them, in
    /// [Direction::ALL] order.
    pub fn neighbours(&self, point: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(point, dir).map(|n| (dir, n)))
    }

    /// Whether a step from `point` towards `direction` stays on the grid and crosses no wall.
    pub fn is_passable(&self, point: Point, direction: Direction) -> bool {
        self.neighbor(point, direction).is_some() && !self.cell(point).has_wall(direction)
    }

    /// Neighbours reachable from `point` in a single step.
    pub fn passable_neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        self.neighbours(point)
            .filter(move |(dir, _)| !self.cell(point).has_wall(*dir))
            .map(|(_, n)| n)
    }

    /// Opens the wall between `a` and its neighbour `b` lying in `direction`, on both sides.
    /// Fails with [MazeError::NotAdjacent] and leaves the grid untouched unless `b` is the
    /// in-bounds cell next to `a` in `direction`.
    pub fn remove_wall_between(
        &mut self,
        a: Point,
        b: Point,
        direction: Direction,
    ) -> MazeResult<()> {
        if !self.point_in_bounds(a) || self.neighbor(a, direction) != Some(b) {
            return Err(MazeError::NotAdjacent { a, b, direction });
        }
        self.link(a, b, direction);
        Ok(())
    }

    /// [remove_wall_between](Self::remove_wall_between) for a pair taken from
    /// [neighbours](Self::neighbours).
    pub(crate) fn link(&mut self, a: Point, b: Point, direction: Direction) {
        debug_assert_eq!(self.neighbor(a, direction), Some(b));
        self.cell_mut(a).remove_wall(direction);
        self.cell_mut(b).remove_wall(direction.opposite());
    }

    /// Opens an outer wall of a border cell. There is no cell on the other side to update.
    pub(crate) fn open_boundary(&mut self, point: Point, direction: Direction) {
        debug_assert!(self.neighbor(point, direction).is_none());
        self.cell_mut(point).remove_wall(direction);
    }

    /// Clears `visited`, `in_path` and `distance` on every cell so a new search can run over
    /// the same walls.
    pub fn reset_for_solving(&mut self) {
        let points: Vec<Point> = self.points().collect();
        for p in points {
            self.cell_mut(p).reset_search();
        }
    }

    pub fn start(&self) -> Option<Point> {
        self.cells().find(|(_, c)| c.is_start).map(|(p, _)| p)
    }

    pub fn end(&self) -> Option<Point> {
        self.cells().find(|(_, c)| c.is_end).map(|(p, _)| p)
    }

    /// Counts open passages between pairs of cells inside the grid. Openings in the outer
    /// border are not counted.
    pub fn open_passages(&self) -> usize {
        self.cells()
            .map(|(p, _)| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|dir| self.is_passable(p, *dir))
                    .count()
            })
            .sum()
    }

    /// Checks that every shared wall is either present on both sides or absent on both.
    pub fn walls_consistent(&self) -> bool {
        self.cells().all(|(p, cell)| {
            self.neighbours(p).all(|(dir, n)| {
                cell.has_wall(dir) == self.cell(n).has_wall(dir.opposite())
            })
        })
    }

    /// Builds a [UnionFind] over cell indices joining every pair of cells with an open
    /// passage between them.
    pub fn connected_components(&self) -> UnionFind<usize> {
        info!("Generating connected components");
        let mut components = UnionFind::new(self.len());
        for (p, _) in self.cells() {
            let ix = self.component_ix(&p);
            for dir in [Direction::East, Direction::South] {
                if self.is_passable(p, dir) {
                    if let Some(n) = self.neighbor(p, dir) {
                        components.union(ix, self.component_ix(&n));
                    }
                }
            }
        }
        components
    }

    /// Checks if `start` and `goal` are connected through open passages.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if self.point_in_bounds(*start) && self.point_in_bounds(*goal) {
            self.connected_components()
                .equiv(self.component_ix(start), self.component_ix(goal))
        } else {
            false
        }
    }

    /// A perfect maze is a spanning tree: consistent walls, one fewer passage than there are
    /// cells, and a single connected component.
    pub fn is_perfect(&self) -> bool {
        if !self.walls_consistent() || self.open_passages() != self.len() - 1 {
            return false;
        }
        let components = self.connected_components();
        (1..self.len()).all(|ix| components.equiv(0, ix))
    }
}

impl PartialEq for MazeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.cells().eq(other.cells())
    }
}

impl Eq for MazeGrid {}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for x in 0..self.width() as i32 {
            let top = self.cell(Point::new(x, 0));
            let edge = if top.has_wall(Direction::North) { "---" } else { "   " };
            write!(f, "+{}", edge)?;
        }
        writeln!(f, "+")?;
        for y in 0..self.height() as i32 {
            let mut row = String::new();
            let mut below = String::new();
            for x in 0..self.width() as i32 {
                let cell = self.cell(Point::new(x, y));
                row.push(if cell.has_wall(Direction::West) { '|' } else { ' ' });
                row.push_str(if cell.is_start {
                    " S "
                } else if cell.is_end {
                    " E "
                } else if cell.in_path {
                    " * "
                } else {
                    "   "
                });
                below.push('+');
                below.push_str(if cell.has_wall(Direction::South) { "---" } else { "   " });
            }
            let last = self.cell(Point::new(self.width() as i32 - 1, y));
            row.push(if last.has_wall(Direction::East) { '|' } else { ' ' });
            below.push('+');
            writeln!(f, "{}", row)?;
            writeln!(f, "{}", below)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            MazeGrid::new(0, 4),
            Err(MazeError::InvalidDimensions { width: 0, height: 4 })
        );
        assert!(MazeGrid::new(3, 0).is_err());
        assert!(MazeGrid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn neighbours_stay_in_bounds() {
        let grid = MazeGrid::new(3, 2).unwrap();
        let corner = Point::new(0, 0);
        assert_eq!(grid.neighbor(corner, Direction::North), None);
        assert_eq!(grid.neighbor(corner, Direction::West), None);
        assert_eq!(grid.neighbor(corner, Direction::East), Some(Point::new(1, 0)));
        assert_eq!(grid.neighbor(corner, Direction::South), Some(Point::new(0, 1)));
        assert_eq!(grid.neighbours(Point::new(1, 1)).count(), 3);
        assert_eq!(grid.neighbor(Point::new(2, 1), Direction::East), None);
    }

    #[test]
    fn wall_removal_updates_both_sides() {
        let mut grid = MazeGrid::new(2, 2).unwrap();
        let a = Point::new(0, 0);
        let b = Point::new(0, 1);
        grid.remove_wall_between(a, b, Direction::South).unwrap();
        assert!(!grid.cell(a).has_wall(Direction::South));
        assert!(!grid.cell(b).has_wall(Direction::North));
        assert!(grid.is_passable(a, Direction::South));
        assert!(grid.is_passable(b, Direction::North));
        assert!(!grid.is_passable(a, Direction::East));
        assert!(grid.walls_consistent());
        assert_eq!(grid.open_passages(), 1);
    }

    #[test]
    fn wall_removal_rejects_cells_that_are_not_adjacent() {
        let mut grid = MazeGrid::new(5, 5).unwrap();
        let fresh = grid.clone();
        let cases = [
            (Point::new(0, 0), Point::new(3, 3), Direction::East),
            (Point::new(1, 0), Point::new(0, 0), Direction::East),
            (Point::new(-1, 0), Point::new(0, 0), Direction::East),
            (Point::new(4, 0), Point::new(5, 0), Direction::East),
        ];
        for (a, b, direction) in cases {
            assert_eq!(
                grid.remove_wall_between(a, b, direction),
                Err(MazeError::NotAdjacent { a, b, direction })
            );
        }
        assert_eq!(grid, fresh);
        assert!(grid.walls_consistent());
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn points_past_the_row_end_do_not_wrap() {
        let grid = MazeGrid::new(5, 2).unwrap();
        assert!(!grid.point_in_bounds(Point::new(5, 0)));
        assert!(grid.get(Point::new(5, 0)).is_none());
        assert!(grid.get(Point::new(0, 2)).is_none());
        assert!(grid.get(Point::new(0, 1)).is_some());
        assert_eq!(grid.cells().count(), 10);
        assert_eq!(grid.cells().last().map(|(p, _)| p), Some(Point::new(4, 1)));
    }

    #[test]
    fn boundary_opening_is_not_passable() {
        let mut grid = MazeGrid::new(2, 1).unwrap();
        let p = Point::new(1, 0);
        grid.open_boundary(p, Direction::North);
        assert!(!grid.cell(p).has_wall(Direction::North));
        assert!(!grid.is_passable(p, Direction::North));
        assert_eq!(grid.open_passages(), 0);
        assert!(grid.walls_consistent());
    }

    #[test]
    fn perfect_maze_detection() {
        // Corresponds to the following 2x2 grid:
        // +---+---+
        // |       |
        // +   +---+
        // |       |
        // +---+---+
        let mut grid = MazeGrid::new(2, 2).unwrap();
        grid.remove_wall_between(Point::new(0, 0), Point::new(1, 0), Direction::East).unwrap();
        grid.remove_wall_between(Point::new(0, 0), Point::new(0, 1), Direction::South).unwrap();
        assert!(!grid.is_perfect());
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(1, 1)));
        grid.remove_wall_between(Point::new(0, 1), Point::new(1, 1), Direction::East).unwrap();
        assert!(grid.is_perfect());
        assert!(grid.reachable(&Point::new(1, 0), &Point::new(1, 1)));
        // Closing the loop leaves a cycle.
        grid.remove_wall_between(Point::new(1, 0), Point::new(1, 1), Direction::South).unwrap();
        assert!(!grid.is_perfect());
    }

    #[test]
    fn reset_for_solving_clears_search_state() {
        let mut grid = MazeGrid::new(2, 2).unwrap();
        let p = Point::new(1, 1);
        grid.cell_mut(p).visited = true;
        grid.cell_mut(p).in_path = true;
        grid.cell_mut(p).distance = 2;
        grid.cell_mut(p).is_end = true;
        grid.reset_for_solving();
        let cell = grid.get(p).unwrap();
        assert!(!cell.visited && !cell.in_path);
        assert_eq!(cell.distance, crate::UNREACHED);
        assert!(cell.is_end);
        assert_eq!(grid.end(), Some(p));
    }

    #[test]
    fn display_draws_walls() {
        let mut grid = MazeGrid::new(2, 1).unwrap();
        grid.remove_wall_between(Point::new(0, 0), Point::new(1, 0), Direction::East).unwrap();
        grid.open_boundary(Point::new(0, 0), Direction::North);
        grid.cell_mut(Point::new(0, 0)).is_start = true;
        let expected = "+   +---+\n| S     |\n+---+---+\n";
        assert_eq!(grid.to_string(), expected);
    }
}
