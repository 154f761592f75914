use core::fmt;

/// Sentinel for [Cell::distance] meaning no path to the cell is known yet.
pub const UNREACHED: i32 = i32::MAX;

/// One of the four compass directions. Row 0 is the top row of the grid, so
/// [North](Direction::North) decreases `y` and [South](Direction::South) increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in scan order. Generation and search both iterate in this order, which
    /// keeps seeded runs reproducible.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The `(dx, dy)` step taken when moving in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn num(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        };
        write!(f, "{}", c)
    }
}

/// A single maze cell. Wall flags are owned per cell, so a passage between two neighbours is
/// only open when both sides agree; [MazeGrid](crate::MazeGrid) keeps the pairs in sync.
///
/// `visited` is shared between the two phases: during generation it means the cell has been
/// carved into the maze, during solving that the search has finalized it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    pub visited: bool,
    pub in_path: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_frontier: bool,
    pub generation_order: Option<usize>,
    pub distance: i32,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            walls: [true; 4],
            visited: false,
            in_path: false,
            is_start: false,
            is_end: false,
            is_frontier: false,
            generation_order: None,
            distance: UNREACHED,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.num()]
    }

    /// Wall flags in [Direction::ALL] order.
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub(crate) fn remove_wall(&mut self, direction: Direction) {
        self.walls[direction.num()] = false;
    }

    /// Clears the per-solve state, leaving walls and generation data untouched.
    pub(crate) fn reset_search(&mut self) {
        self.visited = false;
        self.in_path = false;
        self.distance = UNREACHED;
    }
}
