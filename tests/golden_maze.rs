/// Pins the exact maze produced for a fixed draw sequence, so any change to the order in which
/// generation consumes random numbers shows up here.
use maze_pathfinding::{MazeGenerator, Point, RandomSource, SolveOutcome};

/// Minimal linear congruential generator (Knuth's MMIX constants), kept independent of the
/// `rand` version in use.
struct Lcg(u64);

impl RandomSource for Lcg {
    fn below(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % bound as u64) as usize
    }
}

const SEED: u64 = 2024;

const GENERATED: &str = "\
+---+---+   +---+---+
|       | S |       |
+   +   +   +   +---+
|   |               |
+---+   +   +---+   +
|   |   |       |   |
+   +   +---+   +---+
|       |           |
+   +---+---+   +---+
|   |             E |
+---+---+---+---+   +
";

const SOLVED: &str = "\
+---+---+   +---+---+
|       | S |       |
+   +   +   +   +---+
|   |     *         |
+---+   +   +---+   +
|   |   | *   * |   |
+   +   +---+   +---+
|       |     *     |
+   +---+---+   +---+
|   |         *   E |
+---+---+---+---+   +
";

#[test]
fn golden_five_by_five() {
    let generator = MazeGenerator::new(5, 5, Lcg(SEED)).unwrap();
    assert_eq!(generator.current(), Some(Point::new(2, 1)));
    let maze = generator.finish();
    assert_eq!(maze.entrance, Point::new(2, 0));
    assert_eq!(maze.exit, Point::new(4, 4));
    assert_eq!(maze.grid.to_string(), GENERATED);
    assert!(maze.grid.is_perfect());

    let mut solver = maze.into_solver().unwrap();
    let expected = vec![
        Point::new(2, 0),
        Point::new(2, 1),
        Point::new(2, 2),
        Point::new(3, 2),
        Point::new(3, 3),
        Point::new(3, 4),
        Point::new(4, 4),
    ];
    assert_eq!(
        solver.run(),
        SolveOutcome::Found {
            path: expected,
            cost: 6
        }
    );
    assert_eq!(solver.grid().to_string(), SOLVED);
}

#[test]
fn same_seed_same_maze() {
    let first = MazeGenerator::new(9, 7, Lcg(7)).unwrap().finish();
    let second = MazeGenerator::new(9, 7, Lcg(7)).unwrap().finish();
    assert_eq!(first.grid, second.grid);
    let other = MazeGenerator::new(9, 7, Lcg(8)).unwrap().finish();
    assert_ne!(first.grid.to_string(), other.grid.to_string());
}
