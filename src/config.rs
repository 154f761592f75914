use crate::generator::MazeGenerator;
use crate::maze_grid::MazeGrid;
use crate::session::MazeSession;
use crate::MazeResult;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 100;

/// Inputs to maze generation: grid size and an optional seed. Without a seed the random
/// source is drawn from entropy and every run produces a different maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

impl MazeConfig {
    pub fn new(width: usize, height: usize) -> MazeConfig {
        MazeConfig {
            width,
            height,
            ..MazeConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> MazeConfig {
        self.seed = Some(seed);
        self
    }

    /// Checks the dimensions without building anything.
    pub fn validate(&self) -> MazeResult<()> {
        MazeGrid::new(self.width, self.height).map(|_| ())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn generator(&self) -> MazeResult<MazeGenerator<StdRng>> {
        MazeGenerator::new(self.width, self.height, self.rng())
    }

    pub fn session(&self) -> MazeResult<MazeSession<StdRng>> {
        MazeSession::new(self.width, self.height, self.rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MazeError;

    #[test]
    fn default_matches_constants() {
        let config = MazeConfig::default();
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let config = MazeConfig::new(0, 10);
        assert_eq!(
            config.validate(),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(config.generator().is_err());
        assert!(config.session().is_err());
    }

    #[test]
    fn seeded_configs_repeat() {
        let config = MazeConfig::new(8, 8).with_seed(42);
        let first = config.generator().unwrap().finish();
        let second = config.generator().unwrap().finish();
        assert_eq!(first.grid, second.grid);
        assert_eq!((first.entrance, first.exit), (second.entrance, second.exit));
    }
}
