use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::diagram::{random_site, Diagram};
use crate::error::DiagramError;
use crate::logger::{DiscardLogger, SweepLogger};

/// Configuration for creating a diagram over random sites.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    pub width: u32,
    pub height: u32,
    /// Number of random sites to start with.
    pub regions: usize,
    /// Seed for the site generator and every later random mutation.
    /// If None, the generator is seeded from the operating system.
    pub seed: Option<u64>
}

impl Default for DiagramConfig {
    fn default() -> DiagramConfig {
        DiagramConfig { width: 1500, height: 1000, regions: 1000, seed: None }
    }
}

impl DiagramConfig {
    pub fn new() -> DiagramConfig {
        DiagramConfig::default()
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> DiagramConfig {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_regions(mut self, regions: usize) -> DiagramConfig {
        self.regions = regions;
        self
    }

    /// Use the given seed for deterministic random generation.
    pub fn with_seed(mut self, seed: u64) -> DiagramConfig {
        self.seed = Some(seed);
        self
    }

    pub fn build(&self) -> Result<Diagram<StdRng>, DiagramError> {
        self.build_with_logger(DiscardLogger)
    }

    pub fn build_with_logger<L: SweepLogger>(&self, logger: L) -> Result<Diagram<StdRng, L>, DiagramError> {
        if self.width == 0 || self.height == 0 {
            return Err(DiagramError::InvalidDimensions { width: self.width, height: self.height });
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };

        let sites = (0..self.regions).map(|_| random_site(&mut rng, self.width, self.height)).collect();

        Ok(Diagram::with_rng_and_logger(self.width, self.height, sites, rng, logger))
    }
}
