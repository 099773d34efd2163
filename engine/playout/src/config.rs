//! Simulation configuration parameters.

/// Configuration for a playout simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// When set, opponents pass instead of playing their static best move.
    /// Isolates the candidate's own line from opponent noise.
    pub ignore_opponents: bool,

    /// Depth substituted for a negative ply request ("play out the whole
    /// game"), keeping pathological engines from looping forever.
    pub unbounded_ply_cap: u32,

    /// Seed for the simulation RNG. None seeds from entropy; fixing it
    /// makes rack randomization and drawing orders reproducible.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ignore_opponents: false,
            unbounded_ply_cap: 1000,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Create a reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            ignore_opponents: false,
            unbounded_ply_cap: 1000,
            seed: Some(42),
        }
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set opponent handling.
    pub fn with_ignore_opponents(mut self, ignore: bool) -> Self {
        self.ignore_opponents = ignore;
        self
    }

    /// Builder pattern: set the unbounded ply cap.
    pub fn with_unbounded_ply_cap(mut self, cap: u32) -> Self {
        self.unbounded_ply_cap = cap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert!(!config.ignore_opponents);
        assert_eq!(config.unbounded_ply_cap, 1000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimConfig::default()
            .with_seed(7)
            .with_ignore_opponents(true)
            .with_unbounded_ply_cap(50);
        assert_eq!(config.seed, Some(7));
        assert!(config.ignore_opponents);
        assert_eq!(config.unbounded_ply_cap, 50);
    }
}
