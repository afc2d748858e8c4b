//! Run configuration.
//!
//! [`RunConfig`] holds every parameter that controls one optimization run.
//! Nothing is reconfigured mid-run; the runner takes the config by reference
//! and treats it as immutable.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::slate::ColumnRoles;

/// Configuration for one showdown optimization run.
///
/// # Defaults
///
/// Defaults mirror a typical single-game contest: 10 generations over a
/// population of 5000 lineups, a 50 000 salary cap, and the 1.5× captain
/// multiplier.
///
/// ```
/// use showdown_ga::config::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.population_size, 5000);
/// assert_eq!(config.n_generations, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use showdown_ga::config::RunConfig;
///
/// let config = RunConfig::default()
///     .with_population_size(2000)
///     .with_salary_cap(60_000.0)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of generations to evolve after initialization.
    pub n_generations: usize,

    /// Number of lineups sampled for the initial population, and the target
    /// size crossover restores each generation.
    pub population_size: usize,

    /// Total salary a lineup may spend, with the captain's salary already
    /// scaled by [`captain_multiplier`](Self::captain_multiplier).
    pub salary_cap: f64,

    /// Scaling applied to the captain slot's projection *and* salary.
    pub captain_multiplier: f64,

    /// Minimum projection an item needs to enter the candidate pool.
    pub points_threshold: f64,

    /// Probability that any one lineup slot is mutated per generation.
    pub mutation_rate: f64,

    /// Header names for the points and salary columns.
    pub column_roles: ColumnRoles,

    /// Whether per-lineup work (sampling, scoring, validation) runs on the
    /// rayon thread pool.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n_generations: 10,
            population_size: 5000,
            salary_cap: 50_000.0,
            captain_multiplier: 1.5,
            points_threshold: 2.0,
            mutation_rate: 0.05,
            column_roles: ColumnRoles::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Sets the generation count.
    pub fn with_n_generations(mut self, n: usize) -> Self {
        self.n_generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the salary cap.
    pub fn with_salary_cap(mut self, cap: f64) -> Self {
        self.salary_cap = cap;
        self
    }

    /// Sets the captain multiplier.
    pub fn with_captain_multiplier(mut self, multiplier: f64) -> Self {
        self.captain_multiplier = multiplier;
        self
    }

    /// Sets the projection threshold for pool entry.
    pub fn with_points_threshold(mut self, threshold: f64) -> Self {
        self.points_threshold = threshold;
        self
    }

    /// Sets the per-slot mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the column-role mapping.
    pub fn with_column_roles(mut self, roles: ColumnRoles) -> Self {
        self.column_roles = roles;
        self
    }

    /// Enables or disables parallel per-lineup work.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns a [`ConfigError::InvalidParameter`] for any out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidParameter(
                "population_size must be at least 1",
            ));
        }
        if self.n_generations == 0 {
            return Err(ConfigError::InvalidParameter(
                "n_generations must be at least 1",
            ));
        }
        if !(self.salary_cap > 0.0) {
            return Err(ConfigError::InvalidParameter("salary_cap must be positive"));
        }
        if !(self.captain_multiplier > 0.0) {
            return Err(ConfigError::InvalidParameter(
                "captain_multiplier must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidParameter(
                "mutation_rate must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.n_generations, 10);
        assert_eq!(config.population_size, 5000);
        assert!((config.salary_cap - 50_000.0).abs() < 1e-9);
        assert!((config.captain_multiplier - 1.5).abs() < 1e-12);
        assert!((config.points_threshold - 2.0).abs() < 1e-12);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RunConfig::default()
            .with_n_generations(25)
            .with_population_size(1000)
            .with_salary_cap(60_000.0)
            .with_captain_multiplier(2.0)
            .with_points_threshold(0.0)
            .with_mutation_rate(0.1)
            .with_parallel(false)
            .with_seed(7);
        assert_eq!(config.n_generations, 25);
        assert_eq!(config.population_size, 1000);
        assert_eq!(config.seed, Some(7));
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(RunConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
        assert!(RunConfig::default().with_n_generations(0).validate().is_err());
        assert!(RunConfig::default().with_salary_cap(0.0).validate().is_err());
        assert!(RunConfig::default()
            .with_captain_multiplier(0.0)
            .validate()
            .is_err());
    }
}
