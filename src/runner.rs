//! The generational driver.
//!
//! [`Runner`] executes one full optimization: build the pool, sample and
//! validate the initial population, then evolve it for a fixed number of
//! generations while tracking the best lineup ever seen.
//!
//! Per-generation failures do not abort the run. A generation whose
//! crossover, validation, or scoring fails is skipped wholesale: the previous
//! population and fitness stay in place and the loop moves on. Only
//! configuration-level errors ([`ConfigError`]) surface to the caller, and
//! only before the first generation executes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::RunConfig;
use crate::error::{ConfigError, GenerationError};
use crate::registry::StageRegistry;
use crate::slate::Slate;
use crate::types::{FitnessVec, Lineup, Population};
use crate::validate::{validate_chain, ValidateCtx};

/// Result of one optimization run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The best lineup found during the entire run.
    pub best: Lineup,

    /// Fitness of [`best`](Self::best).
    pub best_fitness: f64,

    /// Number of generations the loop executed. Equals the configured count
    /// unless the run was cancelled.
    pub generations: usize,

    /// Generations skipped under the skip-on-error policy.
    pub skipped_generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-ever fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,

    /// The final population, for diagnostics.
    pub population: Population,

    /// Fitness of the final population, index-aligned.
    pub population_fitness: FitnessVec,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```no_run
/// use showdown_ga::config::RunConfig;
/// use showdown_ga::registry::StageRegistry;
/// use showdown_ga::runner::Runner;
/// use showdown_ga::slate::Slate;
///
/// # fn main() -> Result<(), showdown_ga::error::ConfigError> {
/// let config = RunConfig::default().with_seed(42);
/// let slate = Slate::from_csv_path("pool.csv", &config.column_roles)?;
/// let result = Runner::run(&slate, &config, &StageRegistry::default())?;
/// println!("best lineup scores {:.2}", result.best_fitness);
/// # Ok(())
/// # }
/// ```
pub struct Runner;

impl Runner {
    /// Runs the optimization to completion.
    pub fn run(
        slate: &Slate,
        config: &RunConfig,
        registry: &StageRegistry,
    ) -> Result<RunResult, ConfigError> {
        Self::run_with_cancel(slate, config, registry, None)
    }

    /// Runs the optimization with an optional cancellation token.
    ///
    /// The flag is checked between generations only; when set, the runner
    /// returns the best lineup found so far with `cancelled = true`.
    pub fn run_with_cancel(
        slate: &Slate,
        config: &RunConfig,
        registry: &StageRegistry,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // Immutable per-run lookups, shared by fitness and validation.
        let projections = slate.projections();
        let salaries = slate.salaries();
        let validate_ctx = ValidateCtx {
            salaries: &salaries,
            salary_cap: config.salary_cap,
            captain_multiplier: config.captain_multiplier,
            parallel: config.parallel,
        };

        // Initializing: pool → populate → validate → fitness.
        let pool = registry.pospool.build(slate, config)?;
        tracing::debug!(pool_size = pool.len(), "candidate pool built");

        let sampled = registry.populate.populate(
            &pool,
            config.population_size,
            config.parallel,
            &mut rng,
        )?;
        let mut population = validate_chain(&registry.validators, sampled, &validate_ctx);
        if population.is_empty() {
            return Err(ConfigError::EmptyInitialPopulation {
                salary_cap: config.salary_cap,
            });
        }
        let mut fitness = registry.fitness.fitness(
            &population,
            &projections,
            config.captain_multiplier,
            config.parallel,
        );

        let best_idx = stable_argmax(&fitness);
        let mut best = population[best_idx];
        let mut best_fitness = fitness[best_idx];
        let mut fitness_history = Vec::with_capacity(config.n_generations + 1);
        fitness_history.push(best_fitness);
        tracing::info!(
            population = population.len(),
            best_fitness,
            "initial population ready"
        );

        let mut skipped_generations = 0usize;
        let mut cancelled = false;

        // Evolving.
        for generation in 0..config.n_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            match evolve_once(
                registry,
                config,
                &pool,
                &projections,
                &validate_ctx,
                &population,
                &fitness,
                &mut rng,
            ) {
                Ok((next_population, next_fitness)) => {
                    population = next_population;
                    fitness = next_fitness;
                    let idx = stable_argmax(&fitness);
                    if fitness[idx] > best_fitness {
                        best = population[idx];
                        best_fitness = fitness[idx];
                        tracing::info!(generation, best_fitness, "new best lineup");
                    }
                }
                Err(err) => {
                    // Skip-on-error: drop this generation's changes and keep
                    // the last-known-valid population and fitness.
                    skipped_generations += 1;
                    tracing::warn!(generation, error = %err, "generation skipped");
                }
            }
            fitness_history.push(best_fitness);
        }

        Ok(RunResult {
            best,
            best_fitness,
            generations: if cancelled {
                fitness_history.len() - 1
            } else {
                config.n_generations
            },
            skipped_generations,
            cancelled,
            fitness_history,
            population,
            population_fitness: fitness,
        })
    }
}

/// One generation: crossover → mutate → validate → score.
///
/// Any failure leaves the caller's state untouched; all work happens on
/// freshly allocated collections.
#[allow(clippy::too_many_arguments)]
fn evolve_once(
    registry: &StageRegistry,
    config: &RunConfig,
    pool: &crate::pool::Pool,
    projections: &[f64],
    validate_ctx: &ValidateCtx<'_>,
    population: &[Lineup],
    fitness: &[f64],
    rng: &mut StdRng,
) -> Result<(Population, FitnessVec), GenerationError> {
    let crossed =
        registry
            .crossover
            .crossover(population, fitness, config.population_size, rng)?;
    let mutated = registry
        .mutate
        .mutate(crossed, pool, config.mutation_rate, rng)?;
    // Operators are opaque and their offspring need not be valid, but every
    // id must refer to a slate row before validation and scoring index the
    // lookups.
    let len = projections.len();
    for lineup in &mutated {
        if let Some(&id) = lineup.slots().iter().find(|&&id| id >= len) {
            return Err(GenerationError::ShapeMismatch { id, len });
        }
    }
    let validated = validate_chain(&registry.validators, mutated, validate_ctx);
    if validated.is_empty() {
        return Err(GenerationError::EmptyPopulation);
    }
    let next_fitness = registry.fitness.fitness(
        &validated,
        projections,
        config.captain_multiplier,
        config.parallel,
    );
    Ok((validated, next_fitness))
}

/// Index of the maximum fitness; ties go to the first occurrence.
fn stable_argmax(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in fitness.iter().enumerate().skip(1) {
        if value > fitness[best] {
            best = idx;
        }
    }
    best
}
