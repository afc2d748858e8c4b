//! Crossover and mutation operators.
//!
//! The runner treats these as opaque collaborators: crossover takes the
//! current population and its fitness vector and returns a fresh population
//! of the same shape, mutation perturbs individual slots. Offspring are not
//! required to be valid; the validator chain catches over-cap and duplicate
//! lineups afterwards.

use rand::{Rng, RngCore};

use crate::error::GenerationError;
use crate::pool::Pool;
use crate::types::{Lineup, Population, LINEUP_SIZE};

/// Recombines the current population into the next one.
pub trait CrossoverStage: Send + Sync {
    /// Produces a new population from the current one and its fitness.
    ///
    /// `fitness` is index-aligned with `population`. The result's size should
    /// match the configured population size; its lineups need not be valid.
    fn crossover(
        &self,
        population: &[Lineup],
        fitness: &[f64],
        size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Population, GenerationError>;
}

/// Perturbs lineups in the new population.
pub trait MutateStage: Send + Sync {
    /// Returns the mutated population. `rate` is the per-slot mutation
    /// probability.
    fn mutate(
        &self,
        population: Population,
        pool: &Pool,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population, GenerationError>;
}

/// Default crossover: slot-wise uniform mixing of two parents drawn from the
/// fitter half of the population.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCrossover;

impl CrossoverStage for UniformCrossover {
    fn crossover(
        &self,
        population: &[Lineup],
        fitness: &[f64],
        size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Population, GenerationError> {
        if population.is_empty() {
            return Err(GenerationError::EmptyPopulation);
        }

        // Rank by fitness, best first, and breed from the top half.
        let mut order: Vec<usize> = (0..population.len()).collect();
        order.sort_by(|&a, &b| {
            fitness[b]
                .partial_cmp(&fitness[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let elite = &order[..population.len().div_ceil(2)];

        let next = (0..size)
            .map(|_| {
                let father = population[elite[rng.random_range(0..elite.len())]];
                let mother = population[elite[rng.random_range(0..elite.len())]];
                let mut child = [0usize; LINEUP_SIZE];
                for (slot, gene) in child.iter_mut().enumerate() {
                    *gene = if rng.random_bool(0.5) {
                        father.slots()[slot]
                    } else {
                        mother.slots()[slot]
                    };
                }
                Lineup(child)
            })
            .collect();
        Ok(next)
    }
}

/// Default mutation: each slot is independently replaced with a uniformly
/// random pool member at the configured rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointMutate;

impl MutateStage for PointMutate {
    fn mutate(
        &self,
        mut population: Population,
        pool: &Pool,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population, GenerationError> {
        if rate <= 0.0 || pool.is_empty() {
            return Ok(population);
        }
        for lineup in &mut population {
            let mut slots = *lineup.slots();
            let mut changed = false;
            for gene in &mut slots {
                if rng.random_bool(rate) {
                    *gene = pool.ids()[rng.random_range(0..pool.len())];
                    changed = true;
                }
            }
            if changed {
                *lineup = Lineup(slots);
            }
        }
        Ok(population)
    }
}
