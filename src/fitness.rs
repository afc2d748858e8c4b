//! Slot-weighted lineup scoring.
//!
//! Fitness and the salary-cap check are the same operation over different
//! lookups: a linear sum across six slots with the captain slot scaled.
//! [`lineup_sum`] is that one routine; both the fitness stage and the salary
//! validator go through it, so the two can never drift apart.

use rayon::prelude::*;

use crate::types::{FitnessVec, Lineup, CAPTAIN_SLOT};

/// Sums `values` over a lineup's slots, scaling the captain slot.
///
/// `values` is an id-indexed lookup (projections for fitness, salaries for
/// the budget check).
///
/// # Panics
/// Panics if a lineup id is out of range for `values`.
pub fn lineup_sum(lineup: &Lineup, values: &[f64], captain_multiplier: f64) -> f64 {
    lineup
        .slots()
        .iter()
        .enumerate()
        .map(|(slot, &id)| {
            if slot == CAPTAIN_SLOT {
                values[id] * captain_multiplier
            } else {
                values[id]
            }
        })
        .sum()
}

/// Scores a whole population.
///
/// The returned vector is index-aligned with `population`.
pub trait FitnessStage: Send + Sync {
    /// Computes per-lineup fitness from the projection lookup.
    fn fitness(
        &self,
        population: &[Lineup],
        projections: &[f64],
        captain_multiplier: f64,
        parallel: bool,
    ) -> FitnessVec;
}

/// Default fitness: captain-scaled projection sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowdownFitness;

impl FitnessStage for ShowdownFitness {
    fn fitness(
        &self,
        population: &[Lineup],
        projections: &[f64],
        captain_multiplier: f64,
        parallel: bool,
    ) -> FitnessVec {
        if parallel {
            population
                .par_iter()
                .map(|lineup| lineup_sum(lineup, projections, captain_multiplier))
                .collect()
        } else {
            population
                .iter()
                .map(|lineup| lineup_sum(lineup, projections, captain_multiplier))
                .collect()
        }
    }
}
