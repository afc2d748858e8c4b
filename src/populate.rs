//! Population initialization via weighted sampling without replacement.
//!
//! Each lineup is drawn with the shifted-random-key method: every pool
//! candidate gets the key `u / p` (uniform draw divided by its selection
//! probability) and the six smallest keys win. One partial selection per
//! lineup, no rejection loop, and a lineup can never contain the same id
//! twice because keys belong to distinct pool positions.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use crate::error::ConfigError;
use crate::pool::Pool;
use crate::types::{Lineup, Population, LINEUP_SIZE};

/// Produces the initial population from the candidate pool.
pub trait PopulateStage: Send + Sync {
    /// Samples `size` lineups, each a 6-wide weighted draw without
    /// replacement from the pool.
    fn populate(
        &self,
        pool: &Pool,
        size: usize,
        parallel: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Population, ConfigError>;
}

/// Default initializer: shifted-random-key weighted sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftedKeyPopulate;

impl PopulateStage for ShiftedKeyPopulate {
    fn populate(
        &self,
        pool: &Pool,
        size: usize,
        parallel: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Population, ConfigError> {
        if pool.len() < LINEUP_SIZE {
            return Err(ConfigError::InsufficientCandidates {
                available: pool.len(),
                needed: LINEUP_SIZE,
            });
        }

        // One seed per lineup, drawn sequentially from the caller's rng, so
        // results are identical whether or not the batch runs on rayon.
        let seeds: Vec<u64> = (0..size).map(|_| rng.next_u64()).collect();
        let population = if parallel {
            seeds
                .par_iter()
                .map(|&seed| sample_lineup(pool, &mut StdRng::seed_from_u64(seed)))
                .collect()
        } else {
            seeds
                .iter()
                .map(|&seed| sample_lineup(pool, &mut StdRng::seed_from_u64(seed)))
                .collect()
        };
        Ok(population)
    }
}

/// Draws one lineup: key every candidate with `u / p`, keep the 6 smallest.
fn sample_lineup(pool: &Pool, rng: &mut StdRng) -> Lineup {
    let probs = pool.probs();
    let mut keyed: Vec<(f64, usize)> = probs
        .iter()
        .enumerate()
        .map(|(pos, &p)| (rng.random::<f64>() / p, pos))
        .collect();
    keyed.select_nth_unstable_by(LINEUP_SIZE - 1, |a, b| {
        a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
    });

    let mut slots = [0usize; LINEUP_SIZE];
    for (slot, &(_, pos)) in slots.iter_mut().zip(keyed[..LINEUP_SIZE].iter()) {
        *slot = pool.ids()[pos];
    }
    Lineup(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::pool::{PospoolStage, ShowdownPospool};
    use crate::slate::{Item, Slate};

    fn test_pool(projs: &[f64]) -> Pool {
        let items = projs
            .iter()
            .map(|&proj| Item {
                name: String::new(),
                pos: String::new(),
                proj,
                salary: 5000.0,
            })
            .collect();
        let config = RunConfig::default().with_points_threshold(0.5);
        ShowdownPospool
            .build(&Slate::from_items(items), &config)
            .unwrap()
    }

    #[test]
    fn test_population_has_requested_shape() {
        let pool = test_pool(&[10.0, 8.0, 6.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(1);
        let population = ShiftedKeyPopulate
            .populate(&pool, 500, false, &mut rng)
            .unwrap();
        assert_eq!(population.len(), 500);
        for lineup in &population {
            for &id in lineup.slots() {
                assert!(pool.ids().contains(&id), "id {id} not in pool");
            }
        }
    }

    #[test]
    fn test_sampling_never_duplicates_within_a_lineup() {
        let pool = test_pool(&[10.0, 8.0, 6.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(2);
        let population = ShiftedKeyPopulate
            .populate(&pool, 2000, false, &mut rng)
            .unwrap();
        assert!(population.iter().all(Lineup::is_unique));
    }

    #[test]
    fn test_insufficient_candidates() {
        let pool = test_pool(&[10.0, 8.0, 6.0]);
        let mut rng = StdRng::seed_from_u64(3);
        match ShiftedKeyPopulate.populate(&pool, 10, false, &mut rng) {
            Err(ConfigError::InsufficientCandidates { available, needed }) => {
                assert_eq!(available, 3);
                assert_eq!(needed, LINEUP_SIZE);
            }
            other => panic!("expected InsufficientCandidates, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_matches_sequential_for_same_seed() {
        let pool = test_pool(&[10.0, 8.0, 6.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0]);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let seq = ShiftedKeyPopulate
            .populate(&pool, 300, false, &mut rng_a)
            .unwrap();
        let par = ShiftedKeyPopulate
            .populate(&pool, 300, true, &mut rng_b)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_inclusion_frequency_tracks_weight() {
        // Item 0 projects 10x item 9 at equal salary, so its selection
        // probability is 10x higher and it must appear in far more lineups.
        let pool = test_pool(&[10.0, 8.0, 6.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(7);
        let population = ShiftedKeyPopulate
            .populate(&pool, 4000, false, &mut rng)
            .unwrap();

        let mut counts = [0usize; 10];
        for lineup in &population {
            for &id in lineup.slots() {
                counts[id] += 1;
            }
        }
        // Statistical check with slack, not exact proportionality.
        assert!(
            counts[0] > counts[9] * 2,
            "top-weighted item appeared {} times vs {} for the lowest",
            counts[0],
            counts[9]
        );
        assert!(
            counts[1] > counts[8],
            "weight ordering not reflected: {counts:?}"
        );
    }
}
