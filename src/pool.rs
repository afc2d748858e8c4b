//! Candidate pool construction.
//!
//! The pool is the score-thresholded, probability-weighted subset of the
//! slate that sampling draws from. It is built once per run and never
//! mutated afterwards.

use crate::config::RunConfig;
use crate::error::ConfigError;
use crate::slate::Slate;

/// The candidate pool: slate ids that passed the projection threshold, each
/// with a normalized selection probability.
///
/// Probabilities are proportional to projection per salary dollar, so cheap
/// high-projection players are sampled most often. They sum to 1 over the
/// pool.
#[derive(Debug, Clone)]
pub struct Pool {
    ids: Vec<usize>,
    probs: Vec<f64>,
}

impl Pool {
    /// Number of candidates in the pool.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when no candidate passed the threshold.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Slate ids of the pool members, slate order.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Normalized selection probabilities, index-aligned with [`ids`](Self::ids).
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }
}

/// Builds the candidate pool from the slate.
///
/// One concrete implementation exists ([`ShowdownPospool`]); the trait is the
/// seam the stage registry selects through.
pub trait PospoolStage: Send + Sync {
    /// Filters and weights the slate into a [`Pool`].
    fn build(&self, slate: &Slate, config: &RunConfig) -> Result<Pool, ConfigError>;
}

/// Default pool builder for captain mode.
///
/// Captain mode needs no per-position sub-pools and no duplicated captain
/// rows; the captain multiplier is applied later, at the fitness and
/// validation stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowdownPospool;

impl PospoolStage for ShowdownPospool {
    fn build(&self, slate: &Slate, config: &RunConfig) -> Result<Pool, ConfigError> {
        let threshold = config.points_threshold;
        let mut ids = Vec::new();
        let mut weights = Vec::new();
        for (id, item) in slate.items().iter().enumerate() {
            if item.proj < threshold {
                continue;
            }
            if item.salary <= 0.0 {
                return Err(ConfigError::ZeroCostItem { id });
            }
            ids.push(id);
            weights.push(item.proj / item.salary);
        }

        if ids.is_empty() {
            return Err(ConfigError::EmptyPool { threshold });
        }
        let total: f64 = weights.iter().sum();
        if !(total > 0.0) {
            return Err(ConfigError::DegenerateWeights);
        }
        let probs = weights.iter().map(|w| w / total).collect();
        Ok(Pool { ids, probs })
    }
}
