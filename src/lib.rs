//! Genetic optimizer for DFS showdown (captain-mode) lineups.
//!
//! Evolves populations of six-player lineups (one captain plus five flex
//! slots) toward the maximum projected score under a salary cap. The captain
//! slot scores and costs 1.5× its listed values, so a single player pool
//! serves every slot with no duplicated captain rows.
//!
//! # Pipeline
//!
//! One run flows through five pluggable stages:
//!
//! 1. **Pospool** ([`pool`]): threshold the slate by projection and weight
//!    the survivors by projection per salary dollar.
//! 2. **Populate** ([`populate`]): shifted-random-key weighted sampling
//!    without replacement, one batch for the whole population.
//! 3. **Fitness** ([`fitness`]): captain-scaled linear sum over the six
//!    slots, shared verbatim with the salary-cap check.
//! 4. **Validate** ([`validate`]): salary-cap and duplicate filters,
//!    composed by intersection.
//! 5. **Crossover / Mutate** ([`operators`]): breed the next generation;
//!    offspring validity is the validators' job, not theirs.
//!
//! The [`runner::Runner`] drives the loop. A generation that fails is
//! skipped with the previous population retained, so one bad crossover never
//! kills a run.
//!
//! # Example
//!
//! ```
//! use showdown_ga::config::RunConfig;
//! use showdown_ga::registry::StageRegistry;
//! use showdown_ga::runner::Runner;
//! use showdown_ga::slate::{Item, Slate};
//!
//! let slate = Slate::from_items(
//!     (0..12)
//!         .map(|i| Item {
//!             name: format!("P{i}"),
//!             pos: "FLEX".into(),
//!             proj: 20.0 - i as f64,
//!             salary: 4000.0 + 400.0 * i as f64,
//!         })
//!         .collect(),
//! );
//! let config = RunConfig::default()
//!     .with_population_size(500)
//!     .with_n_generations(5)
//!     .with_points_threshold(0.0)
//!     .with_seed(42);
//!
//! let result = Runner::run(&slate, &config, &StageRegistry::default()).unwrap();
//! assert!(result.best.is_unique());
//! ```

pub mod config;
pub mod error;
pub mod fitness;
pub mod operators;
pub mod pool;
pub mod populate;
pub mod registry;
pub mod runner;
pub mod slate;
pub mod types;
pub mod validate;

pub use config::RunConfig;
pub use error::{ConfigError, GenerationError};
pub use registry::{StagePlan, StageRegistry};
pub use runner::{RunResult, Runner};
pub use slate::{ColumnRoles, Item, Slate};
pub use types::{FitnessVec, Lineup, Population, CAPTAIN_SLOT, LINEUP_SIZE};
