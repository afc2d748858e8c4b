//! Error taxonomy for a showdown optimization run.
//!
//! Errors fall into two classes with very different propagation rules:
//!
//! - [`ConfigError`]: anything that makes the run impossible before the first
//!   generation executes (bad slate, empty pool, degenerate weights). Fatal,
//!   surfaced to the caller immediately.
//! - [`GenerationError`]: a failure inside one generation's
//!   crossover/validate/score sequence. The runner catches these, discards the
//!   generation, and continues with the previous population; see
//!   [`RunResult::skipped_generations`](crate::runner::RunResult).

/// Fatal configuration-level errors.
///
/// Any of these aborts the run before a single generation executes.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The slate CSV could not be read or parsed.
    #[error("failed to read slate: {0}")]
    Slate(#[from] csv::Error),

    /// A column named by the column-role mapping is absent from the header.
    #[error("column {column:?} (role: {role}) not found in slate header")]
    MissingColumn { role: &'static str, column: String },

    /// A slate cell that should be numeric could not be parsed.
    #[error("slate row {row}: column {column:?} holds non-numeric value {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// A run parameter is out of its legal range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// No slate item projects at or above the points threshold.
    #[error("candidate pool is empty: no item projects at or above {threshold}")]
    EmptyPool { threshold: f64 },

    /// An item survived the projection filter with a non-positive salary,
    /// which makes its selection probability undefined.
    #[error("item {id} survived the projection filter with non-positive salary")]
    ZeroCostItem { id: usize },

    /// Selection weights sum to zero over the candidate pool.
    #[error("selection weights sum to zero across the candidate pool")]
    DegenerateWeights,

    /// The pool is too small to fill a lineup.
    #[error("pool holds {available} candidates but a lineup needs {needed}")]
    InsufficientCandidates { available: usize, needed: usize },

    /// A stage plan named an implementation the registry does not know.
    #[error("no stage named {name:?} registered for slot {slot:?}")]
    UnknownStage { slot: &'static str, name: String },

    /// Validation emptied the initial population, so no best lineup exists
    /// to seed the evolutionary loop.
    #[error("initial population empty after validation (salary cap {salary_cap})")]
    EmptyInitialPopulation { salary_cap: f64 },
}

/// Recoverable per-generation errors.
///
/// The runner never surfaces these to the caller; it skips the failing
/// generation, keeps the last-known-valid population and fitness, and
/// continues. They are counted and logged for observability.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Validation removed every individual produced this generation.
    #[error("population empty after validation")]
    EmptyPopulation,

    /// An operator produced a lineup that breaks the shape contract: an id
    /// that no slate row backs. Scoring or validating such a lineup would
    /// index outside the lookups, so the generation is rejected instead.
    #[error("lineup id {id} out of range for a slate of {len} rows")]
    ShapeMismatch { id: usize, len: usize },

    /// An external crossover or mutation operator failed.
    #[error("operator failed: {0}")]
    Operator(String),
}
