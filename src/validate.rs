//! Constraint-based population filtering.
//!
//! Validators are pure predicates over lineups. Each keeps the subset of the
//! population that satisfies one constraint, so chaining them in any order
//! yields the same intersection. Invalid lineups are dropped, never repaired.

use rayon::prelude::*;

use crate::fitness::lineup_sum;
use crate::types::{Lineup, Population};

/// Read-only inputs shared by every validator in the chain.
#[derive(Debug, Clone, Copy)]
pub struct ValidateCtx<'a> {
    /// Id → salary lookup.
    pub salaries: &'a [f64],
    /// Total salary a lineup may spend.
    pub salary_cap: f64,
    /// Scaling applied to the captain slot's salary.
    pub captain_multiplier: f64,
    /// Whether to filter on the rayon thread pool.
    pub parallel: bool,
}

/// One constraint filter over the population.
///
/// Implementations must be pure and must return an empty population for an
/// empty input rather than erroring.
pub trait ValidateStage: Send + Sync {
    /// Returns the subset of `population` satisfying this validator's
    /// constraint, in input order.
    fn validate(&self, population: Population, ctx: &ValidateCtx<'_>) -> Population;
}

/// Keeps lineups whose captain-scaled salary sum is within the cap.
///
/// The captain slot costs `captain_multiplier` times its listed salary, the
/// same scaling fitness applies to its projection. Both go through
/// [`lineup_sum`], so the two rules cannot diverge.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryCapValidate;

impl ValidateStage for SalaryCapValidate {
    fn validate(&self, population: Population, ctx: &ValidateCtx<'_>) -> Population {
        let keep =
            |lineup: &Lineup| lineup_sum(lineup, ctx.salaries, ctx.captain_multiplier) <= ctx.salary_cap;
        if ctx.parallel {
            population.into_par_iter().filter(keep).collect()
        } else {
            population.into_iter().filter(|l| keep(l)).collect()
        }
    }
}

/// Keeps lineups whose six ids are pairwise distinct.
///
/// Sampling cannot produce duplicates, but crossover and mutation can; this
/// validator is the backstop that guarantees the invariant regardless of
/// which operators are plugged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicatesValidate;

impl ValidateStage for DuplicatesValidate {
    fn validate(&self, population: Population, ctx: &ValidateCtx<'_>) -> Population {
        if ctx.parallel {
            population
                .into_par_iter()
                .filter(Lineup::is_unique)
                .collect()
        } else {
            population.into_iter().filter(Lineup::is_unique).collect()
        }
    }
}

/// Runs every validator in sequence; the result is the intersection of all
/// constraints.
pub fn validate_chain(
    validators: &[Box<dyn ValidateStage>],
    mut population: Population,
    ctx: &ValidateCtx<'_>,
) -> Population {
    for validator in validators {
        population = validator.validate(population, ctx);
    }
    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Ten players at 5000 each.
    fn ctx(salaries: &[f64]) -> ValidateCtx<'_> {
        ValidateCtx {
            salaries,
            salary_cap: 35_000.0,
            captain_multiplier: 1.5,
            parallel: false,
        }
    }

    #[test]
    fn test_salary_validator_applies_captain_multiplier() {
        let salaries = vec![5000.0; 10];
        // 1.5*5000 + 5*5000 = 32_500 <= 35_000: kept.
        let within = Lineup([0, 1, 2, 3, 4, 5]);
        let ctx_tight = ValidateCtx {
            salary_cap: 32_000.0,
            ..ctx(&salaries)
        };
        // Without the captain scaling the sum would be 30_000 and pass; the
        // scaled sum is 32_500 and must fail a 32_000 cap.
        assert!(SalaryCapValidate
            .validate(vec![within], &ctx_tight)
            .is_empty());
        assert_eq!(
            SalaryCapValidate
                .validate(vec![within], &ctx(&salaries))
                .len(),
            1
        );
    }

    #[test]
    fn test_salary_boundary_is_inclusive() {
        let salaries = vec![5000.0; 10];
        let lineup = Lineup([0, 1, 2, 3, 4, 5]);
        let exact = ValidateCtx {
            salary_cap: 32_500.0,
            ..ctx(&salaries)
        };
        assert_eq!(SalaryCapValidate.validate(vec![lineup], &exact).len(), 1);
    }

    #[test]
    fn test_duplicates_validator() {
        let salaries = vec![5000.0; 10];
        let valid = Lineup([0, 1, 2, 3, 4, 5]);
        let dupes = Lineup([0, 1, 2, 3, 4, 0]);
        let kept = DuplicatesValidate.validate(vec![valid, dupes], &ctx(&salaries));
        assert_eq!(kept, vec![valid]);
    }

    #[test]
    fn test_empty_input_returns_empty() {
        let salaries = vec![5000.0; 10];
        assert!(SalaryCapValidate.validate(vec![], &ctx(&salaries)).is_empty());
        assert!(DuplicatesValidate.validate(vec![], &ctx(&salaries)).is_empty());
    }

    #[test]
    fn test_chain_order_does_not_matter() {
        let salaries: Vec<f64> = (0..10).map(|i| 4000.0 + 500.0 * i as f64).collect();
        let population: Population = vec![
            Lineup([0, 1, 2, 3, 4, 5]),
            Lineup([9, 8, 7, 6, 5, 4]),
            Lineup([0, 0, 2, 3, 4, 5]),
            Lineup([2, 3, 4, 5, 6, 7]),
        ];
        let ctx = ctx(&salaries);
        let a: Vec<Box<dyn ValidateStage>> =
            vec![Box::new(SalaryCapValidate), Box::new(DuplicatesValidate)];
        let b: Vec<Box<dyn ValidateStage>> =
            vec![Box::new(DuplicatesValidate), Box::new(SalaryCapValidate)];
        assert_eq!(
            validate_chain(&a, population.clone(), &ctx),
            validate_chain(&b, population, &ctx)
        );
    }

    proptest! {
        /// Validation is a subset operation and is idempotent.
        #[test]
        fn prop_validation_subset_and_idempotent(
            raw in proptest::collection::vec(
                proptest::array::uniform6(0usize..10), 0..40),
        ) {
            let salaries = vec![5000.0; 10];
            let ctx = ctx(&salaries);
            let population: Population = raw.into_iter().map(Lineup).collect();
            let validators: Vec<Box<dyn ValidateStage>> =
                vec![Box::new(SalaryCapValidate), Box::new(DuplicatesValidate)];

            let once = validate_chain(&validators, population.clone(), &ctx);
            // Subset: every survivor came from the input.
            for lineup in &once {
                prop_assert!(population.contains(lineup));
            }
            // Survivors satisfy both constraints.
            for lineup in &once {
                prop_assert!(lineup.is_unique());
                prop_assert!(lineup_sum(lineup, &salaries, 1.5) <= 35_000.0);
            }
            // Idempotence: a second pass changes nothing.
            let twice = validate_chain(&validators, once.clone(), &ctx);
            prop_assert_eq!(once, twice);
        }
    }
}
