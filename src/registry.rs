//! Name-keyed stage registry.
//!
//! Every stage of the pipeline is a narrow trait, and the runner only ever
//! sees trait objects, so any slot can be swapped without touching the loop.
//! [`StagePlan`] carries the stage names (the shape of a plugin settings
//! file); [`StageRegistry::from_plan`] resolves them to the built-in
//! implementations, and the `with_*` builders inject custom ones directly.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fitness::{FitnessStage, ShowdownFitness};
use crate::operators::{CrossoverStage, MutateStage, PointMutate, UniformCrossover};
use crate::pool::{PospoolStage, ShowdownPospool};
use crate::populate::{PopulateStage, ShiftedKeyPopulate};
use crate::validate::{DuplicatesValidate, SalaryCapValidate, ValidateStage};

/// Stage names for each pipeline slot.
///
/// Defaults name the built-in showdown implementations. Validators are an
/// ordered list; all of them run each generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    pub pospool: String,
    pub populate: String,
    pub crossover: String,
    pub mutate: String,
    pub fitness: String,
    pub validate: Vec<String>,
}

impl Default for StagePlan {
    fn default() -> Self {
        Self {
            pospool: "pospool_showdown".into(),
            populate: "populate_shifted".into(),
            crossover: "crossover_uniform".into(),
            mutate: "mutate_point".into(),
            fitness: "fitness_showdown".into(),
            validate: vec!["validate_salary".into(), "validate_duplicates".into()],
        }
    }
}

/// The resolved set of stage implementations driving one run.
pub struct StageRegistry {
    pub pospool: Box<dyn PospoolStage>,
    pub populate: Box<dyn PopulateStage>,
    pub crossover: Box<dyn CrossoverStage>,
    pub mutate: Box<dyn MutateStage>,
    pub fitness: Box<dyn FitnessStage>,
    pub validators: Vec<Box<dyn ValidateStage>>,
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self {
            pospool: Box::new(ShowdownPospool),
            populate: Box::new(ShiftedKeyPopulate),
            crossover: Box::new(UniformCrossover),
            mutate: Box::new(PointMutate),
            fitness: Box::new(ShowdownFitness),
            validators: vec![Box::new(SalaryCapValidate), Box::new(DuplicatesValidate)],
        }
    }
}

impl StageRegistry {
    /// Resolves a [`StagePlan`] against the built-in stage names.
    pub fn from_plan(plan: &StagePlan) -> Result<Self, ConfigError> {
        let unknown = |slot: &'static str, name: &str| ConfigError::UnknownStage {
            slot,
            name: name.to_string(),
        };

        let pospool: Box<dyn PospoolStage> = match plan.pospool.as_str() {
            "pospool_showdown" => Box::new(ShowdownPospool),
            name => return Err(unknown("pospool", name)),
        };
        let populate: Box<dyn PopulateStage> = match plan.populate.as_str() {
            "populate_shifted" => Box::new(ShiftedKeyPopulate),
            name => return Err(unknown("populate", name)),
        };
        let crossover: Box<dyn CrossoverStage> = match plan.crossover.as_str() {
            "crossover_uniform" => Box::new(UniformCrossover),
            name => return Err(unknown("crossover", name)),
        };
        let mutate: Box<dyn MutateStage> = match plan.mutate.as_str() {
            "mutate_point" => Box::new(PointMutate),
            name => return Err(unknown("mutate", name)),
        };
        let fitness: Box<dyn FitnessStage> = match plan.fitness.as_str() {
            "fitness_showdown" => Box::new(ShowdownFitness),
            name => return Err(unknown("fitness", name)),
        };
        let mut validators: Vec<Box<dyn ValidateStage>> = Vec::new();
        for name in &plan.validate {
            validators.push(match name.as_str() {
                "validate_salary" => Box::new(SalaryCapValidate),
                "validate_duplicates" => Box::new(DuplicatesValidate),
                name => return Err(unknown("validate", name)),
            });
        }
        Ok(Self {
            pospool,
            populate,
            crossover,
            mutate,
            fitness,
            validators,
        })
    }

    /// Replaces the pool-building stage.
    pub fn with_pospool(mut self, stage: Box<dyn PospoolStage>) -> Self {
        self.pospool = stage;
        self
    }

    /// Replaces the population-initialization stage.
    pub fn with_populate(mut self, stage: Box<dyn PopulateStage>) -> Self {
        self.populate = stage;
        self
    }

    /// Replaces the crossover operator.
    pub fn with_crossover(mut self, stage: Box<dyn CrossoverStage>) -> Self {
        self.crossover = stage;
        self
    }

    /// Replaces the mutation operator.
    pub fn with_mutate(mut self, stage: Box<dyn MutateStage>) -> Self {
        self.mutate = stage;
        self
    }

    /// Replaces the fitness stage.
    pub fn with_fitness(mut self, stage: Box<dyn FitnessStage>) -> Self {
        self.fitness = stage;
        self
    }

    /// Replaces the validator chain.
    pub fn with_validators(mut self, validators: Vec<Box<dyn ValidateStage>>) -> Self {
        self.validators = validators;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_resolves() {
        let registry = StageRegistry::from_plan(&StagePlan::default()).unwrap();
        assert_eq!(registry.validators.len(), 2);
    }

    #[test]
    fn test_unknown_stage_name_is_fatal() {
        let plan = StagePlan {
            fitness: "fitness_classic".into(),
            ..StagePlan::default()
        };
        match StageRegistry::from_plan(&plan) {
            Err(ConfigError::UnknownStage { slot, name }) => {
                assert_eq!(slot, "fitness");
                assert_eq!(name, "fitness_classic");
            }
            _ => panic!("expected UnknownStage"),
        }
    }

    #[test]
    fn test_unknown_validator_name_is_fatal() {
        let plan = StagePlan {
            validate: vec!["validate_salary".into(), "validate_positions".into()],
            ..StagePlan::default()
        };
        assert!(matches!(
            StageRegistry::from_plan(&plan),
            Err(ConfigError::UnknownStage { slot: "validate", .. })
        ));
    }
}
