//! Guideline catalogue, evaluation engine and the surfaces that expose them.

pub mod batch;
mod catalog;
pub mod domain;
mod engine;
pub mod registry;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchImportError, BatchRow};
pub use domain::{
    ChoiceOption, CriteriaItem, CriteriaSection, FieldDescriptor, FieldKind, FindingValue,
    FindingValues, Outcome, RiskColour, Supplement, SupplementRow, Tier,
};
pub use registry::{Evaluator, GuidelineDefinition, GuidelineRegistry, GuidelineSummary};
pub use router::{guideline_router, EvaluationResponse};
pub use service::{EvaluationError, GuidelineService};
