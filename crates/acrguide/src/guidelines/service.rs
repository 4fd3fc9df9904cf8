use tracing::debug;

use super::domain::{FindingValues, Outcome};
use super::registry::{GuidelineDefinition, GuidelineRegistry, GuidelineSummary};

/// Facade over the registry used by the HTTP router and the CLI.
#[derive(Debug, Clone, Default)]
pub struct GuidelineService {
    registry: GuidelineRegistry,
}

impl GuidelineService {
    pub fn new(registry: GuidelineRegistry) -> Self {
        Self { registry }
    }

    pub fn standard() -> Self {
        Self::new(GuidelineRegistry::standard())
    }

    pub fn registry(&self) -> &GuidelineRegistry {
        &self.registry
    }

    pub fn catalogue(&self) -> Vec<GuidelineSummary> {
        self.registry.iter().map(GuidelineDefinition::summary).collect()
    }

    pub fn describe(&self, guideline_id: &str) -> Result<&GuidelineDefinition, EvaluationError> {
        self.registry
            .get(guideline_id)
            .ok_or_else(|| EvaluationError::UnknownGuideline(guideline_id.to_string()))
    }

    /// Collect `raw` against the guideline schema and evaluate it.
    pub fn evaluate(
        &self,
        guideline_id: &str,
        raw: &FindingValues,
    ) -> Result<Outcome, EvaluationError> {
        let definition = self.describe(guideline_id)?;
        let values = definition.collect(raw);

        match definition.evaluate(&values) {
            Some(outcome) => {
                debug!(
                    guideline = definition.id,
                    tier = outcome.tier.as_str(),
                    "guideline evaluated"
                );
                Ok(outcome)
            }
            None => {
                debug!(guideline = definition.id, "finding incomplete");
                Err(EvaluationError::IncompleteFinding {
                    guideline_id: definition.id,
                })
            }
        }
    }
}

/// Error raised by the guideline service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("unknown guideline '{0}'")]
    UnknownGuideline(String),
    #[error("incomplete finding for guideline '{guideline_id}'")]
    IncompleteFinding { guideline_id: &'static str },
}
