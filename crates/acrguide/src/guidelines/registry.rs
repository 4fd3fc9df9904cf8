use super::catalog;
use super::domain::{CriteriaSection, FieldDescriptor, FieldKind, FindingValue, FindingValues, Outcome};
use serde::Serialize;
use std::collections::HashMap;

/// Pure evaluation function of one guideline. `None` means the finding is incomplete.
pub type Evaluator = fn(&FindingValues) -> Option<Outcome>;

#[derive(Debug, Clone, Serialize)]
pub struct GuidelineDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub source: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    pub evaluator: Evaluator,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidelineSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub source: &'static str,
    pub description: &'static str,
}

impl GuidelineDefinition {
    pub fn summary(&self) -> GuidelineSummary {
        GuidelineSummary {
            id: self.id,
            name: self.name,
            source: self.source,
            description: self.description,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Restricts `raw` to this guideline's schema. Sections are skipped, missing
    /// fields become blank, checkbox fields always read as lists.
    pub fn collect(&self, raw: &FindingValues) -> FindingValues {
        self.fields
            .iter()
            .filter(|field| field.kind.carries_value())
            .map(|field| {
                let value = match field.kind {
                    FieldKind::Checkbox => FindingValue::List(
                        raw.list(field.id).into_iter().map(str::to_string).collect(),
                    ),
                    _ => FindingValue::Scalar(raw.text(field.id).to_string()),
                };
                (field.id, value)
            })
            .collect()
    }

    pub fn evaluate(&self, values: &FindingValues) -> Option<Outcome> {
        (self.evaluator)(values)
    }
}

/// Every guideline definition, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct GuidelineRegistry {
    definitions: Vec<GuidelineDefinition>,
    index: HashMap<&'static str, usize>,
}

impl GuidelineRegistry {
    pub fn standard() -> Self {
        Self::from_definitions(catalog::standard_catalogue())
    }

    /// Later definitions with a duplicate id are unreachable through [`GuidelineRegistry::get`].
    pub fn from_definitions(definitions: Vec<GuidelineDefinition>) -> Self {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            index.entry(definition.id).or_insert(position);
        }
        Self { definitions, index }
    }

    pub fn get(&self, id: &str) -> Option<&GuidelineDefinition> {
        self.index.get(id).map(|position| &self.definitions[*position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuidelineDefinition> {
        self.definitions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|definition| definition.id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Unknown ids and incomplete findings both come back as `None`.
    pub fn evaluate(&self, id: &str, values: &FindingValues) -> Option<Outcome> {
        let definition = self.get(id)?;
        definition.evaluate(&definition.collect(values))
    }
}

impl Default for GuidelineRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
