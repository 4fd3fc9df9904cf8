use super::engine::{format, parse_float, parse_int, Admissible};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Severity/urgency tier shared by every guideline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    NoFollowup,
    ShortTermFollowup,
    FurtherWorkup,
    Intervention,
    ImagingRecommended,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::NoFollowup,
        Tier::ShortTermFollowup,
        Tier::FurtherWorkup,
        Tier::Intervention,
        Tier::ImagingRecommended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::NoFollowup => "no-followup",
            Tier::ShortTermFollowup => "short-term-followup",
            Tier::FurtherWorkup => "further-workup",
            Tier::Intervention => "intervention",
            Tier::ImagingRecommended => "imaging-recommended",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::NoFollowup => "No Follow-up Needed",
            Tier::ShortTermFollowup => "Short-term Follow-up",
            Tier::FurtherWorkup => "Further Workup Needed",
            Tier::Intervention => "Intervention / Surgery",
            Tier::ImagingRecommended => "Imaging Recommended",
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            Tier::NoFollowup => "green",
            Tier::ShortTermFollowup => "yellow",
            Tier::FurtherWorkup => "orange",
            Tier::Intervention => "red",
            Tier::ImagingRecommended => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Select,
    Radio,
    Checkbox,
    Points,
    Section,
}

impl FieldKind {
    pub fn carries_value(self) -> bool {
        !matches!(self, FieldKind::Section)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u8>,
}

/// One input control of a guideline form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
}

impl FieldDescriptor {
    fn bare(id: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            id,
            kind,
            label,
            unit: None,
            placeholder: None,
            help: None,
            options: Vec::new(),
        }
    }

    fn choice(
        id: &'static str,
        kind: FieldKind,
        label: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        let mut field = Self::bare(id, kind, label);
        field.options = options
            .iter()
            .map(|&(value, label)| ChoiceOption {
                value: value.to_string(),
                label,
                points: None,
            })
            .collect();
        field
    }

    pub fn number(
        id: &'static str,
        label: &'static str,
        unit: &'static str,
        placeholder: &'static str,
    ) -> Self {
        let mut field = Self::bare(id, FieldKind::Number, label);
        field.unit = Some(unit).filter(|unit| !unit.is_empty());
        field.placeholder = Some(placeholder).filter(|text| !text.is_empty());
        field
    }

    pub fn select(
        id: &'static str,
        label: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        Self::choice(id, FieldKind::Select, label, options)
    }

    pub fn radio(
        id: &'static str,
        label: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        Self::choice(id, FieldKind::Radio, label, options)
    }

    pub fn checkbox(
        id: &'static str,
        label: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        Self::choice(id, FieldKind::Checkbox, label, options)
    }

    /// Weighted choice: the submitted value of an option is its point value.
    pub fn points(id: &'static str, label: &'static str, options: &[(u8, &'static str)]) -> Self {
        let mut field = Self::bare(id, FieldKind::Points, label);
        field.options = options
            .iter()
            .map(|&(points, label)| ChoiceOption {
                value: points.to_string(),
                label,
                points: Some(points),
            })
            .collect();
        field
    }

    pub fn section(id: &'static str, label: &'static str) -> Self {
        Self::bare(id, FieldKind::Section, label)
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

/// A submitted value: one string, or the ticked options of a checkbox field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FindingValue {
    Scalar(String),
    List(Vec<String>),
}

impl FindingValue {
    pub fn blank() -> Self {
        FindingValue::Scalar(String::new())
    }
}

impl From<&str> for FindingValue {
    fn from(value: &str) -> Self {
        FindingValue::Scalar(value.to_string())
    }
}

impl From<String> for FindingValue {
    fn from(value: String) -> Self {
        FindingValue::Scalar(value)
    }
}

impl From<Vec<String>> for FindingValue {
    fn from(values: Vec<String>) -> Self {
        FindingValue::List(values)
    }
}

impl<'de> Deserialize<'de> for FindingValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Number(f64),
            Flag(bool),
            List(Vec<String>),
            Null,
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(text) => FindingValue::Scalar(text),
            Wire::Number(number) => FindingValue::Scalar(format::number(number)),
            Wire::Flag(flag) => FindingValue::Scalar(if flag { "yes" } else { "no" }.to_string()),
            Wire::List(items) => FindingValue::List(items),
            Wire::Null => FindingValue::blank(),
        })
    }
}

/// Field id to submitted value for one evaluation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingValues(BTreeMap<String, FindingValue>);

impl FindingValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, value: impl Into<FindingValue>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn with_list(mut self, id: impl Into<String>, values: &[&str]) -> Self {
        let values = values.iter().map(|value| value.to_string()).collect::<Vec<_>>();
        self.insert(id, FindingValue::List(values));
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<FindingValue>) {
        self.0.insert(id.into(), value.into());
    }

    /// Adds `value` under `id`, turning an existing entry into a list.
    pub fn push(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.0.entry(id.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(FindingValue::Scalar(value));
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                let merged = match slot.get_mut() {
                    FindingValue::Scalar(existing) => {
                        FindingValue::List(vec![std::mem::take(existing), value])
                    }
                    FindingValue::List(items) => {
                        items.push(value);
                        return;
                    }
                };
                slot.insert(merged);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&FindingValue> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FindingValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scalar text of `id`; missing fields and lists read as "".
    pub fn text(&self, id: &str) -> &str {
        match self.0.get(id) {
            Some(FindingValue::Scalar(text)) => text,
            _ => "",
        }
    }

    pub fn is(&self, id: &str, expected: &str) -> bool {
        self.text(id) == expected
    }

    /// Ticked options of `id`; a non-empty scalar reads as a one-element list.
    pub fn list(&self, id: &str) -> Vec<&str> {
        match self.0.get(id) {
            Some(FindingValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(FindingValue::Scalar(text)) if !text.is_empty() => vec![text.as_str()],
            _ => Vec::new(),
        }
    }

    /// Parsed number of `id`, absent when blank or unparsable.
    pub fn number(&self, id: &str) -> Option<f64> {
        parse_float(self.text(id))
    }

    pub(crate) fn required(&self, id: &str, admissible: Admissible) -> Option<f64> {
        self.number(id).filter(|value| admissible.admits(*value))
    }

    pub fn number_or_zero(&self, id: &str) -> f64 {
        self.number(id).unwrap_or(0.0)
    }

    pub fn integer(&self, id: &str) -> Option<i64> {
        parse_int(self.text(id))
    }

    /// Leading integer of `id`, with blank, unparsable and zero all reading as `default`.
    pub fn integer_or(&self, id: &str, default: i64) -> i64 {
        match self.integer(id) {
            Some(value) if value != 0 => value,
            _ => default,
        }
    }
}

impl<K: Into<String>, V: Into<FindingValue>> FromIterator<(K, V)> for FindingValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FindingValues::new();
        for (id, value) in iter {
            values.insert(id, value);
        }
        values
    }
}

/// A render-ready breakdown attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplement {
    pub title: String,
    pub rows: Vec<SupplementRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementRow {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Supplement {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(SupplementRow {
            label: label.into(),
            value: value.into(),
            detail: None,
        });
        self
    }

    pub fn detailed_row(
        mut self,
        label: impl Into<String>,
        value: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        self.rows.push(SupplementRow {
            label: label.into(),
            value: value.into(),
            detail: Some(detail.into()),
        });
        self
    }
}

/// Result of evaluating a finding against one guideline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub tier: Tier,
    pub recommendation: String,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplement: Option<Supplement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_string: Option<String>,
}

impl Outcome {
    pub fn new(tier: Tier, recommendation: impl Into<String>) -> Self {
        Self {
            tier,
            recommendation: recommendation.into(),
            notes: Vec::new(),
            supplement: None,
            report_string: None,
        }
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes.extend(notes.into_iter().map(Into::into));
        self
    }

    pub fn with_supplement(mut self, supplement: Supplement) -> Self {
        self.supplement = Some(supplement);
        self
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report_string = Some(report.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColour {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    Grey,
}

/// One row of a static reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaItem {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<&'static str>,
    pub risk_colour: RiskColour,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaSection {
    pub title: &'static str,
    pub items: Vec<CriteriaItem>,
}

impl CriteriaSection {
    /// Rows are `(label, risk, colour, description)`; an empty risk is omitted.
    pub fn new(
        title: &'static str,
        rows: &[(&'static str, &'static str, RiskColour, &'static str)],
    ) -> Self {
        Self {
            title,
            items: rows
                .iter()
                .map(|&(label, risk, risk_colour, description)| CriteriaItem {
                    label,
                    risk: Some(risk).filter(|risk| !risk.is_empty()),
                    risk_colour,
                    description,
                })
                .collect(),
        }
    }
}
