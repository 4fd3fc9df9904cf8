//! Plain-text rendering of catalogue entries and outcomes for the CLI.

use acrguide::guidelines::{
    FieldDescriptor, FieldKind, GuidelineDefinition, GuidelineSummary, Outcome,
};

pub(crate) const INCOMPLETE_FINDING: &str = "Please fill in all required fields.";

pub(crate) fn catalogue(summaries: &[GuidelineSummary]) -> String {
    let width = summaries
        .iter()
        .map(|summary| summary.id.len())
        .max()
        .unwrap_or(0);
    summaries
        .iter()
        .map(|summary| format!("{:<width$}  {} ({})", summary.id, summary.name, summary.source))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn definition(definition: &GuidelineDefinition) -> String {
    let mut lines = vec![
        format!("{} [{}]", definition.name, definition.id),
        format!("Source: {}", definition.source),
        definition.description.to_string(),
        String::new(),
        "Fields:".to_string(),
    ];
    lines.extend(definition.fields.iter().map(field));

    for section in &definition.criteria {
        lines.push(String::new());
        lines.push(format!("{}:", section.title));
        for item in &section.items {
            let risk = item.risk.map(|risk| format!(" ({risk})")).unwrap_or_default();
            lines.push(format!("  - {}{}: {}", item.label, risk, item.description));
        }
    }
    lines.join("\n")
}

fn field(field: &FieldDescriptor) -> String {
    if field.kind == FieldKind::Section {
        return format!("  -- {} --", field.label);
    }
    let unit = field.unit.map(|unit| format!(" [{unit}]")).unwrap_or_default();
    let mut line = format!("  {}: {}{}", field.id, field.label, unit);
    if !field.options.is_empty() {
        let options = field
            .options
            .iter()
            .map(|option| match option.points {
                Some(points) => format!("{} = {} pt", option.label, points),
                None => option.value.clone(),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        line.push_str(&format!(" <{options}>"));
    }
    if field.kind == FieldKind::Checkbox {
        line.push_str(" (repeat for several)");
    }
    line
}

pub(crate) fn outcome(outcome: &Outcome) -> String {
    let mut lines = vec![format!("[{}] {}", outcome.tier.label(), outcome.recommendation)];

    if !outcome.notes.is_empty() {
        lines.push("Notes:".to_string());
        lines.extend(outcome.notes.iter().map(|note| format!("  - {note}")));
    }

    if let Some(supplement) = &outcome.supplement {
        lines.push(format!("{}:", supplement.title));
        for row in &supplement.rows {
            let detail = row
                .detail
                .as_deref()
                .map(|detail| format!(" ({detail})"))
                .unwrap_or_default();
            lines.push(format!("  {}: {}{}", row.label, row.value, detail));
        }
    }

    if let Some(report) = &outcome.report_string {
        lines.push("Report:".to_string());
        lines.push(format!("  {report}"));
    }
    lines.join("\n")
}

/// One-line form used by batch and demo output.
pub(crate) fn outcome_line(outcome: Option<&Outcome>) -> String {
    match outcome {
        Some(outcome) => format!("[{}] {}", outcome.tier.label(), outcome.recommendation),
        None => INCOMPLETE_FINDING.to_string(),
    }
}
