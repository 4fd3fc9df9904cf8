//! CSV batch evaluation: one finding per row, headers are field ids.

use super::domain::{FindingValue, FindingValues, Outcome};
use super::registry::GuidelineRegistry;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const LIST_SEPARATOR: char = ';';

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownGuideline(String),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read findings file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid findings CSV data: {}", err),
            BatchImportError::UnknownGuideline(id) => write!(f, "unknown guideline '{}'", id),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
            BatchImportError::UnknownGuideline(_) => None,
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Outcome of one CSV row; `row` counts data rows from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub finding: FindingValues,
    pub outcome: Option<Outcome>,
}

/// Reads every data row as a finding. Cells holding `;` become lists.
pub fn parse_findings<R: Read>(reader: R) -> Result<Vec<FindingValues>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut findings = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let finding = headers
            .iter()
            .zip(record.iter())
            .map(|(id, cell)| (id.to_string(), cell_value(cell)))
            .collect::<FindingValues>();
        findings.push(finding);
    }

    Ok(findings)
}

fn cell_value(cell: &str) -> FindingValue {
    if !cell.contains(LIST_SEPARATOR) {
        return FindingValue::Scalar(cell.to_string());
    }
    FindingValue::List(
        cell.split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

pub fn evaluate_path<P: AsRef<Path>>(
    registry: &GuidelineRegistry,
    guideline_id: &str,
    path: P,
) -> Result<Vec<BatchRow>, BatchImportError> {
    let file = std::fs::File::open(path)?;
    evaluate_reader(registry, guideline_id, file)
}

pub fn evaluate_reader<R: Read>(
    registry: &GuidelineRegistry,
    guideline_id: &str,
    reader: R,
) -> Result<Vec<BatchRow>, BatchImportError> {
    let definition = registry
        .get(guideline_id)
        .ok_or_else(|| BatchImportError::UnknownGuideline(guideline_id.to_string()))?;

    let rows = parse_findings(reader)?
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let finding = definition.collect(&raw);
            let outcome = definition.evaluate(&finding);
            BatchRow {
                row: index + 1,
                finding,
                outcome,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        guideline = definition.id,
        rows = rows.len(),
        incomplete = rows.iter().filter(|row| row.outcome.is_none()).count(),
        "batch evaluated"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::domain::Tier;
    use std::io::Cursor;

    #[test]
    fn parses_list_cells_and_blank_cells() {
        let csv = "high_risk,worrisome,size\njaundice; enhancing_solid ,,25\n";
        let findings = parse_findings(Cursor::new(csv)).expect("csv parses");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].list("high_risk"), vec!["jaundice", "enhancing_solid"]);
        assert_eq!(findings[0].text("worrisome"), "");
        assert_eq!(findings[0].text("size"), "25");
    }

    #[test]
    fn evaluates_each_row_in_order() {
        let csv = "size,count,risk\n4,single,low\n7,single,low\nabc,single,low\n";
        let registry = GuidelineRegistry::standard();
        let rows = evaluate_reader(&registry, "fleischner_solid", Cursor::new(csv))
            .expect("batch evaluates");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[0].outcome.as_ref().map(|o| o.tier), Some(Tier::NoFollowup));
        assert_eq!(
            rows[1].outcome.as_ref().map(|o| o.tier),
            Some(Tier::ShortTermFollowup)
        );
        assert!(rows[2].outcome.is_none());
    }

    #[test]
    fn unknown_guideline_is_rejected_before_reading() {
        let registry = GuidelineRegistry::standard();
        let error = evaluate_reader(&registry, "nope", Cursor::new("size\n4\n"))
            .expect_err("expected unknown guideline");

        match error {
            BatchImportError::UnknownGuideline(id) => assert_eq!(id, "nope"),
            other => panic!("expected unknown guideline, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let registry = GuidelineRegistry::standard();
        let error = evaluate_reader(&registry, "fleischner_solid", Cursor::new("size,count\n4\n"))
            .expect_err("expected csv error");

        match error {
            BatchImportError::Csv(_) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let registry = GuidelineRegistry::standard();
        let error = evaluate_path(&registry, "fleischner_solid", "./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            BatchImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
