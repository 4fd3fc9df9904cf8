use std::io::Cursor;
use std::path::PathBuf;

use acrguide::guidelines::batch::{evaluate_path, evaluate_reader};
use acrguide::guidelines::{BatchImportError, GuidelineRegistry, Tier};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

#[test]
fn pancreatic_cyst_export_evaluates_every_row() {
    let registry = GuidelineRegistry::standard();
    let rows = evaluate_path(&registry, "pancreatic_cyst", fixture("pancreatic_cysts.csv"))
        .expect("fixture evaluates");

    let tiers: Vec<_> = rows
        .iter()
        .map(|row| row.outcome.as_ref().map(|outcome| outcome.tier))
        .collect();
    assert_eq!(
        tiers,
        vec![
            Some(Tier::NoFollowup),
            Some(Tier::FurtherWorkup),
            Some(Tier::Intervention),
            None,
            Some(Tier::ShortTermFollowup),
        ]
    );

    let with_features = &rows[1];
    assert_eq!(with_features.row, 2);
    assert_eq!(with_features.finding.list("worrisome"), vec!["thick_wall", "nodule"]);
    let outcome = with_features.outcome.as_ref().expect("outcome");
    assert!(outcome
        .notes
        .iter()
        .any(|note| note == "Worrisome features: thick_wall, nodule."));
}

#[test]
fn batch_rows_match_single_evaluations() {
    let csv = "class\nI\nIIF\nIV\n";
    let registry = GuidelineRegistry::standard();
    let rows = evaluate_reader(&registry, "bosniak", Cursor::new(csv)).expect("batch");

    for row in &rows {
        assert_eq!(row.outcome, registry.evaluate("bosniak", &row.finding));
    }
    assert_eq!(rows[2].outcome.as_ref().map(|o| o.tier), Some(Tier::Intervention));
}

#[test]
fn batch_rejects_unknown_guideline() {
    let registry = GuidelineRegistry::standard();
    let err = evaluate_path(&registry, "nope", fixture("pancreatic_cysts.csv"))
        .expect_err("unknown guideline");
    assert!(matches!(err, BatchImportError::UnknownGuideline(ref id) if id == "nope"));
    assert_eq!(err.to_string(), "unknown guideline 'nope'");
}
