use super::common::*;
use crate::guidelines::Tier;

const PZ_LESION: &[(&str, &str)] = &[
    ("zone", "pz"),
    ("t2", "3"),
    ("dwi", "3"),
    ("dce", "pos"),
    ("prost_l", "4.8"),
    ("prost_w", "4.2"),
    ("prost_h", "3.8"),
    ("psa", "7.2"),
];

#[test]
fn peripheral_dce_upgrade_with_gland_report() {
    let outcome = assert_outcome("pirads", PZ_LESION, Tier::FurtherWorkup, "PI-RADS 4 — ");

    let report = outcome.report_string.expect("report string");
    assert!(report.starts_with(
        "Prostate mpMRI (PI-RADS v2.1): PI-RADS 4 lesion in the peripheral zone (T2: 3, DWI: 3, DCE: positive)."
    ));
    assert!(report.contains("Prostate volume: 39.8 mL (4.8 × 4.2 × 3.8 cm, ellipsoid formula)."));
    assert!(report.contains("PSA density: 0.181 ng/mL/cc (elevated)."));

    let summary = outcome.supplement.expect("score summary");
    assert_eq!(summary.title, "Score summary");
    let density = summary
        .rows
        .iter()
        .find(|row| row.label == "PSA density")
        .expect("density row");
    assert_eq!(density.value, "0.181 ng/mL/cc");
    assert_eq!(density.detail.as_deref(), Some("Elevated"));
}

#[test]
fn partial_gland_measurements_are_ignored() {
    let partial: Vec<_> = PZ_LESION
        .iter()
        .copied()
        .filter(|(id, _)| *id != "prost_h")
        .collect();
    let outcome = evaluate("pirads", &partial).expect("outcome");
    assert_eq!(outcome.tier, Tier::FurtherWorkup);
    assert_eq!(outcome.supplement.expect("summary").rows.len(), 5);
    assert!(!outcome.report_string.expect("report").contains("PSA density"));
}

#[test]
fn transition_zone_follows_t2_with_dwi_upgrade() {
    assert_outcome(
        "pirads",
        &[("zone", "tz"), ("t2", "3"), ("dwi", "5")],
        Tier::FurtherWorkup,
        "PI-RADS 4",
    );
    assert_outcome(
        "pirads",
        &[("zone", "tz"), ("t2", "2"), ("dwi", "5")],
        Tier::NoFollowup,
        "PI-RADS 2",
    );
    assert_outcome(
        "pirads",
        &[("zone", "pz"), ("t2", "1"), ("dwi", "3"), ("dce", "neg")],
        Tier::ShortTermFollowup,
        "PI-RADS 3",
    );
}

#[test]
fn blank_sequences_default_to_lowest_score() {
    let outcome = assert_outcome("pirads", &[], Tier::NoFollowup, "PI-RADS 1");
    assert!(outcome
        .report_string
        .expect("report")
        .contains("in the transition zone (T2: 1, DWI: 1, DCE: negative)"));
}

fn density(psa: &str) -> crate::guidelines::Outcome {
    evaluate(
        "psa_density",
        &[("psa", psa), ("prost_l", "4"), ("prost_w", "4"), ("prost_h", "4")],
    )
    .expect("complete measurements")
}

#[test]
fn density_bands() {
    let normal = density("2");
    assert_eq!(normal.tier, Tier::NoFollowup);
    assert!(normal.recommendation.starts_with("PSAD <0.10"));

    let borderline = density("4");
    assert_eq!(borderline.tier, Tier::ShortTermFollowup);

    let elevated = density("5.5");
    assert_eq!(elevated.tier, Tier::FurtherWorkup);

    let high = density("10");
    assert_eq!(high.tier, Tier::Intervention);
    assert!(high.recommendation.starts_with("PSAD ≥20.20 ng/mL/cc"));

    let calculation = high.supplement.expect("calculation");
    assert_eq!(calculation.title, "Calculation");
    assert_eq!(calculation.rows[0].value, "33.3 mL");
    assert_eq!(calculation.rows[0].detail.as_deref(), Some("4 × 4 × 4 cm"));
}

#[test]
fn density_requires_every_positive_measurement() {
    assert!(evaluate("psa_density", &[("psa", "4"), ("prost_l", "4"), ("prost_w", "4")]).is_none());
    assert!(evaluate(
        "psa_density",
        &[("psa", "0"), ("prost_l", "4"), ("prost_w", "4"), ("prost_h", "4")]
    )
    .is_none());
}

#[test]
fn density_report_rounds_exact_ties_up() {
    let outcome = evaluate(
        "psa_density",
        &[("psa", "0.0325"), ("prost_l", "1"), ("prost_w", "1"), ("prost_h", "1")],
    )
    .expect("complete measurements");
    let report = outcome.report_string.expect("report");
    assert!(report.contains("PSA density: 0.063 ng/mL/cc"), "{report}");
}
