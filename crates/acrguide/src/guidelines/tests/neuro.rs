use super::common::*;
use crate::guidelines::{FindingValues, Tier};

#[test]
fn aspects_subtracts_involved_regions() {
    let values = FindingValues::new()
        .with_list("regions", &["M2", "I", "M1"])
        .with("lvo", "yes");
    let outcome = evaluate_values("aspects", &values).expect("outcome");

    assert_eq!(outcome.tier, Tier::Intervention);
    assert!(outcome.recommendation.starts_with("ASPECTS 7 with large vessel occlusion"));
    assert_eq!(
        outcome.report_string.as_deref(),
        Some("ASPECTS: 7/10 (involved regions: I, M1, M2).")
    );
}

#[test]
fn aspects_occlusion_status_routes_the_recommendation() {
    let untouched = assert_outcome(
        "aspects",
        &[("lvo", "unknown")],
        Tier::ImagingRecommended,
        "CT angiography recommended",
    );
    assert_eq!(
        untouched.report_string.as_deref(),
        Some("ASPECTS: 10/10 (involved regions: none).")
    );

    assert_outcome("aspects", &[("lvo", "no")], Tier::ShortTermFollowup, "ASPECTS 10 without");

    let extensive = FindingValues::new()
        .with_list("regions", &["C", "L", "IC", "I", "M1"])
        .with("lvo", "yes");
    let outcome = evaluate_values("aspects", &extensive).expect("outcome");
    assert_eq!(outcome.tier, Tier::FurtherWorkup);
    assert!(outcome.recommendation.starts_with("ASPECTS 5 — extensive"));
}

#[test]
fn ich_score_adds_components_and_reports_mortality() {
    let outcome = assert_outcome(
        "ich_score",
        &[("gcs", "10"), ("volume", "35"), ("ivh", "yes"), ("age", "70")],
        Tier::Intervention,
        "ICH score 3 — predicted 30-day mortality 72%",
    );
    assert_eq!(
        outcome.report_string.as_deref(),
        Some("ICH score: 3/6 (GCS 10, volume 35.0 mL, IVH present, supratentorial, age 70). Estimated 30-day mortality 72%.")
    );
    let supplement = outcome.supplement.expect("score components");
    assert_eq!(supplement.rows.len(), 6);
    assert_eq!(supplement.rows[5].value, "3/6");
}

#[test]
fn ich_score_estimates_volume_with_abc_over_two() {
    let outcome = assert_outcome(
        "ich_score",
        &[("gcs", "14"), ("dim_a", "4"), ("dim_b", "4"), ("dim_c", "4")],
        Tier::FurtherWorkup,
        "ICH score 1",
    );
    assert!(outcome
        .report_string
        .expect("report")
        .contains("volume 32.0 mL"));
}

#[test]
fn ich_score_rejects_out_of_range_gcs_and_missing_volume() {
    assert!(evaluate("ich_score", &[("gcs", "2"), ("volume", "10")]).is_none());
    assert!(evaluate("ich_score", &[("gcs", "16"), ("volume", "10")]).is_none());
    assert!(evaluate("ich_score", &[("gcs", "12")]).is_none());
    assert!(evaluate("ich_score", &[("gcs", "12"), ("volume", "-1")]).is_none());
}

#[test]
fn fazekas_blank_grades_read_as_zero() {
    assert_outcome(
        "fazekas",
        &[],
        Tier::NoFollowup,
        "Fazekas PV 0 / Deep 0 — minimal",
    );
    assert_outcome(
        "fazekas",
        &[("pvwmh", "2"), ("dwmh", "1")],
        Tier::ShortTermFollowup,
        "Fazekas PV 2 / Deep 1 — moderate",
    );
    assert_outcome(
        "fazekas",
        &[("pvwmh", "3"), ("dwmh", "0")],
        Tier::FurtherWorkup,
        "severe/confluent",
    );
}

#[test]
fn pituitary_cascade_order() {
    assert_outcome(
        "pituitary_incidentaloma",
        &[("size", "4"), ("visual", "yes"), ("hormone", "yes")],
        Tier::Intervention,
        "urgent ophthalmology",
    );
    assert_outcome(
        "pituitary_incidentaloma",
        &[("size", "12"), ("hormone", "yes")],
        Tier::FurtherWorkup,
        "Macroadenoma with hormonal excess",
    );
    assert_outcome(
        "pituitary_incidentaloma",
        &[("size", "12"), ("cavernous", "yes")],
        Tier::FurtherWorkup,
        "Cavernous sinus invasion suggests aggressive behaviour.",
    );
    assert_outcome(
        "pituitary_incidentaloma",
        &[("size", "4")],
        Tier::ShortTermFollowup,
        "Microincidentaloma (4 mm)",
    );
    assert_outcome(
        "pituitary_incidentaloma",
        &[("size", "7")],
        Tier::ShortTermFollowup,
        "Microadenoma (7 mm) — non-functioning",
    );
}

#[test]
fn aneurysm_lists_high_risk_features_in_order() {
    assert_outcome(
        "intracranial_aneurysm",
        &[
            ("size", "6"),
            ("location", "posterior"),
            ("prior_sah", "yes"),
            ("morphology", "irregular"),
        ],
        Tier::FurtherWorkup,
        "(irregular morphology, prior SAH, posterior circulation)",
    );
    assert_outcome(
        "intracranial_aneurysm",
        &[("size", "3"), ("location", "anterior")],
        Tier::ShortTermFollowup,
        "Small anterior aneurysm (3 mm)",
    );
    assert_outcome(
        "intracranial_aneurysm",
        &[("size", "9"), ("location", "posterior")],
        Tier::Intervention,
        "Posterior circulation — higher risk. ",
    );
}
