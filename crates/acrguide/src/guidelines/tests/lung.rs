use super::common::*;
use crate::guidelines::Tier;

fn solid(size: &str, count: &str, risk: &str) -> Option<crate::guidelines::Outcome> {
    evaluate(
        "fleischner_solid",
        &[("size", size), ("count", count), ("risk", risk)],
    )
}

#[test]
fn solid_nodule_boundaries_are_inclusive_at_eight() {
    let cases = [
        ("5.99", Tier::NoFollowup, "No routine follow-up recommended."),
        ("6", Tier::ShortTermFollowup, "CT at 6–12 months"),
        ("8", Tier::ShortTermFollowup, "CT at 6–12 months"),
        ("8.01", Tier::FurtherWorkup, "CT at 3 months"),
    ];

    for (size, tier, fragment) in cases {
        let outcome = solid(size, "single", "low").expect("valid size");
        assert_eq!(outcome.tier, tier, "size {size}");
        assert!(outcome.recommendation.starts_with(fragment), "size {size}");
    }
}

#[test]
fn small_high_risk_nodule_gets_optional_ct() {
    let outcome = solid("4", "single", "high").expect("valid size");
    assert_eq!(outcome.tier, Tier::ShortTermFollowup);
    assert_eq!(outcome.recommendation, "Optional CT at 12 months.");
}

#[test]
fn multiple_nodules_collapse_larger_branches() {
    for size in ["7", "12"] {
        let outcome = solid(size, "multiple", "low").expect("valid size");
        assert_eq!(outcome.tier, Tier::ShortTermFollowup);
        assert!(outcome.recommendation.starts_with("CT at 3–6 months"));
    }
}

#[test]
fn large_solid_nodule_adds_pet_note_after_base_notes() {
    let outcome = solid("9", "single", "low").expect("valid size");
    assert_eq!(outcome.notes.len(), 4);
    assert!(outcome.notes[0].starts_with("Does not apply to known malignancy"));
    assert!(outcome.notes[3].starts_with("PET-CT preferred"));
}

#[test]
fn solid_nodule_rejects_negative_and_text_sizes() {
    assert!(solid("-1", "single", "low").is_none());
    assert!(solid("abc", "single", "low").is_none());
    assert!(solid("", "single", "low").is_none());
}

#[test]
fn lung_rads_part_solid_growth_upgrades_category_three() {
    let stable = assert_outcome(
        "lungrads",
        &[("type", "partsolid"), ("size", "10"), ("solid_comp", "4")],
        Tier::ShortTermFollowup,
        "Lung-RADS 3",
    );
    assert!(stable.recommendation.ends_with("LDCT at 6 months."));

    assert_outcome(
        "lungrads",
        &[
            ("type", "partsolid"),
            ("size", "10"),
            ("solid_comp", "4"),
            ("new_growing", "yes"),
        ],
        Tier::FurtherWorkup,
        "Lung-RADS 4A",
    );
}

#[test]
fn lung_rads_solid_spiculated_growing_is_4x() {
    assert_outcome(
        "lungrads",
        &[
            ("type", "solid"),
            ("size", "12"),
            ("new_growing", "yes"),
            ("spiculated", "yes"),
        ],
        Tier::Intervention,
        "Lung-RADS 4X",
    );
}

#[test]
fn lung_rads_blank_size_reads_as_zero() {
    assert_outcome("lungrads", &[("type", "solid")], Tier::NoFollowup, "Lung-RADS 2");
}
