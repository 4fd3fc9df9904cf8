use super::common::*;
use crate::guidelines::{FieldKind, Tier};

fn tirads(size: &str, points: [&str; 5]) -> crate::guidelines::Outcome {
    let [composition, echogenicity, shape, margin, foci] = points;
    evaluate(
        "tirads",
        &[
            ("size", size),
            ("composition", composition),
            ("echogenicity", echogenicity),
            ("shape", shape),
            ("margin", margin),
            ("echogenic_foci", foci),
        ],
    )
    .expect("TI-RADS always scores")
}

#[test]
fn tirads_tied_options_submit_the_same_value() {
    let definition = registry().get("tirads").expect("tirads registered");
    let composition = definition.field("composition").expect("composition field");
    assert_eq!(composition.kind, FieldKind::Points);
    assert_eq!(composition.options[0].value, "0");
    assert_eq!(composition.options[0].value, composition.options[1].value);

    let margin = definition.field("margin").expect("margin field");
    assert_eq!(margin.options[0].value, margin.options[1].value);
}

#[test]
fn tirads_zero_point_choice_contributes_nothing() {
    let outcome = tirads("2.0", ["0", "2", "0", "0", "0"]);
    assert_eq!(outcome.tier, Tier::NoFollowup);
    assert_eq!(outcome.notes[0], "Total points: 2 → TR2 (Not Suspicious)");
}

#[test]
fn tirads_size_ladder_for_moderately_suspicious() {
    let points = ["2", "2", "0", "0", "0"];

    let fna = tirads("1.6", points);
    assert_eq!(fna.tier, Tier::FurtherWorkup);
    assert_eq!(
        fna.recommendation,
        "FNA recommended (size 1.6 cm ≥ 1.5 cm threshold)."
    );

    let follow_up = tirads("1.2", points);
    assert!(follow_up.recommendation.starts_with("Follow-up ultrasound in 1–2 years"));

    let blank = tirads("", points);
    assert_eq!(
        blank.recommendation,
        "No FNA, no routine follow-up required for this size."
    );
}

#[test]
fn tirads_points_supplement_lists_every_category() {
    let outcome = tirads("0.8", ["2", "3", "3", "2", "3"]);
    assert_eq!(outcome.tier, Tier::Intervention);
    let supplement = outcome.supplement.expect("points breakdown");
    assert_eq!(supplement.title, "Points breakdown");
    assert_eq!(supplement.rows.len(), 6);
    assert_eq!(supplement.rows[5].value, "13");
}

#[test]
fn lirads_without_majors_branches_on_size() {
    let base = [("aphe", "no"), ("washout", "no"), ("capsule", "no"), ("growth", "no")];

    let mut small = base.to_vec();
    small.push(("size", "8"));
    assert_outcome("lirads", &small, Tier::NoFollowup, "LR-1");

    let mut larger = base.to_vec();
    larger.push(("size", "15"));
    assert_outcome("lirads", &larger, Tier::NoFollowup, "LR-2");
}

#[test]
fn lirads_three_majors_are_lr5_without_growth() {
    let outcome = assert_outcome(
        "lirads",
        &[
            ("aphe", "yes"),
            ("washout", "yes"),
            ("capsule", "yes"),
            ("growth", "no"),
            ("size", "25"),
        ],
        Tier::Intervention,
        "LR-5",
    );
    let supplement = outcome.supplement.expect("major features");
    assert_eq!(supplement.rows[3].value, "–");
    assert_eq!(supplement.rows[4].value, "25 mm");
}

#[test]
fn lirads_two_majors_split_on_twenty_millimetres() {
    let two = |size| {
        evaluate(
            "lirads",
            &[("aphe", "yes"), ("washout", "yes"), ("size", size)],
        )
        .expect("outcome")
    };

    let below = two("19");
    assert_eq!(below.tier, Tier::FurtherWorkup);
    assert!(below.recommendation.starts_with("LR-4"));

    let at = two("20");
    assert_eq!(at.tier, Tier::FurtherWorkup);
    assert!(at.recommendation.starts_with("LR-5"));
}

#[test]
fn lirads_majors_without_aphe_are_lr3() {
    assert_outcome(
        "lirads",
        &[("washout", "yes"), ("size", "30")],
        Tier::ShortTermFollowup,
        "LR-3",
    );
}

#[test]
fn cac_ladder_interpolates_score() {
    assert_outcome("cac_scoring", &[("score", "0")], Tier::NoFollowup, "CAC 0");
    assert_outcome(
        "cac_scoring",
        &[("score", "150")],
        Tier::FurtherWorkup,
        "CAC 100–299 (score: 150)",
    );
    assert_outcome(
        "cac_scoring",
        &[("score", "300")],
        Tier::Intervention,
        "CAC ≥300 (score: 300)",
    );
    assert!(evaluate("cac_scoring", &[("score", "-5")]).is_none());
}

#[test]
fn cac_notes_are_fixed_text() {
    let outcome = evaluate("cac_scoring", &[("score", "0")]).expect("score parses");
    assert_eq!(
        outcome.notes,
        vec![
            "CAC scanning uses non-contrast ECG-gated CT; effective dose ~1 mSv.",
            "CAC 0 at any age confers very low 10-year ASCVD risk — may defer statin in borderline-risk patients.",
            "CAC >400 indicates extensive coronary calcification; risk equivalent to known ASCVD.",
            "Repeat CAC scanning is generally not recommended — baseline score guides long-term therapy.",
        ]
    );
}

#[test]
fn cac_sums_vessel_scores_when_total_is_blank() {
    let outcome = assert_outcome(
        "cac_scoring",
        &[("lad", "60"), ("rca", "30")],
        Tier::ShortTermFollowup,
        "(score: 90)",
    );
    assert!(outcome.supplement.is_some());
}

#[test]
fn aortic_thresholds_follow_segment_and_patient() {
    assert_outcome(
        "aortic_aneurysm",
        &[("location", "aaa"), ("diameter", "5.2"), ("sex", "male")],
        Tier::ShortTermFollowup,
        "AAA 5.2 cm — ultrasound every 6 months",
    );
    assert_outcome(
        "aortic_aneurysm",
        &[("location", "aaa"), ("diameter", "5.2"), ("sex", "female")],
        Tier::Intervention,
        "AAA ≥5 cm",
    );
    assert_outcome(
        "aortic_aneurysm",
        &[("location", "ascending"), ("diameter", "4.6"), ("ctd", "yes")],
        Tier::Intervention,
        "surgical repair indicated (lower threshold: CTD/bicuspid AV).",
    );
    assert_outcome(
        "aortic_aneurysm",
        &[("diameter", "3"), ("symptomatic", "yes")],
        Tier::Intervention,
        "Symptomatic aneurysm",
    );
}

#[test]
fn carotid_grades_by_symptom_status() {
    assert_outcome(
        "carotid_stenosis",
        &[("stenosis", "70"), ("symptoms", "symptomatic")],
        Tier::Intervention,
        "CEA strongly recommended within 2 weeks",
    );
    assert_outcome(
        "carotid_stenosis",
        &[("stenosis", "70"), ("symptoms", "asymptomatic"), ("sex", "female")],
        Tier::FurtherWorkup,
        "Benefit less clear in females.",
    );
    assert_outcome(
        "carotid_stenosis",
        &[("stenosis", "100"), ("symptoms", "symptomatic")],
        Tier::FurtherWorkup,
        "Total occlusion",
    );
    assert!(evaluate("carotid_stenosis", &[("symptoms", "symptomatic")]).is_none());
}

#[test]
fn pancreatic_cyst_features_and_age_note() {
    let values = finding(&[("size", "2.0"), ("age", "78")])
        .with_list("worrisome", &["thick_wall", "nodule"]);
    let outcome = evaluate_values("pancreatic_cyst", &values).expect("outcome");
    assert_eq!(outcome.tier, Tier::FurtherWorkup);
    assert!(outcome.notes[3].starts_with("Patient age ≥75"));
    assert_eq!(
        outcome.notes.last().map(String::as_str),
        Some("Worrisome features: thick_wall, nodule.")
    );
}
