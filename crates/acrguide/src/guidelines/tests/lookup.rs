use super::common::*;
use crate::guidelines::Tier;

#[test]
fn bosniak_three_is_a_fixed_table_entry() {
    let plain = assert_outcome(
        "bosniak",
        &[("class", "III")],
        Tier::FurtherWorkup,
        "Active surveillance or surgical resection",
    );
    assert_eq!(plain.notes[0], "~50% malignancy risk.");

    let noisy = evaluate(
        "bosniak",
        &[("class", "III"), ("size", "9"), ("enhancement", "yes")],
    )
    .expect("class III");
    assert_eq!(noisy, plain);
}

#[test]
fn bosniak_unknown_class_is_incomplete() {
    assert!(evaluate("bosniak", &[("class", "V")]).is_none());
    assert!(evaluate("bosniak", &[]).is_none());
}

#[test]
fn birads_categories_dispatch_to_their_own_text() {
    assert_outcome(
        "birads",
        &[("category", "0")],
        Tier::ImagingRecommended,
        "Recall for additional imaging",
    );
    assert_outcome(
        "birads",
        &[("category", "4C"), ("modality", "us")],
        Tier::Intervention,
        "High clinical suspicion warrants surgical consultation",
    );
}

#[test]
fn orads_score_two_wording_follows_menopausal_status() {
    let pre = assert_outcome(
        "orads",
        &[("patient", "premenopausal"), ("score", "2")],
        Tier::NoFollowup,
        "Follow-up at 12 weeks for simple cysts 3–5 cm.",
    );
    let post = assert_outcome(
        "orads",
        &[("patient", "postmenopausal"), ("score", "2")],
        Tier::NoFollowup,
        "Follow-up ultrasound in 1 year for simple cysts ≤1 cm",
    );
    assert_eq!(pre.notes, post.notes);

    let post_five = evaluate("orads", &[("patient", "postmenopausal"), ("score", "5")])
        .expect("score 5");
    let pre_five = evaluate("orads", &[("patient", "premenopausal"), ("score", "5")])
        .expect("score 5");
    assert_eq!(post_five, pre_five);
}

#[test]
fn crads_needs_at_least_one_category() {
    assert!(evaluate("crads", &[]).is_none());
    assert_outcome(
        "crads",
        &[("colonic", "C4")],
        Tier::Intervention,
        "Likely colorectal malignancy",
    );
}

#[test]
fn disc_findings_depend_on_symptoms() {
    assert_outcome(
        "incidental_disc",
        &[("finding", "protrusion"), ("symptoms", "radicular")],
        Tier::FurtherWorkup,
        "neurosurgery referral",
    );
    let quiet = assert_outcome(
        "incidental_disc",
        &[("finding", "bulge"), ("symptoms", "none")],
        Tier::NoFollowup,
        "normal variant",
    );
    assert_eq!(quiet.notes.len(), 3);

    let radicular = evaluate(
        "incidental_disc",
        &[("finding", "bulge"), ("symptoms", "radicular")],
    )
    .expect("outcome");
    assert_eq!(radicular.notes.len(), 4);
    assert!(radicular.notes[3].starts_with("Radiculopathy"));
}
