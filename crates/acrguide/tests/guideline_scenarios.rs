//! End-to-end scenarios through the public service facade and HTTP router.
//!
//! Each scenario is a finding a radiologist would plausibly enter, checked for the
//! tier and the wording that drives the follow-up decision.

mod common {
    use std::sync::Arc;

    use acrguide::guidelines::{FindingValues, GuidelineService, Outcome, Tier};

    pub(super) fn service() -> Arc<GuidelineService> {
        Arc::new(GuidelineService::standard())
    }

    pub(super) fn finding(pairs: &[(&str, &str)]) -> FindingValues {
        pairs.iter().copied().collect()
    }

    pub(super) struct Scenario {
        pub guideline: &'static str,
        pub finding: &'static [(&'static str, &'static str)],
        pub tier: Tier,
        pub fragment: &'static str,
    }

    pub(super) fn run(scenario: &Scenario) -> Outcome {
        let outcome = service()
            .evaluate(scenario.guideline, &finding(scenario.finding))
            .unwrap_or_else(|err| panic!("{}: {err}", scenario.guideline));
        assert_eq!(
            outcome.tier, scenario.tier,
            "{}: {}",
            scenario.guideline, outcome.recommendation
        );
        assert!(
            outcome.recommendation.contains(scenario.fragment),
            "{}: expected '{}' in '{}'",
            scenario.guideline,
            scenario.fragment,
            outcome.recommendation
        );
        outcome
    }
}

use acrguide::guidelines::{guideline_router, EvaluationError, Tier};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{finding, run, service, Scenario};
use tower::util::ServiceExt;

const SCENARIOS: &[Scenario] = &[
    Scenario {
        guideline: "fleischner_subsolid",
        finding: &[("type", "ggn"), ("total_size", "8"), ("count", "single")],
        tier: Tier::ShortTermFollowup,
        fragment: "CT at 6–12 months to confirm persistence",
    },
    Scenario {
        guideline: "lungrads",
        finding: &[("type", "perifissural"), ("size", "12")],
        tier: Tier::ShortTermFollowup,
        fragment: "Lung-RADS 3 — LDCT at 6 months.",
    },
    Scenario {
        guideline: "incidental_thyroid",
        finding: &[("size", "1.2"), ("age", "29")],
        tier: Tier::ImagingRecommended,
        fragment: "(1.2 cm nodule, patient <35 years)",
    },
    Scenario {
        guideline: "renal_mass",
        finding: &[("size", "2.4"), ("enhancement", "yes"), ("nature", "solid")],
        tier: Tier::ShortTermFollowup,
        fragment: "Solid enhancing mass (2.4 cm)",
    },
    Scenario {
        guideline: "adrenal",
        finding: &[("size", "2.1"), ("hu_unenhanced", "6")],
        tier: Tier::NoFollowup,
        fragment: "Lipid-rich adenoma likely (HU=6 ≤10)",
    },
    Scenario {
        guideline: "gallbladder_polyp",
        finding: &[("size", "4"), ("mobile", "mobile")],
        tier: Tier::NoFollowup,
        fragment: "likely cholesterol polyp",
    },
    Scenario {
        guideline: "incidental_vertebral",
        finding: &[("acuity", "acute"), ("height_loss", "45")],
        tier: Tier::FurtherWorkup,
        fragment: "Severe height loss: consider vertebroplasty/kyphoplasty.",
    },
    Scenario {
        guideline: "carotid_stenosis",
        finding: &[("stenosis", "50"), ("symptoms", "symptomatic")],
        tier: Tier::FurtherWorkup,
        fragment: "CEA reduces 5-year stroke risk by ~4%",
    },
    Scenario {
        guideline: "birads",
        finding: &[("category", "3")],
        tier: Tier::ShortTermFollowup,
        fragment: "repeat imaging in 6 months",
    },
    Scenario {
        guideline: "crads",
        finding: &[("colonic", "C3"), ("extracolonic", "E3")],
        tier: Tier::FurtherWorkup,
        fragment: "Colonoscopy with polypectomy recommended.",
    },
];

#[test]
fn scenarios_across_the_catalogue() {
    for scenario in SCENARIOS {
        run(scenario);
    }
}

#[test]
fn adrenal_washout_reports_both_ratios() {
    let outcome = run(&Scenario {
        guideline: "adrenal_washout",
        finding: &[("unenhanced", "20"), ("enhanced", "100"), ("delayed", "40")],
        tier: Tier::NoFollowup,
        fragment: "absolute washout 75.0% ≥60%",
    });
    assert_eq!(
        outcome.report_string.as_deref(),
        Some("Adrenal washout CT: unenhanced 20 HU, portal venous 100 HU, 15-minute delayed 40 HU. Absolute washout 75.0%, relative washout 60.0%. Washout consistent with adenoma (absolute washout 75.0% ≥60%).")
    );
}

#[test]
fn non_enhancing_portal_phase_is_incomplete() {
    let err = service()
        .evaluate(
            "adrenal_washout",
            &finding(&[("unenhanced", "30"), ("enhanced", "30"), ("delayed", "20")]),
        )
        .expect_err("no enhancement");
    assert!(matches!(err, EvaluationError::IncompleteFinding { .. }));
}

#[tokio::test]
async fn router_serves_a_full_evaluation() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/guidelines/lirads/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"aphe":"yes","washout":"yes","capsule":"yes","growth":"no","size":25}"#,
        ))
        .expect("request");

    let response = guideline_router(service())
        .oneshot(request)
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(payload["tier_label"], "Intervention / Surgery");
    assert_eq!(payload["outcome"]["supplement"]["title"], "Major features present");
}
