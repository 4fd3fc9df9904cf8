use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Supplement, Tier,
};
use crate::guidelines::engine::{format, Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn gallbladder_polyp() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "gallbladder_polyp",
        name: "Gallbladder Polyp — Surveillance & Management",
        source: "ESGAR/EAHPBA 2017 / ACR 2022",
        description:
            "Follow-up and surgical recommendation for incidentally discovered gallbladder polyp",
        fields: vec![
            FieldDescriptor::number("size", "Largest Polyp Diameter", "mm", "e.g. 8")
                .help("Measure largest polyp on ultrasound"),
            FieldDescriptor::radio(
                "mobile",
                "Polyp Characteristics",
                &[
                    ("mobile", "Mobile / echogenic with posterior shadowing (cholesterol polyp)"),
                    ("sessile", "Sessile / broad-based / non-mobile"),
                    ("uncertain", "Uncertain morphology"),
                ],
            ),
            FieldDescriptor::checkbox(
                "risk",
                "Risk Factors for Malignancy (select all that apply)",
                &[
                    ("age", "Age ≥50 years"),
                    ("psc", "Primary sclerosing cholangitis (PSC)"),
                    ("solitary", "Solitary polyp"),
                    ("growth", "Growth ≥2 mm vs prior imaging"),
                    ("indian", "South Asian / Indian subcontinent ethnicity"),
                ],
            ),
        ],
        evaluator: gallbladder_lesion,
        criteria: vec![
            CriteriaSection::new(
                "Size-Based Management",
                &[
                    ("<6 mm — Mobile/echogenic", "Benign", RiskColour::Green, "Almost certainly cholesterol polyp. No surveillance required if mobile and echogenic."),
                    ("<6 mm — Sessile/uncertain", "Low", RiskColour::Yellow, "US in 1 year. Discharge if stable. Low but non-zero adenoma risk."),
                    ("6–9 mm — No risk factors", "Intermediate", RiskColour::Yellow, "US at 6 months, then annually ×5 years. Cholecystectomy if growth ≥2 mm."),
                    ("6–9 mm — With risk factors", "High", RiskColour::Orange, "Cholecystectomy recommended. Risk factors: age ≥50, PSC, solitary, rapid growth, sessile."),
                    ("≥10 mm", "Surgery", RiskColour::Red, "Cholecystectomy in all patients regardless of other features."),
                    ("≥18 mm", "Urgent", RiskColour::Red, "High likelihood of malignancy. Urgent cholecystectomy + staging CT/MRI. Oncology referral."),
                ],
            ),
            CriteriaSection::new(
                "Malignancy Risk Factors",
                &[
                    ("Age ≥50 years", "Risk+", RiskColour::Orange, "Higher prevalence of true adenomatous polyps and gallbladder carcinoma in older patients."),
                    ("PSC", "High Risk", RiskColour::Red, "Markedly increases risk of gallbladder dysplasia and carcinoma. Lower cholecystectomy threshold."),
                    ("Growth ≥2 mm", "Risk+", RiskColour::Red, "Progressive growth is a strong indicator of neoplastic polyp. Cholecystectomy regardless of absolute size."),
                    ("Solitary, sessile polyp", "Risk+", RiskColour::Orange, "Multiple small polyps are usually cholesterol polyps. A solitary sessile polyp has higher adenoma risk."),
                ],
            ),
        ],
    }
}

const GALLBLADDER_NOTES: &[&str] = &[
    "Most gallbladder polyps are benign cholesterol polyps — mobile, multiple, echogenic.",
    "True adenomas carry malignant potential; rare below 10 mm.",
    "Cholecystectomy is the definitive treatment where indicated.",
    "Ultrasound is the primary surveillance modality.",
];

struct GallbladderPolyp<'a> {
    size: f64,
    mobile: bool,
    sessile: bool,
    risks: Vec<&'a str>,
}

impl GallbladderPolyp<'_> {
    fn has(&self, risk: &str) -> bool {
        self.risks.contains(&risk)
    }
}

fn gallbladder_lesion(values: &FindingValues) -> Option<Outcome> {
    let polyp = GallbladderPolyp {
        size: values.required("size", Admissible::Positive)?,
        mobile: values.is("mobile", "mobile"),
        sessile: values.is("mobile", "sessile"),
        risks: values.list("risk"),
    };
    let size = format::number(polyp.size);

    let verdict = Cascade::over(&polyp)
        .rule(
            "18 mm or more, or 10 mm with PSC or growth",
            |p| p.size >= 18.0 || (p.size >= 10.0 && (p.has("psc") || p.has("growth"))),
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    "Polyp ≥18 mm or ≥10 mm with high-risk features — high risk of malignancy. Cholecystectomy recommended. Pre-operative staging CT/MRI.",
                )
            },
        )
        .rule(
            "10 mm or more",
            |p| p.size >= 10.0,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    format!("Polyp ≥10 mm ({size} mm) — cholecystectomy recommended regardless of other features."),
                )
            },
        )
        .rule(
            "6 mm or more with risk factors or sessile",
            |p| p.size >= 6.0 && (!p.risks.is_empty() || p.sessile),
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    "Polyp 6–9 mm with risk factors or sessile morphology — cholecystectomy recommended. If patient unfit/declines, 6-monthly ultrasound.",
                )
            },
        )
        .rule(
            "6 mm or more",
            |p| p.size >= 6.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "Polyp 6–9 mm, low-risk features — ultrasound at 6 months, then annually ×5 years. Cholecystectomy if growth >2 mm.",
                )
            },
        )
        .rule(
            "small and mobile",
            |p| p.mobile,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "Polyp <6 mm, mobile (likely cholesterol polyp) — no follow-up required unless symptoms develop.",
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::ShortTermFollowup,
                "Polyp <6 mm, sessile or uncertain — ultrasound at 1 year. Discharge if stable and <6 mm.",
            )
        });

    Some(verdict.into_outcome(GALLBLADDER_NOTES))
}

pub(crate) fn crads() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "crads",
        name: "C-RADS — CT Colonography Reporting",
        source: "ACR C-RADS 2005 / 2021 Update",
        description: "Colonic and extracolonic reporting categories for CT colonography findings",
        fields: vec![
            FieldDescriptor::section("colonic_section", "Colonic Findings"),
            FieldDescriptor::select(
                "colonic",
                "Colonic C-RADS Category",
                &[
                    ("C0", "C0 — Inadequate study / incomplete preparation"),
                    ("C1", "C1 — Normal colon / no polyp ≥6 mm"),
                    ("C2", "C2 — One or two 6–9 mm polyps"),
                    ("C3", "C3 — ≥3 polyps 6–9 mm OR any polyp ≥10 mm"),
                    ("C4", "C4 — Colonic mass — likely malignant"),
                ],
            ),
            FieldDescriptor::section("extracolonic_section", "Extracolonic Findings"),
            FieldDescriptor::select(
                "extracolonic",
                "Extracolonic E-RADS Category",
                &[
                    ("E1", "E1 — No clinically significant extracolonic finding"),
                    ("E2", "E2 — Significant finding — diagnosis established, no workup needed"),
                    ("E3", "E3 — Indeterminate finding — workup recommended"),
                    ("E4", "E4 — Potentially significant finding — workup required"),
                ],
            ),
        ],
        evaluator: colonography,
        criteria: vec![
            CriteriaSection::new(
                "Colonic C-RADS Categories",
                &[
                    ("C0 — Inadequate", "Repeat", RiskColour::Orange, "Incomplete bowel prep or technical failure. Repeat CTC or direct colonoscopy."),
                    ("C1 — Normal", "Routine", RiskColour::Green, "No polyp ≥6 mm. Routine CRC screening per guideline interval (5–10 years for average risk)."),
                    ("C2 — 1–2 polyps 6–9 mm", "Moderate", RiskColour::Yellow, "~1% malignancy risk. Patient may elect 3-year CTC follow-up or colonoscopy."),
                    ("C3 — ≥3 polyps or ≥10 mm", "High", RiskColour::Orange, "Higher adenoma burden. ~10% malignancy risk for ≥10 mm polyps. Colonoscopy with polypectomy."),
                    ("C4 — Likely malignancy", "Urgent", RiskColour::Red, "Morphological features of CRC (shouldering, mass lesion). Urgent colonoscopy and staging."),
                ],
            ),
            CriteriaSection::new(
                "Extracolonic E-RADS Categories",
                &[
                    ("E1 — Insignificant", "None", RiskColour::Green, "Normal or common age-related finding (e.g. small haemangioma, colonic diverticulosis)."),
                    ("E2 — Established diagnosis", "None", RiskColour::Green, "Significant but already known; no further workup needed (e.g. known AAA, nephrolithiasis)."),
                    ("E3 — Indeterminate", "Workup", RiskColour::Yellow, "Uncertain significance (e.g. small indeterminate liver lesion). Dedicated follow-up imaging."),
                    ("E4 — Potentially significant", "Urgent", RiskColour::Red, "New clinically significant finding (e.g. renal mass, adrenal nodule, lung nodule). Communicate to referrer."),
                ],
            ),
        ],
    }
}

const COLONOGRAPHY_NOTES: &[&str] = &[
    "CTC does not require sedation; CO₂ insufflation is standard.",
    "Polypoid lesions ≥10 mm have ~10% malignancy rate and require polypectomy.",
    "Flat lesions may be underestimated by CTC; clinical correlation essential.",
    "Extracolonic findings are found in ~40% of patients; most are benign or incidental.",
];

fn colonic_category(code: &str) -> Option<(Tier, &'static str)> {
    let category = match code {
        "C0" => (
            Tier::FurtherWorkup,
            "C0 — Inadequate study. Repeat CTC with improved bowel prep, or proceed to colonoscopy.",
        ),
        "C1" => (
            Tier::NoFollowup,
            "C1 — Normal study. Routine colorectal cancer screening in 5–10 years (per age/risk).",
        ),
        "C2" => (
            Tier::ShortTermFollowup,
            "C2 — 1–2 polyps 6–9 mm. Colonoscopy at patient's discretion, or 3-year surveillance CTC.",
        ),
        "C3" => (
            Tier::FurtherWorkup,
            "C3 — ≥3 polyps (6–9 mm) or ≥1 polyp ≥10 mm. Colonoscopy with polypectomy recommended.",
        ),
        "C4" => (
            Tier::Intervention,
            "C4 — Likely colorectal malignancy. Urgent colonoscopy for tissue confirmation. Staging CT chest/abdomen/pelvis.",
        ),
        _ => return None,
    };
    Some(category)
}

fn extracolonic_category(code: &str) -> Option<&'static str> {
    match code {
        "E1" => Some("E1 — No significant extracolonic finding."),
        "E2" => Some("E2 — Significant finding, diagnosis established. No further workup required."),
        "E3" => Some("E3 — Indeterminate extracolonic finding. Dedicated follow-up imaging or clinical review recommended."),
        "E4" => Some("E4 — Potentially significant extracolonic finding. Further workup required — communicate to referring clinician."),
        _ => None,
    }
}

fn colonography(values: &FindingValues) -> Option<Outcome> {
    let colonic = values.text("colonic");
    let extracolonic = values.text("extracolonic");
    if colonic.is_empty() && extracolonic.is_empty() {
        return None;
    }

    // Only an extracolonic category: the colonic verdict stays blank.
    let (tier, recommendation) =
        colonic_category(colonic).unwrap_or((Tier::ImagingRecommended, ""));
    let outcome =
        Outcome::new(tier, recommendation).with_notes(COLONOGRAPHY_NOTES.iter().copied());

    Some(match extracolonic_category(extracolonic) {
        Some(text) => {
            outcome.with_supplement(Supplement::new("Extracolonic").row(extracolonic, text))
        }
        None => outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_categories_blank_is_incomplete() {
        assert!(colonography(&FindingValues::new()).is_none());
    }

    #[test]
    fn extracolonic_category_rides_along_as_supplement() {
        let outcome = colonography(
            &FindingValues::new()
                .with("colonic", "C2")
                .with("extracolonic", "E4"),
        )
        .expect("outcome");
        assert_eq!(outcome.tier, Tier::ShortTermFollowup);
        let supplement = outcome.supplement.expect("extracolonic supplement");
        assert_eq!(supplement.title, "Extracolonic");
        assert_eq!(supplement.rows[0].label, "E4");
    }

    #[test]
    fn extracolonic_only_leaves_colonic_verdict_blank() {
        let outcome = colonography(&FindingValues::new().with("extracolonic", "E1"))
            .expect("outcome");
        assert_eq!(outcome.tier, Tier::ImagingRecommended);
        assert!(outcome.recommendation.is_empty());
    }
}
