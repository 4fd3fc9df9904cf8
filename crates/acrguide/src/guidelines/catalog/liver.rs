use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Supplement, Tier,
};
use crate::guidelines::engine::{format, Cascade};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn lirads() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "lirads",
        name: "LI-RADS v2018",
        source: "ACR LI-RADS v2018",
        description: "Liver Imaging Reporting and Data System for HCC risk — patients with cirrhosis or chronic HBV",
        fields: vec![
            FieldDescriptor::number("size", "Observation Size", "mm", "e.g. 25"),
            FieldDescriptor::radio(
                "aphe",
                "Arterial Phase Hyperenhancement (APHE)?",
                &[
                    ("yes", "Yes — non-rim, hyper-enhancing in arterial phase"),
                    ("no", "No"),
                ],
            ),
            FieldDescriptor::radio(
                "washout",
                "Washout Appearance?",
                &[
                    ("yes", "Yes — hypo-enhancing in portal venous or delayed phase"),
                    ("no", "No"),
                ],
            ),
            FieldDescriptor::radio("capsule", "Enhancing Capsule?", &[("yes", "Yes"), ("no", "No")]),
            FieldDescriptor::radio(
                "growth",
                "Threshold Growth?",
                &[
                    ("yes", "Yes — ≥50% increase in ≤6 months (or ≥50% if measured at same diameter)"),
                    ("no", "No"),
                ],
            ),
        ],
        evaluator: liver_observation,
        criteria: vec![
            CriteriaSection::new(
                "LI-RADS Major Features",
                &[
                    ("APHE — Arterial Phase Hyperenhancement", "", RiskColour::Blue, "Non-rim arterial phase hyperenhancement: observation is unequivocally hyperenhancing relative to liver parenchyma in the hepatic arterial phase. Must be non-rim pattern (rim APHE favours cholangiocarcinoma)."),
                    ("Washout Appearance", "", RiskColour::Blue, "Non-peripheral washout: observation appears unequivocally hypointense (washes out) in portal venous or delayed phase relative to liver. Must be non-peripheral pattern."),
                    ("Enhancing Capsule", "", RiskColour::Blue, "Smooth peripheral rim enhancement in portal venous or delayed phase. Corresponds to fibrous capsule / pseudocapsule. Must be clearly perceptible (not just a vague border)."),
                    ("Threshold Growth", "", RiskColour::Blue, "≥50% increase in diameter in ≤6 months (for observations measured ≤10 mm on prior). OR ≥50% increase in ≤12 months (for ≥10 mm observations). Growth must be measured at the same scan phase."),
                ],
            ),
            CriteriaSection::new(
                "LI-RADS Category Criteria",
                &[
                    ("LR-1 — Definitely benign", "0%", RiskColour::Green, "Definite benign entity: cyst, hemangioma, focal fat deposition/sparing, perfusion alteration, hypertrophic pseudomass, AVM, confluent fibrosis, focal scar."),
                    ("LR-2 — Probably benign", "<5%", RiskColour::Green, "Probable benign entity. Features suggesting benign aetiology but not meeting LR-1 criteria. Or observation with imaging features pointing to benign hepatic entity."),
                    ("LR-3 — Intermediate", "~40%", RiskColour::Yellow, "Intermediate HCC probability. Features do not fit LR-1/2 or LR-4/5. Often: APHE without washout/capsule; or washout/capsule without APHE; or neither in intermediate-size lesion."),
                    ("LR-4 — Probably HCC", "~70%", RiskColour::Orange, "One major feature (APHE) but insufficient for LR-5. OR observation ≥10 mm with APHE + one additional major feature. Requires biopsy or multidisciplinary discussion."),
                    ("LR-5 — Definite HCC", ">95%", RiskColour::Red, "≥10 mm with APHE + two major features (washout + capsule). OR APHE + threshold growth. OR ≥20 mm with APHE + any one additional major feature. No biopsy required for treatment."),
                ],
            ),
        ],
    }
}

struct Observation {
    size: f64,
    aphe: bool,
    washout: bool,
    capsule: bool,
    growth: bool,
}

impl Observation {
    fn majors(&self) -> usize {
        [self.aphe, self.washout, self.capsule, self.growth]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}

const LIRADS_NOTES: &[&str] = &[
    "Applies only to patients at high risk for HCC (cirrhosis or chronic HBV infection).",
    "LI-RADS does not apply to transplant recipients before liver transplant work-up.",
    "Hepatobiliary agent MRI may alter category.",
];

fn liver_observation(values: &FindingValues) -> Option<Outcome> {
    let observation = Observation {
        size: values.number_or_zero("size"),
        aphe: values.is("aphe", "yes"),
        washout: values.is("washout", "yes"),
        capsule: values.is("capsule", "yes"),
        growth: values.is("growth", "yes"),
    };

    let (category, tier, management) = Cascade::over(&observation)
        .rule(
            "no majors under 10 mm",
            |o| !o.aphe && o.majors() == 0 && o.size < 10.0,
            |_| ("LR-1", Tier::NoFollowup, "Definitely benign. Continue routine surveillance."),
        )
        .rule(
            "no majors",
            |o| !o.aphe && o.majors() == 0,
            |_| {
                (
                    "LR-2",
                    Tier::NoFollowup,
                    "Probably benign. Continue routine HCC surveillance (US ± AFP every 6 months).",
                )
            },
        )
        .rule(
            "APHE with three majors or growth",
            |o| o.aphe && o.majors() >= 2 && o.size >= 10.0 && (o.majors() >= 3 || o.growth),
            |_| {
                (
                    "LR-5",
                    Tier::Intervention,
                    "Definite HCC. Discuss with multidisciplinary team. Treatment per BCLC staging.",
                )
            },
        )
        .rule(
            "APHE with two majors under 20 mm",
            |o| o.aphe && o.majors() >= 2 && o.size >= 10.0 && o.size < 20.0,
            |_| {
                (
                    "LR-4",
                    Tier::FurtherWorkup,
                    "Probably HCC. Biopsy or LI-RADS 5-level work-up; multidisciplinary discussion.",
                )
            },
        )
        .rule(
            "APHE with two majors 20 mm or more",
            |o| o.aphe && o.majors() >= 2 && o.size >= 10.0,
            |_| {
                (
                    "LR-5",
                    Tier::FurtherWorkup,
                    "Definite HCC. Multidisciplinary discussion and treatment.",
                )
            },
        )
        .rule(
            "APHE otherwise",
            |o| o.aphe,
            |_| {
                (
                    "LR-4",
                    Tier::FurtherWorkup,
                    "Probably HCC. Consider biopsy; multidisciplinary discussion.",
                )
            },
        )
        .otherwise(|_| {
            (
                "LR-3",
                Tier::ShortTermFollowup,
                "Intermediate probability of HCC. Repeat multiphasic CT/MRI in 3–6 months.",
            )
        });

    let mark = |present: bool| if present { "✓" } else { "–" };
    let features = Supplement::new("Major features present")
        .row("APHE", mark(observation.aphe))
        .row("Washout", mark(observation.washout))
        .row("Capsule", mark(observation.capsule))
        .row("Threshold growth", mark(observation.growth))
        .row("Size", format!("{} mm", format::number(observation.size)));

    Some(
        Outcome::new(tier, format!("{category} — {management}"))
            .with_notes(LIRADS_NOTES.iter().copied())
            .with_supplement(features),
    )
}
