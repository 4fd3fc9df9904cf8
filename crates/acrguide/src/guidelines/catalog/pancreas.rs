use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Tier,
};
use crate::guidelines::engine::{Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn pancreatic_cyst() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "pancreatic_cyst",
        name: "Pancreatic Cyst — ACR 2022",
        source: "ACR Incidental Findings 2022 / IAP Fukuoka",
        description: "Management of incidental pancreatic cystic lesions on CT or MRI",
        fields: vec![
            FieldDescriptor::number("size", "Cyst Size", "cm", "e.g. 2.0").help("Largest dimension"),
            FieldDescriptor::number("age", "Patient Age", "years", "e.g. 68")
                .help("Age affects surveillance duration and surgical candidacy"),
            FieldDescriptor::radio("mri_done", "MRI / MRCP Performed?", &[("yes", "Yes"), ("no", "No")]),
            FieldDescriptor::checkbox(
                "high_risk",
                "High-Risk Stigmata (any = surgery)",
                &[
                    ("jaundice", "Obstructive jaundice from cystic pancreatic head lesion"),
                    ("solid_enh", "Enhancing solid component within cyst"),
                    ("mpd_10", "Main pancreatic duct (MPD) ≥ 10 mm"),
                ],
            ),
            FieldDescriptor::checkbox(
                "worrisome",
                "Worrisome Features",
                &[
                    ("pancreatitis", "Acute pancreatitis attributed to cyst"),
                    ("size_3cm", "Cyst ≥ 3 cm"),
                    ("thick_wall", "Thickened or enhancing cyst walls"),
                    ("nodule", "Non-enhancing mural nodule"),
                    ("mpd_5", "MPD 5–9 mm calibre change with distal atrophy"),
                    ("lymph", "Lymphadenopathy"),
                    ("ca199", "Elevated serum CA 19-9"),
                    ("growth", "Rapid growth ≥5 mm over 2 years"),
                    ("dm", "New-onset DM or significant worsening of glycaemic control"),
                ],
            ),
        ],
        evaluator: pancreatic_lesion,
        criteria: pancreatic_criteria(),
    }
}

fn pancreatic_criteria() -> Vec<CriteriaSection> {
    vec![
        CriteriaSection::new(
            "High-Risk Stigmata (any single feature = surgery)",
            &[
                ("Obstructive jaundice", "Surgery", RiskColour::Red, "Jaundice caused by the cystic lesion in the head of the pancreas. Suggests ductal involvement or malignant transformation."),
                ("Enhancing solid component", "Surgery", RiskColour::Red, "Any soft-tissue component within the cyst that shows measurable contrast enhancement — distinct from septa or wall thickening."),
                ("MPD ≥ 10 mm", "Surgery", RiskColour::Red, "Main pancreatic duct dilatation ≥10 mm indicates high-grade obstruction. Combined with a cyst, strongly suggests malignancy."),
            ],
        ),
        CriteriaSection::new(
            "Worrisome Features (1 alone or combinations)",
            &[
                ("Cyst ≥ 3 cm", "EUS/MDT", RiskColour::Orange, "Size alone is a worrisome feature. Cysts ≥3 cm with any additional worrisome feature warrant EUS or multidisciplinary evaluation."),
                ("Thickened/enhancing walls", "EUS/MDT", RiskColour::Orange, "Cyst wall thickening >1 mm or cyst wall that shows enhancement on contrast imaging."),
                ("Non-enhancing mural nodule", "EUS/MDT", RiskColour::Orange, "Protrusion from the cyst wall that does not show enhancement — must be distinguished from enhancing solid component (high-risk)."),
                ("MPD 5–9 mm", "EUS/MDT", RiskColour::Orange, "Mild-moderate MPD dilatation with caliber change and distal pancreatic parenchymal atrophy. Suggests partial obstruction."),
                ("Acute pancreatitis", "Evaluate", RiskColour::Yellow, "Episode of acute pancreatitis attributed to the cyst (typically IPMN secreting mucin causing ductal obstruction)."),
                ("Rapid growth ≥5 mm / 2 yr", "Evaluate", RiskColour::Yellow, "Change in cyst size of ≥5 mm over 2 years on serial imaging. Indicates evolving biology."),
                ("New-onset DM", "Evaluate", RiskColour::Yellow, "New or significantly worsening diabetes mellitus attributed to pancreatic exocrine/endocrine dysfunction from cyst."),
            ],
        ),
        CriteriaSection::new(
            "Size-Based Surveillance (no features)",
            &[
                ("< 1.5 cm", "MRI 2yr", RiskColour::Green, "MRI every 2 years for 5 years. If stable at 5 years, consider discontinuing in patients >75 years."),
                ("1.5 – 2.4 cm", "MRI 1yr", RiskColour::Yellow, "Annual MRI/CT. If stable for 2–3 years, may extend interval."),
                ("2.5 – 2.9 cm", "MRI 6–12mo", RiskColour::Yellow, "MRI/CT every 6–12 months. Close surveillance warranted due to proximity to 3 cm threshold."),
                ("≥ 3 cm", "EUS/MDT", RiskColour::Orange, "EUS or multidisciplinary evaluation regardless of other features. Surgical resection consideration if patient is fit."),
            ],
        ),
    ]
}

struct PancreaticCyst<'a> {
    size: f64,
    high_risk: Vec<&'a str>,
    worrisome: Vec<&'a str>,
}

const PANCREATIC_NOTES: &[&str] = &[
    "These guidelines are primarily intended for branch-duct IPMN and indeterminate cysts.",
    "Serous cystadenomas rarely require resection; MCNs in women should generally be resected if surgical risk acceptable.",
    "Reassess imaging type — if CT only, obtain MRI/MRCP for better characterisation.",
];

fn age_note(age: f64) -> Option<&'static str> {
    if age >= 75.0 {
        Some("Patient age ≥75: consider discontinuing surveillance after 5 years of stability if no worrisome features; weigh surgical risk carefully.")
    } else if age >= 65.0 {
        Some("Patient age 65–74: surgical candidacy and risk-benefit should guide surveillance intensity.")
    } else {
        None
    }
}

fn pancreatic_lesion(values: &FindingValues) -> Option<Outcome> {
    let cyst = PancreaticCyst {
        size: values.required("size", Admissible::Any)?,
        high_risk: values.list("high_risk"),
        worrisome: values.list("worrisome"),
    };
    let mut notes: Vec<&str> = PANCREATIC_NOTES.to_vec();
    notes.extend(age_note(values.number_or_zero("age")));

    let verdict = Cascade::over(&cyst)
        .rule(
            "high-risk stigmata",
            |c| !c.high_risk.is_empty(),
            |c| {
                Verdict::new(
                    Tier::Intervention,
                    "Surgery recommended — one or more high-risk stigmata present.",
                )
                .with_note(format!("High-risk features: {}.", c.high_risk.join(", ")))
            },
        )
        .rule(
            "two worrisome features, or one at 3 cm or more",
            |c| c.worrisome.len() >= 2 || (!c.worrisome.is_empty() && c.size >= 3.0),
            |c| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    "EUS ± FNA or multidisciplinary evaluation recommended.",
                )
                .with_note(format!("Worrisome features: {}.", c.worrisome.join(", ")))
            },
        )
        .rule(
            "one worrisome feature",
            |c| c.worrisome.len() == 1,
            |c| {
                Verdict::new(Tier::ShortTermFollowup, "MRI/CT in 3–6 months, then annually.")
                    .with_note(format!("Worrisome feature: {}.", c.worrisome.join(", ")))
            },
        )
        .rule(
            "under 1.5 cm",
            |c| c.size < 1.5,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "MRI in 2 years; if stable, every 2 years for 5 years total.",
                )
            },
        )
        .rule(
            "under 2.5 cm",
            |c| c.size < 2.5,
            |_| Verdict::new(Tier::ShortTermFollowup, "MRI/CT in 1 year."),
        )
        .rule(
            "under 3 cm",
            |c| c.size < 3.0,
            |_| Verdict::new(Tier::ShortTermFollowup, "MRI/CT in 6–12 months."),
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::FurtherWorkup,
                "EUS or multidisciplinary evaluation (cyst ≥ 3 cm without high-risk features). Consider surgery if patient is fit.",
            )
        });

    Some(verdict.into_outcome(&notes))
}
