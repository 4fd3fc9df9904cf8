use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Supplement, Tier,
};
use crate::guidelines::engine::{format, Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

const POINT_FIELDS: [(&str, &str); 5] = [
    ("composition", "Composition"),
    ("echogenicity", "Echogenicity"),
    ("shape", "Shape"),
    ("margin", "Margin"),
    ("echogenic_foci", "Echogenic foci"),
];

pub(crate) fn tirads() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "tirads",
        name: "ACR TI-RADS",
        source: "ACR TI-RADS 2017",
        description:
            "Thyroid Imaging Reporting and Data System for ultrasound evaluation of thyroid nodules",
        fields: vec![
            FieldDescriptor::number("size", "Nodule Size (largest dimension)", "cm", "e.g. 2.0"),
            FieldDescriptor::points(
                "composition",
                "Composition",
                &[
                    (0, "Cystic or almost completely cystic"),
                    (0, "Spongiform"),
                    (1, "Mixed cystic and solid"),
                    (2, "Solid or almost completely solid"),
                ],
            ),
            FieldDescriptor::points(
                "echogenicity",
                "Echogenicity",
                &[
                    (0, "Anechoic"),
                    (1, "Hyperechoic or isoechoic"),
                    (2, "Hypoechoic"),
                    (3, "Very hypoechoic"),
                ],
            ),
            FieldDescriptor::points(
                "shape",
                "Shape",
                &[(0, "Wider-than-tall"), (3, "Taller-than-wide")],
            ),
            FieldDescriptor::points(
                "margin",
                "Margin",
                &[
                    (0, "Smooth"),
                    (0, "Ill-defined"),
                    (2, "Lobulated or irregular"),
                    (3, "Extra-thyroidal extension"),
                ],
            ),
            FieldDescriptor::points(
                "echogenic_foci",
                "Echogenic Foci",
                &[
                    (0, "None or large comet-tail artifacts"),
                    (1, "Macrocalcifications"),
                    (2, "Peripheral (rim) calcifications"),
                    (3, "Punctate echogenic foci"),
                ],
            ),
        ],
        evaluator: thyroid_nodule,
        criteria: tirads_criteria(),
    }
}

fn tirads_criteria() -> Vec<CriteriaSection> {
    vec![
        CriteriaSection::new(
            "Composition",
            &[
                ("0 pts — Cystic / Spongiform", "", RiskColour::Green, "Cystic or almost completely cystic (≥50% cystic). Spongiform: aggregation of multiple small cystic spaces in >50% of the nodule volume — classic benign appearance."),
                ("1 pt — Mixed", "", RiskColour::Grey, "Mixed cystic and solid. Neither predominantly cystic nor predominantly solid."),
                ("2 pts — Solid", "", RiskColour::Orange, "Solid or almost completely solid (≤10% cystic). Highest malignancy risk from this category."),
            ],
        ),
        CriteriaSection::new(
            "Echogenicity",
            &[
                ("0 pts — Anechoic", "", RiskColour::Green, "Applies only to cystic components."),
                ("1 pt — Hyperechoic / Isoechoic", "", RiskColour::Grey, "Echogenicity equal to or greater than adjacent thyroid tissue."),
                ("2 pts — Hypoechoic", "", RiskColour::Yellow, "Less echogenic than adjacent thyroid tissue but more echogenic than strap muscles."),
                ("3 pts — Very hypoechoic", "", RiskColour::Orange, "Less echogenic than adjacent strap muscles. Significantly increases malignancy risk."),
            ],
        ),
        CriteriaSection::new(
            "Shape",
            &[
                ("0 pts — Wider-than-tall", "", RiskColour::Green, "AP dimension < transverse dimension on a transverse image. Normal orientation."),
                ("3 pts — Taller-than-wide", "", RiskColour::Red, "AP dimension > transverse dimension on a transverse image. Growth perpendicular to tissue planes — strong risk factor for malignancy."),
            ],
        ),
        CriteriaSection::new(
            "Margin",
            &[
                ("0 pts — Smooth / Ill-defined", "", RiskColour::Green, "Smooth: well-defined uniform margin. Ill-defined: no clear demarcation from surrounding thyroid tissue."),
                ("2 pts — Lobulated / Irregular", "", RiskColour::Orange, "Lobulated: protrusions from the margin. Irregular: angular, spiculated, or jagged margin."),
                ("3 pts — Extra-thyroidal extension", "", RiskColour::Red, "Tumour extending beyond the thyroid capsule. Highly suspicious for malignancy."),
            ],
        ),
        CriteriaSection::new(
            "Echogenic Foci",
            &[
                ("0 pts — None / Large comet-tail", "", RiskColour::Green, "No echogenic foci OR large comet-tail artifacts (>1 mm V-shaped reverberation) — classic for colloid, benign."),
                ("1 pt — Macrocalcifications", "", RiskColour::Grey, "Coarse calcifications causing acoustic shadowing. Can occur in benign or malignant nodules."),
                ("2 pts — Peripheral (rim) calcifications", "", RiskColour::Yellow, "Eggshell calcification around the nodule margin. Associated with follicular variant papillary carcinoma."),
                ("3 pts — Punctate echogenic foci", "", RiskColour::Orange, "Small (<1 mm) non-shadowing echogenic foci — psammoma bodies. Highly associated with papillary thyroid carcinoma."),
            ],
        ),
    ]
}

/// Size-based sub-decision of one TI-RADS level, thresholds in cm.
struct SizeLadder {
    fna: f64,
    follow_up: f64,
    follow_up_interval: &'static str,
    below_follow_up: &'static str,
}

const NO_FNA_FOR_SIZE: &str = "No FNA, no routine follow-up required for this size.";

impl SizeLadder {
    /// A missing size fails both thresholds.
    fn recommend(&self, size: Option<f64>) -> String {
        match size {
            Some(size) if size >= self.fna => format!(
                "FNA recommended (size {} cm ≥ {} cm threshold).",
                format::number(size),
                format::fixed(self.fna, 1)
            ),
            Some(size) if size >= self.follow_up => format!(
                "Follow-up ultrasound in {} (size {} cm, FNA if growth or new features).",
                self.follow_up_interval,
                format::number(size)
            ),
            _ => self.below_follow_up.to_string(),
        }
    }
}

struct ThyroidNodule {
    size: Option<f64>,
    points: f64,
}

fn thyroid_nodule(values: &FindingValues) -> Option<Outcome> {
    let nodule = ThyroidNodule {
        size: values.number("size"),
        points: POINT_FIELDS
            .iter()
            .map(|(id, _)| values.number_or_zero(id))
            .sum(),
    };

    let (level, verdict) = Cascade::over(&nodule)
        .rule(
            "TR1",
            |n| n.points == 0.0,
            |_| {
                (
                    "TR1 (Benign)",
                    Verdict::new(Tier::NoFollowup, "No FNA. No follow-up required."),
                )
            },
        )
        .rule(
            "TR2",
            |n| n.points <= 2.0,
            |_| {
                (
                    "TR2 (Not Suspicious)",
                    Verdict::new(Tier::NoFollowup, "No FNA. No follow-up required."),
                )
            },
        )
        .rule(
            "TR3",
            |n| n.points == 3.0,
            |n| {
                let ladder = SizeLadder {
                    fna: 2.5,
                    follow_up: 1.5,
                    follow_up_interval: "1–3 years",
                    below_follow_up: NO_FNA_FOR_SIZE,
                };
                (
                    "TR3 (Mildly Suspicious)",
                    Verdict::new(Tier::ShortTermFollowup, ladder.recommend(n.size)),
                )
            },
        )
        .rule(
            "TR4",
            |n| n.points <= 6.0,
            |n| {
                let ladder = SizeLadder {
                    fna: 1.5,
                    follow_up: 1.0,
                    follow_up_interval: "1–2 years",
                    below_follow_up: NO_FNA_FOR_SIZE,
                };
                (
                    "TR4 (Moderately Suspicious)",
                    Verdict::new(Tier::FurtherWorkup, ladder.recommend(n.size)),
                )
            },
        )
        .otherwise(|n| {
            let ladder = SizeLadder {
                fna: 1.0,
                follow_up: 0.5,
                follow_up_interval: "6–12 months",
                below_follow_up: "Follow-up ultrasound; FNA threshold not yet reached.",
            };
            (
                "TR5 (Highly Suspicious)",
                Verdict::new(Tier::Intervention, ladder.recommend(n.size)),
            )
        });

    let total = format::number(nodule.points);
    let notes = [
        format!("Total points: {total} → {level}"),
        "ACR TI-RADS does not apply to known thyroid malignancy or diffuse thyroid disease."
            .to_string(),
        "Clinical risk factors (e.g. prior radiation, family history, MEN2) may lower FNA threshold."
            .to_string(),
    ];

    let breakdown = POINT_FIELDS
        .iter()
        .fold(Supplement::new("Points breakdown"), |supplement, (id, label)| {
            let raw = values.text(id);
            supplement.row(*label, if raw.is_empty() { "0" } else { raw })
        })
        .row("Total", total);

    Some(verdict.into_outcome(&notes).with_supplement(breakdown))
}

pub(crate) fn incidental_thyroid() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "incidental_thyroid",
        name: "Incidental Thyroid Nodule on CT/MRI",
        source: "ACR Incidental Findings Committee 2015",
        description: "Thyroid nodule found incidentally on CT, MRI or PET-CT",
        fields: vec![
            FieldDescriptor::number("size", "Nodule Size (short axis on axial image)", "cm", "e.g. 1.2"),
            FieldDescriptor::number("age", "Patient Age", "years", "e.g. 52"),
            FieldDescriptor::radio(
                "suspicious",
                "Suspicious Imaging Features?",
                &[
                    ("no", "No"),
                    ("yes", "Yes — invasion of local tissues or abnormal cervical lymph nodes"),
                ],
            ),
            FieldDescriptor::radio(
                "limited_life",
                "Limited Life Expectancy or Serious Comorbidities?",
                &[("no", "No"), ("yes", "Yes")],
            ),
        ],
        evaluator: incidental_thyroid_nodule,
        criteria: vec![CriteriaSection::new(
            "Ultrasound Thresholds",
            &[
                ("Suspicious features", "US ± FNA", RiskColour::Orange, "Invasion of local tissues or abnormal cervical lymph nodes: dedicated thyroid ultrasound regardless of size."),
                ("Age < 35 years", "≥ 1 cm", RiskColour::Blue, "Nodules ≥1 cm warrant dedicated thyroid ultrasound."),
                ("Age ≥ 35 years", "≥ 1.5 cm", RiskColour::Blue, "Nodules ≥1.5 cm warrant dedicated thyroid ultrasound."),
                ("Below threshold", "None", RiskColour::Green, "No further evaluation of the incidental nodule."),
            ],
        )],
    }
}

struct IncidentalNodule {
    size: f64,
    age: f64,
    suspicious: bool,
    limited_life: bool,
}

const INCIDENTAL_THYROID_NOTES: &[&str] = &[
    "Applies to nodules detected on CT, MRI or PET-CT, not on dedicated ultrasound.",
    "Measure the largest short-axis dimension on the axial image.",
    "FDG-avid thyroid nodules on PET-CT warrant ultrasound regardless of size.",
];

fn incidental_thyroid_nodule(values: &FindingValues) -> Option<Outcome> {
    let nodule = IncidentalNodule {
        size: values.required("size", Admissible::Positive)?,
        age: values.required("age", Admissible::NonNegative)?,
        suspicious: values.is("suspicious", "yes"),
        limited_life: values.is("limited_life", "yes"),
    };

    let verdict = Cascade::over(&nodule)
        .rule(
            "suspicious features",
            |n| n.suspicious,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    "Dedicated thyroid ultrasound ± FNA recommended (suspicious imaging features).",
                )
            },
        )
        .rule(
            "limited life expectancy",
            |n| n.limited_life,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "No further evaluation recommended given limited life expectancy or comorbidities.",
                )
            },
        )
        .rule(
            "under 35 and 1 cm or more",
            |n| n.age < 35.0 && n.size >= 1.0,
            |n| {
                Verdict::new(
                    Tier::ImagingRecommended,
                    format!(
                        "Dedicated thyroid ultrasound recommended ({} cm nodule, patient <35 years).",
                        format::number(n.size)
                    ),
                )
            },
        )
        .rule(
            "35 or older and 1.5 cm or more",
            |n| n.age >= 35.0 && n.size >= 1.5,
            |n| {
                Verdict::new(
                    Tier::ImagingRecommended,
                    format!(
                        "Dedicated thyroid ultrasound recommended ({} cm nodule, patient ≥35 years).",
                        format::number(n.size)
                    ),
                )
            },
        )
        .otherwise(|_| Verdict::new(Tier::NoFollowup, "No further evaluation recommended."));

    Some(verdict.into_outcome(INCIDENTAL_THYROID_NOTES))
}
