use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Tier,
};
use crate::guidelines::engine::{Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

const NODULE_COUNT: &[(&str, &str)] = &[("single", "Single"), ("multiple", "Multiple (≥2)")];
const YES_NO: &[(&str, &str)] = &[("no", "No"), ("yes", "Yes")];

const NO_ROUTINE_FOLLOWUP: &str = "No routine follow-up recommended.";

pub(crate) fn fleischner_solid() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "fleischner_solid",
        name: "Fleischner Society — Solid Pulmonary Nodule",
        source: "Fleischner Society 2017",
        description: "Incidental solid nodule in patients ≥35 years without known malignancy",
        fields: vec![
            FieldDescriptor::number("size", "Nodule Diameter", "mm", "e.g. 7"),
            FieldDescriptor::radio("count", "Number of Nodules", NODULE_COUNT),
            FieldDescriptor::radio(
                "risk",
                "Patient Risk",
                &[
                    (
                        "low",
                        "Low Risk — minimal or absent smoking history, no other risk factors",
                    ),
                    (
                        "high",
                        "High Risk — heavy smoking, family history, emphysema, upper lobe location",
                    ),
                ],
            ),
        ],
        evaluator: solid_nodule,
        criteria: Vec::new(),
    }
}

struct SolidNodule {
    size: f64,
    multiple: bool,
    high_risk: bool,
}

const SOLID_NOTES: &[&str] = &[
    "Does not apply to known malignancy, immunocompromised patients, or occupational exposure.",
    "Use mean diameter = (length + width) / 2.",
    "Dominant nodule in multiple-nodule patients should drive management.",
];

fn solid_nodule(values: &FindingValues) -> Option<Outcome> {
    let nodule = SolidNodule {
        size: values.required("size", Admissible::NonNegative)?,
        multiple: values.is("count", "multiple"),
        high_risk: values.is("risk", "high"),
    };

    let verdict = Cascade::over(&nodule)
        .rule(
            "under 6 mm",
            |n| n.size < 6.0,
            |n| {
                if n.high_risk {
                    Verdict::new(Tier::ShortTermFollowup, "Optional CT at 12 months.")
                } else {
                    Verdict::new(Tier::NoFollowup, NO_ROUTINE_FOLLOWUP)
                }
            },
        )
        .rule(
            "multiple 6 mm or more",
            |n| n.multiple,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "CT at 3–6 months; consider CT at 18–24 months.",
                )
            },
        )
        .rule(
            "single 6 to 8 mm",
            |n| n.size <= 8.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "CT at 6–12 months; consider CT at 18–24 months.",
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::FurtherWorkup,
                "CT at 3 months; consider PET-CT or tissue sampling.",
            )
            .with_note("PET-CT preferred for nodules ≥8 mm with intermediate pre-test probability.")
        });

    Some(verdict.into_outcome(SOLID_NOTES))
}

pub(crate) fn fleischner_subsolid() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "fleischner_subsolid",
        name: "Fleischner Society — Subsolid / Ground-Glass Nodule",
        source: "Fleischner Society 2017",
        description:
            "Incidental subsolid (GGN or part-solid) pulmonary nodule, patients ≥35 years",
        fields: vec![
            FieldDescriptor::radio(
                "type",
                "Nodule Type",
                &[
                    ("ggn", "Pure ground-glass (non-solid)"),
                    ("partsolid", "Part-solid (has solid component)"),
                ],
            ),
            FieldDescriptor::number("total_size", "Total Nodule Diameter", "mm", "e.g. 12")
                .help("Longest axis including ground-glass component"),
            FieldDescriptor::number("solid_size", "Solid Component Diameter", "mm", "e.g. 5")
                .help("Leave blank / 0 for pure GGN"),
            FieldDescriptor::radio("count", "Number of Nodules", NODULE_COUNT),
        ],
        evaluator: subsolid_nodule,
        criteria: Vec::new(),
    }
}

struct SubsolidNodule {
    ground_glass: bool,
    multiple: bool,
    total: f64,
    solid: f64,
}

const SUBSOLID_NOTES: &[&str] = &[
    "Does not apply to known malignancy or immunocompromised patients.",
    "Confirm persistence at 3–6 months before committing to long-term follow-up.",
    "Part-solid nodules with solid component ≥6 mm carry higher malignancy risk.",
];

fn subsolid_nodule(values: &FindingValues) -> Option<Outcome> {
    let nodule = SubsolidNodule {
        ground_glass: values.is("type", "ggn"),
        multiple: values.is("count", "multiple"),
        total: values.required("total_size", Admissible::NonNegative)?,
        solid: values.number_or_zero("solid_size"),
    };

    let verdict = Cascade::over(&nodule)
        .rule(
            "ground-glass single under 6 mm",
            |n| n.ground_glass && !n.multiple && n.total < 6.0,
            |_| Verdict::new(Tier::NoFollowup, NO_ROUTINE_FOLLOWUP),
        )
        .rule(
            "ground-glass single",
            |n| n.ground_glass && !n.multiple,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "CT at 6–12 months to confirm persistence, then CT every 2 years until 5 years.",
                )
            },
        )
        .rule(
            "ground-glass multiple under 6 mm",
            |n| n.ground_glass && n.total < 6.0,
            |_| Verdict::new(Tier::ShortTermFollowup, "CT at 3–5 years."),
        )
        .rule(
            "ground-glass multiple",
            |n| n.ground_glass,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "CT at 3–6 months; if stable, CT every 2 years until 5 years.",
                )
            },
        )
        .rule(
            "part-solid single under 6 mm",
            |n| !n.multiple && n.total < 6.0,
            |_| Verdict::new(Tier::NoFollowup, NO_ROUTINE_FOLLOWUP),
        )
        .rule(
            "part-solid single with solid under 6 mm",
            |n| !n.multiple && n.solid < 6.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "CT at 3–6 months to confirm persistence. If stable and solid component <6 mm: annual CT for 5 years.",
                )
            },
        )
        .rule(
            "part-solid single with solid 6 mm or more",
            |n| !n.multiple,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    "CT at 3–6 months. If solid component ≥6 mm: consider PET-CT or biopsy.",
                )
                .with_note(
                    "Resection may be considered even for stable part-solid nodules with solid component ≥6 mm.",
                )
            },
        )
        .rule(
            "part-solid multiple under 6 mm",
            |n| n.total < 6.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "CT at 3–6 months; if stable, annual CT for 5 years.",
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::FurtherWorkup,
                "CT at 3–6 months; if stable, annual CT for 5 years. Consider PET-CT or biopsy for dominant/growing lesion.",
            )
        });

    Some(verdict.into_outcome(SUBSOLID_NOTES))
}

pub(crate) fn lungrads() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "lungrads",
        name: "Lung-RADS 2022",
        source: "ACR Lung-RADS v2022",
        description: "Annual low-dose CT lung cancer screening — nodule assessment",
        fields: vec![
            FieldDescriptor::radio(
                "type",
                "Nodule Type",
                &[
                    ("solid", "Solid"),
                    ("partsolid", "Part-solid"),
                    ("ggn", "Non-solid (ground-glass)"),
                    ("perifissural", "Perifissural (solid, lenticular/triangular)"),
                ],
            ),
            FieldDescriptor::number("size", "Mean Nodule Diameter", "mm", "e.g. 9"),
            FieldDescriptor::number("solid_comp", "Solid Component Diameter", "mm", "e.g. 5")
                .help("Part-solid only; leave 0 otherwise"),
            FieldDescriptor::radio(
                "new_growing",
                "New or Growing?",
                &[
                    ("no", "No (baseline or stable)"),
                    ("yes", "Yes (new or growing since prior CT)"),
                ],
            ),
            FieldDescriptor::radio("spiculated", "Spiculated Margins?", YES_NO),
        ],
        evaluator: screening_nodule,
        criteria: vec![CriteriaSection::new(
            "Lung-RADS Category Criteria",
            &[
                ("Lung-RADS 1 — Negative", "<1%", RiskColour::Green, "No lung nodules OR nodule(s) with specific benign features: complete calcification, fat-containing nodule, perifissural <10 mm."),
                ("Lung-RADS 2 — Benign", "<1%", RiskColour::Green, "Solid: <6 mm baseline or new <4 mm. Part-solid: total <6 mm. Non-solid (GGN): <20 mm or ≥20 mm unchanged ≥3 months. Perifissural: <10 mm."),
                ("Lung-RADS 3 — Probably benign", "1–2%", RiskColour::Yellow, "Solid: 6–<8 mm baseline; new 4–<6 mm. Part-solid: ≥6 mm total with solid component <6 mm. GGN: 20–<30 mm or new <30 mm. Perifissural: 10–<20 mm."),
                ("Lung-RADS 4A — Suspicious", "5–15%", RiskColour::Orange, "Solid: ≥8–<15 mm; new/growing 6–<8 mm. Part-solid with solid ≥6 mm. Growing GGN ≥20 mm. Perifissural ≥20 mm. Endobronchial nodule."),
                ("Lung-RADS 4B — Very suspicious", ">15%", RiskColour::Red, "Solid ≥15 mm; new/growing 4B solid. Part-solid with solid component ≥8 mm. Any nodule with additional suspicious features (spiculation, upper lobe, emphysema background)."),
                ("Lung-RADS 4X — Additional features", ">15%", RiskColour::Red, "Category 4 nodule with additional features increasing suspicion of malignancy: spiculation, upper lobe location, associated lymphadenopathy, or pleural retraction."),
            ],
        )],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreeningKind {
    Solid,
    PartSolid,
    GroundGlass,
    Perifissural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LungRads {
    One,
    Two,
    Three,
    FourA,
    FourB,
    FourX,
}

impl LungRads {
    fn tier(self) -> Tier {
        match self {
            LungRads::One | LungRads::Two => Tier::NoFollowup,
            LungRads::Three => Tier::ShortTermFollowup,
            LungRads::FourA => Tier::FurtherWorkup,
            LungRads::FourB | LungRads::FourX => Tier::Intervention,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LungRads::One => "Lung-RADS 1",
            LungRads::Two => "Lung-RADS 2",
            LungRads::Three => "Lung-RADS 3",
            LungRads::FourA => "Lung-RADS 4A",
            LungRads::FourB => "Lung-RADS 4B",
            LungRads::FourX => "Lung-RADS 4X",
        }
    }

    fn management(self) -> &'static str {
        match self {
            LungRads::One | LungRads::Two => "Continue annual screening.",
            LungRads::Three => "LDCT at 6 months.",
            LungRads::FourA => {
                "LDCT at 3 months; PET-CT may be appropriate for nodules ≥8 mm."
            }
            LungRads::FourB => "Chest CT with/without contrast + PET-CT; tissue sampling.",
            LungRads::FourX => {
                "Chest CT with/without contrast + PET-CT; tissue sampling strongly recommended."
            }
        }
    }
}

struct ScreeningNodule {
    kind: ScreeningKind,
    size: f64,
    solid: f64,
    growing: bool,
    spiculated: bool,
}

const SCREENING_NOTES: &[&str] = &[
    "Applies to low-dose CT lung cancer screening programme participants.",
    "Modifier S may be added for clinically significant incidental findings.",
    "Compare with all prior CT scans when available.",
];

fn screening_nodule(values: &FindingValues) -> Option<Outcome> {
    let nodule = ScreeningNodule {
        kind: match values.text("type") {
            "perifissural" => ScreeningKind::Perifissural,
            "ggn" => ScreeningKind::GroundGlass,
            "partsolid" => ScreeningKind::PartSolid,
            _ => ScreeningKind::Solid,
        },
        size: values.number_or_zero("size"),
        solid: values.number_or_zero("solid_comp"),
        growing: values.is("new_growing", "yes"),
        spiculated: values.is("spiculated", "yes"),
    };

    let category = categorise(&nodule);
    let recommendation = format!("{} — {}", category.label(), category.management());
    Some(Outcome::new(category.tier(), recommendation).with_notes(SCREENING_NOTES.iter().copied()))
}

fn categorise(nodule: &ScreeningNodule) -> LungRads {
    match nodule.kind {
        ScreeningKind::Perifissural => Cascade::over(nodule)
            .rule("under 10 mm", |n| n.size < 10.0, |_| LungRads::Two)
            .rule("under 20 mm", |n| n.size < 20.0, |_| LungRads::Three)
            .otherwise(|_| LungRads::FourA),
        ScreeningKind::GroundGlass => Cascade::over(nodule)
            .rule("under 20 mm", |n| n.size < 20.0, |_| LungRads::Two)
            .rule("under 30 mm", |n| n.size < 30.0, |_| LungRads::Three)
            .otherwise(|n| if n.growing { LungRads::FourB } else { LungRads::FourA }),
        ScreeningKind::PartSolid => {
            let initial = Cascade::over(nodule)
                .rule("total under 6 mm", |n| n.size < 6.0, |_| LungRads::One)
                .rule("solid under 6 mm", |n| n.solid < 6.0, |_| LungRads::Three)
                .rule("solid under 8 mm", |n| n.solid < 8.0, |_| LungRads::FourA)
                .otherwise(|n| if n.spiculated { LungRads::FourX } else { LungRads::FourB });
            if nodule.growing && initial == LungRads::Three {
                LungRads::FourA
            } else {
                initial
            }
        }
        ScreeningKind::Solid => Cascade::over(nodule)
            .rule(
                "under 6 mm",
                |n| n.size < 6.0,
                |n| if n.growing { LungRads::Three } else { LungRads::Two },
            )
            .rule(
                "under 8 mm",
                |n| n.size < 8.0,
                |n| if n.growing { LungRads::FourA } else { LungRads::Three },
            )
            .rule(
                "under 15 mm",
                |n| n.size < 15.0,
                |n| match (n.spiculated, n.growing) {
                    (true, true) => LungRads::FourX,
                    (true, false) => LungRads::FourB,
                    (false, _) => LungRads::FourA,
                },
            )
            .otherwise(|n| {
                if n.spiculated || n.growing {
                    LungRads::FourX
                } else {
                    LungRads::FourB
                }
            }),
    }
}
