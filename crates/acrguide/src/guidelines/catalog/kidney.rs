use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Tier,
};
use crate::guidelines::engine::{format, lookup, Admissible, Cascade, Entry, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn bosniak() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "bosniak",
        name: "Bosniak Renal Cyst Classification 2019",
        source: "Bosniak Classification v2019",
        description: "CT/MRI classification of cystic renal masses",
        fields: vec![FieldDescriptor::select(
            "class",
            "Bosniak Class (select the best match)",
            &[
                ("I", "I — Simple cyst: thin smooth wall, water attenuation, no septa/calcification/enhancement"),
                ("II", "II — Minimal complexity: ≤3 thin septa, thin wall, no measurable enhancement; OR uniform high density <3 cm"),
                ("IIF", "IIF — Multiple thin septa OR minimally thickened wall/septa; thick/irregular calcification; OR high-density ≥3 cm; no measurable enhancement"),
                ("III", "III — Thickened irregular or smooth wall/septa WITH measurable enhancement"),
                ("IV", "IV — Enhancing soft-tissue components (distinct from wall/septa)"),
            ],
        )
        .help("Choose the class that best fits the CT/MRI features")],
        evaluator: |values| lookup(BOSNIAK, values.text("class")),
        criteria: vec![CriteriaSection::new(
            "Bosniak Classification Criteria",
            &[
                ("Class I", "~0%", RiskColour::Green, "Hairline thin smooth wall. Round. No septa, no calcification, no solid components. Homogeneous water attenuation (0–20 HU) or signal intensity. No enhancement."),
                ("Class II", "<1%", RiskColour::Green, "≤3 thin (≤2 mm) smooth septa, no measurable enhancement. Thin smooth wall. May have fine calcification. OR: uniform high attenuation (40–70 HU) lesion <3 cm with no enhancement."),
                ("Class IIF", "~5%", RiskColour::Yellow, "≥4 thin smooth septa. OR minimally thickened (3 mm) smooth septa/wall without measurable enhancement. Thick or irregular calcification. OR high-attenuation cyst ≥3 cm. No measurable enhancement anywhere."),
                ("Class III", "~50%", RiskColour::Orange, "One or more thickened (≥4 mm) irregular OR smooth enhancing septa or wall with measurable enhancement. No soft-tissue nodule distinct from walls/septa."),
                ("Class IV", "~90%", RiskColour::Red, "Enhancing soft-tissue component clearly distinct from wall or septa. Measurable enhancement of this component. May also have all features of Class III."),
            ],
        )],
    }
}

const BOSNIAK: &[Entry] = &[
    Entry {
        key: "I",
        tier: Tier::NoFollowup,
        recommendation: "No follow-up required. Benign simple cyst.",
        notes: &["Approximately 0% malignancy risk.", "No imaging follow-up needed."],
    },
    Entry {
        key: "II",
        tier: Tier::NoFollowup,
        recommendation: "No follow-up required.",
        notes: &[
            "<1% malignancy risk.",
            "High-density cysts must be <3 cm and show no enhancement.",
        ],
    },
    Entry {
        key: "IIF",
        tier: Tier::ShortTermFollowup,
        recommendation:
            "Imaging follow-up: MRI (preferred) or CT at 6 months, then annually for 5 years.",
        notes: &[
            "~5% malignancy risk.",
            "If any increase in complexity on follow-up, upgrade to Class III or IV.",
            "Most IIF cysts remain benign on follow-up.",
        ],
    },
    Entry {
        key: "III",
        tier: Tier::FurtherWorkup,
        recommendation:
            "Active surveillance or surgical resection — multidisciplinary discussion recommended.",
        notes: &[
            "~50% malignancy risk.",
            "Surgical resection is standard; active surveillance acceptable in poor surgical candidates.",
            "Biopsy may help guide management in select cases.",
        ],
    },
    Entry {
        key: "IV",
        tier: Tier::Intervention,
        recommendation: "Surgical resection or ablation recommended.",
        notes: &[
            "~90% malignancy risk.",
            "Enhancing soft-tissue components are the hallmark of Bosniak IV.",
            "Partial nephrectomy preferred when technically feasible.",
        ],
    },
];

pub(crate) fn renal_mass() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "renal_mass",
        name: "Renal Mass — ACR Incidental Findings White Paper",
        source: "ACR Incidental Findings Committee 2017",
        description: "Management of incidental solid or indeterminate renal masses found on CT/MRI",
        fields: vec![
            FieldDescriptor::number("size", "Mass Size", "cm", "e.g. 3.5"),
            FieldDescriptor::radio(
                "enhancement",
                "Enhancement on Contrast CT/MRI?",
                &[
                    ("yes", "Yes — measurable enhancement (>20 HU or >15% signal change)"),
                    ("no", "No — no measurable enhancement"),
                    ("unk", "Indeterminate / not given contrast"),
                ],
            ),
            FieldDescriptor::radio(
                "nature",
                "Nature of Mass",
                &[
                    ("solid", "Solid (≥25% solid, enhancing)"),
                    ("cystic", "Predominantly cystic"),
                    ("fat_density", "Fat density on CT (−10 HU or less) — likely angiomyolipoma"),
                ],
            ),
        ],
        evaluator: renal_lesion,
        criteria: Vec::new(),
    }
}

struct RenalMass<'a> {
    size: f64,
    enhancement: &'a str,
    nature: &'a str,
}

const RENAL_MASS_NOTES: &[&str] = &[
    "Use Bosniak classification for cystic lesions.",
    "AML with fat density on CT can be diagnosed without further workup in most cases.",
    "High-risk patients (VHL, hereditary RCC syndromes) may warrant earlier intervention.",
];

fn renal_lesion(values: &FindingValues) -> Option<Outcome> {
    let mass = RenalMass {
        size: values.required("size", Admissible::Any)?,
        enhancement: values.text("enhancement"),
        nature: values.text("nature"),
    };

    let verdict = Cascade::over(&mass)
        .rule(
            "fat density",
            |m| m.nature == "fat_density",
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "Fat-containing lesion — typical angiomyolipoma. No immediate workup if classic fat density on unenhanced CT.",
                )
                .with_note("If >4 cm, refer to urology for embolisation risk assessment.")
            },
        )
        .rule(
            "cystic",
            |m| m.nature == "cystic",
            |_| {
                Verdict::new(
                    Tier::ImagingRecommended,
                    "Apply Bosniak classification (see Kidney → Bosniak).",
                )
            },
        )
        .rule(
            "non-enhancing",
            |m| m.enhancement == "no",
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "Non-enhancing hyperdense cyst — likely benign. No follow-up if classic appearance.",
                )
            },
        )
        .rule(
            "under 1 cm",
            |m| m.size < 1.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "Too small to characterise (TSTC). Follow-up CT/MRI in 12 months.",
                )
            },
        )
        .rule(
            "under 3 cm",
            |m| m.size < 3.0,
            |m| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!(
                        "Solid enhancing mass ({} cm). Urology referral; active surveillance or nephron-sparing surgery.",
                        format::number(m.size)
                    ),
                )
            },
        )
        .rule(
            "under 4 cm",
            |m| m.size < 4.0,
            |m| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!(
                        "Solid enhancing mass ({} cm). Urology referral. Consider partial nephrectomy or active surveillance.",
                        format::number(m.size)
                    ),
                )
            },
        )
        .otherwise(|m| {
            Verdict::new(
                Tier::Intervention,
                format!(
                    "Solid enhancing mass ({} cm). Urology referral. Surgical resection recommended.",
                    format::number(m.size)
                ),
            )
        });

    Some(verdict.into_outcome(RENAL_MASS_NOTES))
}
