use crate::guidelines::domain::{CriteriaSection, FieldDescriptor, RiskColour, Tier};
use crate::guidelines::engine::{lookup, Entry};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn birads() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "birads",
        name: "ACR BI-RADS",
        source: "ACR BI-RADS 5th Edition",
        description: "Breast Imaging Reporting and Data System — mammography, ultrasound, MRI",
        fields: vec![
            FieldDescriptor::select(
                "category",
                "BI-RADS Assessment Category",
                &[
                    ("0", "0 — Incomplete: additional imaging needed"),
                    ("1", "1 — Negative: no abnormality"),
                    ("2", "2 — Benign finding"),
                    ("3", "3 — Probably benign (≤2% malignancy risk)"),
                    ("4A", "4A — Low suspicion (>2% to ≤10%)"),
                    ("4B", "4B — Moderate suspicion (>10% to ≤50%)"),
                    ("4C", "4C — High suspicion (>50% to <95%)"),
                    ("5", "5 — Highly suggestive of malignancy (≥95%)"),
                    ("6", "6 — Known biopsy-proven malignancy"),
                ],
            ),
            FieldDescriptor::radio(
                "modality",
                "Imaging Modality",
                &[("mammo", "Mammography"), ("us", "Ultrasound"), ("mri", "MRI")],
            ),
        ],
        evaluator: |values| lookup(BIRADS, values.text("category")),
        criteria: vec![CriteriaSection::new(
            "BI-RADS Assessment Criteria",
            &[
                ("0 — Incomplete", "N/A", RiskColour::Blue, "Additional imaging needed before a final category can be assigned. Needs prior films, additional views, or ultrasound correlation."),
                ("1 — Negative", "0%", RiskColour::Green, "No abnormality. Symmetric fibroglandular tissue. No mass, architectural distortion, or suspicious calcification."),
                ("2 — Benign", "0%", RiskColour::Green, "Definitely benign. Examples: simple cysts, intramammary lymph nodes, calcified fibroadenoma, fat-containing lesions (lipoma, hamartoma), implants, diffuse skin thickening."),
                ("3 — Probably benign", "≤2%", RiskColour::Yellow, "Short-interval follow-up preferred. Examples: non-calcified circumscribed solid mass on ultrasound, focal asymmetry, solitary group of punctate calcifications. Established by stability on 2–3 year follow-up."),
                ("4A — Low suspicion", "2–10%", RiskColour::Yellow, "Biopsy required. Mild suspicious features: palpable firm mass, new solid circumscribed mass on ultrasound, isolated dilated duct."),
                ("4B — Moderate suspicion", "10–50%", RiskColour::Orange, "Biopsy required. Moderate suspicious features: grouped amorphous or coarse heterogeneous calcifications, discrete mass without clearly circumscribed margins."),
                ("4C — High suspicion", ">50–<95%", RiskColour::Orange, "Biopsy required. High suspicion but not classic malignancy: ill-defined irregular solid mass, new fine pleomorphic or linear calcifications."),
                ("5 — Highly malignant", "≥95%", RiskColour::Red, "Classic malignancy features: spiculated irregular high-density mass, segmental/linear fine pleomorphic calcifications, irregular spiculated mass + calcifications."),
                ("6 — Known malignancy", "100%", RiskColour::Red, "Biopsy-proven malignancy. Imaging used for treatment planning, monitoring neoadjuvant therapy, or pre-surgical assessment."),
            ],
        )],
    }
}

const ROUTINE_SCREENING: &str = "Routine screening. Annual mammogram per screening guidelines.";

const BIRADS: &[Entry] = &[
    Entry {
        key: "0",
        tier: Tier::ImagingRecommended,
        recommendation: "Recall for additional imaging (additional views, ultrasound, or prior comparison).",
        notes: &["Category 0 should be resolved to a final assessment category after additional imaging."],
    },
    Entry {
        key: "1",
        tier: Tier::NoFollowup,
        recommendation: ROUTINE_SCREENING,
        notes: &["No abnormality detected. Continue age-appropriate screening."],
    },
    Entry {
        key: "2",
        tier: Tier::NoFollowup,
        recommendation: ROUTINE_SCREENING,
        notes: &["Definitively benign finding (e.g. cyst, lymph node, stable calcification)."],
    },
    Entry {
        key: "3",
        tier: Tier::ShortTermFollowup,
        recommendation: "Short-interval follow-up: repeat imaging in 6 months, then 6 months, then 12 months (total 2–3 years).",
        notes: &[
            "≤2% risk of malignancy.",
            "Tissue sampling is acceptable alternative if patient preference or high clinical concern.",
            "If stable at 2–3 years of follow-up, may be reclassified as BI-RADS 2.",
        ],
    },
    Entry {
        key: "4A",
        tier: Tier::FurtherWorkup,
        recommendation: "Tissue sampling (core needle biopsy) recommended.",
        notes: &[
            ">2–10% risk of malignancy.",
            "Benign biopsy result is concordant and routine follow-up can resume.",
        ],
    },
    Entry {
        key: "4B",
        tier: Tier::FurtherWorkup,
        recommendation: "Tissue sampling recommended. Radiology-pathology concordance essential.",
        notes: &[
            ">10–50% risk of malignancy.",
            "Benign discordant results should prompt repeat biopsy or excision.",
        ],
    },
    Entry {
        key: "4C",
        tier: Tier::Intervention,
        recommendation: "Tissue sampling recommended. High clinical suspicion warrants surgical consultation.",
        notes: &[
            ">50–<95% risk of malignancy.",
            "Benign pathology is discordant — surgical excision recommended.",
        ],
    },
    Entry {
        key: "5",
        tier: Tier::Intervention,
        recommendation: "Tissue sampling mandatory; surgical oncology referral.",
        notes: &[
            "≥95% risk of malignancy.",
            "Pre-treatment biopsy required. Do not proceed to surgery without histological confirmation.",
        ],
    },
    Entry {
        key: "6",
        tier: Tier::Intervention,
        recommendation: "Known malignancy — imaging used for treatment planning, monitoring, or pre-surgical assessment.",
        notes: &["Management directed by oncology/surgical team."],
    },
];
