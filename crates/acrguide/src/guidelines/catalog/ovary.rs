use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Tier,
};
use crate::guidelines::engine::{lookup, Entry};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn orads() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "orads",
        name: "ACR O-RADS",
        source: "ACR O-RADS US v2022",
        description: "Ovarian-Adnexal Reporting and Data System — ultrasound",
        fields: vec![
            FieldDescriptor::radio(
                "patient",
                "Patient Status",
                &[("premenopausal", "Premenopausal"), ("postmenopausal", "Postmenopausal")],
            ),
            FieldDescriptor::select(
                "score",
                "O-RADS Ultrasound Score",
                &[
                    ("1", "1 — Normal ovary or physiologic finding"),
                    ("2", "2 — Almost certainly benign (<1% risk): simple cyst, follicle, corpus luteum, dermoid, endometrioma"),
                    ("3", "3 — Low risk (1–<10%): unilocular cyst >10 cm, multilocular smooth wall, echogenic cyst"),
                    ("4", "4 — Intermediate risk (10–<50%): solid smooth lesion, irregular wall, blood flow present"),
                    ("5", "5 — High risk (≥50%): irregular solid, ascites, peritoneal nodularity, papillary projections with blood flow"),
                ],
            ),
        ],
        evaluator: adnexal_lesion,
        criteria: vec![CriteriaSection::new(
            "O-RADS Ultrasound Criteria",
            &[
                ("O-RADS 1 — Normal", "<1%", RiskColour::Green, "Normal ovary with or without follicle ≤3 cm (premenopausal). Postmenopausal: ovary not visualised or normal for age."),
                ("O-RADS 2 — Almost certainly benign", "<1%", RiskColour::Green, "Classic benign features. Unilocular anechoic cyst any size with smooth thin wall. Dermoid: echogenic fat component with shadowing, hair, calcification. Endometrioma: homogeneous low-level echoes (\"ground glass\"). Hydrosalpinx: tubular with incomplete septations. Postmenopausal simple cyst ≤3 cm."),
                ("O-RADS 3 — Low risk", "1–<10%", RiskColour::Yellow, "Unilocular cyst >10 cm. Multilocular cyst with thin smooth septa, no solid component. Echogenic cyst >3 cm without other suspicious features. Smooth wall with minimal vascularity (color score 1–2)."),
                ("O-RADS 4 — Intermediate risk", "10–<50%", RiskColour::Orange, "Unilocular cyst with solid component or irregular wall. Multilocular cyst with solid components or irregular septa. Smooth solid lesion. Blood flow in solid component (color score ≥1). Ascites."),
                ("O-RADS 5 — High risk", "≥50%", RiskColour::Red, "Irregular solid lesion. Papillary projections with blood flow (color score ≥3). Peritoneal/omental nodularity. Features of carcinomatosis. Ascites with any suspicious lesion."),
            ],
        )],
    }
}

const SCORE_TWO_NOTES: &[&str] = &[
    "<1% malignancy risk. Classic benign features (simple cyst, dermoid, endometrioma) can be characterised definitively.",
];

/// Score 2 wording for postmenopausal patients; every other score ignores status.
const POSTMENOPAUSAL_SCORE_TWO: Entry = Entry {
    key: "2",
    tier: Tier::NoFollowup,
    recommendation: "Probably benign. Follow-up ultrasound in 1 year for simple cysts ≤1 cm; otherwise no follow-up.",
    notes: SCORE_TWO_NOTES,
};

const ORADS: &[Entry] = &[
    Entry {
        key: "1",
        tier: Tier::NoFollowup,
        recommendation: "Normal. No follow-up needed.",
        notes: &["Physiologic cysts (follicles, corpus luteum) in premenopausal patients."],
    },
    Entry {
        key: "2",
        tier: Tier::NoFollowup,
        recommendation: "Probably benign. No follow-up for simple cysts ≤3 cm. Follow-up at 12 weeks for simple cysts 3–5 cm.",
        notes: SCORE_TWO_NOTES,
    },
    Entry {
        key: "3",
        tier: Tier::ShortTermFollowup,
        recommendation: "Gynaecology referral. Repeat ultrasound in 6–12 weeks to re-evaluate.",
        notes: &[
            "1–<10% malignancy risk.",
            "Further characterisation with MRI may help downgrade or upstage.",
        ],
    },
    Entry {
        key: "4",
        tier: Tier::FurtherWorkup,
        recommendation: "Gynaecology-oncology referral. MRI for further characterisation.",
        notes: &[
            "10–<50% malignancy risk.",
            "Surgical consultation or close follow-up with tumour markers (CA-125, HE4).",
        ],
    },
    Entry {
        key: "5",
        tier: Tier::Intervention,
        recommendation: "Gynaecology-oncology referral — high suspicion for malignancy.",
        notes: &[
            "≥50% malignancy risk.",
            "CA-125, HE4, and ROMA score recommended.",
            "CT chest/abdomen/pelvis for staging if malignancy confirmed.",
        ],
    },
];

fn adnexal_lesion(values: &FindingValues) -> Option<Outcome> {
    let score = values.text("score");
    if values.is("patient", "postmenopausal") && score == POSTMENOPAUSAL_SCORE_TWO.key {
        return lookup(&[POSTMENOPAUSAL_SCORE_TWO], score);
    }
    lookup(ORADS, score)
}
