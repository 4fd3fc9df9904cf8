use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Supplement, Tier,
};
use crate::guidelines::engine::{format, Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn aortic_aneurysm() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "aortic_aneurysm",
        name: "Aortic Aneurysm — Surveillance & Management",
        source: "SVS 2018 / ACC-AHA 2022",
        description: "Size-based follow-up for incidental aortic aneurysm (abdominal and thoracic)",
        fields: vec![
            FieldDescriptor::radio(
                "location",
                "Aneurysm Location",
                &[
                    ("aaa", "Abdominal Aortic Aneurysm (AAA)"),
                    ("ascending", "Thoracic — Ascending Aorta"),
                    ("descending", "Thoracic — Descending Aorta / Arch"),
                ],
            ),
            FieldDescriptor::number("diameter", "Maximum Diameter", "cm", "e.g. 4.5")
                .help("Outer-to-outer on axial image"),
            FieldDescriptor::radio(
                "sex",
                "Patient Sex",
                &[("male", "Male"), ("female", "Female (lower surgical thresholds apply)")],
            ),
            FieldDescriptor::radio(
                "symptomatic",
                "Symptomatic?",
                &[
                    ("no", "Asymptomatic (incidental)"),
                    ("yes", "Symptomatic — pain, tenderness, haemodynamic instability"),
                ],
            ),
            FieldDescriptor::radio(
                "ctd",
                "Bicuspid Aortic Valve or Connective Tissue Disorder?",
                &[("no", "No"), ("yes", "Yes — Marfan, Loeys-Dietz, bicuspid AV")],
            ),
        ],
        evaluator: aortic_dilation,
        criteria: vec![
            CriteriaSection::new(
                "AAA — Surveillance (SVS 2018)",
                &[
                    ("<3.0 cm", "Normal", RiskColour::Green, "Normal infrarenal aorta. No surveillance needed."),
                    ("3.0–3.9 cm", "Small", RiskColour::Green, "Very low rupture risk (<0.5%/yr). US every 2–3 years."),
                    ("4.0–4.4 cm", "Moderate", RiskColour::Yellow, "Annual ultrasound. Rupture risk ~1%/yr."),
                    ("4.5–5.4 cm", "Elevated", RiskColour::Orange, "US every 6 months. Rupture risk 1–3%/yr. CT for morphology."),
                    ("≥5.5 cm (M) / ≥5.0 cm (F)", "Repair", RiskColour::Red, "Elective repair recommended. EVAR preferred if anatomy suitable. Annual rupture risk ~5–10%."),
                ],
            ),
            CriteriaSection::new(
                "Thoracic Aorta (ACC/AHA 2022)",
                &[
                    ("Ascending <4.5 cm", "Surveillance", RiskColour::Yellow, "Annual CTA or MRA."),
                    ("Ascending 4.5–5.5 cm", "Referral", RiskColour::Orange, "Cardiothoracic referral. Lower threshold (≥5.0 cm or 4.5 cm) if CTD or bicuspid AV."),
                    ("Ascending ≥5.5 cm", "Surgery", RiskColour::Red, "Surgery indicated. Threshold ≥4.5 cm for CTD/bicuspid AV patients."),
                    ("Descending ≥6.0 cm", "Repair", RiskColour::Red, "TEVAR or surgery. ≥5.5 cm if CTD."),
                ],
            ),
        ],
    }
}

const SYMPTOMATIC_NOTES: &[&str] = &[
    "Symptomatic AAA/TAA carries very high rupture risk regardless of size.",
    "Haemodynamically unstable patients require immediate surgical intervention.",
];

const AORTIC_NOTES: &[&str] = &[
    "Growth rate >5 mm over 6 months warrants expedited surgical referral.",
    "CTA is preferred over ultrasound for thoracic aneurysms.",
    "All patients should receive cardiovascular risk factor optimisation (statin, BP control, smoking cessation).",
];

#[derive(Clone, Copy)]
enum AorticSegment {
    Abdominal,
    Ascending,
    Descending,
}

struct AorticDilation {
    segment: AorticSegment,
    diameter: f64,
    female: bool,
    connective_tissue: bool,
}

impl AorticDilation {
    /// Diameter at which repair is indicated for this segment and patient.
    fn repair_threshold(&self) -> f64 {
        match (self.segment, self.female, self.connective_tissue) {
            (AorticSegment::Abdominal, true, _) => 5.0,
            (AorticSegment::Abdominal, false, _) => 5.5,
            (AorticSegment::Ascending, _, true) => 4.5,
            (AorticSegment::Ascending, _, false) => 5.5,
            (AorticSegment::Descending, _, true) => 5.5,
            (AorticSegment::Descending, _, false) => 6.0,
        }
    }

    /// Ascending segment only: start of expedited referral.
    fn referral_threshold(&self) -> f64 {
        if self.connective_tissue {
            4.0
        } else {
            5.0
        }
    }
}

fn aortic_dilation(values: &FindingValues) -> Option<Outcome> {
    let diameter = values.required("diameter", Admissible::Positive)?;
    if values.is("symptomatic", "yes") {
        return Some(
            Outcome::new(
                Tier::Intervention,
                "Symptomatic aneurysm — emergency vascular surgery referral. Urgent CTA if not already performed.",
            )
            .with_notes(SYMPTOMATIC_NOTES.iter().copied()),
        );
    }

    let aorta = AorticDilation {
        segment: match values.text("location") {
            "aaa" => AorticSegment::Abdominal,
            "ascending" => AorticSegment::Ascending,
            _ => AorticSegment::Descending,
        },
        diameter,
        female: values.is("sex", "female"),
        connective_tissue: values.is("ctd", "yes"),
    };
    let verdict = match aorta.segment {
        AorticSegment::Abdominal => abdominal(&aorta),
        AorticSegment::Ascending => ascending(&aorta),
        AorticSegment::Descending => descending(&aorta),
    };

    Some(verdict.into_outcome(AORTIC_NOTES))
}

fn abdominal(aorta: &AorticDilation) -> Verdict {
    let diameter = format::number(aorta.diameter);
    let repair = format::number(aorta.repair_threshold());

    Cascade::over(aorta)
        .rule(
            "under 3.0 cm",
            |a| a.diameter < 3.0,
            |_| Verdict::new(Tier::NoFollowup, "Normal aortic diameter — no surveillance required."),
        )
        .rule(
            "under 4.0 cm",
            |a| a.diameter < 4.0,
            |_| Verdict::new(Tier::NoFollowup, "Small AAA — ultrasound surveillance every 2–3 years."),
        )
        .rule(
            "under 4.5 cm",
            |a| a.diameter < 4.5,
            |_| Verdict::new(Tier::ShortTermFollowup, "AAA 4.0–4.4 cm — ultrasound every 12 months."),
        )
        .rule(
            "under repair threshold",
            |a| a.diameter < a.repair_threshold(),
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("AAA {diameter} cm — ultrasound every 6 months. Consider CT for morphology."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::Intervention,
                format!("AAA ≥{repair} cm — vascular surgery referral for repair (EVAR or open). Threshold lower in females (≥5.0 cm)."),
            )
        })
}

fn ascending(aorta: &AorticDilation) -> Verdict {
    let diameter = format::number(aorta.diameter);
    let repair = format::number(aorta.repair_threshold());

    Cascade::over(aorta)
        .rule(
            "under 4.0 cm",
            |a| a.diameter < 4.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "Ascending aorta dilation — CTA or MRA at 12 months. Cardiothoracic referral.",
                )
            },
        )
        .rule(
            "under referral threshold",
            |a| a.diameter < a.referral_threshold(),
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("Ascending aorta {diameter} cm — imaging every 6–12 months."),
                )
            },
        )
        .rule(
            "under repair threshold",
            |a| a.diameter < a.repair_threshold(),
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Ascending aorta {diameter} cm — expedited cardiothoracic surgery referral."),
                )
            },
        )
        .otherwise(|a| {
            let qualifier = if a.connective_tissue {
                " (lower threshold: CTD/bicuspid AV)."
            } else {
                "."
            };
            Verdict::new(
                Tier::Intervention,
                format!("Ascending aorta ≥{repair} cm — surgical repair indicated{qualifier}"),
            )
        })
}

fn descending(aorta: &AorticDilation) -> Verdict {
    let diameter = format::number(aorta.diameter);
    let repair = format::number(aorta.repair_threshold());

    Cascade::over(aorta)
        .rule(
            "under 4.5 cm",
            |a| a.diameter < 4.5,
            |_| Verdict::new(Tier::ShortTermFollowup, "Descending aortic dilation — CTA at 12 months."),
        )
        .rule(
            "under repair threshold",
            |a| a.diameter < a.repair_threshold(),
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Descending aorta {diameter} cm — vascular/cardiothoracic referral. Imaging every 6 months."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::Intervention,
                format!("Descending aorta ≥{repair} cm — TEVAR or surgical repair indicated."),
            )
        })
}

pub(crate) fn carotid_stenosis() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "carotid_stenosis",
        name: "Carotid Artery Stenosis — NASCET Grading & Management",
        source: "AHA/ASA 2021 / NASCET Criteria",
        description: "ICA stenosis grading and management based on symptom status",
        fields: vec![
            FieldDescriptor::select(
                "stenosis",
                "Degree of Stenosis (NASCET)",
                &[
                    ("0", "<30% — minimal"),
                    ("30", "30–49% — mild"),
                    ("50", "50–69% — moderate"),
                    ("70", "70–99% — severe"),
                    ("100", "100% — total occlusion"),
                ],
            )
            .help("NASCET: (1 − [ICA min lumen / distal ICA diameter]) × 100"),
            FieldDescriptor::radio(
                "symptoms",
                "Symptomatic? (ipsilateral TIA or stroke ≤6 months)",
                &[("asymptomatic", "Asymptomatic"), ("symptomatic", "Symptomatic")],
            ),
            FieldDescriptor::radio("sex", "Patient Sex", &[("male", "Male"), ("female", "Female")]),
        ],
        evaluator: carotid_narrowing,
        criteria: vec![
            CriteriaSection::new(
                "NASCET Stenosis Severity",
                &[
                    ("<30% — Minimal", "Low", RiskColour::Green, "Minimal disease. Medical management only. No interventional benefit demonstrated."),
                    ("30–49% — Mild", "Low-Mod", RiskColour::Green, "No CEA benefit. Optimal medical therapy: antiplatelet, statin, hypertension control."),
                    ("50–69% — Moderate", "Moderate", RiskColour::Yellow, "Symptomatic: marginal CEA benefit (NNT ~28 at 5yr). Asymptomatic: no clear benefit from CEA."),
                    ("70–99% — Severe", "High", RiskColour::Red, "Symptomatic: CEA strongly recommended (NNT ~6 at 5yr). Asymptomatic: CEA beneficial if surgical risk <3%."),
                    ("100% — Occlusion", "None", RiskColour::Grey, "Not amenable to revascularisation. Medical management only. Evaluate contralateral carotid."),
                ],
            ),
            CriteriaSection::new(
                "NASCET Measurement Method",
                &[
                    ("NASCET formula", "", RiskColour::Grey, "Stenosis% = (1 − [minimum ICA lumen / distal normal ICA]) × 100. Distal ICA measured above bulb where walls are parallel."),
                    ("ECST vs NASCET", "", RiskColour::Grey, "ECST measures against estimated original vessel diameter. NASCET is the internationally adopted standard for clinical trials and guidelines."),
                ],
            ),
        ],
    }
}

const CAROTID_NOTES: &[&str] = &[
    "Optimal medical therapy: antiplatelet, statin, BP control — for all patients.",
    "NASCET measures residual lumen vs distal ICA above the bulb (not estimated original diameter).",
    "CAS (carotid artery stenting) is an alternative in high surgical-risk patients.",
    "CEA confers maximal benefit when performed within 2 weeks of symptoms in eligible patients.",
];

struct CarotidNarrowing {
    percent: i64,
    symptomatic: bool,
    male: bool,
}

fn carotid_narrowing(values: &FindingValues) -> Option<Outcome> {
    let carotid = CarotidNarrowing {
        percent: values.integer("stenosis")?,
        symptomatic: values.is("symptoms", "symptomatic"),
        male: values.is("sex", "male"),
    };

    let verdict = Cascade::over(&carotid)
        .rule(
            "occluded",
            |c| c.percent == 100,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    "Total occlusion — CEA/CAS not possible. Optimal medical therapy. Neurology referral.",
                )
            },
        )
        .rule(
            "asymptomatic under 50%",
            |c| !c.symptomatic && c.percent < 50,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "Asymptomatic stenosis <50% — optimal medical therapy only. No intervention.",
                )
            },
        )
        .rule(
            "asymptomatic under 70%",
            |c| !c.symptomatic && c.percent < 70,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "Asymptomatic stenosis 50–69% — medical therapy. CEA benefit marginal; vascular surgery referral for shared decision-making.",
                )
            },
        )
        .rule(
            "asymptomatic severe",
            |c| !c.symptomatic,
            |c| {
                let benefit = if c.male {
                    "Males benefit more."
                } else {
                    "Benefit less clear in females."
                };
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Asymptomatic stenosis 70–99% — CEA may be considered if surgical risk <3% and life expectancy >5 years. {benefit} Vascular surgery referral."),
                )
            },
        )
        .rule(
            "symptomatic under 50%",
            |c| c.percent < 50,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "Symptomatic stenosis <50% — no CEA benefit. Intensive medical therapy (dual antiplatelet acutely, statin, BP control).",
                )
            },
        )
        .rule(
            "symptomatic under 70%",
            |c| c.percent < 70,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    "Symptomatic stenosis 50–69% — CEA reduces 5-year stroke risk by ~4%. Vascular surgery referral. Medical therapy concurrently.",
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::Intervention,
                "Symptomatic stenosis 70–99% — CEA strongly recommended within 2 weeks of symptoms. Reduces 5-year ipsilateral stroke risk by ~16%. Urgent vascular surgery referral.",
            )
        });

    Some(verdict.into_outcome(CAROTID_NOTES))
}

const CORONARY_VESSELS: [(&str, &str); 4] = [
    ("lm", "Left main"),
    ("lad", "LAD"),
    ("lcx", "LCx"),
    ("rca", "RCA"),
];

pub(crate) fn cac_scoring() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "cac_scoring",
        name: "Coronary Artery Calcium (CAC) Score",
        source: "ACC/AHA 2018 Cholesterol Guidelines",
        description: "Agatston score interpretation for ASCVD risk stratification and statin therapy",
        fields: vec![
            FieldDescriptor::number("score", "Agatston CAC Score", "", "e.g. 125")
                .help("Enter 0 if no calcification detected"),
            FieldDescriptor::number("age", "Patient Age", "years", "e.g. 58"),
            FieldDescriptor::select(
                "risk",
                "10-Year ASCVD Risk (Pooled Cohort Equations)",
                &[
                    ("low", "<5% — Low risk"),
                    ("borderline", "5–7.5% — Borderline risk"),
                    ("intermediate", "7.5–20% — Intermediate risk"),
                    ("high", "≥20% — High risk"),
                ],
            ),
            FieldDescriptor::section("vessel_section", "Per-vessel scores (used when total is blank)"),
            FieldDescriptor::number("lm", "Left Main", "", "e.g. 0"),
            FieldDescriptor::number("lad", "Left Anterior Descending", "", "e.g. 80"),
            FieldDescriptor::number("lcx", "Left Circumflex", "", "e.g. 15"),
            FieldDescriptor::number("rca", "Right Coronary Artery", "", "e.g. 30"),
        ],
        evaluator: coronary_calcium,
        criteria: vec![
            CriteriaSection::new(
                "Agatston Score Interpretation",
                &[
                    ("CAC 0", "Very Low", RiskColour::Green, "No coronary calcification. 10-year event rate <2%. Supports withholding statin in borderline-risk patients."),
                    ("CAC 1–99", "Mild", RiskColour::Yellow, "Mild calcification. Risk-enhancing factor; favours statin initiation in borderline to intermediate ASCVD risk."),
                    ("CAC 100–299", "Moderate", RiskColour::Orange, "Moderate calcification. Independent predictor of MACE. Statin therapy recommended. 2-fold increase in 10-year risk vs zero-calcium."),
                    ("CAC ≥300", "High", RiskColour::Red, "Extensive calcification. Risk equivalent to known ASCVD. High-intensity statin + cardiology referral. CAC >400 ~25% 10-year MACE rate."),
                ],
            ),
            CriteriaSection::new(
                "Age/Sex Percentile Context",
                &[(
                    "MESA percentile calculator",
                    "",
                    RiskColour::Grey,
                    "A score at the ≥75th percentile for age/sex/race confers higher-than-expected risk, even with a low absolute score (e.g. CAC 10 in a 45-year-old male).",
                )],
            ),
        ],
    }
}

const CAC_NOTES: &[&str] = &[
    "CAC scanning uses non-contrast ECG-gated CT; effective dose ~1 mSv.",
    "CAC 0 at any age confers very low 10-year ASCVD risk — may defer statin in borderline-risk patients.",
    "CAC >400 indicates extensive coronary calcification; risk equivalent to known ASCVD.",
    "Repeat CAC scanning is generally not recommended — baseline score guides long-term therapy.",
];

/// Agatston total, either entered directly or summed from the vessels that were scored.
fn agatston_total(values: &FindingValues) -> Option<(f64, Option<Supplement>)> {
    if let Some(total) = values.number("score") {
        return Some((total, None));
    }
    if CORONARY_VESSELS
        .iter()
        .all(|(id, _)| values.number(id).is_none())
    {
        return None;
    }

    let mut breakdown = Supplement::new("Per-vessel Agatston scores");
    let mut total = 0.0;
    for (id, label) in CORONARY_VESSELS {
        let score = values.number_or_zero(id);
        total += score;
        breakdown = breakdown.row(label, format::number(score));
    }
    Some((total, Some(breakdown.row("Total", format::number(total)))))
}

fn coronary_calcium(values: &FindingValues) -> Option<Outcome> {
    let (score, breakdown) = agatston_total(values)?;
    if !Admissible::NonNegative.admits(score) {
        return None;
    }
    let shown = format::number(score);

    let verdict = Cascade::over(&score)
        .rule(
            "zero",
            |s| *s == 0.0,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    "CAC 0 — very low 10-year ASCVD event rate. Consider withholding or deferring statin in borderline or intermediate risk. Reassurance appropriate.",
                )
            },
        )
        .rule(
            "under 100",
            |s| *s < 100.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("CAC 1–99 (score: {shown}) — intermediate risk modifier. Statin initiation favoured in borderline/intermediate ASCVD risk patients."),
                )
            },
        )
        .rule(
            "under 300",
            |s| *s < 300.0,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("CAC 100–299 (score: {shown}) — significant coronary calcification. Statin therapy recommended; consider high-intensity. Cardiology referral."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::Intervention,
                format!("CAC ≥300 (score: {shown}) — extensive calcification. 10-year ASCVD risk >20%. High-intensity statin strongly indicated. Cardiology referral."),
            )
        });

    let outcome = verdict.into_outcome(CAC_NOTES);
    Some(match breakdown {
        Some(breakdown) => outcome.with_supplement(breakdown),
        None => outcome,
    })
}
