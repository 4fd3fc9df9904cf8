use std::collections::BTreeSet;

use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Supplement, Tier,
};
use crate::guidelines::engine::{format, Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn pituitary_incidentaloma() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "pituitary_incidentaloma",
        name: "Incidental Pituitary Adenoma",
        source: "Endocrine Society 2011 / Pituitary Society 2023",
        description: "Management of incidentally discovered pituitary lesion on head CT or MRI",
        fields: vec![
            FieldDescriptor::number("size", "Maximum Lesion Diameter", "mm", "e.g. 8")
                .help("<10 mm = microadenoma; ≥10 mm = macroadenoma"),
            FieldDescriptor::radio(
                "visual",
                "Visual Symptoms or Field Defect?",
                &[("no", "No"), ("yes", "Yes — visual field loss or diplopia")],
            ),
            FieldDescriptor::radio(
                "hormone",
                "Hormone Excess Symptoms?",
                &[
                    ("no", "No (likely non-functioning)"),
                    ("yes", "Yes — Cushing's features, acromegaly, galactorrhoea, amenorrhoea"),
                ],
            ),
            FieldDescriptor::radio(
                "cavernous",
                "Cavernous Sinus Invasion on Imaging?",
                &[
                    ("no", "No"),
                    ("possible", "Possible / indeterminate"),
                    ("yes", "Definite cavernous sinus invasion"),
                ],
            ),
        ],
        evaluator: pituitary_lesion,
        criteria: vec![
            CriteriaSection::new(
                "Size Classification",
                &[
                    ("Microadenoma — <10 mm", "Low", RiskColour::Green, "Low risk of growth (<10%). Annual MRI initially. Very low risk of chiasmal compression. Hormonal workup at baseline."),
                    ("Macroadenoma — ≥10 mm", "Moderate", RiskColour::Orange, "Higher risk of growth, visual symptoms, hypopituitarism. Neurosurgery involvement. Visual fields mandatory. Full hormone panel required."),
                ],
            ),
            CriteriaSection::new(
                "Hormonal Subtypes",
                &[
                    ("Prolactinoma", "Functional", RiskColour::Yellow, "Most common functioning adenoma. Serum prolactin >200 ng/mL highly specific. First-line: cabergoline or bromocriptine. Surgery reserved for drug-resistant cases."),
                    ("Cushing's — ACTH-secreting", "Functional", RiskColour::Orange, "24h urinary cortisol, midnight salivary cortisol. Petrosal sinus sampling may localise. Transsphenoidal surgery first-line."),
                    ("Acromegaly — GH-secreting", "Functional", RiskColour::Orange, "IGF-1 elevation; OGTT fails to suppress GH. Transsphenoidal surgery ± somatostatin analogue. Cardiac and sleep apnoea screening required."),
                    ("Non-functioning", "Incidental", RiskColour::Grey, "Most incidentalomas. No hormone excess. Risk of hypopituitarism from mass effect. Follow-up imaging and baseline pituitary panel."),
                ],
            ),
        ],
    }
}

const PITUITARY_NOTES: &[&str] = &[
    "All incidentally found pituitary adenomas require endocrinology referral.",
    "Baseline hormonal workup: prolactin, IGF-1, ACTH/cortisol, LH/FSH, sex steroids, TSH/fT4.",
    "Dedicated pituitary protocol MRI (3T, thin slices, dynamic contrast) if not already performed.",
    "Pituitary apoplexy (sudden headache, visual loss, altered consciousness) — emergency neurosurgery.",
];

struct PituitaryLesion {
    size: f64,
    visual: bool,
    hormonal: bool,
    cavernous_invasion: bool,
}

impl PituitaryLesion {
    fn macroadenoma(&self) -> bool {
        self.size >= 10.0
    }
}

fn pituitary_lesion(values: &FindingValues) -> Option<Outcome> {
    let lesion = PituitaryLesion {
        size: values.required("size", Admissible::Positive)?,
        visual: values.is("visual", "yes"),
        hormonal: values.is("hormone", "yes"),
        cavernous_invasion: values.is("cavernous", "yes"),
    };
    let size = format::number(lesion.size);

    let verdict = Cascade::over(&lesion)
        .rule(
            "visual symptoms",
            |l| l.visual,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    "Visual symptoms or field defect — urgent ophthalmology + neurosurgery referral. Likely chiasmal compression.",
                )
            },
        )
        .rule(
            "hormone excess",
            |l| l.hormonal,
            |l| {
                let kind = if l.macroadenoma() {
                    "Macroadenoma"
                } else {
                    "Microadenoma"
                };
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("{kind} with hormonal excess — endocrinology referral. Functional adenoma requires specific treatment (dopamine agonist for prolactinoma; surgery for Cushing's/acromegaly)."),
                )
            },
        )
        .rule(
            "macroadenoma",
            |l| l.macroadenoma(),
            |l| {
                let invasion = if l.cavernous_invasion {
                    " Cavernous sinus invasion suggests aggressive behaviour."
                } else {
                    ""
                };
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Macroadenoma ({size} mm) — dedicated pituitary MRI, full hormone panel, formal visual fields. Neurosurgery referral.{invasion} MRI at 6 months, then annually."),
                )
            },
        )
        .rule(
            "under 5 mm",
            |l| l.size < 5.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("Microincidentaloma ({size} mm) — low growth risk. MRI at 1 year; if stable, repeat at 3 years, then discharge if no change."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::ShortTermFollowup,
                format!("Microadenoma ({size} mm) — non-functioning. MRI at 6–12 months. Endocrinology review. If stable ×2 years, extend to 2-yearly, then discharge."),
            )
        });

    Some(verdict.into_outcome(PITUITARY_NOTES))
}

pub(crate) fn intracranial_aneurysm() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "intracranial_aneurysm",
        name: "Unruptured Intracranial Aneurysm — Risk Stratification",
        source: "AHA/ASA 2015 / ISUIA",
        description: "Management of incidentally discovered unruptured intracranial aneurysm",
        fields: vec![
            FieldDescriptor::number("size", "Maximum Aneurysm Diameter", "mm", "e.g. 6")
                .help("Largest dimension on CTA or MRA"),
            FieldDescriptor::select(
                "location",
                "Aneurysm Location",
                &[
                    ("anterior", "Anterior circulation (ICA, MCA, ACA)"),
                    ("pcom", "Posterior communicating artery (PCOM)"),
                    ("posterior", "Posterior circulation (basilar, posterior fossa, PICA)"),
                ],
            ),
            FieldDescriptor::radio(
                "symptoms",
                "Symptomatic?",
                &[
                    ("no", "Incidental / asymptomatic"),
                    ("yes", "Symptomatic — headache, 3rd nerve palsy, visual change"),
                ],
            ),
            FieldDescriptor::radio(
                "prior_sah",
                "Prior SAH from a different aneurysm?",
                &[("no", "No"), ("yes", "Yes")],
            ),
            FieldDescriptor::radio(
                "morphology",
                "Aneurysm Morphology",
                &[
                    ("regular", "Regular / smooth dome"),
                    ("irregular", "Irregular / lobulated / bleb present"),
                ],
            ),
        ],
        evaluator: cerebral_aneurysm,
        criteria: vec![
            CriteriaSection::new(
                "Size & Rupture Risk (ISUIA)",
                &[
                    ("<5 mm — Anterior circulation", "Low", RiskColour::Green, "5-year rupture risk ~0.5%. Surveillance imaging recommended. Annual MRA typically adequate."),
                    ("5–9.9 mm", "Intermediate", RiskColour::Yellow, "5-year rupture risk 1–3%. PHASES score guides treatment vs surveillance. Neurovascular team decision."),
                    ("10–24 mm", "High", RiskColour::Orange, "5-year rupture risk 3–6%. Treatment (clipping or coiling) generally recommended in suitable patients."),
                    ("≥25 mm — Giant", "Very High", RiskColour::Red, "Annual rupture rate ~6%. Treatment usually advised. Complex anatomy may require staged procedures."),
                    ("Posterior circulation", "Higher", RiskColour::Orange, "Basilar tip, PICA, and vertebral aneurysms carry 2–4× higher rupture risk than anterior circulation lesions of the same size."),
                ],
            ),
            CriteriaSection::new(
                "High-Risk Features",
                &[
                    ("Irregular morphology / bleb", "Risk+", RiskColour::Red, "Lobulation, multilobed shape, or daughter sac (bleb) are independent predictors of rupture. Lower threshold for treatment."),
                    ("Prior SAH from another aneurysm", "Risk+", RiskColour::Red, "History of SAH increases rupture risk of co-existing aneurysm. Lower size threshold for intervention."),
                    ("Symptomatic (3rd nerve palsy)", "Urgent", RiskColour::Red, "3rd nerve palsy from PCOM aneurysm indicates active expansion. Urgent neurovascular intervention."),
                ],
            ),
        ],
    }
}

const ANEURYSM_NOTES: &[&str] = &[
    "All unruptured intracranial aneurysms require neurovascular specialist review.",
    "PHASES score integrates: Population, Hypertension, Age, Size, Earlier SAH, Site.",
    "Irregular morphology (bleb, daughter sac) is an independent risk factor for rupture.",
    "Smoking cessation and BP control reduce rupture risk.",
    "CTA or DSA with 3D reconstruction recommended for treatment planning.",
];

struct CerebralAneurysm {
    size: f64,
    posterior: bool,
    symptomatic: bool,
    prior_haemorrhage: bool,
    irregular: bool,
}

impl CerebralAneurysm {
    /// Present high-risk features, in reporting order.
    fn high_risk_features(&self) -> Vec<&'static str> {
        [
            (self.irregular, "irregular morphology"),
            (self.prior_haemorrhage, "prior SAH"),
            (self.posterior, "posterior circulation"),
        ]
        .into_iter()
        .filter_map(|(present, feature)| present.then_some(feature))
        .collect()
    }
}

fn cerebral_aneurysm(values: &FindingValues) -> Option<Outcome> {
    let aneurysm = CerebralAneurysm {
        size: values.required("size", Admissible::Positive)?,
        posterior: values.is("location", "posterior"),
        symptomatic: values.is("symptoms", "yes"),
        prior_haemorrhage: values.is("prior_sah", "yes"),
        irregular: values.is("morphology", "irregular"),
    };
    let size = format::number(aneurysm.size);
    let posterior_risk = |a: &CerebralAneurysm, text: &'static str| if a.posterior { text } else { "" };

    let verdict = Cascade::over(&aneurysm)
        .rule(
            "symptomatic",
            |a| a.symptomatic,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    "Symptomatic aneurysm — urgent neurovascular referral. High rupture risk (e.g. 3rd nerve palsy from PCOM aneurysm).",
                )
            },
        )
        .rule(
            "small anterior without risk features",
            |a| a.size < 5.0 && a.high_risk_features().is_empty(),
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("Small anterior aneurysm ({size} mm) — low rupture risk. MRA/CTA at 6–12 months, then annually ×3 years if stable. Neurovascular referral."),
                )
            },
        )
        .rule(
            "under 7 mm without risk features",
            |a| a.size < 7.0 && a.high_risk_features().is_empty(),
            |a| {
                let posterior = posterior_risk(a, "Posterior circulation — higher risk for same size. ");
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("{size} mm aneurysm — intermediate risk. Neurovascular MDT review. {posterior}Consider treatment vs surveillance."),
                )
            },
        )
        .rule(
            "under 7 mm with risk features",
            |a| a.size < 7.0,
            |a| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!(
                        "{size} mm aneurysm with high-risk features ({}) — neurovascular MDT review; treatment likely recommended.",
                        a.high_risk_features().join(", ")
                    ),
                )
            },
        )
        .otherwise(|a| {
            let posterior = posterior_risk(a, "Posterior circulation — higher risk. ");
            let irregular = if a.irregular {
                "Irregular morphology further increases risk."
            } else {
                ""
            };
            Verdict::new(
                Tier::Intervention,
                format!("Large aneurysm ({size} mm) — elevated rupture risk. Neurovascular surgery referral. {posterior}{irregular}"),
            )
        });

    Some(verdict.into_outcome(ANEURYSM_NOTES))
}

pub(crate) fn fazekas() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "fazekas",
        name: "White Matter Hyperintensities — Fazekas Scale",
        source: "Fazekas et al. 1987 / STRIVE 2013",
        description:
            "Grading of T2/FLAIR white matter hyperintensities as a marker of cerebral small vessel disease",
        fields: vec![
            FieldDescriptor::select(
                "pvwmh",
                "Periventricular WMH",
                &[
                    ("0", "Grade 0 — Absent"),
                    ("1", "Grade 1 — Caps or pencil-thin lining"),
                    ("2", "Grade 2 — Smooth halo"),
                    ("3", "Grade 3 — Irregular, extending into deep WM"),
                ],
            )
            .help("T2/FLAIR signal change around lateral ventricles"),
            FieldDescriptor::select(
                "dwmh",
                "Deep / Subcortical WMH",
                &[
                    ("0", "Grade 0 — Absent"),
                    ("1", "Grade 1 — Punctate foci"),
                    ("2", "Grade 2 — Beginning confluence (early confluent)"),
                    ("3", "Grade 3 — Large confluent areas"),
                ],
            )
            .help("T2/FLAIR foci in deep white matter away from ventricles"),
            FieldDescriptor::radio(
                "clinical",
                "Clinical Context",
                &[
                    ("asymptomatic", "Asymptomatic / incidental"),
                    ("cognitive", "Cognitive symptoms or memory concern"),
                    ("stroke", "Stroke / TIA workup"),
                ],
            ),
        ],
        evaluator: white_matter,
        criteria: vec![
            CriteriaSection::new(
                "Periventricular WMH (PVWMH)",
                &[
                    ("Grade 0 — Absent", "Normal", RiskColour::Green, "No periventricular signal change."),
                    ("Grade 1 — Caps / pencil-thin lining", "Mild", RiskColour::Green, "Thin cap at frontal or occipital horn tips. Common in healthy adults >50. Usually normal variant."),
                    ("Grade 2 — Smooth halo", "Moderate", RiskColour::Yellow, "Smooth periventricular rim/halo. Moderate small vessel disease. Vascular risk optimisation recommended."),
                    ("Grade 3 — Irregular, extends into WM", "Severe", RiskColour::Red, "Irregular periventricular signal extending into deep white matter. Significant SVD burden. Neurology referral."),
                ],
            ),
            CriteriaSection::new(
                "Deep / Subcortical WMH (DWMH)",
                &[
                    ("Grade 0 — Absent", "Normal", RiskColour::Green, "No deep white matter foci."),
                    ("Grade 1 — Punctate foci", "Mild", RiskColour::Green, "Small discrete hyperintense foci. Very common in older adults. Represent enlarged perivascular spaces or minimal SVD."),
                    ("Grade 2 — Beginning confluence", "Moderate", RiskColour::Yellow, "Early confluent lesions. Moderate SVD. Associated with subtle cognitive and gait effects."),
                    ("Grade 3 — Large confluent areas", "Severe", RiskColour::Red, "Large areas of confluent WMH. Severe SVD. Significantly elevated dementia and stroke risk. Cognitive evaluation essential."),
                ],
            ),
        ],
    }
}

const FAZEKAS_NOTES: &[&str] = &[
    "Fazekas scale is ordinal — not designed for volumetric quantification.",
    "WMH are associated with vascular risk factors: hypertension, diabetes, smoking, hyperlipidaemia.",
    "Confluent WMH (Fazekas ≥2) associated with increased stroke risk and cognitive decline.",
    "FLAIR is the most sensitive MRI sequence for WMH detection.",
    "Lacunes in basal ganglia or thalamus suggest more severe small vessel disease.",
];

struct WhiteMatter {
    periventricular: i64,
    deep: i64,
}

fn white_matter(values: &FindingValues) -> Option<Outcome> {
    let grades = WhiteMatter {
        periventricular: values.integer_or("pvwmh", 0),
        deep: values.integer_or("dwmh", 0),
    };
    let prefix = format!("Fazekas PV {} / Deep {}", grades.periventricular, grades.deep);
    let total = |g: &WhiteMatter| g.periventricular + g.deep;

    let verdict = Cascade::over(&grades)
        .rule(
            "total 1 or less",
            |g| total(g) <= 1,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    format!("{prefix} — minimal white matter changes. Age-related or mild SVD. No specific intervention required."),
                )
            },
        )
        .rule(
            "total 3 or less without grade 3",
            |g| total(g) <= 3 && g.periventricular <= 2 && g.deep <= 2,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("{prefix} — moderate WMH. Cerebral small vessel disease. Vascular risk factor optimisation recommended (BP, lipids, glucose, smoking cessation). Neurology review if symptomatic."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::FurtherWorkup,
                format!("{prefix} — severe/confluent WMH. Significant cerebral SVD. Neurology referral. Cognitive assessment. Aggressive vascular risk factor management."),
            )
        });

    Some(verdict.into_outcome(FAZEKAS_NOTES))
}

const ASPECTS_REGIONS: &[(&str, &str)] = &[
    ("C", "Caudate"),
    ("L", "Lentiform nucleus"),
    ("IC", "Internal capsule"),
    ("I", "Insular ribbon"),
    ("M1", "M1 — anterior MCA cortex"),
    ("M2", "M2 — MCA cortex lateral to insular ribbon"),
    ("M3", "M3 — posterior MCA cortex"),
    ("M4", "M4 — anterior MCA territory, superior to M1"),
    ("M5", "M5 — lateral MCA territory, superior to M2"),
    ("M6", "M6 — posterior MCA territory, superior to M3"),
];

pub(crate) fn aspects() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "aspects",
        name: "ASPECTS — Alberta Stroke Program Early CT Score",
        source: "Barber et al. 2000 / AHA/ASA 2019 Acute Ischaemic Stroke",
        description:
            "Early ischaemic change in the MCA territory on non-contrast CT for thrombectomy triage",
        fields: vec![
            FieldDescriptor::checkbox(
                "regions",
                "Regions with Early Ischaemic Change (subtract 1 each)",
                ASPECTS_REGIONS,
            )
            .help("Focal swelling or parenchymal hypoattenuation on non-contrast CT"),
            FieldDescriptor::radio(
                "lvo",
                "Large Vessel Occlusion on CTA?",
                &[
                    ("yes", "Yes — ICA or proximal MCA (M1/M2) occlusion"),
                    ("no", "No occlusion"),
                    ("unknown", "CTA not yet performed"),
                ],
            ),
        ],
        evaluator: early_ischaemia,
        criteria: vec![
            CriteriaSection::new(
                "Score Interpretation",
                &[
                    ("ASPECTS 10", "Normal", RiskColour::Green, "No early ischaemic change in the MCA territory."),
                    ("ASPECTS 6–9", "Favourable", RiskColour::Yellow, "Limited early ischaemic change. Eligible for thrombectomy evaluation when a large vessel occlusion is present."),
                    ("ASPECTS 0–5", "Extensive", RiskColour::Orange, "Large established infarct core. Higher risk of haemorrhagic transformation; thrombectomy benefit is decided case by case by the stroke team."),
                ],
            ),
            CriteriaSection::new(
                "Scored Regions",
                &[
                    ("Subcortical (4)", "", RiskColour::Grey, "Caudate (C), lentiform nucleus (L), internal capsule (IC), insular ribbon (I)."),
                    ("Cortical (6)", "", RiskColour::Grey, "M1–M3 at the level of the basal ganglia; M4–M6 at the level of the ventricles above the basal ganglia."),
                ],
            ),
        ],
    }
}

const ASPECTS_NOTES: &[&str] = &[
    "ASPECTS starts at 10 and subtracts one point for each MCA territory region with early ischaemic change.",
    "Assess on thin-section non-contrast CT with narrow window settings; compare both hemispheres.",
    "ASPECTS applies to the anterior circulation only and does not assess posterior circulation strokes.",
];

/// Involved regions, deduplicated; unknown codes are ignored.
fn involved_regions(values: &FindingValues) -> Vec<&'static str> {
    let ticked: BTreeSet<&str> = values.list("regions").into_iter().collect();
    ASPECTS_REGIONS
        .iter()
        .map(|&(code, _)| code)
        .filter(|code| ticked.contains(code))
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Occlusion {
    Present,
    Absent,
    Unknown,
}

struct EarlyIschaemia {
    score: usize,
    occlusion: Occlusion,
}

fn early_ischaemia(values: &FindingValues) -> Option<Outcome> {
    let regions = involved_regions(values);
    let ischaemia = EarlyIschaemia {
        score: ASPECTS_REGIONS.len() - regions.len(),
        occlusion: match values.text("lvo") {
            "yes" => Occlusion::Present,
            "no" => Occlusion::Absent,
            _ => Occlusion::Unknown,
        },
    };
    let score = ischaemia.score;

    let verdict = Cascade::over(&ischaemia)
        .rule(
            "5 or less",
            |e| e.score <= 5,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("ASPECTS {score} — extensive early ischaemic change. Urgent stroke team review; thrombectomy decision individualised given large core."),
                )
            },
        )
        .rule(
            "large vessel occlusion",
            |e| e.occlusion == Occlusion::Present,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    format!("ASPECTS {score} with large vessel occlusion — urgent thrombectomy evaluation. Activate stroke team."),
                )
            },
        )
        .rule(
            "no occlusion",
            |e| e.occlusion == Occlusion::Absent,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("ASPECTS {score} without large vessel occlusion — stroke unit care and follow-up imaging per stroke team."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::ImagingRecommended,
                format!("ASPECTS {score} — CT angiography recommended to assess for large vessel occlusion."),
            )
        });

    let involved = if regions.is_empty() {
        "none".to_string()
    } else {
        regions.join(", ")
    };
    let report = format!("ASPECTS: {score}/10 (involved regions: {involved}).");

    Some(verdict.into_outcome(ASPECTS_NOTES).with_report(report))
}

/// 30-day mortality by total ICH score; totals above 6 read as 6.
const ICH_MORTALITY: [u8; 7] = [0, 13, 26, 72, 97, 100, 100];

pub(crate) fn ich_score() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "ich_score",
        name: "ICH Score — Intracerebral Haemorrhage",
        source: "Hemphill et al. 2001 / AHA/ASA 2022 ICH Guideline",
        description: "Clinical grading of spontaneous intracerebral haemorrhage with 30-day mortality",
        fields: vec![
            FieldDescriptor::number("gcs", "Glasgow Coma Scale", "", "3–15"),
            FieldDescriptor::number("volume", "Haematoma Volume", "mL", "e.g. 25")
                .help("Leave blank to estimate with ABC/2 below"),
            FieldDescriptor::section("abc_section", "ABC/2 estimate (used when volume is blank)"),
            FieldDescriptor::number("dim_a", "A — Largest Diameter", "cm", "e.g. 4.0"),
            FieldDescriptor::number("dim_b", "B — Perpendicular Diameter", "cm", "e.g. 3.0"),
            FieldDescriptor::number("dim_c", "C — Craniocaudal Extent", "cm", "e.g. 3.5")
                .help("Number of slices with haemorrhage × slice thickness"),
            FieldDescriptor::radio(
                "ivh",
                "Intraventricular Extension?",
                &[("no", "No"), ("yes", "Yes")],
            ),
            FieldDescriptor::radio(
                "location",
                "Haemorrhage Origin",
                &[
                    ("supratentorial", "Supratentorial"),
                    ("infratentorial", "Infratentorial (brainstem, cerebellum)"),
                ],
            ),
            FieldDescriptor::number("age", "Patient Age", "years", "e.g. 72"),
        ],
        evaluator: intracerebral_haemorrhage,
        criteria: vec![
            CriteriaSection::new(
                "Score Components",
                &[
                    ("GCS 3–4", "+2", RiskColour::Red, "Deep coma on presentation."),
                    ("GCS 5–12", "+1", RiskColour::Orange, "Reduced level of consciousness. GCS 13–15 scores 0."),
                    ("Volume ≥30 mL", "+1", RiskColour::Orange, "Measured volumetrically or estimated with ABC/2."),
                    ("Intraventricular haemorrhage", "+1", RiskColour::Orange, "Any extension of blood into the ventricular system."),
                    ("Infratentorial origin", "+1", RiskColour::Orange, "Haemorrhage arising in the brainstem or cerebellum."),
                    ("Age ≥80", "+1", RiskColour::Orange, "Age at presentation."),
                ],
            ),
            CriteriaSection::new(
                "30-day Mortality",
                &[
                    ("ICH score 0", "0%", RiskColour::Green, "No deaths in the derivation cohort."),
                    ("ICH score 1", "13%", RiskColour::Yellow, "Low predicted mortality."),
                    ("ICH score 2", "26%", RiskColour::Orange, "Moderate predicted mortality."),
                    ("ICH score 3", "72%", RiskColour::Red, "High predicted mortality."),
                    ("ICH score 4", "97%", RiskColour::Red, "Very high predicted mortality."),
                    ("ICH score 5–6", "100%", RiskColour::Red, "Uniformly fatal in the derivation cohort."),
                ],
            ),
        ],
    }
}

const ICH_NOTES: &[&str] = &[
    "ICH score after Hemphill et al. 2001; mortality figures are 30-day estimates from the derivation cohort.",
    "The ICH score is a grading scale for communication and should not be used as the sole basis to limit care.",
    "ABC/2 approximates the volume of an ellipsoid haematoma and overestimates irregular haemorrhages.",
];

struct Haemorrhage {
    gcs: f64,
    volume: f64,
    intraventricular: bool,
    infratentorial: bool,
    age: f64,
}

impl Haemorrhage {
    fn gcs_points(&self) -> usize {
        if self.gcs <= 4.0 {
            2
        } else if self.gcs <= 12.0 {
            1
        } else {
            0
        }
    }

    fn components(&self) -> [(&'static str, usize); 5] {
        [
            ("GCS", self.gcs_points()),
            ("Volume ≥30 mL", usize::from(self.volume >= 30.0)),
            ("Intraventricular haemorrhage", usize::from(self.intraventricular)),
            ("Infratentorial origin", usize::from(self.infratentorial)),
            ("Age ≥80", usize::from(self.age >= 80.0)),
        ]
    }

    fn score(&self) -> usize {
        self.components().iter().map(|(_, points)| points).sum()
    }

    fn mortality(&self) -> u8 {
        ICH_MORTALITY[self.score().min(ICH_MORTALITY.len() - 1)]
    }
}

/// Entered volume, or ABC/2 when all three diameters are positive.
fn haematoma_volume(values: &FindingValues) -> Option<f64> {
    if let Some(volume) = values.number("volume") {
        return Admissible::NonNegative.admits(volume).then_some(volume);
    }
    let a = values.required("dim_a", Admissible::Positive)?;
    let b = values.required("dim_b", Admissible::Positive)?;
    let c = values.required("dim_c", Admissible::Positive)?;
    Some(a * b * c / 2.0)
}

fn intracerebral_haemorrhage(values: &FindingValues) -> Option<Outcome> {
    let gcs = values.required("gcs", Admissible::Any)?;
    if !(3.0..=15.0).contains(&gcs) {
        return None;
    }
    let bleed = Haemorrhage {
        gcs,
        volume: haematoma_volume(values)?,
        intraventricular: values.is("ivh", "yes"),
        infratentorial: values.is("location", "infratentorial"),
        age: values.number_or_zero("age"),
    };
    let score = bleed.score();
    let mortality = bleed.mortality();

    let verdict = Cascade::over(&bleed)
        .rule(
            "score 3 or more",
            |b| b.score() >= 3,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    format!("ICH score {score} — predicted 30-day mortality {mortality}%. Neurocritical care and urgent neurosurgical consultation; goals-of-care discussion with family."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::FurtherWorkup,
                format!("ICH score {score} — predicted 30-day mortality {mortality}%. Stroke unit or neurocritical care admission, blood pressure control and reversal of anticoagulation. Repeat CT at 6–24 hours for haematoma expansion."),
            )
        });

    let location = if bleed.infratentorial {
        "infratentorial"
    } else {
        "supratentorial"
    };
    let report = format!(
        "ICH score: {score}/6 (GCS {}, volume {} mL, IVH {}, {location}, age {}). Estimated 30-day mortality {mortality}%.",
        format::number(bleed.gcs),
        format::fixed(bleed.volume, 1),
        if bleed.intraventricular { "present" } else { "absent" },
        format::number(bleed.age),
    );
    let breakdown = bleed
        .components()
        .into_iter()
        .fold(Supplement::new("Score components"), |supplement, (label, points)| {
            supplement.row(label, format!("+{points}"))
        })
        .detailed_row("Total", format!("{score}/6"), format!("{mortality}% 30-day mortality"));

    Some(
        verdict
            .into_outcome(ICH_NOTES)
            .with_supplement(breakdown)
            .with_report(report),
    )
}
