use crate::guidelines::domain::{FieldDescriptor, FindingValues, Outcome, Supplement, Tier};
use crate::guidelines::engine::{format, Admissible, Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn adrenal() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "adrenal",
        name: "Adrenal Incidentaloma",
        source: "ACR / Endocrine Society 2010 / 2016",
        description: "Management of incidentally discovered adrenal masses on CT or MRI",
        fields: vec![
            FieldDescriptor::number("size", "Mass Size", "cm", "e.g. 3.2"),
            FieldDescriptor::number("hu_unenhanced", "Unenhanced CT Attenuation", "HU", "e.g. 8")
                .help("Leave blank if CT not available"),
            FieldDescriptor::number("washout", "Absolute Contrast Washout", "%", "e.g. 65")
                .help("Optional: (EPH − DPH) / (EPH − UPH) × 100"),
            FieldDescriptor::radio(
                "bilateral",
                "Bilateral Masses?",
                &[("no", "No (unilateral)"), ("yes", "Yes (bilateral)")],
            ),
            FieldDescriptor::radio(
                "hormonal",
                "Hormonal Work-up Done?",
                &[
                    ("pending", "Pending / not done yet"),
                    ("normal", "Done — normal (non-functioning)"),
                    ("active", "Done — hypersecretion confirmed"),
                ],
            ),
        ],
        evaluator: adrenal_mass,
        criteria: Vec::new(),
    }
}

struct AdrenalMass {
    size: f64,
    attenuation: Option<f64>,
    washout: Option<f64>,
    hormonally_active: bool,
}

impl AdrenalMass {
    fn lipid_rich(&self) -> bool {
        self.attenuation.is_some_and(|hu| hu <= 10.0)
    }
}

const ADRENAL_NOTES: &[&str] = &[
    "All incidental adrenal masses should have biochemical evaluation: 1 mg DST (Cushing), plasma metanephrines (pheo), and aldosterone/renin if hypertensive.",
    "Bilateral masses require additional work-up to exclude metastases, bilateral pheo, and primary bilateral hyperplasia.",
    "History of malignancy significantly increases risk of adrenal metastasis.",
];

fn adrenal_mass(values: &FindingValues) -> Option<Outcome> {
    let mass = AdrenalMass {
        size: values.required("size", Admissible::Any)?,
        attenuation: values.number("hu_unenhanced"),
        washout: values.number("washout"),
        hormonally_active: values.is("hormonal", "active"),
    };
    let size = format::number(mass.size);
    let hu = mass.attenuation.map(format::number).unwrap_or_default();
    let washout = mass.washout.map(format::number).unwrap_or_default();

    let verdict = Cascade::over(&mass)
        .rule(
            "hormonally active",
            |m| m.hormonally_active,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    "Hormonally active mass — refer to endocrinology/surgery regardless of size.",
                )
            },
        )
        .rule(
            "lipid-rich under 4 cm",
            |m| m.lipid_rich() && m.size < 4.0,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    format!("Lipid-rich adenoma likely (HU={hu} ≤10). If non-functioning: no imaging follow-up needed. Hormonal work-up recommended."),
                )
            },
        )
        .rule(
            "lipid-rich up to 6 cm",
            |m| m.lipid_rich() && m.size <= 6.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    format!("Lipid-rich adenoma likely (HU={hu} ≤10) but size {size} cm warrants follow-up CT in 6–12 months. Surgery if growth."),
                )
            },
        )
        .rule(
            "lipid-rich over 6 cm",
            |m| m.lipid_rich(),
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    format!("Mass {size} cm — surgery recommended regardless of attenuation. Adrenocortical carcinoma cannot be excluded."),
                )
            },
        )
        .rule(
            "adenoma by washout",
            |m| m.attenuation.is_some() && m.washout.is_some_and(|w| w >= 60.0),
            |m| {
                let (tier, advice) = if m.size >= 4.0 {
                    (Tier::FurtherWorkup, "Urology/surgery consult for size ≥4 cm.")
                } else {
                    (
                        Tier::ShortTermFollowup,
                        "Annual follow-up CT × 2 years to confirm stability.",
                    )
                };
                Verdict::new(tier, format!("Adenoma likely (washout {washout}% ≥60%). {advice}"))
            },
        )
        .rule(
            "low washout",
            |m| m.attenuation.is_some() && m.washout.is_some(),
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Indeterminate/suspicious (HU={hu}, washout {washout}% <60%). Consider further imaging (MRI chemical shift) or biopsy. Surgery for growing or functional lesions."),
                )
            },
        )
        .rule(
            "indeterminate attenuation",
            |m| m.attenuation.is_some(),
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Indeterminate attenuation (HU={hu} >10). Recommend contrast washout CT or MRI chemical shift. If indeterminate, surgery for lesions ≥4 cm."),
                )
            },
        )
        .rule(
            "no attenuation under 4 cm",
            |m| m.size < 4.0,
            |_| {
                Verdict::new(
                    Tier::ShortTermFollowup,
                    "No unenhanced HU available. Follow-up imaging (unenhanced CT or MRI chemical shift) to characterise. Hormonal work-up recommended.",
                )
            },
        )
        .rule(
            "no attenuation up to 6 cm",
            |m| m.size <= 6.0,
            |_| {
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Mass {size} cm — unenhanced CT or MRI chemical shift for characterisation. High suspicion lesion: surgery discussion recommended."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::Intervention,
                format!("Mass {size} cm — surgery recommended. Risk of adrenocortical carcinoma increases significantly >6 cm."),
            )
        });

    Some(verdict.into_outcome(ADRENAL_NOTES))
}

pub(crate) fn adrenal_washout() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "adrenal_washout",
        name: "Adrenal Washout CT Calculator",
        source: "ACR Incidental Findings Committee 2017",
        description: "Absolute and relative contrast washout from a dedicated adrenal CT protocol",
        fields: vec![
            FieldDescriptor::number("unenhanced", "Unenhanced Attenuation", "HU", "e.g. 25"),
            FieldDescriptor::number("enhanced", "Portal Venous Phase Attenuation", "HU", "e.g. 80")
                .help("Approximately 60–75 seconds after injection"),
            FieldDescriptor::number("delayed", "Delayed Phase Attenuation", "HU", "e.g. 40")
                .help("15 minutes after injection"),
        ],
        evaluator: washout_study,
        criteria: Vec::new(),
    }
}

struct WashoutStudy {
    unenhanced: f64,
    enhanced: f64,
    delayed: f64,
}

impl WashoutStudy {
    fn absolute(&self) -> f64 {
        (self.enhanced - self.delayed) / (self.enhanced - self.unenhanced) * 100.0
    }

    fn relative(&self) -> f64 {
        (self.enhanced - self.delayed) / self.enhanced * 100.0
    }
}

const WASHOUT_NOTES: &[&str] = &[
    "Delayed phase must be acquired 15 minutes after contrast injection.",
    "Hypervascular metastases (renal cell carcinoma, HCC) and pheochromocytoma may also wash out rapidly.",
    "Lesions measuring ≤10 HU unenhanced are lipid-rich adenomas and need no washout study.",
];

fn washout_study(values: &FindingValues) -> Option<Outcome> {
    let study = WashoutStudy {
        unenhanced: values.required("unenhanced", Admissible::Any)?,
        enhanced: values.required("enhanced", Admissible::Any)?,
        delayed: values.required("delayed", Admissible::Any)?,
    };
    // Both ratios need a positive, enhancing portal phase.
    if study.enhanced <= study.unenhanced || study.enhanced <= 0.0 {
        return None;
    }

    let absolute = format::fixed(study.absolute(), 1);
    let relative = format::fixed(study.relative(), 1);
    let unenhanced = format::number(study.unenhanced);

    let verdict = Cascade::over(&study)
        .rule(
            "lipid-rich",
            |s| s.unenhanced <= 10.0,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    format!("Lipid-rich adenoma (unenhanced {unenhanced} HU ≤10). No further imaging required if non-functioning."),
                )
            },
        )
        .rule(
            "absolute washout 60% or more",
            |s| s.absolute() >= 60.0,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    format!("Washout consistent with adenoma (absolute washout {absolute}% ≥60%)."),
                )
            },
        )
        .rule(
            "relative washout 40% or more",
            |s| s.relative() >= 40.0,
            |_| {
                Verdict::new(
                    Tier::NoFollowup,
                    format!("Washout consistent with adenoma (relative washout {relative}% ≥40%)."),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::FurtherWorkup,
                format!("Indeterminate washout (absolute {absolute}% <60%, relative {relative}% <40%). Consider MRI chemical shift, biopsy or surgical consultation."),
            )
        });

    let report = format!(
        "Adrenal washout CT: unenhanced {} HU, portal venous {} HU, 15-minute delayed {} HU. Absolute washout {}%, relative washout {}%. {}",
        unenhanced,
        format::number(study.enhanced),
        format::number(study.delayed),
        absolute,
        relative,
        verdict.recommendation
    );
    let calculation = Supplement::new("Washout calculation")
        .detailed_row("Absolute washout", format!("{absolute}%"), "(E − D) / (E − U) × 100")
        .detailed_row("Relative washout", format!("{relative}%"), "(E − D) / E × 100");

    Some(
        verdict
            .into_outcome(WASHOUT_NOTES)
            .with_supplement(calculation)
            .with_report(report),
    )
}
