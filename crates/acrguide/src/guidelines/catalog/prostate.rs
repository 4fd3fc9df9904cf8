use crate::guidelines::domain::{
    CriteriaSection, FieldDescriptor, FindingValues, Outcome, RiskColour, Supplement, Tier,
};
use crate::guidelines::engine::{format, Admissible, Cascade};
use crate::guidelines::registry::GuidelineDefinition;

const ELLIPSOID_FACTOR: f64 = 0.52;

fn gland_fields() -> [FieldDescriptor; 4] {
    [
        FieldDescriptor::number("psa", "Serum PSA", "ng/mL", "e.g. 7.2"),
        FieldDescriptor::number("prost_l", "Prostate Length (AP)", "cm", "e.g. 4.8")
            .help("Anteroposterior on axial MRI/US"),
        FieldDescriptor::number("prost_w", "Prostate Width (transverse)", "cm", "e.g. 4.2")
            .help("Transverse dimension on axial image"),
        FieldDescriptor::number("prost_h", "Prostate Height (SI)", "cm", "e.g. 3.8")
            .help("Craniocaudal on sagittal/coronal image"),
    ]
}

pub(crate) fn pirads() -> GuidelineDefinition {
    let mut fields = vec![
        FieldDescriptor::radio(
            "zone",
            "Lesion Location",
            &[
                ("pz", "Peripheral Zone (PZ)"),
                ("tz", "Transition Zone (TZ) / Central Zone"),
            ],
        ),
        FieldDescriptor::select(
            "t2",
            "T2-Weighted Score",
            &[
                ("1", "1 — Uniform hyperintense (PZ) or uniform low/hypointense (TZ) — benign"),
                ("2", "2 — Linear, wedge-shaped, or diffuse hypointensity (PZ); or encapsulated nodule (TZ)"),
                ("3", "3 — Heterogeneous signal or non-encapsulated low signal (TZ); or non-circumscribed homogeneous hypointensity (PZ)"),
                ("4", "4 — Lenticular/non-circumscribed, homogeneous low signal, ≥1.5 cm"),
                ("5", "5 — Same as 4 but ≥1.5 cm or definite extraprostatic extension"),
            ],
        ),
        FieldDescriptor::select(
            "dwi",
            "DWI / ADC Score",
            &[
                ("1", "1 — No restriction"),
                ("2", "2 — Indistinct, mild diffuse hypointensity on ADC"),
                ("3", "3 — Focal mild/moderate hypointensity on ADC; b-value hyperintensity not marked"),
                ("4", "4 — Marked focal hypointensity on ADC; hyperintense on high b-value, <1.5 cm"),
                ("5", "5 — Same as 4 but ≥1.5 cm or definite extraprostatic extension"),
            ],
        ),
        FieldDescriptor::select(
            "dce",
            "DCE (Dynamic Contrast Enhancement)",
            &[
                ("neg", "Negative (no early enhancement or diffuse enhancement)"),
                ("pos", "Positive (focal, earlier than or simultaneous with adjacent tissue)"),
            ],
        ),
        FieldDescriptor::section("density_section", "PSA Density (optional)"),
    ];
    fields.extend(gland_fields());

    GuidelineDefinition {
        id: "pirads",
        name: "PI-RADS v2.1",
        source: "ACR/ESUR PI-RADS v2.1 2019",
        description: "Prostate Imaging-Reporting and Data System — multiparametric MRI (mpMRI)",
        fields,
        evaluator: prostate_lesion,
        criteria: pirads_criteria(),
    }
}

fn pirads_criteria() -> Vec<CriteriaSection> {
    vec![
        CriteriaSection::new(
            "T2-Weighted Imaging (T2WI) Criteria",
            &[
                ("T2: 1", "", RiskColour::Grey, "PZ: Uniform high signal (normal). TZ: Uniform low signal with sharply demarcated margin — classic benign prostatic hyperplasia nodule."),
                ("T2: 2", "", RiskColour::Grey, "PZ: Linear/wedge-shaped or diffuse hypointensity — not focal. TZ: Mostly low signal with obscured margins, not lenticular."),
                ("T2: 3", "", RiskColour::Yellow, "PZ: Focal mild/moderate hypointensity or heterogeneous signal not entirely encapsulated. TZ: Heterogeneous signal or non-circumscribed low signal, no lenticular shape."),
                ("T2: 4", "", RiskColour::Orange, "Focal marked hypointensity, well-defined, <1.5 cm. PZ: discrete rounded/lenticular lesion. TZ: lenticular or non-circumscribed, homogeneous low signal."),
                ("T2: 5", "", RiskColour::Red, "Same as T2:4 but ≥1.5 cm OR definite extraprostatic extension/invasion of seminal vesicles."),
            ],
        ),
        CriteriaSection::new(
            "DWI / ADC Map Criteria",
            &[
                ("DWI: 1", "", RiskColour::Grey, "No restriction of diffusion. ADC is not hypointense compared to normal tissue. No significant signal on high b-value (b≥1400)."),
                ("DWI: 2", "", RiskColour::Grey, "Indistinct mild hypointensity on ADC map. Isointense or indistinct hyperintensity on high b-value DWI."),
                ("DWI: 3", "", RiskColour::Yellow, "Focal mild/moderate ADC hypointensity. Focal low or intermediate signal on high b-value DWI."),
                ("DWI: 4", "", RiskColour::Orange, "Focal marked ADC hypointensity. Focal definite hyperintensity on high b-value DWI (b≥1400). Size <1.5 cm."),
                ("DWI: 5", "", RiskColour::Red, "Same as DWI:4 but ≥1.5 cm OR extraprostatic extension."),
            ],
        ),
        CriteriaSection::new(
            "DCE (Dynamic Contrast Enhancement)",
            &[
                ("DCE Negative", "", RiskColour::Grey, "No early enhancement, or diffuse enhancement not corresponding to a focal T2/DWI lesion, or enhancement corresponding to a BPH nodule."),
                ("DCE Positive", "", RiskColour::Orange, "Focal enhancement earlier than or simultaneous with adjacent normal prostatic tissue AND corresponds to a suspicious finding on T2WI or DWI. In PZ: upgrades DWI:3 to PI-RADS 4."),
            ],
        ),
    ]
}

struct ProstateLesion {
    peripheral: bool,
    t2: i64,
    dwi: i64,
    dce_positive: bool,
}

impl ProstateLesion {
    /// Primary sequence of the zone, with the same-zone upgrade to 4.
    fn score(&self) -> i64 {
        if self.peripheral {
            if self.dwi == 3 && self.dce_positive {
                4
            } else {
                self.dwi
            }
        } else if self.t2 == 3 && self.dwi == 5 {
            4
        } else {
            self.t2
        }
    }
}

/// Tier, label and management of one PI-RADS score; unknown scores read as 3.
fn pirads_category(score: i64) -> (Tier, &'static str, &'static str) {
    match score {
        1 => (
            Tier::NoFollowup,
            "PI-RADS 1",
            "Very low risk. Continue age-appropriate PSA screening.",
        ),
        2 => (Tier::NoFollowup, "PI-RADS 2", "Low risk. Continue PSA surveillance."),
        4 => (
            Tier::FurtherWorkup,
            "PI-RADS 4",
            "Clinically significant PCa likely. Targeted + systematic biopsy recommended.",
        ),
        5 => (
            Tier::Intervention,
            "PI-RADS 5",
            "Clinically significant PCa highly likely. Targeted + systematic biopsy; urology referral.",
        ),
        _ => (
            Tier::ShortTermFollowup,
            "PI-RADS 3",
            "Equivocal. Clinical correlation with PSA and PSAD. Consider targeted biopsy — discuss with urology.",
        ),
    }
}

const PIRADS_NOTES: &[&str] = &[
    "PI-RADS v2.1 applies to multiparametric MRI (T2WI + DWI + DCE).",
    "PSAD >0.15 ng/mL/cc increases risk of clinically significant PCa; may prompt biopsy even at PI-RADS 3.",
    "Equivocal PI-RADS 3 lesions in the PZ with positive DCE should be upgraded to PI-RADS 4.",
];

fn prostate_lesion(values: &FindingValues) -> Option<Outcome> {
    let lesion = ProstateLesion {
        peripheral: values.is("zone", "pz"),
        t2: values.integer_or("t2", 1),
        dwi: values.integer_or("dwi", 1),
        dce_positive: values.is("dce", "pos"),
    };
    let score = lesion.score();
    let (tier, label, management) = pirads_category(score);

    let zone = if lesion.peripheral {
        "peripheral zone"
    } else {
        "transition zone"
    };
    let dce = if lesion.dce_positive {
        "positive"
    } else {
        "negative"
    };
    let mut report = format!(
        "Prostate mpMRI (PI-RADS v2.1): {label} lesion in the {zone} (T2: {}, DWI: {}, DCE: {dce}). {management}",
        lesion.t2, lesion.dwi
    );

    let mut summary = Supplement::new("Score summary")
        .row("Zone", if lesion.peripheral { "Peripheral" } else { "Transition" })
        .row("T2", lesion.t2.to_string())
        .row("DWI", lesion.dwi.to_string())
        .row("DCE", if lesion.dce_positive { "Positive" } else { "Negative" })
        .row("PI-RADS", score.to_string());

    // Partial gland measurements leave the score untouched.
    if let Some(gland) = GlandDensity::measure(values) {
        report.push(' ');
        report.push_str(&gland.report());
        summary = gland.rows(summary);
    }

    Some(
        Outcome::new(tier, format!("{label} — {management}"))
            .with_notes(PIRADS_NOTES.iter().copied())
            .with_supplement(summary)
            .with_report(report),
    )
}

pub(crate) fn psa_density() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "psa_density",
        name: "PSA Density Calculator",
        source: "EAU / AUA Guidelines",
        description:
            "Prostate volume (ellipsoid formula) and PSA density with auto-generated report string",
        fields: gland_fields().to_vec(),
        evaluator: gland_density,
        criteria: vec![
            CriteriaSection::new(
                "PSAD Thresholds",
                &[
                    ("Normal — <0.10 ng/mL/cc", "Low", RiskColour::Green, "Low probability of clinically significant PCa. For PI-RADS 3 lesions, active surveillance may be appropriate. No biopsy threshold met on density alone."),
                    ("Borderline — 0.10–0.15 ng/mL/cc", "Borderline", RiskColour::Yellow, "Intermediate range. Clinical decision should incorporate PI-RADS score, age, family history, and prior biopsy results. Shared decision-making recommended."),
                    ("Elevated — 0.15–0.20 ng/mL/cc", "Elevated", RiskColour::Orange, "Widely cited biopsy threshold. PSAD ≥0.15 supports biopsy recommendation at PI-RADS 3 and reinforces recommendation at PI-RADS 4–5."),
                    ("High — ≥0.20 ng/mL/cc", "High", RiskColour::Red, "Strongly supports biopsy. High PSAD in context of PI-RADS 4–5 lesion warrants urgent urology referral and targeted + systematic biopsy."),
                ],
            ),
            CriteriaSection::new(
                "Volume Formula",
                &[
                    ("Ellipsoid formula", "", RiskColour::Grey, "Volume (mL) = Length (AP) × Width (Trans) × Height (SI) × 0.52. Widely validated on both MRI and transrectal ultrasound. Accuracy improves when dimensions are measured on orthogonal planes."),
                    ("PSA Density (PSAD)", "", RiskColour::Grey, "PSAD = Total PSA (ng/mL) ÷ Prostate Volume (mL). Corrects for the contribution of benign prostatic enlargement to PSA. A larger gland produces more PSA per gram, so PSAD adjusts for this."),
                ],
            ),
        ],
    }
}

const DENSITY_NOTES: &[&str] = &[
    "Ellipsoid formula: Volume = Length × Width × Height × 0.52.",
    "PSAD = PSA / prostate volume (ng/mL/cc = ng/mL/mL).",
    "PSAD ≥0.15 is the widely used threshold to support biopsy in equivocal (PI-RADS 3) lesions.",
    "Transition zone PSAD (PSAD-TZ) may be more specific but requires separate TZ volume measurement.",
];

fn gland_density(values: &FindingValues) -> Option<Outcome> {
    let gland = GlandDensity::measure(values)?;
    let band = gland.band();

    Some(
        Outcome::new(band.tier, band.interpretation)
            .with_notes(DENSITY_NOTES.iter().copied())
            .with_supplement(gland.rows(Supplement::new("Calculation")))
            .with_report(gland.report()),
    )
}

struct DensityBand {
    tier: Tier,
    label: &'static str,
    interpretation: &'static str,
}

/// Ellipsoid prostate volume and PSA density from one complete set of measurements.
struct GlandDensity {
    psa: f64,
    length: f64,
    width: f64,
    height: f64,
    volume: f64,
    density: f64,
}

impl GlandDensity {
    /// Every input must be a positive number.
    fn measure(values: &FindingValues) -> Option<Self> {
        let length = values.required("prost_l", Admissible::Positive)?;
        let width = values.required("prost_w", Admissible::Positive)?;
        let height = values.required("prost_h", Admissible::Positive)?;
        let psa = values.required("psa", Admissible::Positive)?;
        let volume = length * width * height * ELLIPSOID_FACTOR;

        Some(Self {
            psa,
            length,
            width,
            height,
            volume,
            density: psa / volume,
        })
    }

    fn band(&self) -> DensityBand {
        Cascade::over(self)
            .rule(
                "0.20 or more",
                |g| g.density >= 0.20,
                |_| DensityBand {
                    tier: Tier::Intervention,
                    label: "High",
                    interpretation: "PSAD ≥20.20 ng/mL/cc — high risk of clinically significant PCa. Biopsy strongly recommended regardless of PI-RADS score.",
                },
            )
            .rule(
                "0.15 or more",
                |g| g.density >= 0.15,
                |_| DensityBand {
                    tier: Tier::FurtherWorkup,
                    label: "Elevated",
                    interpretation: "PSAD 0.15–0.20 ng/mL/cc — elevated risk. Supports biopsy at PI-RADS 3 and above.",
                },
            )
            .rule(
                "0.10 or more",
                |g| g.density >= 0.10,
                |_| DensityBand {
                    tier: Tier::ShortTermFollowup,
                    label: "Borderline",
                    interpretation: "PSAD 0.10–0.15 ng/mL/cc — borderline. Use in conjunction with PI-RADS score and clinical context.",
                },
            )
            .otherwise(|_| DensityBand {
                tier: Tier::NoFollowup,
                label: "Normal",
                interpretation: "PSAD <0.10 ng/mL/cc — low risk. Active surveillance may be appropriate for PI-RADS 3 lesions.",
            })
    }

    fn dimensions(&self) -> String {
        format!(
            "{} × {} × {} cm",
            format::number(self.length),
            format::number(self.width),
            format::number(self.height)
        )
    }

    fn report(&self) -> String {
        let band = self.band();
        format!(
            "Prostate volume: {} mL ({}, ellipsoid formula). PSA: {} ng/mL. PSA density: {} ng/mL/cc ({}). {}",
            format::fixed(self.volume, 1),
            self.dimensions(),
            format::number(self.psa),
            format::fixed(self.density, 3),
            band.label.to_lowercase(),
            band.interpretation
        )
    }

    fn rows(&self, supplement: Supplement) -> Supplement {
        supplement
            .detailed_row(
                "Prostate volume",
                format!("{} mL", format::fixed(self.volume, 1)),
                self.dimensions(),
            )
            .row("PSA", format!("{} ng/mL", format::number(self.psa)))
            .detailed_row(
                "PSA density",
                format!("{} ng/mL/cc", format::fixed(self.density, 3)),
                self.band().label,
            )
    }
}
