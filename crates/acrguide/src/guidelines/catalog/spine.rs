use crate::guidelines::domain::{FieldDescriptor, FindingValues, Outcome, Tier};
use crate::guidelines::engine::{Cascade, Verdict};
use crate::guidelines::registry::GuidelineDefinition;

pub(crate) fn incidental_vertebral() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "incidental_vertebral",
        name: "Incidental Vertebral Compression Fracture",
        source: "ACR Appropriateness Criteria / NOF Guidelines",
        description:
            "Workup of incidentally discovered vertebral compression or height loss on CT or MRI",
        fields: vec![
            FieldDescriptor::number("height_loss", "Estimated Height Loss", "%", "e.g. 20")
                .help("Grade: mild <20%, moderate 20–40%, severe >40%"),
            FieldDescriptor::radio(
                "acuity",
                "Fracture Acuity (if known)",
                &[
                    ("unknown", "Unknown / indeterminate"),
                    ("acute", "Acute / subacute (marrow oedema on MRI)"),
                    ("chronic", "Chronic (no oedema, sclerotic)"),
                ],
            ),
            FieldDescriptor::radio(
                "malignancy",
                "Underlying Malignancy?",
                &[("no", "No known malignancy"), ("yes", "Yes — known or suspected malignancy")],
            ),
            FieldDescriptor::radio(
                "osteoporosis",
                "Known Osteoporosis / High Risk?",
                &[
                    ("no", "No"),
                    ("yes", "Yes — osteoporosis or steroid use"),
                    ("unknown", "Unknown"),
                ],
            ),
        ],
        evaluator: compression_fracture,
        criteria: Vec::new(),
    }
}

const VERTEBRAL_NOTES: &[&str] = &[
    "All incidental vertebral fractures warrant DEXA scan if not recent.",
    "MRI is the preferred modality to assess acuity and marrow signal.",
    "Pathological fracture (malignancy) has distinct imaging features: convex posterior cortex, marrow replacement, soft-tissue mass.",
];

struct CompressionFracture {
    height_loss: f64,
    malignant: bool,
    acute: bool,
}

fn compression_fracture(values: &FindingValues) -> Option<Outcome> {
    let fracture = CompressionFracture {
        height_loss: values.number_or_zero("height_loss"),
        malignant: values.is("malignancy", "yes"),
        acute: values.is("acuity", "acute"),
    };

    let verdict = Cascade::over(&fracture)
        .rule(
            "known or suspected malignancy",
            |f| f.malignant,
            |_| {
                Verdict::new(
                    Tier::Intervention,
                    "Known/suspected malignancy — MRI spine for staging, pathological fracture assessment. Oncology referral.",
                )
            },
        )
        .rule(
            "acute",
            |f| f.acute,
            |f| {
                let height = if f.height_loss > 40.0 {
                    "Severe height loss: consider vertebroplasty/kyphoplasty."
                } else {
                    "Conservative management initially."
                };
                Verdict::new(
                    Tier::FurtherWorkup,
                    format!("Acute fracture — pain management, DEXA scan, anti-fracture therapy referral (endocrinology/rheumatology). {height}"),
                )
            },
        )
        .otherwise(|_| {
            Verdict::new(
                Tier::ShortTermFollowup,
                "Chronic/indeterminate fracture — DEXA scan, vertebral fracture assessment (VFA), anti-fracture therapy evaluation. No urgent intervention needed.",
            )
        });

    Some(verdict.into_outcome(VERTEBRAL_NOTES))
}

pub(crate) fn incidental_disc() -> GuidelineDefinition {
    GuidelineDefinition {
        id: "incidental_disc",
        name: "Incidental Disc and Degenerative Finding",
        source: "ACR Appropriateness Criteria / NASS Guidelines",
        description: "Common incidental lumbar/cervical spine findings — contextualising significance",
        fields: vec![
            FieldDescriptor::select(
                "finding",
                "Primary Finding",
                &[
                    ("bulge", "Disc bulge (diffuse, <25% circumferential)"),
                    ("protrusion", "Disc protrusion (focal, broad-based)"),
                    ("extrusion", "Disc extrusion (extends beyond disc space)"),
                    ("sequestrum", "Sequestrated / free disc fragment"),
                    ("schmorl", "Schmorl's node"),
                    ("modic", "Modic endplate change"),
                    ("facet", "Facet arthropathy"),
                    ("listhesis", "Spondylolisthesis"),
                ],
            ),
            FieldDescriptor::radio(
                "symptoms",
                "Patient Symptoms?",
                &[
                    ("none", "Asymptomatic / incidental"),
                    ("axial", "Axial pain only (no radiculopathy)"),
                    ("radicular", "Radiculopathy / myelopathy"),
                ],
            ),
        ],
        evaluator: degenerative_finding,
        criteria: Vec::new(),
    }
}

const DISC_NOTES: &[&str] = &[
    "Most degenerative findings are common in the asymptomatic population and do not require intervention.",
    "Imaging findings must always be correlated with clinical symptoms.",
    "Red flag symptoms (bladder/bowel dysfunction, progressive weakness) warrant urgent evaluation.",
];

const RADICULOPATHY_NOTE: &str =
    "Radiculopathy: conservative management 4–6 weeks. If refractory, consider ESI or surgical referral.";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Symptoms {
    Asymptomatic,
    Axial,
    Radicular,
}

/// Each finding picks between a quiet and a symptomatic wording.
fn disc_verdict(finding: &str, symptoms: Symptoms) -> (Tier, &'static str) {
    let asymptomatic = symptoms == Symptoms::Asymptomatic;
    let radicular = symptoms == Symptoms::Radicular;

    match finding {
        "bulge" if asymptomatic => (
            Tier::NoFollowup,
            "Disc bulge is a normal variant in adults. No action required if asymptomatic.",
        ),
        "bulge" => (
            Tier::ShortTermFollowup,
            "Disc bulge with symptoms — correlate clinically. Conservative management (physio, analgesia).",
        ),
        "protrusion" if radicular => (
            Tier::FurtherWorkup,
            "Disc protrusion causing radiculopathy — conservative management 4–6 weeks; if no improvement, neurosurgery referral.",
        ),
        "protrusion" => (
            Tier::ShortTermFollowup,
            "Disc protrusion — correlate clinically. Conservative management if symptomatic.",
        ),
        "extrusion" if radicular => (
            Tier::FurtherWorkup,
            "Disc extrusion causing radiculopathy — neurosurgery referral. Consider urgent MRI if myelopathy suspected.",
        ),
        "extrusion" => (
            Tier::FurtherWorkup,
            "Disc extrusion — monitor; clinical correlation essential.",
        ),
        "sequestrum" => (
            Tier::FurtherWorkup,
            "Sequestrated disc — neurosurgery referral. May resolve spontaneously but surgical risk is higher.",
        ),
        "schmorl" => (
            Tier::NoFollowup,
            "Schmorl's node — normal variant in most cases. No further workup if asymptomatic.",
        ),
        "modic" if asymptomatic => (
            Tier::NoFollowup,
            "Modic changes — common degenerative finding. No action required if asymptomatic.",
        ),
        "modic" => (
            Tier::ShortTermFollowup,
            "Modic changes with pain — correlate clinically. Inflammatory type 1 may respond to anti-inflammatory therapy.",
        ),
        "facet" if asymptomatic => (
            Tier::NoFollowup,
            "Facet arthropathy — extremely common with age. No action required.",
        ),
        "facet" => (
            Tier::ShortTermFollowup,
            "Facet arthropathy with axial pain — consider physiotherapy, facet joint injections if conservative management fails.",
        ),
        "listhesis" if radicular => (
            Tier::FurtherWorkup,
            "Spondylolisthesis with radiculopathy/myelopathy — neurosurgery referral. Standing flexion/extension films to assess stability.",
        ),
        "listhesis" => (
            Tier::ShortTermFollowup,
            "Spondylolisthesis — clinical correlation. Grade I/II often managed conservatively. Standing X-rays for grading.",
        ),
        _ => (Tier::ImagingRecommended, "Clinical correlation required."),
    }
}

fn degenerative_finding(values: &FindingValues) -> Option<Outcome> {
    let symptoms = match values.text("symptoms") {
        "none" => Symptoms::Asymptomatic,
        "radicular" => Symptoms::Radicular,
        _ => Symptoms::Axial,
    };
    let (tier, recommendation) = disc_verdict(values.text("finding"), symptoms);

    let mut outcome = Outcome::new(tier, recommendation).with_notes(DISC_NOTES.iter().copied());
    if symptoms == Symptoms::Radicular {
        outcome.notes.push(RADICULOPATHY_NOTE.to_string());
    }
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_symptoms_read_as_symptomatic_but_not_radicular() {
        let (tier, text) = disc_verdict("bulge", Symptoms::Axial);
        assert_eq!(tier, Tier::ShortTermFollowup);
        assert!(text.starts_with("Disc bulge with symptoms"));

        let (tier, _) = disc_verdict("protrusion", Symptoms::Axial);
        assert_eq!(tier, Tier::ShortTermFollowup);
    }

    #[test]
    fn unknown_finding_asks_for_correlation() {
        assert_eq!(
            disc_verdict("", Symptoms::Asymptomatic),
            (Tier::ImagingRecommended, "Clinical correlation required.")
        );
    }
}
