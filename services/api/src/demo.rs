use crate::commands::print_json;
use crate::render;
use acrguide::error::AppError;
use acrguide::guidelines::{EvaluationResponse, FindingValues, GuidelineService};
use chrono::Local;
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full outcome of each scenario instead of a one-line summary.
    #[arg(long)]
    pub(crate) detailed: bool,
    /// Emit the scenario outcomes as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

/// A representative finding for one kind of guideline logic.
pub(crate) struct DemoScenario {
    pub(crate) title: &'static str,
    pub(crate) guideline_id: &'static str,
    pub(crate) values: &'static [(&'static str, &'static str)],
    pub(crate) lists: &'static [(&'static str, &'static [&'static str])],
}

impl DemoScenario {
    fn finding(&self) -> FindingValues {
        self.lists.iter().fold(
            self.values.iter().copied().collect(),
            |finding: FindingValues, (id, items)| finding.with_list(*id, items),
        )
    }
}

pub(crate) const SCENARIOS: &[DemoScenario] = &[
    DemoScenario {
        title: "Threshold cascade: 7 mm solid lung nodule, low risk",
        guideline_id: "fleischner_solid",
        values: &[("size", "7"), ("count", "single"), ("risk", "low")],
        lists: &[],
    },
    DemoScenario {
        title: "Category table: Lung-RADS part-solid nodule with growth",
        guideline_id: "lungrads",
        values: &[
            ("type", "partsolid"),
            ("size", "10"),
            ("solid_comp", "4"),
            ("new_growing", "yes"),
        ],
        lists: &[],
    },
    DemoScenario {
        title: "Points sum: TI-RADS 1.6 cm solid hypoechoic nodule",
        guideline_id: "tirads",
        values: &[
            ("size", "1.6"),
            ("composition", "2"),
            ("echogenicity", "2"),
            ("shape", "0"),
            ("margin", "0"),
            ("echogenic_foci", "0"),
        ],
        lists: &[],
    },
    DemoScenario {
        title: "Pure lookup: Bosniak III cystic renal mass",
        guideline_id: "bosniak",
        values: &[("class", "III")],
        lists: &[],
    },
    DemoScenario {
        title: "Feature counting: LI-RADS 25 mm observation with three majors",
        guideline_id: "lirads",
        values: &[
            ("aphe", "yes"),
            ("washout", "yes"),
            ("capsule", "yes"),
            ("growth", "no"),
            ("size", "25"),
        ],
        lists: &[],
    },
    DemoScenario {
        title: "Derived measurements: adrenal washout CT",
        guideline_id: "adrenal_washout",
        values: &[("unenhanced", "20"), ("enhanced", "100"), ("delayed", "40")],
        lists: &[],
    },
    DemoScenario {
        title: "Checkbox features: pancreatic cyst with two worrisome features",
        guideline_id: "pancreatic_cyst",
        values: &[("size", "2.0"), ("age", "78")],
        lists: &[("worrisome", &["thick_wall", "nodule"])],
    },
    DemoScenario {
        title: "Report string: PI-RADS 4 with PSA density",
        guideline_id: "pirads",
        values: &[
            ("zone", "pz"),
            ("t2", "3"),
            ("dwi", "3"),
            ("dce", "pos"),
            ("prost_l", "4.8"),
            ("prost_w", "4.2"),
            ("prost_h", "3.8"),
            ("psa", "7.2"),
        ],
        lists: &[],
    },
    DemoScenario {
        title: "Per-vessel accumulation: coronary calcium without a total",
        guideline_id: "cac_scoring",
        values: &[("lad", "120"), ("rca", "40")],
        lists: &[],
    },
    DemoScenario {
        title: "Region count: ASPECTS with large vessel occlusion",
        guideline_id: "aspects",
        values: &[("lvo", "yes")],
        lists: &[("regions", &["I", "M1", "M2"])],
    },
    DemoScenario {
        title: "Weighted score: ICH score with mortality table",
        guideline_id: "ich_score",
        values: &[("gcs", "10"), ("volume", "35"), ("ivh", "yes"), ("age", "70")],
        lists: &[],
    },
    DemoScenario {
        title: "Paired lookup: C-RADS colonic and extracolonic",
        guideline_id: "crads",
        values: &[("colonic", "C2"), ("extracolonic", "E3")],
        lists: &[],
    },
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = GuidelineService::standard();

    if args.json {
        let responses = SCENARIOS
            .iter()
            .map(|scenario| {
                let outcome = service.evaluate(scenario.guideline_id, &scenario.finding())?;
                Ok(EvaluationResponse {
                    guideline_id: scenario.guideline_id.to_string(),
                    tier_label: outcome.tier.label(),
                    outcome,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        print_json(&responses);
        return Ok(());
    }

    println!(
        "ACRGuide demo ({} guidelines loaded) at {}",
        service.registry().len(),
        Local::now().format("%Y-%m-%d %H:%M")
    );

    for scenario in SCENARIOS {
        let definition = service.describe(scenario.guideline_id)?;
        println!("\n{}", scenario.title);
        println!("  Guideline: {}", definition.name);

        match service.evaluate(scenario.guideline_id, &scenario.finding()) {
            Ok(outcome) if args.detailed => {
                for line in render::outcome(&outcome).lines() {
                    println!("  {line}");
                }
            }
            Ok(outcome) => println!("  {}", render::outcome_line(Some(&outcome))),
            Err(err) => println!("  {err}"),
        }
    }

    Ok(())
}
