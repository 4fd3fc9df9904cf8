use crate::cli::GuidelinesCommand;
use crate::infra::{finding_from_assignments, parse_assignment};
use crate::render;
use acrguide::error::AppError;
use acrguide::guidelines::batch::evaluate_path;
use acrguide::guidelines::{EvaluationError, EvaluationResponse, GuidelineService};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Guideline id, e.g. fleischner_solid
    pub(crate) guideline_id: String,
    /// Finding value as key=value; repeat a key to tick several checkbox options
    #[arg(long = "value", value_parser = parse_assignment)]
    pub(crate) values: Vec<(String, String)>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Guideline id applied to every row
    pub(crate) guideline_id: String,
    /// CSV file whose headers are field ids
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the rows as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_guidelines(command: GuidelinesCommand) -> Result<(), AppError> {
    let service = GuidelineService::standard();
    match command {
        GuidelinesCommand::List => println!("{}", render::catalogue(&service.catalogue())),
        GuidelinesCommand::Show { guideline_id, json } => {
            let definition = service.describe(&guideline_id)?;
            if json {
                print_json(definition);
            } else {
                println!("{}", render::definition(definition));
            }
        }
    }
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        guideline_id,
        values,
        json,
    } = args;

    let service = GuidelineService::standard();
    let finding = finding_from_assignments(&values);

    match service.evaluate(&guideline_id, &finding) {
        Ok(outcome) if json => print_json(&EvaluationResponse {
            guideline_id,
            tier_label: outcome.tier.label(),
            outcome,
        }),
        Ok(outcome) => {
            let definition = service.describe(&guideline_id)?;
            println!("{}", definition.name);
            println!("{}", render::outcome(&outcome));
        }
        Err(EvaluationError::IncompleteFinding { .. }) => {
            println!("{}", render::INCOMPLETE_FINDING)
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        guideline_id,
        csv,
        json,
    } = args;

    let service = GuidelineService::standard();
    let rows = evaluate_path(service.registry(), &guideline_id, &csv)?;

    if json {
        print_json(&rows);
        return Ok(());
    }

    println!("{} row(s) from {}", rows.len(), csv.display());
    for row in &rows {
        println!(
            "Row {}: {}",
            row.row,
            render::outcome_line(row.outcome.as_ref())
        );
    }
    Ok(())
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}
