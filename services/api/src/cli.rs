use crate::commands::{run_batch, run_evaluate, run_guidelines, BatchArgs, EvaluateArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use acrguide::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ACRGuide",
    about = "Evaluate radiology findings against published follow-up guidelines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Browse the guideline catalogue
    Guidelines {
        #[command(subcommand)]
        command: GuidelinesCommand,
    },
    /// Evaluate one finding given as key=value pairs
    Evaluate(EvaluateArgs),
    /// Evaluate every row of a CSV export against one guideline
    Batch(BatchArgs),
    /// Run a representative finding through each kind of guideline
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum GuidelinesCommand {
    /// List every guideline in catalogue order
    List,
    /// Show the fields and reference criteria of one guideline
    Show {
        /// Guideline id, e.g. fleischner_solid
        guideline_id: String,
        /// Print the definition as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Guidelines { command } => run_guidelines(command),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["acrguide-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_collects_repeated_values() {
        let cli = Cli::try_parse_from([
            "acrguide-api",
            "evaluate",
            "aspects",
            "--value",
            "regions=C",
            "--value",
            "regions=M1",
            "--value",
            "lvo=yes",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.guideline_id, "aspects");
                assert_eq!(args.values.len(), 3);
                assert!(args.json);
            }
            other => panic!("expected evaluate, got {other:?}"),
        }
    }

    #[test]
    fn malformed_value_is_rejected() {
        let err = Cli::try_parse_from(["acrguide-api", "evaluate", "bosniak", "--value", "III"])
            .expect_err("missing '='");
        assert!(err.to_string().contains("key=value"));
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["acrguide-api", "serve", "--port", "9100"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9100));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
