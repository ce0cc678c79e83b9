use crate::commands::{run_predict, run_selection, PredictArgs, SelectionCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use college_predictor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "College Predictor",
    about = "Predict JEE college admissions and manage a shortlist from the command line",
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
    /// Run a single prediction and print one page of results
    Predict(PredictArgs),
    /// Inspect or change saved favorites and the comparison list
    Selection {
        #[command(subcommand)]
        command: SelectionCommand,
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
    /// Skip the remote prediction service and score the local catalogue only
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args).await,
        Command::Selection { command } => run_selection(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_serves() {
        let cli = Cli::try_parse_from(["college-predictor"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn predict_arguments_parse() {
        let cli = Cli::try_parse_from([
            "college-predictor",
            "predict",
            "--rank",
            "1000",
            "--category",
            "OBC-NCL",
            "--sort",
            "applied-cutoff",
            "--ascending",
            "--page",
            "2",
            "--offline",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Predict(args)) => {
                assert_eq!(args.rank, "1000");
                assert_eq!(args.category, "OBC-NCL");
                assert_eq!(args.page, 2);
                assert!(args.ascending);
                assert!(args.offline);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn selection_subcommands_parse() {
        let cli = Cli::try_parse_from(["college-predictor", "selection", "compare", "iit-delhi-cse"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Selection {
                command: SelectionCommand::Compare { ref id }
            }) if id == "iit-delhi-cse"
        ));
    }
}
