use crate::demo::{run_demo, run_landing, run_schema, run_submit, SchemaArgs, SubmitArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use edu_feedback::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Graduate Feedback Portal",
    about = "Serve and exercise the employer and educational feedback forms",
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
    /// Print the landing page content
    Landing,
    /// Print the fields of a form
    Schema(SchemaArgs),
    /// Validate and submit a form from the command line
    Submit(SubmitArgs),
    /// Walk through the reference submissions for both forms
    Demo,
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
        Command::Landing => {
            run_landing();
            Ok(())
        }
        Command::Schema(args) => {
            run_schema(args);
            Ok(())
        }
        Command::Submit(args) => run_submit(args),
        Command::Demo => run_demo(),
    }
}
