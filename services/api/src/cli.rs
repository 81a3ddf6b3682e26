use crate::demo::{run_dashboard, run_demo, run_recommend, DashboardArgs, DemoArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use flock_care::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Flock Care",
    about = "Member-care dashboards and mission trip intake for ministry teams",
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
    /// Print the care dashboard for a member export
    Dashboard(DashboardArgs),
    /// Recommend a mission trip service track for an occupation
    Recommend(RecommendArgs),
    /// Run an end-to-end demo over a built-in roster
    Demo(DemoArgs),
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
        Command::Dashboard(args) => run_dashboard(args),
        Command::Recommend(args) => {
            run_recommend(args);
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
