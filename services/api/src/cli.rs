use crate::demo::{
    run_demo, run_export, run_list, run_stats, DemoArgs, ExportArgs, ListArgs, StatsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use guest_planner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wedding Guest Planner",
    about = "Grade, review, and export a wedding guest list from the command line",
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
    /// Print guest list statistics
    Stats(StatsArgs),
    /// Print a filtered and sorted guest list
    List(ListArgs),
    /// Write the guest list spreadsheet export
    Export(ExportArgs),
    /// Run the full planner flow over the built-in sample list
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
    /// Seed the in-memory store with the sample list for the `demo` owner
    #[arg(long)]
    pub(crate) seed_sample: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Stats(args) => run_stats(args),
        Command::List(args) => run_list(args),
        Command::Export(args) => run_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
