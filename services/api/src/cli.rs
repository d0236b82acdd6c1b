use crate::render::{run_registry_listing, run_render, RegistryArgs, RenderArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use declara::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "declara",
    about = "Compose real-estate legal declarations from the command line or over HTTP",
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
    /// Fill a declaration from flags and print it, optionally exporting it to disk
    Render(RenderArgs),
    /// List the projects and usage categories declarations can reference
    Registry(RegistryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory exported declarations are written to
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Render(args) => run_render(args),
        Command::Registry(args) => run_registry_listing(args),
    }
}
