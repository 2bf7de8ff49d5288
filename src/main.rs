use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use route_linter::engine::{AnalysisOptions, run_analysis};
use route_linter::formatter::{FormattedOutput, OutputFormat};
use route_linter::suggest::{DEFAULT_THRESHOLD, FuzzyMatcher};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "route-linter")]
#[command(about = "Find backend routes nobody calls and frontend calls nobody serves", long_about = None)]
struct Cli {
    /// Root of the server-side source tree
    #[arg(long)]
    backend: PathBuf,

    /// Root of the client-side source tree
    #[arg(long)]
    frontend: PathBuf,

    /// Suggest the closest backend route for every undefined call
    #[arg(long)]
    suggest: bool,

    /// Minimum similarity score (0-100) for a suggestion to be accepted
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Additional route-linter.json to merge with the ones found in the trees
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log scanning details to stderr (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = AnalysisOptions {
        backend: cli.backend,
        frontend: cli.frontend,
        suggest: cli.suggest,
        threshold: cli.threshold,
        config_file: cli.config,
    };

    let outcome = run_analysis(&options, FuzzyMatcher::detect())?;
    FormattedOutput::new(&outcome, cli.format)?.print();

    Ok(ExitCode::SUCCESS)
}
