use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::analyze::AnalyzeArgs;

#[derive(Parser)]
#[command(name = "faultscope")]
#[command(about = "Injected-fault detection report for generated test suites")]
#[command(version)]
#[command(author = "FaultScope Team")]
struct Cli {
    #[command(flatten)]
    analyze: AnalyzeArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.analyze.verbose);
    commands::analyze::execute(cli.analyze)
}

fn init_tracing(verbose: bool) {
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
