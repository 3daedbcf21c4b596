//! hullscan: scan a container image with an external vulnerability scanner
//! and gate the run on a severity threshold.

mod args;
mod run;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = args::Cli::parse();
    init_tracing(&cli.log_level);

    // All errors propagate here; the miette handler renders the diagnostic
    // and the process exits non-zero.
    run::run(cli).await
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hullscan={level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
