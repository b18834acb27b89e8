//! logsift entry point: parses CLI and runs one fetch-filter-append cycle.
//! The main function is intentionally thin and delegates to the runtime in `app`.

mod app;
mod block;
mod cli;
mod filter;
mod log;
mod report;
mod style;

use std::process::ExitCode;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logsift=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli::parse();
    app::run(config).await
}
