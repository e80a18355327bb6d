use std::process::ExitCode;

use sustainalens_cli::{run, CliConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::from_env().and_then(|config| run(&config));
    match result {
        Ok(report) => {
            info!(
                scored = report.scored.len(),
                failed = report.failures.len(),
                "report written"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "sustainalens failed");
            ExitCode::FAILURE
        }
    }
}
