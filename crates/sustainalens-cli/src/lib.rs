pub mod config;
pub mod error;
pub mod input;

use std::fs;
use std::io::{self, Read, Write};

use sustainalens_core::{MetricsEngine, ScoreReport};
use tracing::info;

pub use config::{CliConfig, Source};
pub use error::CliError;
pub use input::parse_document;

pub fn run(config: &CliConfig) -> Result<ScoreReport, CliError> {
    let text = match &config.input {
        Source::Stdio => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
        Source::Path(path) => fs::read_to_string(path)?,
    };

    let values = parse_document(&text)?;
    info!(records = values.len(), "input loaded");

    let engine = MetricsEngine::new(config.engine.clone());
    let report = engine.score_values(&values);

    let mut body = if config.pretty {
        serde_json::to_vec_pretty(&report)?
    } else {
        serde_json::to_vec(&report)?
    };
    body.push(b'\n');

    match &config.output {
        Source::Stdio => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
        Source::Path(path) => fs::write(path, body)?,
    }

    Ok(report)
}
