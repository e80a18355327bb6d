use std::path::PathBuf;

use sustainalens_core::{CompositeWeights, EngineConfig};

use crate::error::CliError;

pub const ENV_INPUT: &str = "SUSTAINALENS_INPUT";
pub const ENV_OUTPUT: &str = "SUSTAINALENS_OUTPUT";
pub const ENV_PRETTY: &str = "SUSTAINALENS_PRETTY";
pub const ENV_WEIGHTS: &str = "SUSTAINALENS_COMPOSITE_WEIGHTS";
pub const ENV_PARALLEL: &str = "SUSTAINALENS_PARALLEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdio,
    Path(PathBuf),
}

impl Source {
    fn from_setting(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() && v != "-" => Self::Path(PathBuf::from(v)),
            _ => Self::Stdio,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub input: Source,
    pub output: Source,
    pub pretty: bool,
    pub engine: EngineConfig,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let weights = match lookup(ENV_WEIGHTS).filter(|v| !v.trim().is_empty()) {
            Some(raw) => CompositeWeights::parse(&raw)?,
            None => CompositeWeights::DEFAULT,
        };

        Ok(Self {
            input: Source::from_setting(lookup(ENV_INPUT)),
            output: Source::from_setting(lookup(ENV_OUTPUT)),
            pretty: flag(lookup(ENV_PRETTY), false),
            engine: EngineConfig {
                weights,
                parallel: flag(lookup(ENV_PARALLEL), true),
            },
        })
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    let Some(v) = value else {
        return default;
    };
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
