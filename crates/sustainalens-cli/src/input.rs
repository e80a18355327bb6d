use serde_json::Value;

use crate::error::CliError;

/// Accepts a JSON array of records or JSON lines.
///
/// Elements are kept as raw values so that one malformed record is reported
/// on its own instead of failing the whole document.
pub fn parse_document(text: &str) -> Result<Vec<Value>, CliError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return match serde_json::from_str::<Value>(trimmed)? {
            Value::Array(items) => Ok(items),
            _ => Err(CliError::InvalidInput("expected a JSON array".to_string())),
        };
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str::<Value>(line).map_err(|e| {
                CliError::InvalidInput(format!("line {}: {e}", n + 1))
            })
        })
        .collect()
}
