//! Stats file loading
//!
//! Any problem here is fatal: a missing or broken stats file means the
//! upstream build did not finish.

use super::StatsRecord;
use crate::error::ReportError;
use crate::infra::FileSystem;
use serde_json::Value;
use std::io;
use std::path::Path;

/// Read and parse the analyzer's stats file
pub fn load_stats<FS: FileSystem>(path: &Path, fs: &FS) -> Result<Vec<StatsRecord>, ReportError> {
    let contents = fs.read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ReportError::StatsNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReportError::StatsRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let value: Value = serde_json::from_str(&contents).map_err(|source| ReportError::StatsParse {
        path: path.to_path_buf(),
        source,
    })?;

    if !value.is_array() {
        return Err(ReportError::StatsNotArray {
            path: path.to_path_buf(),
            found: json_kind(&value),
        });
    }

    let records: Vec<StatsRecord> =
        serde_json::from_value(value).map_err(|source| ReportError::StatsParse {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Loaded {} stats records from {}", records.len(), path.display());
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
