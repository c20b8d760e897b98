use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// One row of an exported centroid list. Extra columns (intensity, annotations
/// from other tools) are ignored.
#[derive(Debug, Deserialize)]
struct PeakRecord {
    mz: f64,
}

/// Reads the m/z column of a CSV peak list.
pub fn read_peak_list(path: &Path) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let mut peaks = Vec::new();
    for result in reader.deserialize::<PeakRecord>() {
        let record = result.map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        peaks.push(record.mz);
    }

    if peaks.is_empty() {
        warn!("Peak list '{}' contains no peaks.", path.display());
    }
    debug!("Read {} peak(s) from '{}'.", peaks.len(), path.display());
    Ok(peaks)
}
