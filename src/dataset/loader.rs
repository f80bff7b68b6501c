//! Startup loading of the reference data file.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::DatasetError;

use super::types::Record;

/// Read and parse the dataset file at `path`.
///
/// The file handle is dropped before returning, on success and on error.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, DatasetError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening dataset file");

    let file = File::open(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<Record> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    warn_on_duplicate_codes(&records);

    info!(
        path = %path.display(),
        provinces = records.len(),
        "Dataset loaded"
    );

    Ok(records)
}

/// Parse a dataset from an in-memory JSON document.
pub fn parse_records(json: &str) -> Result<Vec<Record>, serde_json::Error> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    warn_on_duplicate_codes(&records);
    Ok(records)
}

/// Lookups return the first match, so later duplicates are unreachable.
fn warn_on_duplicate_codes(records: &[Record]) {
    let mut seen = HashSet::new();
    for record in records {
        let code = record.tinh.mahc().to_string();
        if !seen.insert(code.clone()) {
            warn!(mahc = %code, "Duplicate province code; only the first entry is reachable");
        }
    }
}
