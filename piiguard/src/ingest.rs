// piiguard/src/ingest.rs
//! CSV ingestion and emission.
//!
//! The input schema is checked once, against the header row, before any record
//! is read. Output is written to a temporary sibling file and renamed into place
//! so a failed run never leaves a half-written result.

use log::{debug, info};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use piiguard_core::{Record, RedactedRecord};

/// Header of the output file, in column order.
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

const OUTPUT_TMP_SUFFIX: &str = ".tmp";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("File {} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input is missing required column '{column}' (found: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The two columns the ingestion contract requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSchema {
    pub id_column: String,
    pub payload_column: String,
}

impl InputSchema {
    /// Resolves both column names against a header row.
    fn resolve(&self, headers: &csv::StringRecord) -> Result<(usize, usize), IngestError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: column.to_string(),
                    available: headers.iter().collect::<Vec<_>>().join(", "),
                })
        };
        Ok((find(&self.id_column)?, find(&self.payload_column)?))
    }
}

/// Reads every record of `path`, in file order.
pub fn read_records(path: &Path, schema: &InputSchema) -> Result<Vec<Record>, IngestError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IngestError::InputNotFound(path.to_path_buf()),
        _ => IngestError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let read_err = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };

    // Short rows are tolerated; a missing cell reads as empty.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers = reader.headers().map_err(read_err)?.clone();
    let (id_idx, payload_idx) = schema.resolve(&headers)?;
    debug!(
        "Resolved columns: '{}' at {}, '{}' at {}.",
        schema.id_column, id_idx, schema.payload_column, payload_idx
    );

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(read_err)?;
        let record_id = row.get(id_idx).unwrap_or_default();
        let payload = row.get(payload_idx).unwrap_or_default();
        records.push(Record::parse(record_id, payload));
    }
    info!("Read {} records from {}.", records.len(), path.display());
    Ok(records)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(OUTPUT_TMP_SUFFIX);
    PathBuf::from(name)
}

fn write_tmp(tmp_path: &Path, path: &Path, results: &[RedactedRecord]) -> Result<(), IngestError> {
    let write_err = |source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(tmp_path)
        .map_err(write_err)?;
    writer.write_record(OUTPUT_HEADER).map_err(write_err)?;
    for result in results {
        let flag = if result.is_pii { "TRUE" } else { "FALSE" };
        writer
            .write_record([result.record_id.as_str(), result.payload.as_str(), flag])
            .map_err(write_err)?;
    }
    writer.flush().map_err(|source| IngestError::Io {
        path: tmp_path.to_path_buf(),
        source,
    })
}

/// Writes all results to `path` with the fixed three-column header.
///
/// On failure the temporary file is removed and `path` is left as it was.
pub fn write_results(path: &Path, results: &[RedactedRecord]) -> Result<(), IngestError> {
    let tmp_path = tmp_path_for(path);

    let outcome = write_tmp(&tmp_path, path, results).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })
    });
    if let Err(e) = outcome {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            debug!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(e);
    }

    info!("Wrote {} rows to {}.", results.len(), path.display());
    Ok(())
}
