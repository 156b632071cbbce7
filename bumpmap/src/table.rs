// SPDX-License-Identifier: Apache-2.0

//! Bump-table I/O: loading per-die C4 bump tables and writing the mapped
//! results.
//!
//! A bump table is delimited text with a header row. Columns `x`, `y`, and
//! `net` must be present; any further columns ride along untouched. Field
//! values are carried as uninterpreted strings, so coordinates and extra
//! columns come out byte-for-byte as they went in.

use std::path::{Path, PathBuf};

/// Columns every input table must have.
pub const REQUIRED_COLUMNS: [&str; 3] = ["x", "y", "net"];

/// Columns appended to every output table, in output order.
const OUTPUT_COLUMNS: [&str; 3] = ["die", "net_mapped", "PIN_NUMBER"];

/// One bump: the original input fields plus the derived mapping state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpRow {
    /// Original fields, in input column order.
    pub fields: Vec<String>,
    /// Mapped net name. Starts out as the unmapped name; rewritten by
    /// [`crate::netmap::apply_mapping`].
    pub net_mapped: String,
    /// Per-die pin number, 1-based; 0 until
    /// [`crate::netmap::assign_pin_numbers`] runs.
    pub pin_number: usize,
}

/// One die's bump table, in source-file row order.
#[derive(Debug)]
pub struct BumpTable {
    /// Die this table belongs to; stamped into every output row.
    pub die: String,
    /// Input column headers, in input order.
    pub headers: Vec<String>,
    pub(crate) net_column: usize,
    pub rows: Vec<BumpRow>,
}

impl BumpTable {
    /// Loads the bump table at `path` and tags it with `die_name`.
    ///
    /// Fails if any of [`REQUIRED_COLUMNS`] is absent, naming every
    /// missing column. Coordinate values and net-name content are not
    /// validated beyond column presence.
    pub fn load(path: &Path, die_name: &str) -> Result<Self, TableError> {
        let mut reader = csv::Reader::from_path(path).map_err(|err| TableError::Csv {
            path: path.to_path_buf(),
            err,
        })?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|err| TableError::Csv {
                path: path.to_path_buf(),
                err,
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut missing = Vec::new();
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == col) {
                missing.push(col.to_string());
            }
        }
        let net_column = match headers.iter().position(|h| h == "net") {
            Some(idx) if missing.is_empty() => idx,
            _ => {
                return Err(TableError::MissingColumns {
                    path: path.to_path_buf(),
                    missing,
                })
            }
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| TableError::Csv {
                path: path.to_path_buf(),
                err,
            })?;
            let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
            let net_mapped = fields[net_column].clone();
            rows.push(BumpRow {
                fields,
                net_mapped,
                pin_number: 0,
            });
        }
        Ok(BumpTable {
            die: die_name.to_string(),
            headers,
            net_column,
            rows,
        })
    }

    /// Writes the mapped table to `<dir>/<die>_mapped.csv`, creating `dir`
    /// (and parents) if absent. An existing file at that path is
    /// overwritten.
    pub fn write_mapped(&self, dir: &Path) -> Result<PathBuf, TableError> {
        let out_path = dir.join(format!("{}_mapped.csv", self.die));
        std::fs::create_dir_all(dir).map_err(|err| TableError::Write {
            path: out_path.clone(),
            err: err.into(),
        })?;
        let mut writer = csv::Writer::from_path(&out_path).map_err(|err| TableError::Write {
            path: out_path.clone(),
            err,
        })?;

        let mut header: Vec<&str> = self.headers.iter().map(|h| h.as_str()).collect();
        header.extend(OUTPUT_COLUMNS);
        writer.write_record(&header).map_err(|err| TableError::Write {
            path: out_path.clone(),
            err,
        })?;

        for row in &self.rows {
            let pin_number = row.pin_number.to_string();
            let mut record: Vec<&str> = row.fields.iter().map(|f| f.as_str()).collect();
            record.push(&self.die);
            record.push(&row.net_mapped);
            record.push(&pin_number);
            writer.write_record(&record).map_err(|err| TableError::Write {
                path: out_path.clone(),
                err,
            })?;
        }
        writer.flush().map_err(|err| TableError::Write {
            path: out_path.clone(),
            err: err.into(),
        })?;
        Ok(out_path)
    }
}

/// Errors that can arise loading or writing a bump table.
#[derive(Debug)]
pub enum TableError {
    /// The table could not be read or parsed as delimited text.
    Csv { path: PathBuf, err: csv::Error },
    /// One or more required columns are absent.
    MissingColumns {
        path: PathBuf,
        missing: Vec<String>,
    },
    /// The mapped table could not be written out.
    Write { path: PathBuf, err: csv::Error },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Csv { path, err } => {
                write!(f, "failed to read table {}: {}", path.display(), err)
            }
            TableError::MissingColumns { path, missing } => {
                write!(
                    f,
                    "table {} is missing required columns: {}",
                    path.display(),
                    missing.join(", ")
                )
            }
            TableError::Write { path, err } => {
                write!(f, "failed to write table {}: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for TableError {}
