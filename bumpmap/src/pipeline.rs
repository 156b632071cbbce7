// SPDX-License-Identifier: Apache-2.0

//! The per-run pipeline: for each configured die, load its bump table,
//! rewrite the net names, number the pins, and write the mapped table.
//!
//! Dies are processed strictly sequentially in document order. The first
//! failure aborts the run; tables already written for earlier dies stay
//! on disk.

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, MappingConfig};
use crate::netmap;
use crate::table::{BumpTable, TableError};

/// Row count and destination for one die's written table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieReport {
    pub die: String,
    pub rows: usize,
    pub path: PathBuf,
}

/// Runs the whole mapping flow for the config at `config_path`.
///
/// `output_override` replaces the document's `output.dir` when given;
/// like every other relative path it resolves against the config file's
/// directory.
pub fn run_mapping(
    config_path: &Path,
    output_override: Option<&Path>,
) -> Result<Vec<DieReport>, RunError> {
    let config = MappingConfig::from_path(config_path)?;
    let out_dir = config.resolve(output_override.unwrap_or(config.output_dir.as_path()));

    let mut reports = Vec::with_capacity(config.dies.len());
    for die in &config.dies {
        let in_path = config.resolve(&die.file);
        if !in_path.exists() {
            return Err(RunError::InputNotFound {
                die: die.name.clone(),
                path: in_path,
            });
        }
        log::info!("die {}: loading {}", die.name, in_path.display());
        let mut table = BumpTable::load(&in_path, &die.name).map_err(|err| RunError::Table {
            die: die.name.clone(),
            err,
        })?;
        netmap::apply_mapping(&mut table, &die.prefix, &config.global_nets);
        netmap::assign_pin_numbers(&mut table);
        let out_path = table.write_mapped(&out_dir).map_err(|err| RunError::Table {
            die: die.name.clone(),
            err,
        })?;
        log::info!(
            "die {}: wrote {} rows to {}",
            die.name,
            table.rows.len(),
            out_path.display()
        );
        reports.push(DieReport {
            die: die.name.clone(),
            rows: table.rows.len(),
            path: out_path,
        });
    }
    Ok(reports)
}

/// Unified error for the mapping flow.
#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    /// A configured input table does not exist at its resolved path.
    InputNotFound { die: String, path: PathBuf },
    /// Loading or writing one die's table failed.
    Table { die: String, err: TableError },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Config(err) => write!(f, "{}", err),
            RunError::InputNotFound { die, path } => {
                write!(f, "input table {} for die {} not found", path.display(), die)
            }
            RunError::Table { die, err } => write!(f, "die {}: {}", die, err),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        RunError::Config(err)
    }
}
