// SPDX-License-Identifier: Apache-2.0

//! The mapping config document: which dies participate in a run, which
//! nets are shared across all of them, and where the mapped tables go.
//!
//! Relative paths in the document (die input files, the output directory)
//! resolve against the config file's directory, not the process working
//! directory, so a run behaves the same no matter where it is invoked from.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Output directory used when the document has no `output.dir` key.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// One die's entry in the mapping config.
#[derive(Debug, Clone, Deserialize)]
pub struct DieConfig {
    /// Die identifier; also used in the output filename.
    pub name: String,

    /// Prepended to every non-global net name. No separator is inserted,
    /// so the prefix must already end with one if desired.
    pub prefix: String,

    /// The die's input bump table.
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct OutputSection {
    dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    dies: Option<Vec<DieConfig>>,
    global_nets: Option<Vec<String>>,
    output: Option<OutputSection>,
}

/// Parsed mapping config plus the directory it was loaded from.
#[derive(Debug)]
pub struct MappingConfig {
    /// Dies to process, in document order.
    pub dies: Vec<DieConfig>,
    /// Net names exempt from prefixing.
    pub global_nets: HashSet<String>,
    /// Output directory as written in the document (or the default);
    /// resolve with [`MappingConfig::resolve`] before use.
    pub output_dir: PathBuf,
    project_root: PathBuf,
}

impl MappingConfig {
    /// Loads and parses the mapping config at `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            err,
        })?;
        let raw: RawConfig = serde_yaml::from_str(&text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            err,
        })?;
        let dies = raw.dies.unwrap_or_default();
        if dies.is_empty() {
            return Err(ConfigError::NoDies {
                path: path.to_path_buf(),
            });
        }
        let global_nets = raw.global_nets.unwrap_or_default().into_iter().collect();
        let output_dir = raw
            .output
            .and_then(|o| o.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        log::info!(
            "loaded mapping config {}: {} dies",
            path.display(),
            dies.len()
        );
        Ok(MappingConfig {
            dies,
            global_nets,
            output_dir,
            project_root: project_root_of(path),
        })
    }

    /// Resolves a path from the document against the config file's
    /// directory; absolute paths are used as-is.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

fn project_root_of(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Errors that can arise loading the mapping config document.
#[derive(Debug)]
pub enum ConfigError {
    /// The document could not be read.
    Read { path: PathBuf, err: std::io::Error },
    /// The document is not YAML of the expected shape.
    Parse {
        path: PathBuf,
        err: serde_yaml::Error,
    },
    /// The `dies` section is missing or empty.
    NoDies { path: PathBuf },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, err } => {
                write!(f, "failed to read config {}: {}", path.display(), err)
            }
            ConfigError::Parse { path, err } => {
                write!(f, "failed to parse config {}: {}", path.display(), err)
            }
            ConfigError::NoDies { path } => {
                write!(
                    f,
                    "dies section in config {} is missing or empty",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
