// SPDX-License-Identifier: Apache-2.0

//! Command line driver for the multi-die C4 bump net mapping flow.
//!
//! Reads a mapping config document describing the dies in a package, then
//! writes one mapped bump table per die, e.g.:
//!
//! ```shell
//! $ bumpmap-driver --config pkg/mapping_config.yaml
//! Wrote 412 rows to pkg/out/DIE0_mapped.csv
//! Wrote 388 rows to pkg/out/DIE1_mapped.csv
//! ```

mod report_cli_error;

use std::path::Path;

use clap::{Arg, ArgAction};

use bumpmap::pipeline::run_mapping;
use report_cli_error::report_cli_error_and_exit;

const DEFAULT_CONFIG: &str = "mapping_config.yaml";

fn main() {
    let _ = env_logger::try_init();

    log::info!(
        "bumpmap-driver starting; version: {}",
        env!("CARGO_PKG_VERSION")
    );

    let matches = clap::Command::new("bumpmap-driver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Maps per-die C4 bump net names for a multi-die package")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("CONFIG")
                .help("Path to the mapping config document")
                .default_value(DEFAULT_CONFIG)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("OUTPUT_DIR")
                .help("Output directory override; a relative path resolves against the config file's directory")
                .action(ArgAction::Set),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG);
    let output_override = matches.get_one::<String>("output").map(|s| Path::new(s));

    match run_mapping(Path::new(config_path), output_override) {
        Ok(reports) => {
            for report in &reports {
                println!("Wrote {} rows to {}", report.rows, report.path.display());
            }
        }
        Err(e) => {
            report_cli_error_and_exit(&e.to_string(), vec![("config", config_path)]);
        }
    }
}
