// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the mapping pipeline against on-disk fixtures.

use std::path::{Path, PathBuf};

use bumpmap::config::ConfigError;
use bumpmap::pipeline::{run_mapping, RunError};
use bumpmap::table::TableError;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn maps_two_dies_in_config_order() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "die0.csv", "x,y,net\n0,0,VDD\n1,0,N1\n");
    write_file(dir.path(), "die1.csv", "x,y,net\n0,0,N1\n0,1,VSS\n1,1,N2\n");
    let config = write_file(
        dir.path(),
        "mapping_config.yaml",
        r#"
dies:
  - name: DIE0
    prefix: A_
    file: die0.csv
  - name: DIE1
    prefix: B_
    file: die1.csv
global_nets: [VDD, VSS]
"#,
    );

    let reports = run_mapping(&config, None).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].die, "DIE0");
    assert_eq!(reports[0].rows, 2);
    assert_eq!(reports[0].path, dir.path().join("out").join("DIE0_mapped.csv"));
    assert_eq!(reports[1].die, "DIE1");
    assert_eq!(reports[1].rows, 3);

    let die0 = std::fs::read_to_string(&reports[0].path).unwrap();
    assert_eq!(
        die0,
        "x,y,net,die,net_mapped,PIN_NUMBER\n0,0,VDD,DIE0,VDD,1\n1,0,N1,DIE0,A_N1,2\n"
    );
    // Pin numbering restarts for the second die, and its own prefix is
    // applied; a net name shared with DIE0 maps to a distinct name.
    let die1 = std::fs::read_to_string(&reports[1].path).unwrap();
    assert_eq!(
        die1,
        "x,y,net,die,net_mapped,PIN_NUMBER\n0,0,N1,DIE1,B_N1,1\n0,1,VSS,DIE1,VSS,2\n1,1,N2,DIE1,B_N2,3\n"
    );
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "die0.csv", "x,y,net,pad\n0.5,-1.25,N1,P7\n");
    let config = write_file(
        dir.path(),
        "mapping_config.yaml",
        "dies:\n  - name: DIE0\n    prefix: A_\n    file: die0.csv\n",
    );

    let first = run_mapping(&config, None).unwrap();
    let before = std::fs::read(&first[0].path).unwrap();
    let second = run_mapping(&config, None).unwrap();
    let after = std::fs::read(&second[0].path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn output_override_resolves_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "die0.csv", "x,y,net\n0,0,N1\n");
    let config = write_file(
        dir.path(),
        "mapping_config.yaml",
        "dies:\n  - name: DIE0\n    prefix: A_\n    file: die0.csv\noutput:\n  dir: ignored\n",
    );

    let reports = run_mapping(&config, Some(Path::new("alt"))).unwrap();
    assert_eq!(reports[0].path, dir.path().join("alt").join("DIE0_mapped.csv"));
    assert!(!dir.path().join("ignored").exists());
}

#[test]
fn absolute_output_override_is_used_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_file(dir.path(), "die0.csv", "x,y,net\n0,0,N1\n");
    let config = write_file(
        dir.path(),
        "mapping_config.yaml",
        "dies:\n  - name: DIE0\n    prefix: A_\n    file: die0.csv\n",
    );

    let reports = run_mapping(&config, Some(out.path())).unwrap();
    assert_eq!(reports[0].path, out.path().join("DIE0_mapped.csv"));
}

#[test]
fn empty_dies_aborts_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(dir.path(), "mapping_config.yaml", "dies: []\n");
    let err = run_mapping(&config, None).unwrap_err();
    assert!(
        matches!(err, RunError::Config(ConfigError::NoDies { .. })),
        "got {err:?}"
    );
    assert!(!dir.path().join("out").exists());
}

#[test]
fn missing_input_file_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "mapping_config.yaml",
        "dies:\n  - name: DIE0\n    prefix: A_\n    file: nope.csv\n",
    );
    let err = run_mapping(&config, None).unwrap_err();
    match err {
        RunError::InputNotFound { die, path } => {
            assert_eq!(die, "DIE0");
            assert_eq!(path, dir.path().join("nope.csv"));
        }
        other => panic!("expected InputNotFound, got {other:?}"),
    }
}

#[test]
fn missing_column_aborts_before_writing_that_die() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "die0.csv", "x,y,net\n0,0,N1\n");
    write_file(dir.path(), "die1.csv", "x,net\n0,N2\n");
    let config = write_file(
        dir.path(),
        "mapping_config.yaml",
        r#"
dies:
  - name: DIE0
    prefix: A_
    file: die0.csv
  - name: DIE1
    prefix: B_
    file: die1.csv
"#,
    );

    let err = run_mapping(&config, None).unwrap_err();
    match err {
        RunError::Table { die, err } => {
            assert_eq!(die, "DIE1");
            match err {
                TableError::MissingColumns { missing, .. } => {
                    assert_eq!(missing, vec!["y".to_string()]);
                }
                other => panic!("expected MissingColumns, got {other:?}"),
            }
        }
        other => panic!("expected Table error, got {other:?}"),
    }
    // The die that failed produced no output; the earlier die's table
    // stays on disk.
    let out = dir.path().join("out");
    assert!(out.join("DIE0_mapped.csv").exists());
    assert!(!out.join("DIE1_mapped.csv").exists());
}
