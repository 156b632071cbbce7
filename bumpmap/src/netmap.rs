// SPDX-License-Identifier: Apache-2.0

//! Net-name rewriting and per-die pin numbering.

use std::collections::HashSet;

use crate::table::BumpTable;

/// Rewrites one net name for a die.
///
/// Global nets are shared across the whole package and pass through
/// unchanged; every other net gets the die's prefix prepended by plain
/// concatenation. Membership in the global set is an exact string match:
/// no case folding, no trimming, no wildcards.
pub fn map_net(net: &str, prefix: &str, global_nets: &HashSet<String>) -> String {
    if global_nets.contains(net) {
        net.to_string()
    } else {
        format!("{prefix}{net}")
    }
}

/// Derives `net_mapped` for every row of a die's table.
pub fn apply_mapping(table: &mut BumpTable, prefix: &str, global_nets: &HashSet<String>) {
    let net_column = table.net_column;
    for row in &mut table.rows {
        row.net_mapped = map_net(&row.fields[net_column], prefix, global_nets);
    }
}

/// Assigns pin numbers 1..=N in row order. Numbering restarts for every
/// die; pin numbers are only unique within one die's table.
pub fn assign_pin_numbers(table: &mut BumpTable) {
    for (idx, row) in table.rows.iter_mut().enumerate() {
        row.pin_number = idx + 1;
    }
}
