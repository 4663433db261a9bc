// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain-text preview of the audit rows.

use poleline_engine::AuditRow;

const HEADERS: [&str; 5] = ["LINE", "OLD_NAME", "NEW_NAME", "LON", "LAT"];

/// Render rows as a left-aligned, space-separated table with a header.
pub fn render_audit_table(rows: &[AuditRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.zone.clone(),
                row.original_label.clone(),
                row.new_label.clone(),
                format!("{:.6}", row.longitude),
                format!("{:.6}", row.latitude),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    push_line(&mut table, HEADERS.iter().copied(), &widths);
    for row in &cells {
        push_line(&mut table, row.iter().map(String::as_str), &widths);
    }
    table
}

fn push_line<'c>(table: &mut String, cells: impl Iterator<Item = &'c str>, widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    table.push_str(line.join("  ").trim_end());
    table.push('\n');
}
