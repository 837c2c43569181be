//! Grid table rendering for terminal output.

use comfy_table::presets::ASCII_FULL;
use comfy_table::*;

use crate::record::{Record, Value};

/// Render records as a grid table.
///
/// Columns are the union of all field names in order of first appearance.
/// Numeric columns are right-aligned; missing cells are left blank. Returns
/// an empty string for an empty dataset.
///
/// ```text
/// +------+--------+
/// | name | salary |
/// +===============+
/// | john |    100 |
/// +------+--------+
/// ```
pub fn render_grid(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut names: Vec<&str> = Vec::new();
    for record in records {
        for field in record.keys() {
            if !names.contains(&field.as_str()) {
                names.push(field);
            }
        }
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(names.clone());
    for record in records {
        table.add_row(
            names
                .iter()
                .map(|name| Cell::new(record.get(*name).map(cell_text).unwrap_or_default()))
                .collect::<Vec<_>>(),
        );
    }

    for (idx, name) in names.iter().enumerate() {
        let numeric = records
            .iter()
            .filter_map(|record| record.get(*name))
            .all(Value::is_number);
        if let (true, Some(column)) = (numeric, table.column_mut(idx)) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

// One line per row: embedded newlines are shown escaped.
fn cell_text(value: &Value) -> String {
    value.to_string().replace('\n', "\\n")
}
