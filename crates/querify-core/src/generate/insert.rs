use crate::generate::{FormattedGrid, field_list, value_list};

/// One `INSERT` per data row, columns in header order.
pub(super) fn statements(table: &str, grid: &FormattedGrid<'_>) -> Vec<String> {
    let fields = field_list(grid.columns.iter().copied());

    grid.rows
        .iter()
        .map(|row| format!("INSERT INTO {table} ({fields}) VALUES ({});", value_list(row)))
        .collect()
}
