use crate::{
    MAX_IN_LIST_EXPRESSIONS,
    config::CompileOptions,
    format::{SqlLiteral, SystemField},
    generate::FormattedGrid,
    key::PrimaryKeySet,
    model::TableSchema,
    sql::quote_ident,
};
use std::collections::HashSet;

const UPDATED_TIME: &str = "updated_time";

/// Trailing `SELECT`s that let an operator re-query what was just written.
pub(super) fn block(
    table: &str,
    schema: &TableSchema,
    grid: &FormattedGrid<'_>,
    keys: &PrimaryKeySet,
    options: &CompileOptions,
) -> Vec<String> {
    let mut lines = Vec::new();

    if schema.contains(UPDATED_TIME) {
        lines.push(format!(
            "SELECT COUNT(*) FROM {table} WHERE {} >= SYSDATE - INTERVAL '{}' MINUTE;",
            quote_ident(UPDATED_TIME),
            options.verify_window_minutes
        ));
    }

    lines.extend(select_written(table, grid, keys));

    lines
}

// `SELECT *` over the distinct, non-null key tuples present in the data.
// Computed keys carry no data and are left out of the tuple.
fn select_written(table: &str, grid: &FormattedGrid<'_>, keys: &PrimaryKeySet) -> Option<String> {
    let key_columns: Vec<(String, usize)> = keys
        .iter()
        .filter_map(|key| {
            let index = grid.position(key)?;
            let field = grid.columns.get(index)?;

            SystemField::detect(field.name(), field.ty.kind, table)
                .is_none()
                .then(|| (quote_ident(field.name()).into_owned(), index))
        })
        .collect();

    if key_columns.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    let tuples: Vec<String> = grid
        .rows
        .iter()
        .filter_map(|row| {
            let values = key_columns
                .iter()
                .map(|(_, index)| row.get(*index).map(SqlLiteral::as_str))
                .collect::<Option<Vec<_>>>()?;

            if values.contains(&SqlLiteral::NULL) {
                return None;
            }

            let tuple = parenthesize(&values);
            seen.insert(tuple.clone()).then_some(tuple)
        })
        .collect();

    if tuples.is_empty() {
        return None;
    }

    let names: Vec<&str> = key_columns.iter().map(|(name, _)| name.as_str()).collect();
    let target = parenthesize(&names);

    let predicate = tuples
        .chunks(MAX_IN_LIST_EXPRESSIONS)
        .map(|group| format!("{target} IN ({})", group.join(", ")))
        .collect::<Vec<_>>()
        .join(" OR ");

    Some(format!("SELECT * FROM {table} WHERE {predicate};"))
}

// A single item stands alone; several become a `( .. )` tuple.
fn parenthesize(items: &[&str]) -> String {
    match items {
        [single] => (*single).to_string(),
        many => format!("({})", many.join(", ")),
    }
}
