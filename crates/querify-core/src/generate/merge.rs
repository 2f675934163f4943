use crate::{
    format::{SqlLiteral, is_write_once},
    generate::{FormattedGrid, field_list},
    key::PrimaryKeySet,
    model::FieldSpec,
    sql::quote_ident,
    types::TypeKind,
};
use std::fmt::Write as _;

const TARGET: &str = "tgt";
const SOURCE: &str = "src";

/// One `MERGE` whose source is a `UNION ALL` of every data row.
pub(super) fn compact(table: &str, grid: &FormattedGrid<'_>, keys: &PrimaryKeySet) -> String {
    let selects: Vec<String> = grid
        .rows
        .iter()
        .map(|row| select_from_dual(grid, row))
        .collect();

    statement(table, grid, keys, &selects)
}

/// One `MERGE` per data row.
pub(super) fn classic(table: &str, grid: &FormattedGrid<'_>, keys: &PrimaryKeySet) -> Vec<String> {
    grid.rows
        .iter()
        .map(|row| statement(table, grid, keys, &[select_from_dual(grid, row)]))
        .collect()
}

/// A numeric primary key named `id` is assigned by the database and never
/// inserted by a MERGE.
fn is_surrogate_key(field: &FieldSpec, keys: &PrimaryKeySet) -> bool {
    field.row.is_named("id") && field.ty.kind == TypeKind::Number && keys.contains(field.name())
}

fn statement(
    table: &str,
    grid: &FormattedGrid<'_>,
    keys: &PrimaryKeySet,
    selects: &[String],
) -> String {
    let mut sql = format!("MERGE INTO {table} {TARGET}\nUSING (\n    ");
    sql.push_str(&selects.join("\n    UNION ALL\n    "));

    let _ = write!(sql, "\n) {SOURCE}\nON ({})", on_clause(keys));

    let set = update_set(grid, keys);
    if !set.is_empty() {
        let _ = write!(sql, "\nWHEN MATCHED THEN UPDATE SET {set}");
    }

    let inserted: Vec<&FieldSpec> = grid
        .columns
        .iter()
        .copied()
        .filter(|field| !is_surrogate_key(field, keys))
        .collect();
    let sourced = inserted
        .iter()
        .map(|field| format!("{SOURCE}.{}", quote_ident(field.name())))
        .collect::<Vec<_>>()
        .join(", ");

    let _ = write!(
        sql,
        "\nWHEN NOT MATCHED THEN INSERT ({}) VALUES ({sourced});",
        field_list(inserted)
    );

    sql
}

fn select_from_dual(grid: &FormattedGrid<'_>, row: &[SqlLiteral]) -> String {
    let items = grid
        .columns
        .iter()
        .zip(row)
        .map(|(field, value)| format!("{value} AS {}", quote_ident(field.name())))
        .collect::<Vec<_>>()
        .join(", ");

    format!("SELECT {items} FROM DUAL")
}

fn on_clause(keys: &PrimaryKeySet) -> String {
    keys.iter()
        .map(|key| {
            let key = quote_ident(key);
            format!("{TARGET}.{key} = {SOURCE}.{key}")
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

// Keys and write-once audit fields never change on update.
fn update_set(grid: &FormattedGrid<'_>, keys: &PrimaryKeySet) -> String {
    grid.columns
        .iter()
        .filter(|field| !keys.contains(field.name()) && !is_write_once(field.name()))
        .map(|field| {
            let name = quote_ident(field.name());
            format!("{TARGET}.{name} = {SOURCE}.{name}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
