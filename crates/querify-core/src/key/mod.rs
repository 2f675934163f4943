//! Primary-key resolution.
//!
//! Table-name heuristics outrank explicit `PK` markers: a `*config` table
//! keyed by `parameter_key` ignores every other annotation.


use crate::model::SchemaRow;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// PrimaryKeySet
///
/// Ordered primary-key field names, in schema declaration order and with
/// the schema's spelling. Recomputed per request.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct PrimaryKeySet(Vec<String>);

impl PrimaryKeySet {
    #[must_use]
    pub const fn from_vec(keys: Vec<String>) -> Self {
        Self(keys)
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|k| k.eq_ignore_ascii_case(field.trim()))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for PrimaryKeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Resolve the primary key of `table` from its schema. Never fails; an
/// empty schema yields an empty set.
#[must_use]
pub fn resolve(schema: &[SchemaRow], table: &str) -> PrimaryKeySet {
    let table = table.trim().to_ascii_lowercase();

    let by_suffix = |suffix: &str, field: &str| {
        if table.ends_with(suffix) {
            schema.iter().find(|row| row.is_named(field))
        } else {
            None
        }
    };

    if let Some(row) = by_suffix("config", "parameter_key") {
        return std::iter::once(row.name()).collect();
    }

    if let Some(row) = by_suffix("event", "event_code") {
        return std::iter::once(row.name()).collect();
    }

    let marked: PrimaryKeySet = schema
        .iter()
        .filter(|row| row.nullable_pk.is_pk())
        .map(SchemaRow::name)
        .collect();

    if !marked.is_empty() {
        return marked;
    }

    schema.first().map(SchemaRow::name).into_iter().collect()
}
