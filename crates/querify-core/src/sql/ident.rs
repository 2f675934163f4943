use std::{borrow::Cow, collections::HashSet, sync::LazyLock};

// Oracle reserved words (SQL Language Reference, "Oracle SQL Reserved Words").
const RESERVED_WORDS: &[&str] = &[
    "ACCESS", "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUDIT", "BETWEEN", "BY",
    "CHAR", "CHECK", "CLUSTER", "COLUMN", "COMMENT", "COMPRESS", "CONNECT", "CREATE",
    "CURRENT", "DATE", "DECIMAL", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE",
    "EXCLUSIVE", "EXISTS", "FILE", "FLOAT", "FOR", "FROM", "GRANT", "GROUP", "HAVING",
    "IDENTIFIED", "IMMEDIATE", "IN", "INCREMENT", "INDEX", "INITIAL", "INSERT", "INTEGER",
    "INTERSECT", "INTO", "IS", "LEVEL", "LIKE", "LOCK", "LONG", "MAXEXTENTS", "MINUS",
    "MLSLABEL", "MODE", "MODIFY", "NOAUDIT", "NOCOMPRESS", "NOT", "NOWAIT", "NULL", "NUMBER",
    "OF", "OFFLINE", "ON", "ONLINE", "OPTION", "OR", "ORDER", "PCTFREE", "PRIOR", "PUBLIC",
    "RAW", "RENAME", "RESOURCE", "REVOKE", "ROW", "ROWID", "ROWNUM", "ROWS", "SELECT",
    "SESSION", "SET", "SHARE", "SIZE", "SMALLINT", "START", "SUCCESSFUL", "SYNONYM", "SYSDATE",
    "TABLE", "THEN", "TO", "TRIGGER", "UID", "UNION", "UNIQUE", "UPDATE", "USER", "VALIDATE",
    "VALUES", "VARCHAR", "VARCHAR2", "VIEW", "WHENEVER", "WHERE", "WITH",
];

static RESERVED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| RESERVED_WORDS.iter().copied().collect());

/// Returns true when `name` collides with an Oracle reserved word.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name.trim().to_ascii_uppercase().as_str())
}

/// Render a field name for emission.
///
/// Reserved words are double-quoted and upper-cased; everything else is
/// emitted as declared (trimmed).
#[must_use]
pub fn quote_ident(name: &str) -> Cow<'_, str> {
    let name = name.trim();

    if is_reserved(name) {
        Cow::Owned(format!("\"{}\"", name.to_ascii_uppercase()))
    } else {
        Cow::Borrowed(name)
    }
}
